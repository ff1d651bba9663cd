//! Override-wins deep merge of structured values.
//!
//! Lets local, developer-authored override documents customize generated
//! values (typically Helm chart values) without forking the whole chart.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// Merge all input override files into one map.
///
/// `base` is serialized to a generic key/value tree (structural, not typed)
/// as the starting point. Each override path is read as a YAML document and
/// deep-merged into the accumulator with "override wins" semantics: scalar
/// and map values from the override replace or extend the base. Overrides
/// apply first-to-last, so later files win over earlier ones.
///
/// A missing override file is not an error: it is treated as an empty
/// override.
pub fn merge_values<B: Serialize>(
    base: &B,
    overrides: &[impl AsRef<Path>],
) -> EngineResult<Map<String, Value>> {
    let mut acc = match serde_json::to_value(base) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    for path in overrides {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => return Err(EngineError::io(format!("read '{}'", path.display()), err)),
        };

        let document: Value =
            serde_yaml::from_str(&content).map_err(|err| EngineError::Merge {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;
        match document {
            Value::Object(map) => {
                for (key, value) in map {
                    match acc.get_mut(&key) {
                        Some(slot) => deep_merge(slot, value),
                        None => {
                            acc.insert(key, value);
                        }
                    }
                }
            }
            // an empty file deserializes to null and overrides nothing
            Value::Null => {}
            _ => {
                return Err(EngineError::Merge {
                    path: path.display().to_string(),
                    reason: "override document is not a mapping".into(),
                });
            }
        }
    }
    Ok(acc)
}

/// Merge `src` into `dst`, `src` winning on conflicts.
///
/// Maps merge key by key; any other pair replaces the destination wholesale.
/// A null source value never clobbers existing data.
pub(crate) fn deep_merge(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, value) in src_map {
                match dst_map.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        dst_map.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (slot, value) => *slot = value,
    }
}
