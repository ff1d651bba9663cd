//! Repository parsers enriching [`ProjectConfig`](crate::config::ProjectConfig).
//!
//! Each parser inspects one aspect of the destination repository. They are
//! cheap no-ops when their ecosystem file is absent, so the full pipeline can
//! always run.

mod git;
mod helm;
mod node;

pub use git::GitParser;
pub use helm::HelmParser;
pub use node::NodeParser;

use plater_core::prelude::Parser;

use crate::config::ProjectConfig;

/// The standard parser pipeline, in execution order.
///
/// [`HelmParser`] serializes the whole accumulated configuration into the
/// `helm` language entry, so it must stay last.
pub fn pipeline() -> Vec<Box<dyn Parser<ProjectConfig>>> {
    vec![
        Box::new(GitParser),
        Box::new(NodeParser),
        Box::new(HelmParser),
    ]
}
