//! Engine orchestration: ports, rendering, template application and the
//! top-level `generate` entry point.

pub mod ports;

mod apply;
mod generate;
mod patch;
pub(crate) mod render;

pub use apply::apply_template;
pub use generate::{TemplateBatch, generate};
pub use patch::apply_patches;
pub use ports::{Generator, Parser, TemplateSource};
