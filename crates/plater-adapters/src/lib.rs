//! Infrastructure adapters for Plater.
//!
//! This crate implements the ports defined in `plater-core::application::ports`
//! for the concrete `plater` product: template sources (directory-backed,
//! in-memory, embedded builtin assets), the `ProjectConfig` model with its
//! YAML persistence and JSON schema, and the per-ecosystem repository parsers.

pub mod builtin;
pub mod config;
pub mod parsers;
pub mod source;

// Re-export commonly used adapters
pub use config::ProjectConfig;
pub use source::{DirSource, MemorySource};
