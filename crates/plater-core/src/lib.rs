//! Plater Core - the boilerplate generation engine.
//!
//! This crate implements the generation pipeline behind the `plater` tool:
//! an ordered list of repository *parsers* enriches a caller-defined
//! configuration, then a set of *templates* is applied against that
//! configuration to write, skip, patch or delete files in the destination
//! directory.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            plater-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        generate() orchestrator          │
//! │   parsers first, then template batches  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Ports (Parser, Generator,          │
//! │           TemplateSource)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    plater-adapters (infrastructure)     │
//! │  (DirSource, MemorySource, ecosystem    │
//! │   parsers, embedded builtin templates)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The engine never inspects the configuration's shape: it is generic over any
//! `serde::Serialize` type, mutated by parsers through `&mut C` and handed to
//! templates and removal predicates by shared reference.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use plater_core::prelude::*;
//!
//! #[derive(serde::Serialize)]
//! struct Config { name: String }
//!
//! # fn run(source: std::sync::Arc<dyn TemplateSource>) -> EngineResult<()> {
//! let templates = vec![
//!     Template::new("README.md")
//!         .globs(globs_with_part("readme.md"))
//!         .delimiters(Delimiters::bracket()),
//! ];
//! let batch = TemplateBatch::new(source, templates);
//!
//! let parsers: Vec<Box<dyn Parser<Config>>> = vec![];
//! let generators: Vec<Box<dyn Generator<Config>>> = vec![Box::new(batch)];
//! let config = generate(
//!     std::path::Path::new("."),
//!     Config { name: "demo".into() },
//!     &parsers,
//!     &generators,
//! )?;
//! # Ok(()) }
//! ```

// Value types: delimiters, policies, template descriptors
pub mod domain;

// Orchestration: ports, rendering, template application, patches
pub mod application;

// Standalone helpers shared with collaborators
pub mod merge;
pub mod validate;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Generator, Parser, TemplateBatch, TemplateSource, apply_patches, apply_template, generate,
    };
    pub use crate::domain::{
        Delimiters, GeneratePolicy, PART_EXTENSION, PATCH_EXTENSION, TMPL_EXTENSION, Template,
        globs_with_part,
    };
    pub use crate::error::{EngineError, EngineResult, ErrorList};
    pub use crate::merge::merge_values;
    pub use crate::validate::validate;
}

pub use application::{Generator, Parser, TemplateBatch, TemplateSource, generate};
pub use domain::{Delimiters, GeneratePolicy, Template};
pub use error::{EngineError, EngineResult};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
