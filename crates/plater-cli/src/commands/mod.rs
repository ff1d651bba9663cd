//! Command handlers.

pub mod generate;
pub mod validate;
