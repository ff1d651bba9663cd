//! Template source implementations.

mod dir;
mod memory;

pub use dir::DirSource;
pub use memory::MemorySource;
