//! Value types describing what to generate and how.
//!
//! Everything in here is plain data: delimiter pairs, generation policies and
//! template descriptors. The logic that consumes them lives in
//! [`crate::application`].

mod delimiters;
mod policy;
mod template;

pub use delimiters::Delimiters;
pub use policy::GeneratePolicy;
pub use template::{
    PART_EXTENSION, PATCH_EXTENSION, RemoveFn, TMPL_EXTENSION, Template, globs_with_part,
};
