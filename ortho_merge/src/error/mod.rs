//! Error types produced while building structures and merging them.

mod constructors;
mod types;

pub use types::{AccessorError, ConversionError, MergeError, StructureError};

/// Result alias used throughout the crate.
pub type MergeResult<T> = Result<T, MergeError>;
