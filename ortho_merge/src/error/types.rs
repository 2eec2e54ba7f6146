//! Error enums for structures, accessors, conversions, and merge calls.

use figment::Error as FigmentError;
use thiserror::Error;

/// Failure raised by a getter or setter.
///
/// Reading a source property whose getter fails is recoverable during a
/// merge: the failure is logged and the key is skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("accessor failed for '{key}': {message}")]
pub struct AccessorError {
    /// Key whose accessor failed. Empty when raised outside a property read.
    pub key: String,
    /// Human-readable explanation.
    pub message: String,
}

/// Errors raised when a structure would be left in an invalid shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum StructureError {
    /// Linking the prototype would make the fallback chain loop.
    #[error("cyclic prototype chain")]
    CyclicPrototype,
}

/// Errors raised while converting structures into serialisable documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// The structure references itself and has no tree representation.
    #[error("circular structure at '{path}' cannot be serialised")]
    Circular {
        /// Dotted path of the key that closes the cycle.
        path: String,
    },

    /// A getter failed while reading a value for serialisation.
    #[error(transparent)]
    Accessor(#[from] AccessorError),
}

/// Errors that can occur while merging structures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// The merge was invoked without any source structure.
    #[error("merge requires at least one source structure")]
    NoSources,

    /// A merge argument was not a keyed structure.
    #[error("merge argument {index} must be a structure, found {kind}")]
    NotAStructure {
        /// Zero-based position of the offending argument.
        index: usize,
        /// Name of the value kind that was supplied.
        kind: &'static str,
    },

    /// A user hook failed; the original error is carried untouched.
    #[error("{0}")]
    Hook(Box<dyn std::error::Error + Send + Sync>),

    /// Options could not be gathered from their providers.
    #[error("failed to load merge options: {0}")]
    Options(#[from] Box<FigmentError>),

    /// A merged structure could not be converted.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A structure operation was rejected.
    #[error(transparent)]
    Structure(#[from] StructureError),
}
