//! Deep merging of keyed structures with hooks and accessor fusion.
//!
//! `ortho_merge` builds a new [`Structure`] from any number of source
//! structures without modifying them. Nested structures are merged
//! recursively, sequences can be replaced, appended, prepended,
//! de-duplicated, and sorted, accessor properties are carried over as
//! getter/setter pairs, circular references are preserved, and prototype
//! layers are merged alongside the own keys.
//!
//! ```
//! use ortho_merge::{MergeOptions, Structure, Value};
//! use serde_json::json;
//!
//! let base = Structure::from_json(json!({ "a": [1, 1], "nested": { "x": 1 } }))
//!     .ok_or("not an object")?;
//! let next = Structure::from_json(json!({ "a": [1, 2], "nested": { "y": 2 } }))
//!     .ok_or("not an object")?;
//!
//! let merged = MergeOptions::new()
//!     .append_arrays(true)
//!     .dedup_arrays(true)
//!     .into_merger()
//!     .merge(&[base, next])?;
//!
//! assert_eq!(
//!     Value::from(merged).to_json()?,
//!     json!({ "a": [1, 2], "nested": { "x": 1, "y": 2 } }),
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Hooks registered on [`MergeOptions`] can veto keys, replace values before
//! or after they are combined, and decide what a circular reference
//! resolves to. Options may also be loaded from TOML, JSON, or environment
//! variables through [`MergeOptions::load_layered`].

pub mod descriptor;
mod engine;
mod error;
pub mod hooks;
pub mod key_set;
mod merger;
mod options;
mod structure;
mod value;

pub use descriptor::{descriptor_to_property, is_property_descriptor, is_structure};
pub use error::{AccessorError, ConversionError, MergeError, MergeResult, StructureError};
pub use hooks::{HookResult, KeyContext, MergedContext};
pub use key_set::KeySetMode;
pub use merger::{Merger, merge, merge_values};
pub use options::{
    ArrayCombine, ArrayFinalize, ArraySort, Comparator, DEFAULT_ENV_PREFIX, MergeOptions,
    MergeSettings, PrototypeMode,
};
pub use structure::{Callable, Property, PropertySlot, Structure};
pub use value::Value;
