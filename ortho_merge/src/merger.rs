//! Public merge entry points.

use crate::engine::MergeEngine;
use crate::error::{MergeError, MergeResult};
use crate::options::{MergeOptions, MergeSettings};
use crate::structure::Structure;
use crate::value::Value;

/// A merge function bound to a set of options.
///
/// A `Merger` can be reused for any number of merges. Each call to
/// [`Merger::merge`] is an independent invocation with its own circular
/// reference map and deferred queues, so a shared `Merger` may be used from
/// several threads at once.
///
/// # Examples
///
/// ```
/// use ortho_merge::{MergeOptions, Merger, Structure};
///
/// let merger = Merger::new(MergeOptions::new().append_arrays(true));
/// let a = Structure::new().with("tags", vec!["x"]);
/// let b = Structure::new().with("tags", vec!["y"]);
/// let merged = merger.merge(&[a, b])?;
/// assert_eq!(merged.get("tags")?.map(|v| v.to_json()).transpose()?, Some(serde_json::json!(["x", "y"])));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Merger {
    options: MergeOptions,
    settings: MergeSettings,
}

impl Merger {
    /// Bind `options`, resolved over the defaults.
    #[must_use]
    pub fn new(options: MergeOptions) -> Self {
        let settings = options.resolve();
        Self { options, settings }
    }

    /// The resolved settings used by this merger.
    #[must_use]
    pub const fn settings(&self) -> &MergeSettings {
        &self.settings
    }

    /// A new merger whose options are `overrides` layered over this one's.
    #[must_use]
    pub fn layer(&self, overrides: MergeOptions) -> Self {
        Self::new(self.options.clone().layer(overrides))
    }

    /// Merge `sources` left to right into a new structure. The sources are
    /// not modified.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::NoSources`] for an empty slice, and propagates
    /// hook failures and prototype errors unchanged.
    pub fn merge(&self, sources: &[Structure]) -> MergeResult<Structure> {
        MergeEngine::new(&self.settings).run(sources)
    }

    /// Merge dynamically typed values, each of which must be a structure.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::NotAStructure`] naming the first argument that
    /// is not a structure, plus every error [`Merger::merge`] can return.
    pub fn merge_values(&self, values: &[Value]) -> MergeResult<Structure> {
        let sources = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_structure()
                    .cloned()
                    .ok_or(MergeError::NotAStructure {
                        index,
                        kind: value.kind(),
                    })
            })
            .collect::<MergeResult<Vec<_>>>()?;
        self.merge(&sources)
    }
}

impl MergeOptions {
    /// Bind these options into a reusable [`Merger`].
    #[must_use]
    pub fn into_merger(self) -> Merger {
        Merger::new(self)
    }
}

impl From<MergeOptions> for Merger {
    fn from(options: MergeOptions) -> Self {
        Self::new(options)
    }
}

/// Merge `sources` with default settings.
///
/// Scalars are taken from the last source that defines them, sequences are
/// replaced, and nested structures are merged recursively into new
/// structures.
///
/// # Examples
///
/// ```
/// use ortho_merge::{Structure, merge};
///
/// let defaults = Structure::new().with("port", 80).with("host", "localhost");
/// let overrides = Structure::new().with("port", 8080);
/// let merged = merge(&[defaults, overrides])?;
/// assert_eq!(merged.get("port")?.and_then(|v| v.as_f64()), Some(8080.0));
/// assert_eq!(merged.get("host")?.and_then(|v| v.as_str().map(str::to_owned)), Some("localhost".to_owned()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`MergeError::NoSources`] for an empty slice.
pub fn merge(sources: &[Structure]) -> MergeResult<Structure> {
    MergeEngine::new(&MergeSettings::default()).run(sources)
}

/// [`merge`] over dynamically typed values.
///
/// # Errors
///
/// Returns [`MergeError::NotAStructure`] when an argument is not a
/// structure, or [`MergeError::NoSources`] for an empty slice.
pub fn merge_values(values: &[Value]) -> MergeResult<Structure> {
    Merger::default().merge_values(values)
}
