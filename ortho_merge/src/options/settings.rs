//! Resolved, immutable merge settings.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::hooks::Hooks;
use crate::key_set::KeySetMode;
use crate::value::Value;

/// Ordering used by custom sorts.
///
/// The comparator must describe a total order. Sorting with one that does
/// not may panic.
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// How an incoming sequence combines with a sequence already in the target.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum ArrayCombine {
    /// The incoming sequence replaces the existing one.
    #[default]
    Replace,
    /// Existing elements followed by incoming elements.
    Append,
    /// Incoming elements followed by existing elements.
    Prepend,
}

impl ArrayCombine {
    /// Combine `existing` with `incoming`.
    #[must_use]
    pub fn combine(self, existing: &[Value], incoming: Vec<Value>) -> Vec<Value> {
        match self {
            Self::Replace => incoming,
            Self::Append => existing.iter().cloned().chain(incoming).collect(),
            Self::Prepend => incoming.into_iter().chain(existing.iter().cloned()).collect(),
        }
    }
}

/// Whether and how merged sequences are sorted.
#[derive(Clone, Default)]
pub enum ArraySort {
    /// Sequences keep their combined order.
    #[default]
    Disabled,
    /// Sorted with [`Value::text_cmp`].
    Natural,
    /// Sorted with a caller-supplied comparator.
    Custom(Comparator),
}

impl ArraySort {
    /// Returns `true` unless sorting is disabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Sort `items` in place. The sort is stable.
    ///
    /// # Panics
    ///
    /// May panic when a [`ArraySort::Custom`] comparator is not a total
    /// order. The built-in ordering never panics.
    pub fn apply(&self, items: &mut [Value]) {
        match self {
            Self::Disabled => {}
            Self::Natural => items.sort_by(Value::text_cmp),
            Self::Custom(comparator) => items.sort_by(|a, b| comparator(a, b)),
        }
    }
}

impl fmt::Debug for ArraySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Natural => f.write_str("Natural"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<bool> for ArraySort {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Natural } else { Self::Disabled }
    }
}

impl<'de> Deserialize<'de> for ArraySort {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(Self::from)
    }
}

/// What happens to the prototype layers of the sources.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum PrototypeMode {
    /// Prototypes are merged and linked as the result's prototype.
    #[default]
    Link,
    /// Prototypes are merged and their keys copied onto the result.
    Hoist,
    /// Prototypes are ignored.
    Skip,
}

/// When de-duplication and sorting of combined sequences happen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArrayFinalize {
    /// While the key is merged, so an `after_each` hook sees the final
    /// contents.
    Immediate,
    /// Queued by `(target, key)` and applied once the level is built.
    Deferred,
}

/// Settings resolved from [`crate::MergeOptions`] over the defaults.
#[derive(Clone, Debug, Default)]
pub struct MergeSettings {
    /// Exclusive allow-list; empty means every key.
    pub only_keys: Vec<String>,
    /// Deny-list applied after every other key selection.
    pub skip_keys: Vec<String>,
    /// Key-set derivation across sources.
    pub key_set: KeySetMode,
    /// Flatten getters into plain values.
    pub invoke_getters: bool,
    /// Drop setters instead of copying them.
    pub skip_setters: bool,
    /// Sequence combination mode.
    pub combine: ArrayCombine,
    /// Remove repeated elements from merged sequences.
    pub dedup: bool,
    /// Sorting of merged sequences.
    pub sort: ArraySort,
    /// Visit inherited enumerable keys as if they were own keys.
    pub hoist_enumerable: bool,
    /// Prototype handling.
    pub prototype: PrototypeMode,
    /// Configured hooks.
    pub hooks: Hooks,
}

impl MergeSettings {
    /// The finalisation strategy, fixed for a whole invocation.
    #[must_use]
    pub const fn finalize(&self) -> ArrayFinalize {
        if self.hooks.has_after_each() {
            ArrayFinalize::Immediate
        } else {
            ArrayFinalize::Deferred
        }
    }
}
