//! Merge options: the partial configuration record and its resolution.
//!
//! [`MergeOptions`] mirrors the flat options record accepted by the merge
//! entry point. Every field is optional so records can be layered, and the
//! record deserialises from camelCase keys (snake_case is accepted too), which
//! lets it be loaded from TOML, JSON, or environment variables through
//! [`figment`]. Unknown keys are ignored. [`MergeOptions::resolve`] collapses
//! the boolean families into the enums held by [`MergeSettings`].

mod load;
mod settings;

pub use load::DEFAULT_ENV_PREFIX;

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;

pub use settings::{
    ArrayCombine, ArrayFinalize, ArraySort, Comparator, MergeSettings, PrototypeMode,
};

use crate::hooks::{HookResult, Hooks, KeyContext, MergedContext};
use crate::key_set::KeySetMode;
use crate::value::Value;

/// Partial merge configuration.
///
/// # Examples
///
/// ```
/// use ortho_merge::{ArrayCombine, MergeOptions};
///
/// let settings = MergeOptions::new()
///     .append_arrays(true)
///     .prepend_arrays(true)
///     .dedup_arrays(true)
///     .resolve();
/// assert_eq!(settings.combine, ArrayCombine::Append);
/// assert!(settings.dedup);
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergeOptions {
    #[serde(alias = "only_keys")]
    only_keys: Option<Vec<String>>,
    #[serde(alias = "skip_keys")]
    skip_keys: Option<Vec<String>>,
    #[serde(alias = "only_common_keys")]
    only_common_keys: Option<bool>,
    #[serde(alias = "only_universal_keys")]
    only_universal_keys: Option<bool>,
    #[serde(alias = "skip_common_keys")]
    skip_common_keys: Option<bool>,
    #[serde(alias = "skip_universal_keys")]
    skip_universal_keys: Option<bool>,
    #[serde(alias = "invoke_getters")]
    invoke_getters: Option<bool>,
    #[serde(alias = "skip_setters")]
    skip_setters: Option<bool>,
    #[serde(alias = "append_arrays")]
    append_arrays: Option<bool>,
    #[serde(alias = "prepend_arrays")]
    prepend_arrays: Option<bool>,
    #[serde(alias = "dedup_arrays")]
    dedup_arrays: Option<bool>,
    #[serde(alias = "sort_arrays")]
    sort_arrays: Option<ArraySort>,
    #[serde(alias = "hoist_enumerable")]
    hoist_enumerable: Option<bool>,
    #[serde(alias = "hoist_proto")]
    hoist_proto: Option<bool>,
    #[serde(alias = "skip_proto")]
    skip_proto: Option<bool>,
    #[serde(skip)]
    hooks: Hooks,
}

macro_rules! flag_setters {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub const fn $name(mut self, enabled: bool) -> Self {
                self.$name = Some(enabled);
                self
            }
        )*
    };
}

impl MergeOptions {
    /// An empty record; every setting falls back to its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge only these keys.
    #[must_use]
    pub fn only_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Never merge these keys.
    #[must_use]
    pub fn skip_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    flag_setters! {
        /// Merge only keys found in at least two sources.
        only_common_keys;
        /// Merge only keys found in every source.
        only_universal_keys;
        /// Merge only keys found in exactly one source.
        skip_common_keys;
        /// Merge only keys missing from at least one source.
        skip_universal_keys;
        /// Store the values returned by getters instead of the getters.
        invoke_getters;
        /// Drop setters instead of copying them.
        skip_setters;
        /// Append incoming sequences to existing ones.
        append_arrays;
        /// Prepend incoming sequences to existing ones.
        prepend_arrays;
        /// Remove repeated elements from merged sequences.
        dedup_arrays;
        /// Treat inherited enumerable keys as own keys.
        hoist_enumerable;
        /// Copy merged prototype keys onto the result.
        hoist_proto;
        /// Ignore prototype layers.
        skip_proto;
    }

    /// Sort merged sequences by the text form of their elements, see
    /// [`Value::text_cmp`].
    #[must_use]
    pub fn sort_arrays(mut self, enabled: bool) -> Self {
        self.sort_arrays = Some(ArraySort::from(enabled));
        self
    }

    /// Sort merged sequences with `comparator`.
    ///
    /// [`Value::natural_cmp`] orders numbers by value instead of as text.
    ///
    /// # Panics
    ///
    /// A merge using these options may panic if `comparator` is not a total
    /// order, for instance one that reports `a < b` and `b < a`.
    #[must_use]
    pub fn sort_with<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.sort_arrays = Some(ArraySort::Custom(Arc::new(comparator)));
        self
    }

    /// Install a `filter` hook; `Ok(Some(false))` skips the key.
    #[must_use]
    pub fn filter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&KeyContext<'_>) -> HookResult<bool> + Send + Sync + 'static,
    {
        self.hooks.filter = Some(Arc::new(hook));
        self
    }

    /// Install a `before_each` hook that may replace the value to merge.
    #[must_use]
    pub fn before_each<F>(mut self, hook: F) -> Self
    where
        F: Fn(&KeyContext<'_>) -> HookResult<Value> + Send + Sync + 'static,
    {
        self.hooks.before_each = Some(Arc::new(hook));
        self
    }

    /// Install an `after_each` hook that may replace the merged value.
    ///
    /// Its presence switches de-duplication and sorting to
    /// [`ArrayFinalize::Immediate`].
    #[must_use]
    pub fn after_each<F>(mut self, hook: F) -> Self
    where
        F: Fn(&MergedContext<'_>) -> HookResult<Value> + Send + Sync + 'static,
    {
        self.hooks.after_each = Some(Arc::new(hook));
        self
    }

    /// Install an `on_circular` hook that may replace a resolved cycle.
    #[must_use]
    pub fn on_circular<F>(mut self, hook: F) -> Self
    where
        F: Fn(&KeyContext<'_>) -> HookResult<Value> + Send + Sync + 'static,
    {
        self.hooks.on_circular = Some(Arc::new(hook));
        self
    }

    /// Layer `overrides` over this record; fields set in `overrides` win.
    #[must_use]
    pub fn layer(self, overrides: Self) -> Self {
        Self {
            only_keys: overrides.only_keys.or(self.only_keys),
            skip_keys: overrides.skip_keys.or(self.skip_keys),
            only_common_keys: overrides.only_common_keys.or(self.only_common_keys),
            only_universal_keys: overrides.only_universal_keys.or(self.only_universal_keys),
            skip_common_keys: overrides.skip_common_keys.or(self.skip_common_keys),
            skip_universal_keys: overrides.skip_universal_keys.or(self.skip_universal_keys),
            invoke_getters: overrides.invoke_getters.or(self.invoke_getters),
            skip_setters: overrides.skip_setters.or(self.skip_setters),
            append_arrays: overrides.append_arrays.or(self.append_arrays),
            prepend_arrays: overrides.prepend_arrays.or(self.prepend_arrays),
            dedup_arrays: overrides.dedup_arrays.or(self.dedup_arrays),
            sort_arrays: overrides.sort_arrays.or(self.sort_arrays),
            hoist_enumerable: overrides.hoist_enumerable.or(self.hoist_enumerable),
            hoist_proto: overrides.hoist_proto.or(self.hoist_proto),
            skip_proto: overrides.skip_proto.or(self.skip_proto),
            hooks: self.hooks.layer(overrides.hooks),
        }
    }

    /// Resolve the record over the defaults.
    ///
    /// Key-set modes take precedence in the order common, universal,
    /// skip-common, skip-universal. Appending wins over prepending and
    /// skipping prototypes wins over hoisting them.
    #[must_use]
    pub fn resolve(&self) -> MergeSettings {
        let on = |flag: Option<bool>| flag.unwrap_or(false);
        let key_set = if on(self.only_common_keys) {
            KeySetMode::Common
        } else if on(self.only_universal_keys) {
            KeySetMode::Universal
        } else if on(self.skip_common_keys) {
            KeySetMode::SkipCommon
        } else if on(self.skip_universal_keys) {
            KeySetMode::SkipUniversal
        } else {
            KeySetMode::All
        };
        let combine = if on(self.append_arrays) {
            ArrayCombine::Append
        } else if on(self.prepend_arrays) {
            ArrayCombine::Prepend
        } else {
            ArrayCombine::Replace
        };
        let prototype = if on(self.skip_proto) {
            PrototypeMode::Skip
        } else if on(self.hoist_proto) {
            PrototypeMode::Hoist
        } else {
            PrototypeMode::Link
        };
        MergeSettings {
            only_keys: self.only_keys.clone().unwrap_or_default(),
            skip_keys: self.skip_keys.clone().unwrap_or_default(),
            key_set,
            invoke_getters: on(self.invoke_getters),
            skip_setters: on(self.skip_setters),
            combine,
            dedup: on(self.dedup_arrays),
            sort: self.sort_arrays.clone().unwrap_or_default(),
            hoist_enumerable: on(self.hoist_enumerable),
            prototype,
            hooks: self.hooks.clone(),
        }
    }
}
