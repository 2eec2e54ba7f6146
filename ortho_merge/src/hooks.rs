//! Hook pipeline invoked by the merge engine for every visited key.
//!
//! Four optional hooks can observe and rewrite a merge:
//!
//! | hook | context | return |
//! |---|---|---|
//! | `filter` | [`KeyContext`] | `Some(false)` skips the key |
//! | `before_each` | [`KeyContext`] | `Some(value)` replaces the value to merge |
//! | `after_each` | [`MergedContext`] | `Some(value)` replaces the merged value |
//! | `on_circular` | [`KeyContext`] | `Some(value)` replaces the resolved cycle |
//!
//! Every hook returns a [`HookResult`]: `Ok(None)` leaves the default
//! behaviour in place, `Ok(Some(..))` is an override that is always honoured
//! (including `Value::Null` and `Some(true)`), and `Err` aborts the merge and
//! reaches the caller unchanged.

use std::fmt;
use std::sync::Arc;

use crate::error::MergeError;
use crate::structure::Structure;
use crate::value::Value;

/// Result of a hook: `Ok(None)` defers to the default behaviour.
pub type HookResult<T> = Result<Option<T>, MergeError>;

/// Arguments passed to `filter`, `before_each`, and `on_circular`.
#[derive(Clone, Copy, Debug)]
pub struct KeyContext<'a> {
    /// Recursion depth of the level being built; `0` at the top.
    pub depth: usize,
    /// The key being merged.
    pub key: &'a str,
    /// The source structure the key is read from.
    pub source: &'a Structure,
    /// The value read from the source.
    pub source_value: &'a Value,
    /// The structure being built.
    pub target: &'a Structure,
    /// The value currently stored under the key in the target, if any.
    pub target_value: Option<&'a Value>,
}

/// Arguments passed to `after_each`.
#[derive(Clone, Copy, Debug)]
pub struct MergedContext<'a> {
    /// Recursion depth of the level being built; `0` at the top.
    pub depth: usize,
    /// The key being merged.
    pub key: &'a str,
    /// The fully combined value about to be committed.
    pub merged_value: &'a Value,
    /// The source structure the key is read from.
    pub source: &'a Structure,
    /// The structure being built.
    pub target: &'a Structure,
}

/// Decides whether a key is merged.
pub type FilterHook = Arc<dyn Fn(&KeyContext<'_>) -> HookResult<bool> + Send + Sync>;
/// Rewrites the value about to be merged or a detected cycle.
pub type ValueHook = Arc<dyn Fn(&KeyContext<'_>) -> HookResult<Value> + Send + Sync>;
/// Rewrites a merged value before it is committed.
pub type AfterEachHook = Arc<dyn Fn(&MergedContext<'_>) -> HookResult<Value> + Send + Sync>;

/// The set of configured hooks.
#[derive(Clone, Default)]
pub struct Hooks {
    pub(crate) filter: Option<FilterHook>,
    pub(crate) before_each: Option<ValueHook>,
    pub(crate) after_each: Option<AfterEachHook>,
    pub(crate) on_circular: Option<ValueHook>,
}

impl Hooks {
    /// Returns `true` when an `after_each` hook is configured.
    #[must_use]
    pub const fn has_after_each(&self) -> bool {
        self.after_each.is_some()
    }

    /// Hooks from `overrides` replace the ones configured here.
    #[must_use]
    pub fn layer(self, overrides: Self) -> Self {
        Self {
            filter: overrides.filter.or(self.filter),
            before_each: overrides.before_each.or(self.before_each),
            after_each: overrides.after_each.or(self.after_each),
            on_circular: overrides.on_circular.or(self.on_circular),
        }
    }

    pub(crate) fn run_filter(&self, ctx: &KeyContext<'_>) -> HookResult<bool> {
        self.filter.as_ref().map_or(Ok(None), |hook| hook(ctx))
    }

    pub(crate) fn run_before_each(&self, ctx: &KeyContext<'_>) -> HookResult<Value> {
        self.before_each.as_ref().map_or(Ok(None), |hook| hook(ctx))
    }

    pub(crate) fn run_after_each(&self, ctx: &MergedContext<'_>) -> HookResult<Value> {
        self.after_each.as_ref().map_or(Ok(None), |hook| hook(ctx))
    }

    pub(crate) fn run_on_circular(&self, ctx: &KeyContext<'_>) -> HookResult<Value> {
        self.on_circular.as_ref().map_or(Ok(None), |hook| hook(ctx))
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("filter", &self.filter.is_some())
            .field("before_each", &self.before_each.is_some())
            .field("after_each", &self.after_each.is_some())
            .field("on_circular", &self.on_circular.is_some())
            .finish()
    }
}
