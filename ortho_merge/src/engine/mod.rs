//! The recursive merge engine.
//!
//! One [`MergeEngine`] serves one top-level merge invocation. It owns the
//! per-invocation state: the circular reference map, the deferred sequence
//! queues, and the recursion depth. Each recursion level builds one fresh
//! target structure by visiting the selected keys of every source in order.

mod arrays;
mod circular;
mod commit;

use arrays::DeferredArrays;
use circular::CircularRefs;
use commit::{Provenance, committed_property};

use crate::descriptor::is_descriptor_record;
use crate::error::{MergeError, MergeResult};
use crate::hooks::{KeyContext, MergedContext};
use crate::options::{ArrayFinalize, MergeSettings, PrototypeMode};
use crate::structure::Structure;
use crate::value::Value;

/// State for a single merge invocation.
pub(crate) struct MergeEngine<'s> {
    settings: &'s MergeSettings,
    finalize: ArrayFinalize,
    circular: CircularRefs,
    deferred: DeferredArrays,
    depth: usize,
}

impl<'s> MergeEngine<'s> {
    pub(crate) fn new(settings: &'s MergeSettings) -> Self {
        Self {
            settings,
            finalize: settings.finalize(),
            circular: CircularRefs::default(),
            deferred: DeferredArrays::default(),
            depth: 0,
        }
    }

    /// Merge `sources` into a new structure.
    pub(crate) fn run(mut self, sources: &[Structure]) -> MergeResult<Structure> {
        if sources.is_empty() {
            return Err(MergeError::NoSources);
        }
        let span = tracing::debug_span!("merge", sources = sources.len());
        let _entered = span.enter();
        self.merge_level(sources)
    }

    fn merge_level(&mut self, sources: &[Structure]) -> MergeResult<Structure> {
        let target = Structure::new();
        let key_lists: Vec<Vec<String>> = sources.iter().map(|source| self.keys_of(source)).collect();
        let selected = self.select_keys(&key_lists);
        let settings = self.settings;
        let skip_keys = &settings.skip_keys;
        for (source, own_keys) in sources.iter().zip(&key_lists) {
            self.circular.register(source, &target);
            let keys = selected.as_ref().unwrap_or(own_keys);
            for key in keys.iter().filter(|key| !skip_keys.contains(key)) {
                self.merge_key(source, &target, key)?;
            }
        }
        self.deferred.flush(&self.settings.sort);
        self.merge_prototypes(sources, target)
    }

    fn keys_of(&self, source: &Structure) -> Vec<String> {
        if self.settings.hoist_enumerable {
            source.keys_with_inherited()
        } else {
            source.own_keys()
        }
    }

    /// The key list shared by every source of a level, or `None` when each
    /// source contributes its own keys.
    fn select_keys(&self, key_lists: &[Vec<String>]) -> Option<Vec<String>> {
        let only = &self.settings.only_keys;
        match self.settings.key_set.derive(key_lists) {
            Some(derived) if only.is_empty() => Some(derived),
            Some(derived) => Some(derived.into_iter().filter(|key| only.contains(key)).collect()),
            None if only.is_empty() => None,
            None => Some(only.clone()),
        }
    }

    fn merge_key(&mut self, source: &Structure, target: &Structure, key: &str) -> MergeResult<()> {
        if !source.has(key) {
            return Ok(());
        }
        let settings = self.settings;
        let hooks = &settings.hooks;
        let source_property = source.own_property(key);
        if let Some(setter_only) = source_property.as_ref().filter(|p| p.is_setter_only()) {
            if !settings.skip_setters {
                target.define(key, setter_only.clone());
            }
            return Ok(());
        }
        let source_value = match source.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(()),
            Err(err) => {
                tracing::warn!(key, depth = self.depth, error = %err, "skipping unreadable property");
                return Ok(());
            }
        };
        let target_value = read_target(target, key);
        let ctx = KeyContext {
            depth: self.depth,
            key,
            source,
            source_value: &source_value,
            target,
            target_value: target_value.as_ref(),
        };

        if hooks.run_filter(&ctx)? == Some(false) {
            tracing::trace!(key, depth = self.depth, "key filtered out");
            return Ok(());
        }
        let (mut merge_value, mut provenance) = match hooks.run_before_each(&ctx)? {
            Some(replacement) => (replacement, Provenance::Hook),
            None => (source_value.clone(), Provenance::Merged),
        };

        if let Some(resolved) = merge_value
            .as_structure()
            .and_then(|nested| self.circular.resolve(nested))
        {
            match hooks.run_on_circular(&ctx)? {
                Some(replacement) => {
                    merge_value = replacement;
                    provenance = Provenance::Hook;
                }
                None => {
                    tracing::trace!(key, depth = self.depth, "circular reference resolved");
                    target.define_value(key, resolved);
                    return Ok(());
                }
            }
        }

        let merged = match merge_value {
            Value::Array(items) => {
                Value::Array(self.combine_array(target, key, target_value.as_ref(), items))
            }
            Value::Object(nested)
                if provenance == Provenance::Merged || !is_descriptor_record(&nested) =>
            {
                let existing = target_value.as_ref().and_then(Value::as_structure);
                Value::Object(self.merge_nested(existing, nested)?)
            }
            other => other,
        };

        let merged_ctx = MergedContext {
            depth: self.depth,
            key,
            merged_value: &merged,
            source,
            target,
        };
        let committed = match hooks.run_after_each(&merged_ctx)? {
            Some(replacement) => {
                provenance = Provenance::Hook;
                replacement
            }
            None => merged,
        };
        let property = committed_property(committed, provenance, source_property.as_ref(), settings);
        target.define(key, property);
        Ok(())
    }

    /// Merge a nested structure one level deeper, onto the structure already
    /// in the target when there is one.
    fn merge_nested(
        &mut self,
        existing: Option<&Structure>,
        incoming: Structure,
    ) -> MergeResult<Structure> {
        let sources = match existing {
            Some(current) => vec![current.clone(), incoming],
            None => vec![incoming],
        };
        self.depth += 1;
        let merged = self.merge_level(&sources);
        self.depth -= 1;
        merged
    }

    fn merge_prototypes(
        &mut self,
        sources: &[Structure],
        target: Structure,
    ) -> MergeResult<Structure> {
        let mode = self.settings.prototype;
        if mode == PrototypeMode::Skip {
            return Ok(target);
        }
        let prototypes: Vec<Structure> = sources.iter().filter_map(Structure::prototype).collect();
        if prototypes.is_empty() {
            return Ok(target);
        }
        let span = tracing::trace_span!("prototypes", depth = self.depth, count = prototypes.len());
        let _entered = span.enter();
        let merged = self.merge_level(&prototypes)?;
        if mode == PrototypeMode::Hoist {
            return self.merge_level(&[merged, target]);
        }
        target.set_prototype(Some(merged))?;
        Ok(target)
    }
}

/// Read the value currently stored in the target. Fused getters run with
/// the target as receiver; a failing one reads as absent.
fn read_target(target: &Structure, key: &str) -> Option<Value> {
    target.get(key).unwrap_or_else(|err| {
        tracing::debug!(key, error = %err, "target property unreadable");
        None
    })
}
