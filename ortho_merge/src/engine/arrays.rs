//! Sequence combination with immediate or deferred de-duplication and
//! sorting.

use super::MergeEngine;
use crate::options::{ArrayFinalize, ArraySort};
use crate::structure::{Property, PropertySlot, Structure};
use crate::value::{Value, dedup_values};

/// `(target, key)` pairs whose sequences are finalised when a level ends.
#[derive(Default)]
pub(super) struct DeferredArrays {
    dedup: Vec<(Structure, String)>,
    sort: Vec<(Structure, String)>,
}

fn enqueue(queue: &mut Vec<(Structure, String)>, target: &Structure, key: &str) {
    if !queue
        .iter()
        .any(|(queued, name)| queued.ptr_eq(target) && name == key)
    {
        queue.push((target.clone(), key.to_owned()));
    }
}

impl DeferredArrays {
    /// Apply queued de-duplication, then queued sorting, and empty both
    /// queues.
    pub(super) fn flush(&mut self, sort: &ArraySort) {
        for (target, key) in self.dedup.drain(..) {
            dedup_slot(&target, &key);
        }
        for (target, key) in self.sort.drain(..) {
            sort_slot(&target, &key, sort);
        }
    }
}

/// Replace the sequence under `key` with its unique elements.
///
/// Accessor-backed sequences are read through the getter and stored as a
/// plain data property.
fn dedup_slot(target: &Structure, key: &str) {
    let Some(property) = target.own_property(key) else {
        return;
    };
    let items = match &property.slot {
        PropertySlot::Data {
            value: Value::Array(items),
            ..
        } => items.clone(),
        PropertySlot::Accessor { get: Some(_), .. } => match target.get(key) {
            Ok(Some(Value::Array(items))) => items,
            Ok(_) => return,
            Err(err) => {
                tracing::debug!(key, error = %err, "cannot read sequence for de-duplication");
                return;
            }
        },
        PropertySlot::Data { .. } | PropertySlot::Accessor { .. } => return,
    };
    let unique = Property::data(dedup_values(items))
        .with_writable(property.writable().unwrap_or(true))
        .with_enumerable(property.enumerable)
        .with_configurable(property.configurable);
    target.define(key, unique);
}

/// Sort the sequence stored under `key`. Accessors are left alone.
fn sort_slot(target: &Structure, key: &str, sort: &ArraySort) {
    let Some(Property {
        slot: PropertySlot::Data {
            value: Value::Array(mut items),
            writable,
        },
        enumerable,
        configurable,
    }) = target.own_property(key)
    else {
        return;
    };
    sort.apply(&mut items);
    let sorted = Property {
        slot: PropertySlot::Data {
            value: Value::Array(items),
            writable,
        },
        enumerable,
        configurable,
    };
    target.define(key, sorted);
}

impl MergeEngine<'_> {
    /// Combine an incoming sequence with the value already under `key`.
    ///
    /// The incoming elements arrive as a fresh shallow copy. When the target
    /// holds no sequence the incoming one is used alone.
    pub(super) fn combine_array(
        &mut self,
        target: &Structure,
        key: &str,
        existing: Option<&Value>,
        incoming: Vec<Value>,
    ) -> Vec<Value> {
        let settings = self.settings;
        let combined = match existing.and_then(Value::as_array) {
            Some(current) => settings.combine.combine(current, incoming),
            None => incoming,
        };
        match self.finalize {
            ArrayFinalize::Immediate => {
                let mut items = if settings.dedup {
                    dedup_values(combined)
                } else {
                    combined
                };
                settings.sort.apply(&mut items);
                items
            }
            ArrayFinalize::Deferred => {
                if settings.dedup {
                    enqueue(&mut self.deferred.dedup, target, key);
                }
                if settings.sort.is_enabled() {
                    enqueue(&mut self.deferred.sort, target, key);
                }
                combined
            }
        }
    }
}
