//! Attaching merged values to the target structure.

use crate::descriptor::{descriptor_to_property, is_descriptor_record};
use crate::options::MergeSettings;
use crate::structure::{Property, PropertySlot};
use crate::value::Value;

/// Where the value being committed came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Provenance {
    /// Produced by combining source values.
    Merged,
    /// Returned by a hook and committed verbatim.
    Hook,
}

/// Build the property committed under a key.
///
/// Hook-provided values become standard data properties unless they are
/// descriptor-shaped records. Merged values follow the source descriptor:
/// data keeps its flags, accessors keep their getter and their setter unless
/// setters are skipped. An invoked getter leaves read-only data.
pub(super) fn committed_property(
    value: Value,
    provenance: Provenance,
    source_property: Option<&Property>,
    settings: &MergeSettings,
) -> Property {
    if provenance == Provenance::Hook {
        return match value.as_structure().filter(|record| is_descriptor_record(record)) {
            Some(record) => descriptor_to_property(record),
            None => Property::data(value),
        };
    }
    let Some(source) = source_property else {
        return Property::data(value);
    };
    let fused = match &source.slot {
        PropertySlot::Data { writable, .. } => Property::data(value).with_writable(*writable),
        PropertySlot::Accessor { get: getter, set: setter } => {
            let get = getter.clone().filter(|_| !settings.invoke_getters);
            let set = setter
                .clone()
                .filter(|_| get.is_some() && !settings.skip_setters);
            if get.is_none() && set.is_none() {
                Property::data(value).with_writable(false)
            } else {
                Property::accessor(get, set)
            }
        }
    };
    fused
        .with_enumerable(source.enumerable)
        .with_configurable(source.configurable)
}
