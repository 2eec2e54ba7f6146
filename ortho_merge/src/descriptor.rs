//! Classification of values as structures or property-descriptor records.
//!
//! Hooks may hand back a record shaped like a property descriptor
//! (`{ get, set, value, writable, enumerable, configurable }`) to control how
//! a key is attached to the merged structure. The predicates here tell such
//! records apart from ordinary nested mappings that merely contain a key
//! named `value`.

use crate::structure::{Property, PropertySlot, Structure};
use crate::value::Value;

const FLAG_KEYS: [&str; 3] = ["writable", "enumerable", "configurable"];
const ACCESSOR_KEYS: [&str; 2] = ["get", "set"];
const DESCRIPTOR_KEYS: [&str; 6] = ["configurable", "enumerable", "value", "writable", "get", "set"];

/// Returns `true` for keyed structures; scalars, sequences, functions, and
/// `null` are not structures.
#[must_use]
pub const fn is_structure(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Returns `true` when `value` is a descriptor-shaped record.
///
/// A record qualifies when every own key is a descriptor key and it either
/// carries a callable `get` or `set` together with a flag key, or a `value`
/// together with a flag key.
///
/// # Examples
///
/// ```
/// use ortho_merge::{Value, is_property_descriptor};
/// use serde_json::json;
///
/// assert!(is_property_descriptor(&Value::from(json!({"value": 1, "writable": false}))));
/// assert!(!is_property_descriptor(&Value::from(json!({"value": 1}))));
/// assert!(!is_property_descriptor(&Value::from(json!({"value": 1, "writable": true, "id": 2}))));
/// ```
#[must_use]
pub fn is_property_descriptor(value: &Value) -> bool {
    value.as_structure().is_some_and(is_descriptor_record)
}

/// [`is_property_descriptor`] over a structure handle.
#[must_use]
pub fn is_descriptor_record(record: &Structure) -> bool {
    let keys = record.own_keys();
    if !keys
        .iter()
        .all(|key| DESCRIPTOR_KEYS.contains(&key.as_str()))
    {
        return false;
    }
    let has_flag = FLAG_KEYS.iter().any(|key| record.has_own(key));
    let has_value = record.has_own("value");
    let has_method = ACCESSOR_KEYS
        .iter()
        .any(|key| matches!(own_data(record, key), Some(Value::Function(_))));
    has_flag && (has_value || has_method)
}

/// Convert a descriptor-shaped record into a [`Property`].
///
/// Flags present in the record are honoured by truthiness; absent flags
/// default to `true`, matching ordinary assignment rather than the stricter
/// defaults of manual definition. A callable `get` or `set` produces an
/// accessor; otherwise the record's `value` becomes a data slot.
#[must_use]
pub fn descriptor_to_property(record: &Structure) -> Property {
    let flag = |key: &str| own_data(record, key).is_none_or(|value| value.is_truthy());
    let callable = |key: &str| match own_data(record, key) {
        Some(Value::Function(callable)) => Some(callable),
        _ => None,
    };
    let (get, set) = (callable("get"), callable("set"));
    let slot = if get.is_some() || set.is_some() {
        PropertySlot::Accessor { get, set }
    } else {
        PropertySlot::Data {
            value: own_data(record, "value").unwrap_or_default(),
            writable: flag("writable"),
        }
    };
    Property {
        slot,
        enumerable: flag("enumerable"),
        configurable: flag("configurable"),
    }
}

fn own_data(record: &Structure, key: &str) -> Option<Value> {
    record
        .own_property(key)
        .and_then(|property| property.value().cloned())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{descriptor_to_property, is_property_descriptor, is_structure};
    use crate::structure::{Callable, Structure};
    use crate::value::Value;

    fn noop() -> Callable {
        Callable::new(|_, _| Ok(Value::Null))
    }

    #[rstest]
    #[case(json!({"value": 1, "enumerable": false}), true)]
    #[case(json!({"value": 1}), false)]
    #[case(json!({"writable": true}), false)]
    #[case(json!({"value": 1, "writable": true, "extra": 0}), false)]
    #[case(json!({}), false)]
    #[case(json!([1]), false)]
    fn classifies_data_records(#[case] record: serde_json::Value, #[case] expected: bool) {
        assert_eq!(is_property_descriptor(&Value::from(record)), expected);
    }

    #[test]
    fn accessor_records_need_a_callable_and_a_flag() {
        let with_flag = Structure::new()
            .with("get", noop())
            .with("configurable", true);
        let without_flag = Structure::new().with("get", noop()).with("set", noop());
        let non_callable = Structure::new().with("get", 1).with("enumerable", true);

        assert!(is_property_descriptor(&Value::from(with_flag)));
        assert!(!is_property_descriptor(&Value::from(without_flag)));
        assert!(!is_property_descriptor(&Value::from(non_callable)));
    }

    #[test]
    fn absent_flags_default_to_true() {
        let record = Structure::new().with("value", 3).with("enumerable", false);
        let property = descriptor_to_property(&record);
        assert!(!property.enumerable);
        assert!(property.configurable);
        assert_eq!(property.writable(), Some(true));
        assert_eq!(property.value().and_then(Value::as_f64), Some(3.0));
    }

    #[test]
    fn callables_produce_accessors() {
        let getter = noop();
        let record = Structure::new()
            .with("get", getter.clone())
            .with("writable", false);
        let property = descriptor_to_property(&record);
        assert!(property.getter().is_some_and(|found| found.ptr_eq(&getter)));
        assert!(property.setter().is_none());
    }

    #[rstest]
    #[case(Value::from(Structure::new()), true)]
    #[case(Value::from(vec![1]), false)]
    #[case(Value::Null, false)]
    #[case(Value::from("x"), false)]
    fn structures_exclude_sequences_and_scalars(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_structure(&value), expected);
    }
}
