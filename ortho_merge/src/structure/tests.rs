//! Unit tests for structure reads, writes, and prototype layers.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Callable, Property, Structure};
use crate::error::{AccessorError, StructureError};
use crate::value::Value;

fn number(structure: &Structure, key: &str) -> Option<f64> {
    structure.get(key).ok().flatten().and_then(|value| value.as_f64())
}

fn counter_pair() -> Structure {
    let structure = Structure::new().with("_count", 1);
    structure.define_accessor(
        "count",
        Some(Callable::getter(|this| {
            Ok(this.get("_count")?.unwrap_or_default())
        })),
        Some(Callable::setter(|this, value| this.set("_count", value))),
    );
    structure
}

#[test]
fn getters_read_through_the_receiver() {
    let structure = counter_pair();
    assert_eq!(number(&structure, "count"), Some(1.0));
    structure.set("count", 5).ok();
    assert_eq!(number(&structure, "_count"), Some(5.0));
    assert_eq!(number(&structure, "count"), Some(5.0));
}

#[test]
fn inherited_getters_bind_the_reading_structure() {
    let proto = counter_pair();
    let child = Structure::with_prototype(proto.clone()).with("_count", 7);
    assert_eq!(number(&child, "count"), Some(7.0));
    assert_eq!(number(&proto, "count"), Some(1.0));
}

#[test]
fn set_rejects_read_only_and_getter_only_keys() {
    let structure = Structure::new();
    structure.define("fixed", Property::data(1).with_writable(false));
    structure.define_accessor(
        "computed",
        Some(Callable::getter(|_| Ok(Value::from(2)))),
        None,
    );
    assert_eq!(
        structure.set("fixed", 3),
        Err(AccessorError::new("fixed", "property is read-only"))
    );
    assert!(structure.set("computed", 3).is_err());
}

#[test]
fn set_on_inherited_data_creates_an_own_key() {
    let proto = Structure::new().with("shared", 1);
    let child = Structure::with_prototype(proto.clone());
    assert!(child.set("shared", 2).is_ok());
    assert!(child.has_own("shared"));
    assert_eq!(number(&proto, "shared"), Some(1.0));
}

#[test]
fn getter_failures_carry_the_key() {
    let structure = Structure::new();
    structure.define_accessor(
        "broken",
        Some(Callable::getter(|_| Err(AccessorError::message("boom")))),
        None,
    );
    let err = structure.get("broken").err();
    assert_eq!(err, Some(AccessorError::new("broken", "boom")));
}

#[test]
fn setter_receives_the_assigned_value() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let structure = Structure::new();
    structure.define_accessor(
        "sink",
        None,
        Some(Callable::setter(move |_, value| {
            log.lock().push(value.as_f64());
            Ok(())
        })),
    );
    assert!(structure.set("sink", 4).is_ok());
    assert_eq!(*seen.lock(), vec![Some(4.0)]);
    assert!(matches!(structure.get("sink"), Ok(None)));
}

#[test]
fn inherited_keys_skip_hidden_and_shadowed_entries() {
    let base = Structure::new().with("deep", 1).with("shadowed", 1);
    let middle = Structure::with_prototype(base);
    middle.define("shadowed", Property::data(2).with_enumerable(false));
    middle.define("hidden", Property::data(3).with_enumerable(false));
    let child = Structure::with_prototype(middle).with("own", 4);
    child.define("own_hidden", Property::data(5).with_enumerable(false));

    assert_eq!(child.keys_with_inherited(), ["own", "own_hidden", "deep"]);
    assert_eq!(child.own_keys(), ["own", "own_hidden"]);
}

#[test]
fn redefining_a_key_keeps_its_position() {
    let structure = Structure::new().with("a", 1).with("b", 2);
    structure.define_value("a", 3);
    assert_eq!(structure.own_keys(), ["a", "b"]);
    assert_eq!(number(&structure, "a"), Some(3.0));
}

#[test]
fn prototype_cycles_are_rejected() {
    let a = Structure::new();
    let b = Structure::with_prototype(a.clone());
    assert_eq!(
        a.set_prototype(Some(b.clone())),
        Err(StructureError::CyclicPrototype)
    );
    assert_eq!(a.set_prototype(Some(a.clone())), Err(StructureError::CyclicPrototype));
    assert!(b.set_prototype(None).is_ok());
}

#[test]
fn deep_eq_handles_self_references() {
    let left = Structure::new().with("a", 1);
    left.define_value("me", left.clone());
    let right = Structure::new().with("a", 1);
    right.define_value("me", right.clone());
    assert!(left.deep_eq(&right));

    right.define_value("a", 2);
    assert!(!left.deep_eq(&right));
}

#[test]
fn structures_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Structure>();
    assert_send_sync::<Value>();
}
