//! Accessor builders for exercising getter and setter fusion.

use std::sync::Arc;

use ortho_merge::{AccessorError, Callable, Structure, Value};
use parking_lot::Mutex;

/// Shared record of accessor invocations.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// A getter/setter pair exposing `first` and `last` as a single
/// `"first last"` string.
///
/// The setter splits on the first space and assigns both halves through the
/// receiver. `label` is prefixed to the getter's result so tests can tell
/// pairs from different sources apart.
#[must_use]
pub fn full_name_pair(label: &'static str) -> (Callable, Callable) {
    let getter = Callable::getter(move |this: &Structure| {
        let part = |key: &str| -> Result<String, AccessorError> {
            Ok(this
                .get(key)?
                .and_then(|value| value.as_str().map(str::to_owned))
                .unwrap_or_default())
        };
        Ok(Value::from(format!("{label}{} {}", part("first")?, part("last")?)))
    });
    let setter = Callable::setter(|this: &Structure, value: Value| {
        let text = value
            .as_str()
            .ok_or_else(|| AccessorError::message("full name must be a string"))?;
        let (first, last) = text.split_once(' ').unwrap_or((text, ""));
        this.set("first", first)?;
        this.set("last", last)
    });
    (getter, setter)
}

/// A structure with `first`, `last`, and a `fullName` accessor pair.
#[must_use]
pub fn person(label: &'static str, first: &str, last: &str) -> Structure {
    let (get, set) = full_name_pair(label);
    let structure = Structure::new().with("first", first).with("last", last);
    structure.define_accessor("fullName", Some(get), Some(set));
    structure
}

/// A getter that always fails with `message`.
#[must_use]
pub fn failing_getter(message: &'static str) -> Callable {
    Callable::getter(move |_: &Structure| Err(AccessorError::message(message)))
}

/// A setter that appends every assigned value's kind to `log`.
#[must_use]
pub fn recording_setter(log: &CallLog) -> Callable {
    let log = Arc::clone(log);
    Callable::setter(move |_: &Structure, value: Value| {
        log.lock().push(value.kind().to_owned());
        Ok(())
    })
}
