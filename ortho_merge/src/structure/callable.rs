//! Callable slots used for getters, setters, and descriptor records.

use std::fmt;
use std::sync::Arc;

use super::Structure;
use crate::error::AccessorError;
use crate::value::Value;

type CallableFn = dyn Fn(&Structure, &[Value]) -> Result<Value, AccessorError> + Send + Sync;

/// Shared function value invoked with a receiver structure and arguments.
///
/// Two callables are the same when they share the underlying function, so
/// copying a getter from one structure to another keeps its identity.
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    /// Wrap a function receiving the receiver structure and call arguments.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&Structure, &[Value]) -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        Self(Arc::new(function))
    }

    /// Wrap a getter. The receiver is the structure the property is read on.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_merge::{Callable, Structure, Value};
    ///
    /// let doubled = Callable::getter(|this| {
    ///     let base = this.get("base")?.and_then(|v| v.as_f64()).unwrap_or_default();
    ///     Ok(Value::from(base * 2.0))
    /// });
    /// let structure = Structure::new().with("base", 21);
    /// structure.define_accessor("doubled", Some(doubled), None);
    /// assert_eq!(structure.get("doubled")?.and_then(|v| v.as_f64()), Some(42.0));
    /// # Ok::<_, ortho_merge::AccessorError>(())
    /// ```
    pub fn getter<F>(getter: F) -> Self
    where
        F: Fn(&Structure) -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        Self::new(move |this, _args| getter(this))
    }

    /// Wrap a setter receiving the assigned value.
    pub fn setter<F>(setter: F) -> Self
    where
        F: Fn(&Structure, Value) -> Result<(), AccessorError> + Send + Sync + 'static,
    {
        Self::new(move |this, args| {
            let assigned = args.first().cloned().unwrap_or_default();
            setter(this, assigned).map(|()| Value::Null)
        })
    }

    /// Invoke the callable with `this` as the receiver.
    ///
    /// # Errors
    ///
    /// Propagates the [`AccessorError`] returned by the wrapped function.
    pub fn call(&self, this: &Structure, args: &[Value]) -> Result<Value, AccessorError> {
        (self.0)(this, args)
    }

    /// Returns `true` when both handles share the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}
