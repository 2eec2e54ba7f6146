//! Keyed structures with property descriptors and fallback layers.
//!
//! A [`Structure`] is a shared handle: cloning it yields another reference to
//! the same mapping, which is what gives structures identity for circular
//! reference detection. Each key holds a [`Property`] describing either a
//! stored value or an accessor pair.
//!
//! Prototype chains are modelled as layered default mappings. A structure
//! may name a `prototype` structure that is consulted by [`Structure::get`]
//! and [`Structure::has`] whenever a key is absent from the structure itself.

mod callable;
mod property;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

pub use callable::Callable;
pub use property::{Property, PropertySlot};

use crate::error::{AccessorError, StructureError};
use crate::value::{Value, compare_structures};

#[derive(Default)]
struct Layer {
    properties: Vec<(String, Property)>,
    prototype: Option<Structure>,
}

impl Layer {
    fn find(&self, key: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find_map(|(name, property)| (name == key).then_some(property))
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.properties
            .iter_mut()
            .find_map(|(name, property)| (name == key).then_some(property))
    }
}

/// Shared, mutable keyed mapping.
///
/// Handles are `Send + Sync`; independent merges may run on separate
/// threads as long as no thread mutates an input while it is being merged.
#[derive(Clone, Default)]
pub struct Structure {
    inner: Arc<RwLock<Layer>>,
}

impl Structure {
    /// Create an empty structure without a prototype.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty structure that falls back to `prototype`.
    #[must_use]
    pub fn with_prototype(prototype: Self) -> Self {
        let layer = Layer {
            properties: Vec::new(),
            prototype: Some(prototype),
        };
        Self {
            inner: Arc::new(RwLock::new(layer)),
        }
    }

    /// Builder-style variant of [`Structure::define_value`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_merge::Structure;
    /// let point = Structure::new().with("x", 1).with("y", 2);
    /// assert_eq!(point.own_keys(), ["x", "y"]);
    /// ```
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define_value(key, value);
        self
    }

    /// Returns `true` when both handles refer to the same structure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Address-based identity, stable while the structure is alive.
    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.inner).addr()
    }

    /// Number of own properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().properties.len()
    }

    /// Returns `true` when the structure has no own properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().properties.is_empty()
    }

    /// Own keys in insertion order, enumerable or not.
    #[must_use]
    pub fn own_keys(&self) -> Vec<String> {
        self.inner
            .read()
            .properties
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Own keys followed by enumerable keys inherited from the prototype
    /// chain. An inherited key shadowed by a nearer layer is not repeated.
    #[must_use]
    pub fn keys_with_inherited(&self) -> Vec<String> {
        let mut keys = self.own_keys();
        let mut seen = keys.clone();
        let mut next = self.prototype();
        while let Some(layer) = next {
            let guard = layer.inner.read();
            for (key, property) in &guard.properties {
                if seen.contains(key) {
                    continue;
                }
                seen.push(key.clone());
                if property.enumerable {
                    keys.push(key.clone());
                }
            }
            next = guard.prototype.clone();
        }
        keys
    }

    /// The descriptor of an own property.
    #[must_use]
    pub fn own_property(&self, key: &str) -> Option<Property> {
        self.inner.read().find(key).cloned()
    }

    /// Returns `true` when the key is an own property.
    #[must_use]
    pub fn has_own(&self, key: &str) -> bool {
        self.inner.read().find(key).is_some()
    }

    /// Returns `true` when the key is present on the structure or any
    /// prototype layer.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Read a key, consulting prototype layers and invoking getters with
    /// this structure as the receiver.
    ///
    /// Returns `Ok(None)` when the key is absent or is a write-only
    /// accessor.
    ///
    /// # Errors
    ///
    /// Returns the [`AccessorError`] raised by a failing getter.
    pub fn get(&self, key: &str) -> Result<Option<Value>, AccessorError> {
        match self.lookup(key).map(|property| property.slot) {
            None | Some(PropertySlot::Accessor { get: None, .. }) => Ok(None),
            Some(PropertySlot::Data { value, .. }) => Ok(Some(value)),
            Some(PropertySlot::Accessor {
                get: Some(getter), ..
            }) => getter
                .call(self, &[])
                .map(Some)
                .map_err(|err| err.with_key(key)),
        }
    }

    /// Assign a key with ordinary assignment semantics.
    ///
    /// A setter found on the structure or its prototype layers is invoked.
    /// An own data property keeps its flags and takes the new value; any
    /// other case creates a standard own data property.
    ///
    /// # Errors
    ///
    /// Fails when the key is read-only, is a getter without a setter, or the
    /// setter itself fails.
    pub fn set(&self, key: &str, assigned: impl Into<Value>) -> Result<(), AccessorError> {
        let value = assigned.into();
        match self.lookup(key).map(|property| property.slot) {
            Some(PropertySlot::Accessor {
                set: Some(setter), ..
            }) => setter
                .call(self, &[value])
                .map(drop)
                .map_err(|err| err.with_key(key)),
            Some(PropertySlot::Accessor { set: None, .. }) => {
                Err(AccessorError::new(key, "property has a getter but no setter"))
            }
            Some(PropertySlot::Data {
                writable: false, ..
            }) => Err(AccessorError::new(key, "property is read-only")),
            Some(PropertySlot::Data { .. }) | None => {
                let mut layer = self.inner.write();
                if let Some(PropertySlot::Data { value: slot, .. }) =
                    layer.find_mut(key).map(|property| &mut property.slot)
                {
                    *slot = value;
                } else {
                    layer.properties.push((key.to_owned(), Property::data(value)));
                }
                Ok(())
            }
        }
    }

    /// Define or replace an own property. A replaced key keeps its position.
    pub fn define(&self, key: impl Into<String>, property: Property) {
        let name = key.into();
        let mut layer = self.inner.write();
        if let Some(existing) = layer.find_mut(&name) {
            *existing = property;
        } else {
            layer.properties.push((name, property));
        }
    }

    /// Define a standard data property.
    pub fn define_value(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.define(key, Property::data(value));
    }

    /// Define an enumerable, configurable accessor property.
    pub fn define_accessor(
        &self,
        key: impl Into<String>,
        get: Option<Callable>,
        set: Option<Callable>,
    ) {
        self.define(key, Property::accessor(get, set));
    }

    /// The prototype layer, if any.
    #[must_use]
    pub fn prototype(&self) -> Option<Self> {
        self.inner.read().prototype.clone()
    }

    /// Replace the prototype layer.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::CyclicPrototype`] when the new chain would
    /// reach this structure again.
    pub fn set_prototype(&self, prototype: Option<Self>) -> Result<(), StructureError> {
        let mut next = prototype.clone();
        while let Some(layer) = next {
            if layer.ptr_eq(self) {
                return Err(StructureError::CyclicPrototype);
            }
            next = layer.prototype();
        }
        self.inner.write().prototype = prototype;
        Ok(())
    }

    /// Structural equality: same own keys, flags, and deeply equal values,
    /// with accessors compared by identity and prototypes compared deeply.
    #[must_use]
    pub fn deep_eq(&self, other: &Self) -> bool {
        self.deep_eq_with(other, &mut Vec::new())
    }

    pub(crate) fn deep_eq_with(&self, other: &Self, visiting: &mut Vec<(Self, Self)>) -> bool {
        if self.ptr_eq(other)
            || visiting
                .iter()
                .any(|(left, right)| left.ptr_eq(self) && right.ptr_eq(other))
        {
            return true;
        }
        visiting.push((self.clone(), other.clone()));
        let equal = compare_structures(self, other, visiting);
        visiting.pop();
        equal
    }

    fn lookup(&self, key: &str) -> Option<Property> {
        let mut layer = self.clone();
        loop {
            let next = {
                let guard = layer.inner.read();
                if let Some(property) = guard.find(key) {
                    return Some(property.clone());
                }
                guard.prototype.clone()
            };
            layer = next?;
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Structure
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let structure = Self::new();
        for (key, value) in iter {
            structure.define_value(key, value);
        }
        structure
    }
}

impl fmt::Debug for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Structure")
            .field("id", &format_args!("{:#x}", self.identity()))
            .field("keys", &self.own_keys())
            .finish()
    }
}

#[cfg(test)]
mod tests;
