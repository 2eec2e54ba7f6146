//! Property descriptors attached to structure keys.

use super::Callable;
use crate::value::Value;

/// How a key stores its value.
#[derive(Clone, Debug)]
pub enum PropertySlot {
    /// A stored value.
    Data {
        /// The stored value.
        value: Value,
        /// Whether assignment may replace the value.
        writable: bool,
    },
    /// A computed value.
    Accessor {
        /// Invoked on read with the receiver bound.
        get: Option<Callable>,
        /// Invoked on assignment with the receiver bound.
        set: Option<Callable>,
    },
}

/// A key's descriptor: its slot plus attachment flags.
///
/// `configurable` is recorded and carried through merges but is not enforced
/// by [`crate::Structure::define`].
#[derive(Clone, Debug)]
pub struct Property {
    /// Value or accessor pair.
    pub slot: PropertySlot,
    /// Whether the key is listed by enumeration and serialisation.
    pub enumerable: bool,
    /// Whether the descriptor may be redefined.
    pub configurable: bool,
}

impl Property {
    /// A standard data property: writable, enumerable, and configurable.
    #[must_use]
    pub fn data(value: impl Into<Value>) -> Self {
        Self {
            slot: PropertySlot::Data {
                value: value.into(),
                writable: true,
            },
            enumerable: true,
            configurable: true,
        }
    }

    /// An enumerable, configurable accessor property.
    #[must_use]
    pub const fn accessor(get: Option<Callable>, set: Option<Callable>) -> Self {
        Self {
            slot: PropertySlot::Accessor { get, set },
            enumerable: true,
            configurable: true,
        }
    }

    /// Returns a copy with the enumerable flag replaced.
    #[must_use]
    pub const fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    /// Returns a copy with the configurable flag replaced.
    #[must_use]
    pub const fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    /// Returns a copy with the writable flag replaced. Accessors are
    /// returned unchanged.
    #[must_use]
    pub fn with_writable(mut self, writable: bool) -> Self {
        if let PropertySlot::Data { writable: flag, .. } = &mut self.slot {
            *flag = writable;
        }
        self
    }

    /// The stored value of a data property.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match &self.slot {
            PropertySlot::Data { value, .. } => Some(value),
            PropertySlot::Accessor { .. } => None,
        }
    }

    /// The writable flag of a data property; `None` for accessors.
    #[must_use]
    pub const fn writable(&self) -> Option<bool> {
        match &self.slot {
            PropertySlot::Data { writable, .. } => Some(*writable),
            PropertySlot::Accessor { .. } => None,
        }
    }

    /// The getter of an accessor property.
    #[must_use]
    pub const fn getter(&self) -> Option<&Callable> {
        match &self.slot {
            PropertySlot::Accessor { get, .. } => get.as_ref(),
            PropertySlot::Data { .. } => None,
        }
    }

    /// The setter of an accessor property.
    #[must_use]
    pub const fn setter(&self) -> Option<&Callable> {
        match &self.slot {
            PropertySlot::Accessor { set, .. } => set.as_ref(),
            PropertySlot::Data { .. } => None,
        }
    }

    /// Returns `true` for accessor properties.
    #[must_use]
    pub const fn is_accessor(&self) -> bool {
        matches!(self.slot, PropertySlot::Accessor { .. })
    }

    /// Returns `true` for a write-only accessor (setter without getter).
    #[must_use]
    pub const fn is_setter_only(&self) -> bool {
        matches!(
            self.slot,
            PropertySlot::Accessor {
                get: None,
                set: Some(_)
            }
        )
    }
}
