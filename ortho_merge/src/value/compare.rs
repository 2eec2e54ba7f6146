//! Equality and ordering used for de-duplication, sorting, and comparison.

use std::cmp::Ordering;

use super::Value;
use crate::structure::{Callable, PropertySlot, Structure};

impl Value {
    /// SameValueZero equality.
    ///
    /// Scalars compare by value with `NaN` equal to itself and `+0` equal to
    /// `-0`. Sequences compare element-wise. Structures and callables compare
    /// by identity.
    #[must_use]
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_value(y))
            }
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Default ordering for sorted sequences.
    ///
    /// Values order first by kind (`null`, booleans, numbers, strings,
    /// sequences, structures, functions), then numbers numerically, strings
    /// lexicographically, and sequences element-wise. Structures and
    /// functions are equal among themselves so a stable sort keeps their
    /// input order.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Array(a), Self::Array(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.natural_cmp(y))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => Ordering::Equal,
        })
    }

    /// Ordering used by `sortArrays`: the text form of each value, compared
    /// by UTF-16 code units.
    ///
    /// Numbers render as they would in a document (`10` sorts before `9`),
    /// sequences as their comma-joined elements. Ties fall back to
    /// [`Value::natural_cmp`]. Structures and functions have no text form;
    /// they sort after every other value in kind order and keep their input
    /// order among themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_merge::Value;
    ///
    /// let mut values = vec![Value::from(10), Value::from(9), Value::from(1)];
    /// values.sort_by(Value::text_cmp);
    /// assert_eq!(values.iter().filter_map(Value::as_f64).collect::<Vec<_>>(), [1.0, 10.0, 9.0]);
    /// ```
    #[must_use]
    pub fn text_cmp(&self, other: &Self) -> Ordering {
        match (self.sort_text(), other.sort_text()) {
            (Some(a), Some(b)) => a
                .encode_utf16()
                .cmp(b.encode_utf16())
                .then_with(|| self.natural_cmp(other)),
            _ => self.natural_cmp(other),
        }
    }

    /// Text form used by [`Value::text_cmp`]; `None` for structures and
    /// functions.
    pub(super) fn sort_text(&self) -> Option<String> {
        match self {
            Self::Object(_) | Self::Function(_) => None,
            Self::Array(items) => Some(items.iter().map(Self::element_text).collect::<Vec<_>>().join(",")),
            Self::Null => Some("null".to_owned()),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Number(number) => Some(number_text(*number)),
            Self::String(text) => Some(text.clone()),
        }
    }

    fn element_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Object(_) => "[object Object]".to_owned(),
            Self::Function(_) => "[object Function]".to_owned(),
            other => other.sort_text().unwrap_or_default(),
        }
    }

    /// Structural equality that follows structures instead of comparing
    /// identity. Cycles are handled: a pair of structures already under
    /// comparison is assumed equal.
    #[must_use]
    pub fn deep_eq(&self, other: &Self) -> bool {
        deep_eq_values(self, other, &mut Vec::new())
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::String(_) => 3,
            Self::Array(_) => 4,
            Self::Object(_) => 5,
            Self::Function(_) => 6,
        }
    }
}

/// Shortest round-trip rendering, switching to exponent notation outside
/// `1e-6..1e21`.
fn number_text(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_owned();
    }
    if number.is_infinite() {
        let text = if number.is_sign_positive() { "Infinity" } else { "-Infinity" };
        return text.to_owned();
    }
    if number == 0.0 {
        return "0".to_owned();
    }
    let magnitude = number.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{number:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    number.to_string()
}

/// Removes repeated elements, keeping the first occurrence of each.
pub(crate) fn dedup_values(values: Vec<Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.iter().any(|seen| seen.same_value(&value)) {
            unique.push(value);
        }
    }
    unique
}

pub(crate) fn deep_eq_values(a: &Value, b: &Value, visiting: &mut Vec<(Structure, Structure)>) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|(left, right)| deep_eq_values(left, right, visiting))
        }
        (Value::Object(x), Value::Object(y)) => x.deep_eq_with(y, visiting),
        _ => a.same_value(b),
    }
}

pub(crate) fn compare_structures(
    a: &Structure,
    b: &Structure,
    visiting: &mut Vec<(Structure, Structure)>,
) -> bool {
    let keys = a.own_keys();
    if keys.len() != b.len() {
        return false;
    }
    for key in &keys {
        let (Some(left), Some(right)) = (a.own_property(key), b.own_property(key)) else {
            return false;
        };
        if left.enumerable != right.enumerable || left.configurable != right.configurable {
            return false;
        }
        let same = match (&left.slot, &right.slot) {
            (
                PropertySlot::Data {
                    value: x,
                    writable: wx,
                },
                PropertySlot::Data {
                    value: y,
                    writable: wy,
                },
            ) => wx == wy && deep_eq_values(x, y, visiting),
            (
                PropertySlot::Accessor { get: g1, set: s1 },
                PropertySlot::Accessor { get: g2, set: s2 },
            ) => same_callable(g1.as_ref(), g2.as_ref()) && same_callable(s1.as_ref(), s2.as_ref()),
            _ => false,
        };
        if !same {
            return false;
        }
    }
    match (a.prototype(), b.prototype()) {
        (None, None) => true,
        (Some(x), Some(y)) => x.deep_eq_with(&y, visiting),
        _ => false,
    }
}

fn same_callable(a: Option<&Callable>, b: Option<&Callable>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x.ptr_eq(y),
        _ => false,
    }
}
