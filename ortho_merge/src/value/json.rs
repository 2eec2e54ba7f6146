//! Conversions between [`Value`] and `serde_json` documents.

use serde_json::{Map, Number, Value as Json};

use super::Value;
use crate::error::ConversionError;
use crate::structure::Structure;

/// Largest integer magnitude an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(flag) => Self::Bool(flag),
            Json::Number(number) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
            Json::String(text) => Self::String(text),
            Json::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => Self::Object(Structure::from(map)),
        }
    }
}

impl From<Map<String, Json>> for Structure {
    fn from(map: Map<String, Json>) -> Self {
        map.into_iter().collect()
    }
}

impl Structure {
    /// Build a structure from a JSON object. Returns `None` for any other
    /// kind of document.
    #[must_use]
    pub fn from_json(json: Json) -> Option<Self> {
        match json {
            Json::Object(map) => Some(Self::from(map)),
            _ => None,
        }
    }
}

impl Value {
    /// Convert into a `serde_json` document.
    ///
    /// Only enumerable keys are emitted and accessor properties are read
    /// through their getters. Functions are omitted from structures and
    /// become `null` inside sequences; non-finite numbers become `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Circular`] when a structure contains itself
    /// and [`ConversionError::Accessor`] when a getter fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_merge::Value;
    /// use serde_json::json;
    ///
    /// let value = Value::from(json!({"a": [1, 2], "b": {"c": "x"}}));
    /// assert_eq!(value.to_json()?, json!({"a": [1, 2], "b": {"c": "x"}}));
    /// # Ok::<_, ortho_merge::ConversionError>(())
    /// ```
    pub fn to_json(&self) -> Result<Json, ConversionError> {
        value_to_json(self, &mut Vec::new(), "$")
    }
}

fn value_to_json(
    value: &Value,
    ancestors: &mut Vec<Structure>,
    path: &str,
) -> Result<Json, ConversionError> {
    Ok(match value {
        Value::Null | Value::Function(_) => Json::Null,
        Value::Bool(flag) => Json::Bool(*flag),
        Value::Number(number) => number_to_json(*number),
        Value::String(text) => Json::String(text.clone()),
        Value::Array(items) => Json::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| value_to_json(item, ancestors, &format!("{path}[{index}]")))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(structure) => structure_to_json(structure, ancestors, path)?,
    })
}

fn structure_to_json(
    structure: &Structure,
    ancestors: &mut Vec<Structure>,
    path: &str,
) -> Result<Json, ConversionError> {
    if ancestors.iter().any(|ancestor| ancestor.ptr_eq(structure)) {
        return Err(ConversionError::Circular {
            path: path.to_owned(),
        });
    }
    ancestors.push(structure.clone());
    let mut map = Map::new();
    for key in structure.own_keys() {
        let enumerable = structure
            .own_property(&key)
            .is_some_and(|property| property.enumerable);
        if !enumerable {
            continue;
        }
        match structure.get(&key)? {
            None | Some(Value::Function(_)) => {}
            Some(value) => {
                let nested = value_to_json(&value, ancestors, &format!("{path}.{key}"))?;
                map.insert(key, nested);
            }
        }
    }
    ancestors.pop();
    Ok(Json::Object(map))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "integral values within the safe integer range convert exactly"
)]
fn number_to_json(number: f64) -> Json {
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        Json::Number(Number::from(number as i64))
    } else {
        Number::from_f64(number).map_or(Json::Null, Json::Number)
    }
}
