//! Sample structures used across merge tests.

use anyhow::{Result, anyhow};
use ortho_merge::{Structure, Value};
use serde_json::{Value as Json, json};

/// Build a structure from a JSON object literal.
///
/// # Errors
///
/// Returns an error when `document` is not a JSON object.
pub fn structure(document: Json) -> Result<Structure> {
    let kind = kind_of(&document);
    Structure::from_json(document).ok_or_else(|| anyhow!("expected a JSON object, found {kind}"))
}

/// Serialise a structure for comparison against a JSON literal.
///
/// # Errors
///
/// Returns an error when the structure is circular or a getter fails.
pub fn to_json(structure: &Structure) -> Result<Json> {
    Ok(Value::from(structure.clone()).to_json()?)
}

/// The first of the two reference documents: scalars, a sequence, and a
/// nested structure whose sequences contain repeated values.
///
/// # Errors
///
/// Never fails in practice; the signature matches [`structure`].
pub fn first_document() -> Result<Structure> {
    structure(json!({
        "array": [1, 2],
        "number": 1,
        "object": {
            "a": 1,
            "b": 1,
            "c": [1, 1, [1, 1]],
            "d": { "x": 1, "y": 1 }
        },
        "string": "foo"
    }))
}

/// The second reference document, overlapping the first on most keys.
///
/// # Errors
///
/// Never fails in practice; the signature matches [`structure`].
pub fn second_document() -> Result<Structure> {
    structure(json!({
        "array": [2, 3],
        "number": 2,
        "object": {
            "b": 2,
            "c": [2, 2, [2, 2]],
            "d": { "y": 2, "z": 2 },
            "e": null
        },
        "string": "bar",
        "nothing": null
    }))
}

/// Both reference documents, in merge order.
///
/// # Errors
///
/// Never fails in practice; the signature matches [`structure`].
pub fn document_pair() -> Result<[Structure; 2]> {
    Ok([first_document()?, second_document()?])
}

const fn kind_of(document: &Json) -> &'static str {
    match document {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
