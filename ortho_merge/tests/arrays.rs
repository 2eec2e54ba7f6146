//! Sequence combination, de-duplication, and sorting.

use std::sync::Arc;

use anyhow::{Result, ensure};
use ortho_merge::{MergeOptions, Structure, Value};
use parking_lot::Mutex;
use rstest::rstest;
use serde_json::{Value as Json, json};
use test_helpers::fixtures::{document_pair, structure, to_json};

#[rstest]
#[case::append(
    MergeOptions::new().append_arrays(true),
    json!([1, 2, 2, 3]),
    json!([1, 1, [1, 1], 2, 2, [2, 2]])
)]
#[case::prepend(
    MergeOptions::new().prepend_arrays(true),
    json!([2, 3, 1, 2]),
    json!([2, 2, [2, 2], 1, 1, [1, 1]])
)]
#[case::append_dedup(
    MergeOptions::new().append_arrays(true).dedup_arrays(true),
    json!([1, 2, 3]),
    json!([1, [1, 1], 2, [2, 2]])
)]
#[case::prepend_dedup(
    MergeOptions::new().prepend_arrays(true).dedup_arrays(true),
    json!([2, 3, 1]),
    json!([2, [2, 2], 1, [1, 1]])
)]
fn reference_document_sequences(
    #[case] options: MergeOptions,
    #[case] array: Json,
    #[case] nested: Json,
) -> Result<()> {
    let merged = to_json(&options.into_merger().merge(&document_pair()?)?)?;
    ensure!(merged["array"] == array, "array {}", merged["array"]);
    ensure!(merged["object"]["c"] == nested, "nested {}", merged["object"]["c"]);
    Ok(())
}

#[test]
fn dedup_without_combination_cleans_each_sequence() -> Result<()> {
    let merged = MergeOptions::new()
        .dedup_arrays(true)
        .into_merger()
        .merge(&[structure(json!({ "a": [1, "1", 1, null, null] }))?])?;
    ensure!(to_json(&merged)? == json!({ "a": [1, "1", null] }));
    Ok(())
}

#[test]
fn dedup_compares_structures_by_identity() -> Result<()> {
    let shared = Structure::new().with("id", 1);
    let twin = Structure::new().with("id", 1);
    let source = Structure::new().with(
        "items",
        Value::Array(vec![shared.clone().into(), shared.into(), twin.into()]),
    );
    let merged = MergeOptions::new()
        .dedup_arrays(true)
        .into_merger()
        .merge(&[source])?;
    ensure!(to_json(&merged)? == json!({ "items": [{ "id": 1 }, { "id": 1 }] }));
    Ok(())
}

#[test]
fn sequences_inside_sequences_keep_their_structures_shared() -> Result<()> {
    let shared = Structure::new().with("id", 1);
    let source = Structure::new().with("items", Value::Array(vec![shared.clone().into()]));
    let merged = ortho_merge::merge(&[source])?;
    let items = merged.get("items")?;
    let first = items
        .as_ref()
        .and_then(Value::as_array)
        .and_then(<[Value]>::first)
        .and_then(Value::as_structure);
    ensure!(first.is_some_and(|item| item.ptr_eq(&shared)));
    Ok(())
}

#[rstest]
#[case::text(MergeOptions::new().sort_arrays(true), json!([1, 10, 2, "a", "b"]))]
#[case::custom(
    MergeOptions::new().sort_with(|a, b| b.natural_cmp(a)),
    json!(["b", "a", 10, 2, 1])
)]
fn sorting_orders_combined_sequences(
    #[case] options: MergeOptions,
    #[case] expected: Json,
) -> Result<()> {
    let merged = options.append_arrays(true).into_merger().merge(&[
        structure(json!({ "a": ["b", 10] }))?,
        structure(json!({ "a": [2, "a", 1] }))?,
    ])?;
    ensure!(to_json(&merged)?["a"] == expected);
    Ok(())
}

#[test]
fn default_sort_orders_numbers_as_text() -> Result<()> {
    let merged = MergeOptions::new()
        .sort_arrays(true)
        .into_merger()
        .merge(&[structure(json!({ "a": [10, 9, 1] }))?])?;
    ensure!(to_json(&merged)? == json!({ "a": [1, 10, 9] }));
    Ok(())
}

#[test]
fn deferred_and_immediate_finalisation_agree() -> Result<()> {
    let sources = [
        structure(json!({ "a": [3, 1, 3], "n": { "b": [2, 2] } }))?,
        structure(json!({ "a": [1, 2], "n": { "b": [1] } }))?,
    ];
    let base = MergeOptions::new()
        .append_arrays(true)
        .dedup_arrays(true)
        .sort_arrays(true);
    let deferred = base.clone().into_merger().merge(&sources)?;

    let observed: Arc<Mutex<Vec<String>>> = Arc::default();
    let log = Arc::clone(&observed);
    let immediate = base
        .after_each(move |ctx| {
            log.lock().push(ctx.key.to_owned());
            Ok(None)
        })
        .into_merger()
        .merge(&sources)?;

    ensure!(to_json(&deferred)? == json!({ "a": [1, 2, 3], "n": { "b": [1, 2] } }));
    ensure!(to_json(&deferred)? == to_json(&immediate)?);
    ensure!(!observed.lock().is_empty());
    Ok(())
}
