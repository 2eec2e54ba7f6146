//! Hook contracts: arguments, overrides, and error propagation.

use std::sync::Arc;

use anyhow::{Result, ensure};
use ortho_merge::{MergeError, MergeOptions, Structure, Value};
use parking_lot::Mutex;
use rstest::rstest;
use serde_json::{Value as Json, json};
use test_helpers::fixtures::{document_pair, structure, to_json};

#[test]
fn filter_receives_sources_targets_and_depth() -> Result<()> {
    let first = structure(json!({ "a": 1, "b": { "c": "foo" } }))?;
    let second = structure(json!({ "a": 2, "b": { "c": "bar" } }))?;
    let Some(Value::Object(second_nested)) = second.get("b")? else {
        anyhow::bail!("nested structure missing");
    };
    let conditions: Arc<Mutex<Vec<&'static str>>> = Arc::default();
    let log = Arc::clone(&conditions);
    let second_handle = second.clone();

    let options = MergeOptions::new().filter(move |ctx| {
        let mut entries = log.lock();
        let source_value = ctx.source_value.to_json()?;
        if source_value == json!(1) {
            entries.push("first a");
        }
        if source_value == json!(2) && ctx.target_value.and_then(Value::as_f64) == Some(1.0) {
            entries.push("target value");
        }
        if ctx.source.ptr_eq(&second_handle) && ctx.key == "a" && ctx.depth == 0 {
            entries.push("depth 0");
        }
        if ctx.source.ptr_eq(&second_nested) && ctx.key == "c" && ctx.depth == 1 {
            entries.push("depth 1");
        }
        Ok(None)
    });
    let merged = options.into_merger().merge(&[first, second])?;

    let observed = conditions.lock().clone();
    ensure!(
        observed == ["first a", "target value", "depth 0", "depth 1"],
        "observed {observed:?}"
    );
    ensure!(to_json(&merged)? == json!({ "a": 2, "b": { "c": "bar" } }));
    Ok(())
}

#[rstest]
#[case::keep_only_string(true, json!({ "string": "bar" }))]
#[case::drop_string(false, json!({
    "array": [2, 3],
    "number": 2,
    "object": { "a": 1, "b": 2, "c": [2, 2, [2, 2]], "d": { "x": 1, "y": 2, "z": 2 }, "e": null },
    "nothing": null
}))]
fn filter_verdicts(#[case] keep_string: bool, #[case] expected: Json) -> Result<()> {
    let merged = MergeOptions::new()
        .filter(move |ctx| Ok(Some((ctx.key == "string") == keep_string)))
        .into_merger()
        .merge(&document_pair()?)?;
    ensure!(to_json(&merged)? == expected);
    Ok(())
}

#[test]
fn before_each_replacement_discards_source_content() -> Result<()> {
    let merged = MergeOptions::new()
        .before_each(|ctx| {
            Ok((ctx.key == "object").then(|| Value::from(Structure::new().with("replaced", true))))
        })
        .into_merger()
        .merge(&document_pair()?)?;
    ensure!(to_json(&merged)?["object"] == json!({ "replaced": true }));
    Ok(())
}

#[test]
fn after_each_sees_the_merged_value_and_may_replace_it() -> Result<()> {
    let seen: Arc<Mutex<Vec<(String, usize, Json)>>> = Arc::default();
    let log = Arc::clone(&seen);
    let merged = MergeOptions::new()
        .after_each(move |ctx| {
            log.lock()
                .push((ctx.key.to_owned(), ctx.depth, ctx.merged_value.to_json()?));
            Ok((ctx.key == "x").then_some(Value::Null))
        })
        .into_merger()
        .merge(&[
            structure(json!({ "n": { "x": 1, "y": 1 } }))?,
            structure(json!({ "n": { "y": 2 } }))?,
        ])?;

    ensure!(to_json(&merged)? == json!({ "n": { "x": null, "y": 2 } }));
    let observed = seen.lock().clone();
    let last = observed.last().cloned();
    ensure!(
        last == Some(("n".to_owned(), 0, json!({ "x": null, "y": 2 }))),
        "observed {observed:?}"
    );
    Ok(())
}

#[test]
fn hook_descriptor_records_define_properties() -> Result<()> {
    let merged = MergeOptions::new()
        .before_each(|ctx| {
            if ctx.key != "number" {
                return Ok(None);
            }
            let record = Structure::new().with("value", 42).with("enumerable", false);
            Ok(Some(Value::from(record)))
        })
        .into_merger()
        .merge(&document_pair()?)?;

    let property = merged.own_property("number");
    ensure!(property.as_ref().is_some_and(|p| !p.enumerable && p.writable() == Some(true)));
    ensure!(merged.get("number")?.and_then(|v| v.as_f64()) == Some(42.0));
    ensure!(to_json(&merged)?.get("number").is_none(), "hidden keys are not serialised");
    Ok(())
}

#[test]
fn source_values_shaped_like_descriptors_merge_as_data() -> Result<()> {
    let merged = ortho_merge::merge(&[
        structure(json!({ "meta": { "value": 1, "writable": false } }))?,
        structure(json!({ "meta": { "value": 2 } }))?,
    ])?;
    ensure!(to_json(&merged)? == json!({ "meta": { "value": 2, "writable": false } }));
    Ok(())
}

#[test]
fn hook_errors_reach_the_caller_unchanged() {
    let result = MergeOptions::new()
        .after_each(|ctx| {
            if ctx.depth > 0 {
                return Err(MergeError::hook(std::io::Error::other("too deep")));
            }
            Ok(None)
        })
        .into_merger()
        .merge(&[Structure::new().with("nested", Structure::new().with("x", 1))]);
    let Err(MergeError::Hook(source)) = result else {
        panic!("expected a hook error");
    };
    assert_eq!(source.to_string(), "too deep");
}

#[test]
fn on_circular_sees_the_cyclic_source_value() -> Result<()> {
    let cyclic = Structure::new().with("a", 1);
    cyclic.define_value("again", cyclic.clone());
    let handle = cyclic.clone();
    let merged = MergeOptions::new()
        .on_circular(move |ctx| {
            let same = ctx
                .source_value
                .as_structure()
                .is_some_and(|value| value.ptr_eq(&handle));
            Ok(Some(Value::from(same)))
        })
        .into_merger()
        .merge(&[cyclic])?;
    ensure!(to_json(&merged)? == json!({ "a": 1, "again": true }));
    Ok(())
}
