//! Properties of the recursive option merge.

use eloader_config::{deep_merge, merge_values, LoaderOptions};
use serde_json::{json, Value};
use std::path::Path;

fn samples() -> Vec<(Value, Value)> {
    vec![
        (json!({"a": 1}), json!({"a": 2})),
        (
            json!({"entry": "src/background.ts", "build": {"config": {"asar": true, "nsis": {"oneClick": false}}}}),
            json!({"build": {"config": {"nsis": {"oneClick": true}, "appId": "dev.acme"}}}),
        ),
        (json!({"a": {"b": 1}}), json!({"a": null})),
        (json!({"a": 1}), json!({"a": {"b": [1, 2]}})),
        (json!({"list": [1, 2, 3]}), json!({"list": []})),
        (json!({}), json!({"deep": {"er": {"est": "x"}}})),
    ]
}

/// Every leaf path of `value` with its value.
fn leaves(prefix: &str, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                leaves(&format!("{prefix}/{key}"), child, out);
            }
        }
        other => out.push((prefix.to_string(), other.clone())),
    }
}

#[test]
fn merge_is_idempotent() {
    for (base, update) in samples() {
        let once = deep_merge(base.clone(), &update);
        let twice = deep_merge(once.clone(), &update);
        assert_eq!(once, twice, "base={base} update={update}");
    }
}

#[test]
fn update_leaves_take_precedence() {
    for (base, update) in samples() {
        let merged = deep_merge(base, &update);
        let mut update_leaves = Vec::new();
        leaves("", &update, &mut update_leaves);
        for (pointer, expected) in update_leaves {
            if pointer.is_empty() {
                continue;
            }
            assert_eq!(merged.pointer(&pointer), Some(&expected), "at {pointer}");
        }
    }
}

#[test]
fn keys_absent_from_update_are_preserved() {
    let base = json!({
        "entry": "src/background.ts",
        "build": {"config": {"asar": true, "productName": "example"}}
    });
    let merged = deep_merge(base, &json!({"build": {"config": {"asar": false}}}));

    assert_eq!(merged["entry"], "src/background.ts");
    assert_eq!(merged["build"]["config"]["productName"], "example");
    assert_eq!(merged["build"]["config"]["asar"], false);
}

#[test]
fn in_place_merge_mutates_target() {
    let mut base = json!({"a": {"b": 1}});
    merge_values(&mut base, &json!({"a": {"c": 2}}));
    assert_eq!(base, json!({"a": {"b": 1, "c": 2}}));
}

#[test]
fn user_overrides_reach_typed_options() {
    let options = LoaderOptions::from_overrides(
        Path::new("/work/app"),
        &json!({
            "entry": "electron/main.ts",
            "externals": ["electron", "better-sqlite3"],
            "build": {"config": {"appId": "dev.acme.notes", "nsis": {"oneClick": true}}}
        }),
    )
    .unwrap();

    assert_eq!(options.entry, Path::new("electron/main.ts"));
    assert_eq!(options.externals, vec!["electron", "better-sqlite3"]);
    assert_eq!(options.target, "node14");

    let config = options.build.builder_config().unwrap();
    assert_eq!(config["appId"], "dev.acme.notes");
    assert_eq!(config["productName"], "example");
    assert_eq!(config["nsis"]["oneClick"], true);
    assert_eq!(config["nsis"]["allowToChangeInstallationDirectory"], true);
    assert_eq!(config["directories"]["app"], "/work/app/dist");
}

#[test]
fn defaults_are_not_shared_between_activations() {
    let root = Path::new("/work/app");
    let first = LoaderOptions::from_overrides(root, &json!({"target": "node20"})).unwrap();
    let second = LoaderOptions::from_overrides(root, &json!({})).unwrap();

    assert_eq!(first.target, "node20");
    assert_eq!(second.target, "node14");
}
