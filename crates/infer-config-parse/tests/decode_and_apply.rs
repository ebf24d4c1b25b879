//! End-to-end tests: client map → decoded update → merged record.
//!
//! These exercise the decoder together with the merge engine, the way an
//! owning service calls them for a single request.

use infer_config::{ConfigUpdate, Tokenization, TokenizationSettings, TokenizationUpdate, Truncate};
use infer_config_parse::{from_json_str, from_map, to_map, ParseError};
use infer_config_test_utils::{arb_update, init_tracing, record_with};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("test input must be an object"),
    }
}

#[test]
fn decoded_update_replaces_only_overridden_fields() {
    init_tracing();
    let map = object(json!({
        "labels": ["foo", "bar"],
        "multi_label": false,
        "results_field": "ml-results",
        "tokenization": {"bert": {"truncate": "first"}}
    }));

    let update = from_map(&map).unwrap();
    assert_eq!(
        update,
        ConfigUpdate::new(
            Some(vec!["foo".to_string(), "bar".to_string()]),
            Some(false),
            Some("ml-results".to_string()),
            Some(TokenizationUpdate::Bert {
                truncate: Truncate::First
            }),
        )
    );

    let settings = TokenizationSettings::new(true, false, 128, Truncate::Second, None).unwrap();
    let stored = record_with(Some(&["old"]), Tokenization::Bert(settings));
    let merged = update.apply(&stored).unwrap();

    assert_eq!(merged.labels(), Some(&["foo".to_string(), "bar".to_string()][..]));
    assert!(!merged.is_multi_label());
    assert_eq!(merged.results_field(), Some("ml-results"));
    assert_eq!(
        merged.tokenization(),
        &Tokenization::Bert(settings.with_truncate(Truncate::First))
    );
    assert_eq!(merged.classification_labels(), stored.classification_labels());
    assert_eq!(merged.vocabulary(), stored.vocabulary());
    assert_eq!(merged.hypothesis_template(), stored.hypothesis_template());
}

#[test]
fn unknown_keys_are_reported_together() {
    let err = from_map(&object(json!({"a": 1, "b": 2}))).unwrap_err();

    match &err {
        ParseError::UnrecognizedFields(keys) => assert_eq!(keys, &["a", "b"]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "Unrecognized fields [a, b].");
}

#[test]
fn decode_failure_produces_no_update() {
    let result = from_json_str(r#"{"labels": ["ok"], "multi_label": 1}"#);
    assert!(matches!(result, Err(ParseError::WrongType { ref field, .. }) if field == "multi_label"));
}

proptest! {
    #[test]
    fn prop_map_form_round_trips(update in arb_update()) {
        let map = to_map(&update).unwrap();
        prop_assert_eq!(from_map(&map).unwrap(), update);
    }

    #[test]
    fn prop_text_form_round_trips(update in arb_update()) {
        let text = serde_json::to_string(&update).unwrap();
        prop_assert_eq!(from_json_str(&text).unwrap(), update);
    }
}
