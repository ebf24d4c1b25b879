//! Merge properties of config updates against stored records.
//!
//! Covers the behaviours a storage layer relies on:
//! - the all-unset update is the identity on any labelled record;
//! - set fields replace and unset fields carry forward, nothing else moves;
//! - the missing-labels rule, including the explicit-empty-labels bypass;
//! - tokenizer family conflicts fail the whole merge.

use infer_config::{
    ConfigRecord, ConfigUpdate, Tokenization, TokenizationSettings, TokenizationUpdate,
    TokenizerFamily, Truncate, ValidationError,
};
use infer_config_test_utils::{
    arb_compatible_pair, arb_record, arb_tokenization, arb_truncate, arb_update, init_tracing,
    record_with, record_with_labels,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_noop_update_is_identity(record in arb_record()) {
        let update = ConfigUpdate::builder().build();
        prop_assert!(update.is_noop());
        prop_assert_eq!(update.apply(&record).unwrap(), record);
    }

    #[test]
    fn prop_is_noop_iff_every_field_unset(update in arb_update()) {
        let all_unset = update.labels().is_none()
            && update.multi_label().is_none()
            && update.results_field().is_none()
            && update.tokenization_update().is_none();
        prop_assert_eq!(update.is_noop(), all_unset);
    }

    #[test]
    fn prop_apply_replaces_set_fields_and_keeps_the_rest((record, update) in arb_compatible_pair()) {
        let merged = update.apply(&record).unwrap();

        prop_assert_eq!(merged.classification_labels(), record.classification_labels());
        prop_assert_eq!(merged.vocabulary(), record.vocabulary());
        prop_assert_eq!(merged.hypothesis_template(), record.hypothesis_template());

        prop_assert_eq!(merged.labels(), update.labels().or(record.labels()));
        prop_assert_eq!(
            merged.is_multi_label(),
            update.multi_label().unwrap_or(record.is_multi_label())
        );
        prop_assert_eq!(merged.results_field(), update.results_field().or(record.results_field()));

        let expected_truncate = update
            .tokenization_update()
            .map_or(record.tokenization().truncate(), TokenizationUpdate::truncate);
        prop_assert_eq!(merged.tokenization().family(), record.tokenization().family());
        prop_assert_eq!(merged.tokenization().truncate(), expected_truncate);
        prop_assert_eq!(
            merged.tokenization().settings().max_sequence_length(),
            record.tokenization().settings().max_sequence_length()
        );
        prop_assert_eq!(
            merged.tokenization().settings().span(),
            record.tokenization().settings().span()
        );
    }

    #[test]
    fn prop_unlabelled_record_requires_labels(tokenization in arb_tokenization(), update in arb_update()) {
        let record = record_with(None, tokenization);
        let update = ConfigUpdate::new(
            update.labels().map(<[String]>::to_vec),
            update.multi_label(),
            update.results_field().map(str::to_string),
            None,
        );

        let result = update.apply(&record);
        if update.labels().is_some() {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(ValidationError::MissingLabels));
        }
    }

    #[test]
    fn prop_family_mismatch_always_fails(record in arb_record(), truncate in arb_truncate()) {
        let existing = record.tokenization().family();
        for family in TokenizerFamily::ALL.into_iter().filter(|f| *f != existing) {
            let update = ConfigUpdate::builder()
                .tokenization_update(TokenizationUpdate::new(family, truncate))
                .build();
            let err = update.apply(&record).unwrap_err();
            let expected = format!("Existing: [{existing}], Updated: [{family}]");
            prop_assert!(err.to_string().contains(&expected));
        }
    }
}

#[test]
fn stored_config_without_labels_rejects_empty_update() {
    init_tracing();
    let record = record_with_labels(None);

    let err = ConfigUpdate::builder().build().apply(&record).unwrap_err();

    assert!(err.to_string().contains(
        "stored configuration has no [labels] defined, supplied inference_config update must supply [labels]"
    ));
}

#[test]
fn explicit_empty_labels_are_accepted_on_unlabelled_record() {
    let record = record_with_labels(Some(&[]));
    let empty: [&str; 0] = [];

    let merged = ConfigUpdate::builder()
        .labels(empty)
        .build()
        .apply(&record)
        .unwrap();

    assert_eq!(merged.labels(), Some(&[][..]));
}

#[test]
fn bert_to_roberta_update_names_both_families() {
    init_tracing();
    let record = record_with_labels(Some(&["a"]));
    let update = ConfigUpdate::builder()
        .tokenization_update(TokenizationUpdate::Roberta {
            truncate: Truncate::First,
        })
        .build();

    let err = update.apply(&record).unwrap_err();

    assert_eq!(
        err,
        ValidationError::FamilyMismatch {
            existing: TokenizerFamily::Bert,
            updated: TokenizerFamily::Roberta
        }
    );
    assert!(err.to_string().contains("Existing: [bert], Updated: [roberta]"));
}

#[test]
fn truncate_update_keeps_span_when_switching_to_none() {
    let settings = TokenizationSettings::new(true, true, 384, Truncate::None, Some(128)).unwrap();
    let record = record_with(Some(&["x"]), Tokenization::Bert(settings));
    let update = ConfigUpdate::builder()
        .tokenization_update(TokenizationUpdate::Bert {
            truncate: Truncate::None,
        })
        .build();

    let merged = update.apply(&record).unwrap();

    assert_eq!(merged.tokenization().settings().span(), Some(128));
    assert_eq!(merged.tokenization().settings().max_sequence_length(), 384);
}

#[test]
fn truncating_update_keeps_existing_span() {
    let settings = TokenizationSettings::new(false, true, 512, Truncate::None, Some(128)).unwrap();
    let record = record_with(Some(&["x"]), Tokenization::Bert(settings));
    let update = ConfigUpdate::builder()
        .tokenization_update(TokenizationUpdate::Bert {
            truncate: Truncate::First,
        })
        .build();

    let merged = update.apply(&record).unwrap();

    assert_eq!(merged.tokenization().truncate(), Truncate::First);
    assert_eq!(merged.tokenization().settings().span(), Some(128));
}

#[test]
fn merged_record_is_a_new_value() {
    let record: ConfigRecord = record_with_labels(Some(&["a", "b"]));
    let fingerprint = record.fingerprint().unwrap();

    let merged = ConfigUpdate::builder()
        .multi_label(true)
        .build()
        .apply_if_unchanged(&record, fingerprint)
        .unwrap();

    assert_eq!(record.fingerprint().unwrap(), fingerprint);
    assert_ne!(merged.fingerprint().unwrap(), fingerprint);
}
