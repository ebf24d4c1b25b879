//! Testing utilities for the inference config workspace
//!
//! Shared fixtures, proptest strategies, and tracing setup.

#![allow(missing_docs)]

use infer_config::{
    ConfigRecord, ConfigUpdate, Tokenization, TokenizationSettings, TokenizationUpdate,
    TokenizerFamily, Truncate, VocabularyRef,
};
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; later calls are no-ops.
///
/// Honors `RUST_LOG`, defaulting to `debug` for workspace crates.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("infer_config=debug,infer_config_parse=debug,infer_config_wire=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Record with the given candidate labels and a default BERT tokenization
pub fn record_with_labels(labels: Option<&[&str]>) -> ConfigRecord {
    record_with(labels, Tokenization::default())
}

/// Record with the given candidate labels and tokenization
pub fn record_with(labels: Option<&[&str]>, tokenization: Tokenization) -> ConfigRecord {
    let builder = ConfigRecord::builder()
        .classification_labels(["entailment", "neutral", "contradiction"])
        .vocabulary(VocabularyRef::new("test-vocabulary"))
        .tokenization(tokenization)
        .results_field("predicted_value");
    let builder = match labels {
        Some(labels) => builder.labels(labels.iter().copied()),
        None => builder,
    };
    builder.build().unwrap()
}

pub fn arb_truncate() -> impl Strategy<Value = Truncate> {
    prop::sample::select(Truncate::ALL.to_vec())
}

pub fn arb_family() -> impl Strategy<Value = TokenizerFamily> {
    prop::sample::select(TokenizerFamily::ALL.to_vec())
}

fn arb_label() -> impl Strategy<Value = String> {
    "[a-z]{1,10}"
}

/// Settings under any policy; a span only appears with [`Truncate::None`]
pub fn arb_settings() -> impl Strategy<Value = TokenizationSettings> {
    let unspanned = (any::<bool>(), any::<bool>(), 16u32..1024, arb_truncate()).prop_map(
        |(lower, special, max_len, truncate)| {
            TokenizationSettings::new(lower, special, max_len, truncate, None).unwrap()
        },
    );
    let spanned = (any::<bool>(), any::<bool>(), 16u32..1024, 1u32..256).prop_map(
        |(lower, special, max_len, span)| {
            TokenizationSettings::new(lower, special, max_len, Truncate::None, Some(span)).unwrap()
        },
    );
    prop_oneof![unspanned, spanned]
}

pub fn arb_tokenization() -> impl Strategy<Value = Tokenization> {
    prop_oneof![
        arb_settings().prop_map(Tokenization::Bert),
        arb_settings().prop_map(Tokenization::MpNet),
        (arb_settings(), any::<bool>()).prop_map(|(settings, add_prefix_space)| {
            Tokenization::Roberta {
                settings,
                add_prefix_space,
            }
        }),
    ]
}

pub fn arb_tokenization_update() -> impl Strategy<Value = TokenizationUpdate> {
    (arb_family(), arb_truncate()).prop_map(|(family, truncate)| TokenizationUpdate::new(family, truncate))
}

/// Record that always carries at least one candidate label
pub fn arb_record() -> impl Strategy<Value = ConfigRecord> {
    (
        prop::sample::select(vec![
            vec!["entailment", "neutral", "contradiction"],
            vec!["contradiction", "neutral", "entailment"],
        ]),
        arb_tokenization(),
        "[A-Za-z ]{1,10}",
        any::<bool>(),
        prop::collection::vec(arb_label(), 1..5),
        prop::option::of("[a-z_]{1,8}"),
    )
        .prop_map(
            |(classification, tokenization, template, multi_label, labels, results_field)| {
                let builder = ConfigRecord::builder()
                    .classification_labels(classification)
                    .vocabulary(VocabularyRef::new("vocab"))
                    .tokenization(tokenization)
                    .hypothesis_template(template)
                    .multi_label(multi_label)
                    .labels(labels);
                let builder = match results_field {
                    Some(field) => builder.results_field(field),
                    None => builder,
                };
                builder.build().unwrap()
            },
        )
}

/// Any update, with each field independently unset or set
pub fn arb_update() -> impl Strategy<Value = ConfigUpdate> {
    (
        prop::option::of(prop::collection::vec(arb_label(), 0..5)),
        prop::option::of(any::<bool>()),
        prop::option::of("[a-z\\-]{1,5}"),
        prop::option::of(arb_tokenization_update()),
    )
        .prop_map(|(labels, multi_label, results_field, tokenization)| {
            ConfigUpdate::new(labels, multi_label, results_field, tokenization)
        })
}

/// Record paired with an update whose tokenization (if set) matches its family
pub fn arb_compatible_pair() -> impl Strategy<Value = (ConfigRecord, ConfigUpdate)> {
    (arb_record(), arb_update(), arb_truncate()).prop_map(|(record, update, truncate)| {
        let tokenization = update
            .tokenization_update()
            .map(|_| TokenizationUpdate::new(record.tokenization().family(), truncate));
        let update = ConfigUpdate::new(
            update.labels().map(<[String]>::to_vec),
            update.multi_label(),
            update.results_field().map(str::to_string),
            tokenization,
        );
        (record, update)
    })
}
