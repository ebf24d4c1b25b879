//! Stored zero-shot classification configuration
//!
//! [`ConfigRecord`] is created once by the owning storage layer and never
//! mutated. Every successful update produces a new record.

use crate::error::ValidationError;
use crate::fingerprint::{Fingerprint, FingerprintError};
use crate::tokenization::Tokenization;
use serde::Serialize;

/// Opaque reference to the vocabulary a model was trained with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VocabularyRef {
    index: String,
}

impl VocabularyRef {
    /// Reference a vocabulary by the index it is stored in
    #[inline]
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }
}

/// Immutable inference configuration
///
/// # Invariants
/// - `classification_labels` is non-empty and names both an `entailment`
///   and a `contradiction` label (case-insensitive)
/// - `tokenization` satisfies its own settings invariants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigRecord {
    classification_labels: Vec<String>,
    vocabulary: VocabularyRef,
    tokenization: Tokenization,
    hypothesis_template: String,
    multi_label: bool,
    labels: Option<Vec<String>>,
    results_field: Option<String>,
}

impl ConfigRecord {
    /// Template used when none is configured
    pub const DEFAULT_HYPOTHESIS_TEMPLATE: &'static str = "This example is {}.";

    /// Start building a record
    #[inline]
    pub fn builder() -> ConfigRecordBuilder {
        ConfigRecordBuilder::new()
    }

    #[inline]
    #[must_use]
    pub fn classification_labels(&self) -> &[String] {
        &self.classification_labels
    }

    #[inline]
    #[must_use]
    pub fn vocabulary(&self) -> &VocabularyRef {
        &self.vocabulary
    }

    #[inline]
    #[must_use]
    pub fn tokenization(&self) -> &Tokenization {
        &self.tokenization
    }

    #[inline]
    #[must_use]
    pub fn hypothesis_template(&self) -> &str {
        &self.hypothesis_template
    }

    #[inline]
    #[must_use]
    pub fn is_multi_label(&self) -> bool {
        self.multi_label
    }

    /// Candidate labels, if any were stored
    #[inline]
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn results_field(&self) -> Option<&str> {
        self.results_field.as_deref()
    }

    /// True when no usable candidate labels are stored
    #[inline]
    #[must_use]
    pub fn lacks_labels(&self) -> bool {
        self.labels.as_ref().map_or(true, Vec::is_empty)
    }

    /// Content fingerprint over the canonical JSON form
    ///
    /// # Errors
    /// Returns error if the record cannot be serialized
    pub fn fingerprint(&self) -> Result<Fingerprint, FingerprintError> {
        Fingerprint::of(self)
    }

    /// Copy with the overridable fields replaced
    ///
    /// Callers are responsible for having validated the replacements.
    pub(crate) fn merged(
        &self,
        tokenization: Tokenization,
        multi_label: bool,
        labels: Option<Vec<String>>,
        results_field: Option<String>,
    ) -> Self {
        Self {
            classification_labels: self.classification_labels.clone(),
            vocabulary: self.vocabulary.clone(),
            tokenization,
            hypothesis_template: self.hypothesis_template.clone(),
            multi_label,
            labels,
            results_field,
        }
    }
}

/// Builder for [`ConfigRecord`]
///
/// `classification_labels` and `vocabulary` are required; everything else
/// falls back to its default.
#[derive(Debug, Default)]
#[must_use]
pub struct ConfigRecordBuilder {
    classification_labels: Option<Vec<String>>,
    vocabulary: Option<VocabularyRef>,
    tokenization: Option<Tokenization>,
    hypothesis_template: Option<String>,
    multi_label: bool,
    labels: Option<Vec<String>>,
    results_field: Option<String>,
}

impl ConfigRecordBuilder {
    /// Create new builder
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set classification labels
    pub fn classification_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classification_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Set vocabulary reference
    #[inline]
    pub fn vocabulary(mut self, vocabulary: VocabularyRef) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Set tokenization
    #[inline]
    pub fn tokenization(mut self, tokenization: Tokenization) -> Self {
        self.tokenization = Some(tokenization);
        self
    }

    /// Set hypothesis template
    #[inline]
    pub fn hypothesis_template(mut self, template: impl Into<String>) -> Self {
        self.hypothesis_template = Some(template.into());
        self
    }

    /// Set multi-label flag
    #[inline]
    pub fn multi_label(mut self, multi_label: bool) -> Self {
        self.multi_label = multi_label;
        self
    }

    /// Set candidate labels
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Set results field
    #[inline]
    pub fn results_field(mut self, field: impl Into<String>) -> Self {
        self.results_field = Some(field.into());
        self
    }

    /// Build record
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidRecord`] if a required field is
    /// missing or the classification labels are unusable
    pub fn build(self) -> Result<ConfigRecord, ValidationError> {
        let classification_labels = self
            .classification_labels
            .filter(|labels| !labels.is_empty())
            .ok_or_else(|| ValidationError::invalid_record("[classification_labels] must not be empty"))?;

        for required in ["entailment", "contradiction"] {
            if !classification_labels
                .iter()
                .any(|label| label.eq_ignore_ascii_case(required))
            {
                return Err(ValidationError::invalid_record(format!(
                    "[classification_labels] must contain [{required}]"
                )));
            }
        }

        let vocabulary = self
            .vocabulary
            .ok_or_else(|| ValidationError::invalid_record("missing [vocabulary]"))?;

        Ok(ConfigRecord {
            classification_labels,
            vocabulary,
            tokenization: self.tokenization.unwrap_or_default(),
            hypothesis_template: self
                .hypothesis_template
                .unwrap_or_else(|| ConfigRecord::DEFAULT_HYPOTHESIS_TEMPLATE.to_string()),
            multi_label: self.multi_label,
            labels: self.labels,
            results_field: self.results_field,
        })
    }
}
