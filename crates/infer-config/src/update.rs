//! Partial updates of stored config records
//!
//! Provides [`ConfigUpdate`], an immutable set of optional overrides, and
//! [`ConfigUpdateBuilder`] for assembling one.
//!
//! Every field is either unset (`None`) or set (`Some`). A field set to an
//! empty value is still set: `Some(vec![])` for labels is an explicit
//! override, not an absence.

use crate::error::ValidationError;
use crate::fingerprint::Fingerprint;
use crate::record::ConfigRecord;
use crate::tokenization::TokenizationUpdate;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Overridable fields, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateField {
    Labels,
    MultiLabel,
    ResultsField,
    Tokenization,
}

impl UpdateField {
    /// Every field, in wire order
    pub const ALL: [UpdateField; 4] = [
        Self::Labels,
        Self::MultiLabel,
        Self::ResultsField,
        Self::Tokenization,
    ];

    /// Map key for this field
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Labels => "labels",
            Self::MultiLabel => "multi_label",
            Self::ResultsField => "results_field",
            Self::Tokenization => "tokenization",
        }
    }
}

impl Display for UpdateField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable partial override of a [`ConfigRecord`]
///
/// Serializes to the map form accepted by the strict decoder, omitting
/// unset fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    multi_label: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    results_field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    tokenization: Option<TokenizationUpdate>,
}

impl ConfigUpdate {
    /// Create update from its parts
    #[inline]
    #[must_use]
    pub fn new(
        labels: Option<Vec<String>>,
        multi_label: Option<bool>,
        results_field: Option<String>,
        tokenization: Option<TokenizationUpdate>,
    ) -> Self {
        Self {
            labels,
            multi_label,
            results_field,
            tokenization,
        }
    }

    /// Start building an update
    #[inline]
    pub fn builder() -> ConfigUpdateBuilder {
        ConfigUpdateBuilder::new()
    }

    #[inline]
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn multi_label(&self) -> Option<bool> {
        self.multi_label
    }

    #[inline]
    #[must_use]
    pub fn results_field(&self) -> Option<&str> {
        self.results_field.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn tokenization_update(&self) -> Option<&TokenizationUpdate> {
        self.tokenization.as_ref()
    }

    /// Whether a field is set
    #[inline]
    #[must_use]
    pub fn is_set(&self, field: UpdateField) -> bool {
        match field {
            UpdateField::Labels => self.labels.is_some(),
            UpdateField::MultiLabel => self.multi_label.is_some(),
            UpdateField::ResultsField => self.results_field.is_some(),
            UpdateField::Tokenization => self.tokenization.is_some(),
        }
    }

    /// Copy with one field forced to unset
    #[must_use]
    pub fn without(mut self, field: UpdateField) -> Self {
        match field {
            UpdateField::Labels => self.labels = None,
            UpdateField::MultiLabel => self.multi_label = None,
            UpdateField::ResultsField => self.results_field = None,
            UpdateField::Tokenization => self.tokenization = None,
        }
        self
    }

    /// True iff every field is unset
    ///
    /// Structural check on the update alone; it says nothing about whether
    /// applying to a particular record would change it.
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        UpdateField::ALL.into_iter().all(|field| !self.is_set(field))
    }

    /// Merge onto a stored record, producing a new record
    ///
    /// Unset fields carry the record's value forward; set fields replace it.
    /// Either a fully valid record is returned or nothing is.
    ///
    /// # Errors
    /// - [`ValidationError::MissingLabels`] if labels are unset here and
    ///   absent or empty on the record
    /// - errors from [`TokenizationUpdate::apply`]
    pub fn apply(&self, record: &ConfigRecord) -> Result<ConfigRecord, ValidationError> {
        if self.labels.is_none() && record.lacks_labels() {
            tracing::debug!("rejecting update: no labels stored or supplied");
            return Err(ValidationError::MissingLabels);
        }

        let tokenization = match &self.tokenization {
            Some(update) => update.apply(record.tokenization())?,
            None => *record.tokenization(),
        };

        tracing::debug!(
            noop = self.is_noop(),
            family = %tokenization.family(),
            truncate = %tokenization.truncate(),
            "applied config update"
        );

        Ok(record.merged(
            tokenization,
            self.multi_label.unwrap_or(record.is_multi_label()),
            self.labels
                .clone()
                .or_else(|| record.labels().map(<[String]>::to_vec)),
            self.results_field
                .clone()
                .or_else(|| record.results_field().map(str::to_string)),
        ))
    }

    /// Merge only if the record still has the fingerprint the caller read
    ///
    /// # Errors
    /// Returns [`ValidationError::StaleRecord`] on fingerprint mismatch,
    /// [`ValidationError::InvalidRecord`] if the record cannot be
    /// fingerprinted, otherwise the same errors as [`ConfigUpdate::apply`]
    pub fn apply_if_unchanged(
        &self,
        record: &ConfigRecord,
        expected: Fingerprint,
    ) -> Result<ConfigRecord, ValidationError> {
        let actual = record
            .fingerprint()
            .map_err(|e| ValidationError::invalid_record(e.to_string()))?;
        if actual != expected {
            return Err(ValidationError::StaleRecord { expected, actual });
        }
        self.apply(record)
    }
}

/// Staging area for a [`ConfigUpdate`]
///
/// Consumed by [`ConfigUpdateBuilder::build`], so an instance cannot be
/// reused afterwards.
#[derive(Debug, Default)]
#[must_use]
pub struct ConfigUpdateBuilder {
    labels: Option<Vec<String>>,
    multi_label: Option<bool>,
    results_field: Option<String>,
    tokenization: Option<TokenizationUpdate>,
}

impl ConfigUpdateBuilder {
    /// Create new builder
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set labels
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Set multi-label flag
    #[inline]
    pub fn multi_label(mut self, multi_label: bool) -> Self {
        self.multi_label = Some(multi_label);
        self
    }

    /// Set results field
    #[inline]
    pub fn results_field(mut self, field: impl Into<String>) -> Self {
        self.results_field = Some(field.into());
        self
    }

    /// Set tokenization update
    #[inline]
    pub fn tokenization_update(mut self, update: TokenizationUpdate) -> Self {
        self.tokenization = Some(update);
        self
    }

    /// Freeze into an immutable update
    #[inline]
    #[must_use]
    pub fn build(self) -> ConfigUpdate {
        ConfigUpdate {
            labels: self.labels,
            multi_label: self.multi_label,
            results_field: self.results_field,
            tokenization: self.tokenization,
        }
    }
}
