//! Error types for config records and updates
//!
//! Provides error handling for:
//! - Record construction (missing or malformed required fields)
//! - Update application (cross-field violations, family conflicts)
//! - Name lookup for tokenizer families and truncate policies

use crate::fingerprint::Fingerprint;
use crate::tokenization::{TokenizerFamily, Truncate};

/// Errors raised when a merge or a record would be semantically invalid
///
/// Display strings are stable and safe to match exactly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Neither the stored record nor the update carries labels
    #[error(
        "stored configuration has no [labels] defined, supplied inference_config update must supply [labels]"
    )]
    MissingLabels,

    /// Update targets a different tokenizer family than the stored record
    #[error(
        "tokenization type cannot be changed by an update. Existing: [{existing}], Updated: [{updated}]"
    )]
    FamilyMismatch {
        existing: TokenizerFamily,
        updated: TokenizerFamily,
    },

    /// A span was configured together with a truncating policy
    #[error("[truncate] must be [none] when [span] is provided, found truncate [{truncate}] with span [{span}]")]
    SpanRequiresNoTruncation { truncate: Truncate, span: u32 },

    /// Record construction failed
    #[error("invalid configuration: {0}")]
    InvalidRecord(String),

    /// Stored record no longer matches the fingerprint the caller read
    #[error("stored configuration changed: expected fingerprint [{expected}], found [{actual}]")]
    StaleRecord {
        expected: Fingerprint,
        actual: Fingerprint,
    },
}

impl ValidationError {
    /// Create family mismatch error
    #[inline]
    #[must_use]
    pub fn family_mismatch(existing: TokenizerFamily, updated: TokenizerFamily) -> Self {
        Self::FamilyMismatch { existing, updated }
    }

    /// Create invalid record error
    #[inline]
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }
}

/// Errors resolving a tokenizer family or truncate policy by name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("unknown tokenization type [{0}], expected one of [bert, mpnet, roberta]")]
    UnknownFamily(String),

    #[error("unknown truncate value [{0}], expected one of [first, second, balanced, none]")]
    UnknownTruncate(String),
}
