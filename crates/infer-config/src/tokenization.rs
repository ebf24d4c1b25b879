//! Tokenizer families and truncation updates
//!
//! A [`Tokenization`] is the full tokenizer configuration stored on a record.
//! A [`TokenizationUpdate`] overrides only its truncate policy, and only for
//! the same [`TokenizerFamily`].

use crate::error::{NameError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Strategy for shortening over-length token sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Truncate {
    /// Truncate the first sequence
    First,
    /// Truncate the second sequence
    Second,
    /// Truncate the longer sequence until both fit
    Balanced,
    /// Never truncate; over-length input is an error or is spanned
    None,
}

impl Truncate {
    /// Every policy, in wire order
    pub const ALL: [Truncate; 4] = [Self::First, Self::Second, Self::Balanced, Self::None];

    /// Canonical lowercase name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Balanced => "balanced",
            Self::None => "none",
        }
    }
}

impl Display for Truncate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy names match case-insensitively: `first`, `FIRST` and `First` are
/// the same policy.
impl FromStr for Truncate {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| NameError::UnknownTruncate(s.to_string()))
    }
}

/// Tokenizer implementation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerFamily {
    Bert,
    MpNet,
    Roberta,
}

impl TokenizerFamily {
    /// Every family, in wire order
    pub const ALL: [TokenizerFamily; 3] = [Self::Bert, Self::MpNet, Self::Roberta];

    /// Registry name used in maps and error messages
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bert => "bert",
            Self::MpNet => "mpnet",
            Self::Roberta => "roberta",
        }
    }
}

impl Display for TokenizerFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Family names are registry keys and match exactly.
impl FromStr for TokenizerFamily {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| NameError::UnknownFamily(s.to_string()))
    }
}

/// Settings shared by every tokenizer family
///
/// [`TokenizationSettings::new`] only accepts a `span` together with
/// [`Truncate::None`]. A later truncate update replaces the policy alone and
/// carries any stored `span` forward untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenizationSettings {
    do_lower_case: bool,
    with_special_tokens: bool,
    max_sequence_length: u32,
    truncate: Truncate,
    span: Option<u32>,
}

impl TokenizationSettings {
    /// Default maximum sequence length
    pub const DEFAULT_MAX_SEQUENCE_LENGTH: u32 = 512;

    /// Create settings, checking the span/truncate invariant
    ///
    /// # Errors
    /// Returns [`ValidationError::SpanRequiresNoTruncation`] if `span` is set
    /// with a truncating policy
    pub fn new(
        do_lower_case: bool,
        with_special_tokens: bool,
        max_sequence_length: u32,
        truncate: Truncate,
        span: Option<u32>,
    ) -> Result<Self, ValidationError> {
        let settings = Self {
            do_lower_case,
            with_special_tokens,
            max_sequence_length,
            truncate,
            span,
        };
        settings.validate()?;
        Ok(settings)
    }

    #[inline]
    #[must_use]
    pub fn do_lower_case(&self) -> bool {
        self.do_lower_case
    }

    #[inline]
    #[must_use]
    pub fn with_special_tokens(&self) -> bool {
        self.with_special_tokens
    }

    #[inline]
    #[must_use]
    pub fn max_sequence_length(&self) -> u32 {
        self.max_sequence_length
    }

    #[inline]
    #[must_use]
    pub fn truncate(&self) -> Truncate {
        self.truncate
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> Option<u32> {
        self.span
    }

    /// Copy with a different truncate policy, all other settings kept
    #[inline]
    #[must_use]
    pub fn with_truncate(self, truncate: Truncate) -> Self {
        Self { truncate, ..self }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self.span {
            Some(span) if self.truncate != Truncate::None => {
                Err(ValidationError::SpanRequiresNoTruncation {
                    truncate: self.truncate,
                    span,
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for TokenizationSettings {
    fn default() -> Self {
        Self {
            do_lower_case: false,
            with_special_tokens: true,
            max_sequence_length: Self::DEFAULT_MAX_SEQUENCE_LENGTH,
            truncate: Truncate::First,
            span: None,
        }
    }
}

/// Full tokenizer configuration stored on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tokenization {
    Bert(TokenizationSettings),
    MpNet(TokenizationSettings),
    Roberta {
        settings: TokenizationSettings,
        add_prefix_space: bool,
    },
}

impl Tokenization {
    /// Family of this tokenization
    #[inline]
    #[must_use]
    pub fn family(&self) -> TokenizerFamily {
        match self {
            Self::Bert(_) => TokenizerFamily::Bert,
            Self::MpNet(_) => TokenizerFamily::MpNet,
            Self::Roberta { .. } => TokenizerFamily::Roberta,
        }
    }

    /// Shared settings
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &TokenizationSettings {
        match self {
            Self::Bert(settings) | Self::MpNet(settings) | Self::Roberta { settings, .. } => {
                settings
            }
        }
    }

    /// Current truncate policy
    #[inline]
    #[must_use]
    pub fn truncate(&self) -> Truncate {
        self.settings().truncate()
    }

    /// Copy with only the truncate policy replaced
    #[must_use]
    pub fn with_truncate(self, truncate: Truncate) -> Self {
        match self {
            Self::Bert(settings) => Self::Bert(settings.with_truncate(truncate)),
            Self::MpNet(settings) => Self::MpNet(settings.with_truncate(truncate)),
            Self::Roberta {
                settings,
                add_prefix_space,
            } => Self::Roberta {
                settings: settings.with_truncate(truncate),
                add_prefix_space,
            },
        }
    }
}

impl Default for Tokenization {
    fn default() -> Self {
        Self::Bert(TokenizationSettings::default())
    }
}

/// Partial update of a record's tokenization
///
/// One variant per family, each carrying exactly one truncate policy. The
/// serialized form is `{"<family>": {"truncate": "<policy>"}}`; variant order
/// is part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizationUpdate {
    Bert { truncate: Truncate },
    MpNet { truncate: Truncate },
    Roberta { truncate: Truncate },
}

impl TokenizationUpdate {
    /// Create update for a family
    #[inline]
    #[must_use]
    pub fn new(family: TokenizerFamily, truncate: Truncate) -> Self {
        match family {
            TokenizerFamily::Bert => Self::Bert { truncate },
            TokenizerFamily::MpNet => Self::MpNet { truncate },
            TokenizerFamily::Roberta => Self::Roberta { truncate },
        }
    }

    /// Family this update applies to
    #[inline]
    #[must_use]
    pub fn family(&self) -> TokenizerFamily {
        match self {
            Self::Bert { .. } => TokenizerFamily::Bert,
            Self::MpNet { .. } => TokenizerFamily::MpNet,
            Self::Roberta { .. } => TokenizerFamily::Roberta,
        }
    }

    /// Truncate policy to install
    #[inline]
    #[must_use]
    pub fn truncate(&self) -> Truncate {
        match self {
            Self::Bert { truncate } | Self::MpNet { truncate } | Self::Roberta { truncate } => {
                *truncate
            }
        }
    }

    /// Apply to an existing tokenization of the same family
    ///
    /// # Errors
    /// Returns [`ValidationError::FamilyMismatch`] if the families differ
    pub fn apply(&self, existing: &Tokenization) -> Result<Tokenization, ValidationError> {
        if existing.family() != self.family() {
            return Err(ValidationError::family_mismatch(
                existing.family(),
                self.family(),
            ));
        }
        Ok(existing.with_truncate(self.truncate()))
    }
}
