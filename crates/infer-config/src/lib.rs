//! Zero-shot inference config updates
//!
//! Immutable stored configurations and the partial updates that override
//! selected fields of them.
//!
//! # Core Concepts
//!
//! - [`ConfigRecord`]: Immutable stored configuration
//! - [`ConfigUpdate`]: Optional overrides, each field unset or set
//! - [`TokenizationUpdate`]: Truncate-policy override for one tokenizer family
//! - [`Fingerprint`]: Blake3 content hash of a record
//!
//! # Example
//!
//! ```rust
//! use infer_config::{ConfigRecord, ConfigUpdate, TokenizationUpdate, Truncate, VocabularyRef};
//!
//! let stored = ConfigRecord::builder()
//!     .classification_labels(["entailment", "neutral", "contradiction"])
//!     .vocabulary(VocabularyRef::new("vocab"))
//!     .labels(["sports", "politics"])
//!     .build()?;
//!
//! let update = ConfigUpdate::builder()
//!     .multi_label(true)
//!     .tokenization_update(TokenizationUpdate::Bert { truncate: Truncate::Second })
//!     .build();
//!
//! let merged = update.apply(&stored)?;
//! assert!(merged.is_multi_label());
//! assert_eq!(merged.tokenization().truncate(), Truncate::Second);
//! # Ok::<(), infer_config::ValidationError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod fingerprint;
mod record;
mod tokenization;
mod update;

pub use error::{NameError, ValidationError};
pub use fingerprint::{Fingerprint, FingerprintError};
pub use record::{ConfigRecord, ConfigRecordBuilder, VocabularyRef};
pub use tokenization::{
    Tokenization, TokenizationSettings, TokenizationUpdate, TokenizerFamily, Truncate,
};
pub use update::{ConfigUpdate, ConfigUpdateBuilder, UpdateField};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
