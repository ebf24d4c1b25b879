//! Record fingerprints
//!
//! Provides [`Fingerprint`], a 32-byte Blake3 hash over a record's canonical
//! JSON form. Storage layers compare fingerprints to detect that a record
//! changed between read and write-back.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte content fingerprint (Blake3)
///
/// Immutable and cheap to clone (Copy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Create a fingerprint from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create fingerprint from byte slice
    ///
    /// # Errors
    /// Returns error if slice length is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FingerprintError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| FingerprintError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Compute Blake3 fingerprint of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Fingerprint a serializable value through its JSON encoding
    ///
    /// Struct fields serialize in declaration order, so equal values always
    /// produce equal fingerprints.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn of<T: serde::Serialize>(value: &T) -> Result<Self, FingerprintError> {
        let json = serde_json::to_vec(value)?;
        Ok(Self::compute(&json))
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl serde::Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Errors that can occur when parsing fingerprints
#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    /// Invalid fingerprint length
    #[error("invalid fingerprint length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex encoding error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Value could not be serialized for hashing
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_is_deterministic() {
        assert_eq!(Fingerprint::compute(b"record"), Fingerprint::compute(b"record"));
        assert_ne!(Fingerprint::compute(b"record-a"), Fingerprint::compute(b"record-b"));
    }

    #[test]
    fn display_and_parse() {
        let fp = Fingerprint::compute(b"test");
        let parsed: Fingerprint = fp.to_string().parse().unwrap();
        assert_eq!(fp, parsed);
    }

    #[test]
    fn from_slice_invalid_length() {
        let result = Fingerprint::from_slice(&[1u8; 31]);
        assert!(matches!(
            result,
            Err(FingerprintError::InvalidLength {
                expected: 32,
                actual: 31
            })
        ));
    }

    #[test]
    fn short_is_prefix() {
        let fp = Fingerprint::compute(b"test");
        assert_eq!(fp.short().len(), 16);
        assert!(fp.to_string().starts_with(&fp.short()));
    }

    #[test]
    fn of_serializable_matches_json_bytes() {
        let value = serde_json::json!({"labels": ["a", "b"]});
        let expected = Fingerprint::compute(&serde_json::to_vec(&value).unwrap());
        assert_eq!(Fingerprint::of(&value).unwrap(), expected);
    }

    #[test]
    fn of_propagates_serialization_failure() {
        let mut value = std::collections::HashMap::new();
        value.insert(vec![1u8], "non-string key");

        assert!(matches!(
            Fingerprint::of(&value),
            Err(FingerprintError::Serialization(_))
        ));
    }
}
