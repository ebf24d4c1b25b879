//! Transport protocol versions
//!
//! Versions are ordered `major`, then `minor`, then `patch`.

use crate::error::WireError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Protocol version spoken by a peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransportVersion {
    major: u8,
    minor: u8,
    patch: u8,
}

impl TransportVersion {
    pub const V_7_17_0: Self = Self::new(7, 17, 0);
    pub const V_8_0_0: Self = Self::new(8, 0, 0);
    /// First version carrying tokenization updates
    pub const V_8_1_0: Self = Self::new(8, 1, 0);
    pub const CURRENT: Self = Self::V_8_1_0;

    #[inline]
    #[must_use]
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether this version is strictly older than `other`
    #[inline]
    #[must_use]
    pub fn before(self, other: Self) -> bool {
        self < other
    }

    /// Whether this version is `other` or newer
    #[inline]
    #[must_use]
    pub fn on_or_after(self, other: Self) -> bool {
        self >= other
    }
}

impl Default for TransportVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl Display for TransportVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for TransportVersion {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WireError::InvalidVersion(s.to_string());
        let mut parts = s.split('.').map(|part| part.parse::<u8>().map_err(|_| invalid()));
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        Ok(Self::new(major?, minor?, patch?))
    }
}

impl TryFrom<String> for TransportVersion {
    type Error = WireError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransportVersion> for String {
    fn from(version: TransportVersion) -> Self {
        version.to_string()
    }
}
