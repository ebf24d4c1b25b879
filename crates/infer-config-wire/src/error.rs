//! Error types for the wire boundary

use crate::version::TransportVersion;

/// Errors while encoding, decoding, or negotiating the stream form
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Value could not be written
    #[error("encoding failed: {0}")]
    Encode(postcard::Error),

    /// Bytes could not be read as the expected value
    #[error("decoding failed: {0}")]
    Decode(postcard::Error),

    /// Input continued past the last field
    #[error("{0} unread bytes after the last field")]
    TrailingBytes(usize),

    /// Peer is older than the oldest version still spoken
    #[error("peer version [{peer}] is older than the minimum compatible version [{minimum}]")]
    UnsupportedVersion {
        peer: TransportVersion,
        minimum: TransportVersion,
    },

    /// Version string is not `major.minor.patch`
    #[error("invalid transport version [{0}]")]
    InvalidVersion(String),

    /// Wire configuration is inconsistent
    #[error("invalid wire configuration: {0}")]
    Config(String),

    /// Wire configuration text could not be parsed
    #[error("wire configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_version_display() {
        let err = WireError::UnsupportedVersion {
            peer: TransportVersion::V_7_17_0,
            minimum: TransportVersion::V_8_0_0,
        };
        assert_eq!(
            err.to_string(),
            "peer version [7.17.0] is older than the minimum compatible version [8.0.0]"
        );
    }

    #[test]
    fn trailing_bytes_display() {
        assert_eq!(
            WireError::TrailingBytes(3).to_string(),
            "3 unread bytes after the last field"
        );
    }
}
