//! Wire boundary configuration
//!
//! Hosts embed [`WireConfig`] in their own configuration (it deserializes
//! from TOML with every field optional) and use it to negotiate the version
//! spoken with each peer.

use crate::codec::{decode, encode};
use crate::error::WireError;
use crate::version::TransportVersion;
use infer_config::ConfigUpdate;
use serde::{Deserialize, Serialize};

/// Versions this node speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Version this node writes natively
    pub local_version: TransportVersion,
    /// Oldest peer version still accepted
    pub min_compatible_version: TransportVersion,
}

impl WireConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With local version
    #[inline]
    #[must_use]
    pub fn with_local_version(mut self, version: TransportVersion) -> Self {
        self.local_version = version;
        self
    }

    /// With minimum compatible version
    #[inline]
    #[must_use]
    pub fn with_min_compatible_version(mut self, version: TransportVersion) -> Self {
        self.min_compatible_version = version;
        self
    }

    /// Parse and validate from TOML text
    ///
    /// # Errors
    /// Returns [`WireError::Toml`] on syntax errors or
    /// [`WireError::Config`] if the versions are inconsistent
    pub fn from_toml_str(content: &str) -> Result<Self, WireError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the versions are consistent
    ///
    /// # Errors
    /// Returns [`WireError::Config`] if the minimum exceeds the local version
    pub fn validate(&self) -> Result<(), WireError> {
        if self.min_compatible_version > self.local_version {
            return Err(WireError::Config(format!(
                "min_compatible_version [{}] is newer than local_version [{}]",
                self.min_compatible_version, self.local_version
            )));
        }
        Ok(())
    }

    /// Version to speak with a peer: the older of the two
    ///
    /// # Errors
    /// Returns [`WireError::UnsupportedVersion`] if the peer is too old
    pub fn negotiate(&self, peer: TransportVersion) -> Result<TransportVersion, WireError> {
        if peer.before(self.min_compatible_version) {
            return Err(WireError::UnsupportedVersion {
                peer,
                minimum: self.min_compatible_version,
            });
        }
        let version = peer.min(self.local_version);
        tracing::debug!(%peer, %version, "negotiated transport version");
        Ok(version)
    }

    /// Encode an update for a peer, at the negotiated version
    ///
    /// # Errors
    /// Fails if the peer is too old or encoding fails
    pub fn encode_for(
        &self,
        update: &ConfigUpdate,
        peer: TransportVersion,
    ) -> Result<Vec<u8>, WireError> {
        encode(update, self.negotiate(peer)?)
    }

    /// Decode an update sent by a peer, at the negotiated version
    ///
    /// # Errors
    /// Fails if the peer is too old or the bytes are malformed
    pub fn decode_from(
        &self,
        bytes: &[u8],
        peer: TransportVersion,
    ) -> Result<ConfigUpdate, WireError> {
        decode(bytes, self.negotiate(peer)?)
    }
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            local_version: TransportVersion::CURRENT,
            min_compatible_version: TransportVersion::V_8_0_0,
        }
    }
}
