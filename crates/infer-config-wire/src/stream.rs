//! Presence-flagged field streams
//!
//! Each optional field is written as a one-byte presence flag followed by
//! its postcard-encoded value when present. Fields gated above the peer's
//! version are neither written nor read.

use crate::adapter::supports;
use crate::error::WireError;
use crate::version::TransportVersion;
use infer_config::UpdateField;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Output stream addressed to a peer at a known version
#[derive(Debug)]
pub struct StreamOutput {
    version: TransportVersion,
    buf: Vec<u8>,
}

impl StreamOutput {
    #[inline]
    #[must_use]
    pub fn new(version: TransportVersion) -> Self {
        Self {
            version,
            buf: Vec::new(),
        }
    }

    /// Version of the peer this stream is written for
    #[inline]
    #[must_use]
    pub fn version(&self) -> TransportVersion {
        self.version
    }

    /// Write a value
    ///
    /// # Errors
    /// Returns [`WireError::Encode`] if serialization fails
    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WireError> {
        let bytes = postcard::to_allocvec(value).map_err(WireError::Encode)?;
        self.buf.extend_from_slice(&bytes);
        Ok(())
    }

    /// Write a presence flag, then the value if present
    ///
    /// # Errors
    /// Returns [`WireError::Encode`] if serialization fails
    pub fn write_optional<T: Serialize + ?Sized>(
        &mut self,
        value: Option<&T>,
    ) -> Result<(), WireError> {
        self.write(&value)
    }

    /// Write an optional field, or nothing if the peer predates it
    ///
    /// # Errors
    /// Returns [`WireError::Encode`] if serialization fails
    pub fn write_gated<T: Serialize + ?Sized>(
        &mut self,
        field: UpdateField,
        value: Option<&T>,
    ) -> Result<(), WireError> {
        if !supports(self.version, field) {
            tracing::trace!(%field, version = %self.version, "skipping gated field");
            return Ok(());
        }
        self.write_optional(value)
    }

    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Input stream received from a peer at a known version
#[derive(Debug)]
pub struct StreamInput<'a> {
    version: TransportVersion,
    remaining: &'a [u8],
}

impl<'a> StreamInput<'a> {
    #[inline]
    #[must_use]
    pub fn new(version: TransportVersion, bytes: &'a [u8]) -> Self {
        Self {
            version,
            remaining: bytes,
        }
    }

    /// Version of the peer that wrote this stream
    #[inline]
    #[must_use]
    pub fn version(&self) -> TransportVersion {
        self.version
    }

    /// Read a value
    ///
    /// # Errors
    /// Returns [`WireError::Decode`] if the bytes do not hold a `T`
    pub fn read<T: DeserializeOwned>(&mut self) -> Result<T, WireError> {
        let (value, rest) =
            postcard::take_from_bytes::<T>(self.remaining).map_err(WireError::Decode)?;
        self.remaining = rest;
        Ok(value)
    }

    /// Read a presence flag, then the value if present
    ///
    /// # Errors
    /// Returns [`WireError::Decode`] on malformed input
    pub fn read_optional<T: DeserializeOwned>(&mut self) -> Result<Option<T>, WireError> {
        self.read()
    }

    /// Read an optional field; unset if the peer predates it
    ///
    /// # Errors
    /// Returns [`WireError::Decode`] on malformed input
    pub fn read_gated<T: DeserializeOwned>(
        &mut self,
        field: UpdateField,
    ) -> Result<Option<T>, WireError> {
        if !supports(self.version, field) {
            return Ok(None);
        }
        self.read_optional()
    }

    /// Ensure every byte was consumed
    ///
    /// # Errors
    /// Returns [`WireError::TrailingBytes`] if input remains
    pub fn finish(self) -> Result<(), WireError> {
        if self.remaining.is_empty() {
            Ok(())
        } else {
            Err(WireError::TrailingBytes(self.remaining.len()))
        }
    }
}
