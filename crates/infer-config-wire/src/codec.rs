//! Stream form of [`ConfigUpdate`]
//!
//! Field order, fixed for encoder and decoder alike:
//!
//! 1. `labels`
//! 2. `multi_label`
//! 3. `results_field`
//! 4. `tokenization` (from 8.1.0)

use crate::adapter::downgrade;
use crate::error::WireError;
use crate::stream::{StreamInput, StreamOutput};
use crate::version::TransportVersion;
use infer_config::{ConfigUpdate, TokenizationUpdate, UpdateField};

/// Write every field of an update in wire order
///
/// # Errors
/// Returns [`WireError::Encode`] if a field fails to serialize
pub fn write_update(out: &mut StreamOutput, update: &ConfigUpdate) -> Result<(), WireError> {
    out.write_gated(UpdateField::Labels, update.labels())?;
    out.write_gated(UpdateField::MultiLabel, update.multi_label().as_ref())?;
    out.write_gated(UpdateField::ResultsField, update.results_field())?;
    out.write_gated(UpdateField::Tokenization, update.tokenization_update())?;
    Ok(())
}

/// Read every field of an update in wire order
///
/// # Errors
/// Returns [`WireError::Decode`] on malformed input
pub fn read_update(input: &mut StreamInput<'_>) -> Result<ConfigUpdate, WireError> {
    let labels = input.read_gated::<Vec<String>>(UpdateField::Labels)?;
    let multi_label = input.read_gated::<bool>(UpdateField::MultiLabel)?;
    let results_field = input.read_gated::<String>(UpdateField::ResultsField)?;
    let tokenization = input.read_gated::<TokenizationUpdate>(UpdateField::Tokenization)?;
    Ok(ConfigUpdate::new(labels, multi_label, results_field, tokenization))
}

/// Encode an update for a peer at `target`
///
/// Fields the peer does not understand are dropped first.
///
/// # Errors
/// Returns [`WireError::Encode`] if serialization fails
pub fn encode(update: &ConfigUpdate, target: TransportVersion) -> Result<Vec<u8>, WireError> {
    let projected = downgrade(update.clone(), target);
    let mut out = StreamOutput::new(target);
    write_update(&mut out, &projected)?;
    let bytes = out.into_bytes();
    tracing::trace!(%target, len = bytes.len(), "encoded config update");
    Ok(bytes)
}

/// Decode an update written by a peer at `peer`
///
/// # Errors
/// Returns [`WireError::Decode`] on malformed input or
/// [`WireError::TrailingBytes`] if bytes remain after the last field
pub fn decode(bytes: &[u8], peer: TransportVersion) -> Result<ConfigUpdate, WireError> {
    let mut input = StreamInput::new(peer, bytes);
    let update = read_update(&mut input)?;
    input.finish()?;
    tracing::trace!(%peer, noop = update.is_noop(), "decoded config update");
    Ok(update)
}
