//! Version-gated wire form of inference config updates
//!
//! # Core Concepts
//!
//! - [`TransportVersion`]: protocol version spoken by a peer
//! - [`FIELD_GATES`]: the one table of fields newer than the oldest peer
//! - [`downgrade`]: project an update onto what a peer can observe
//! - [`StreamOutput`] / [`StreamInput`]: presence-flagged field streams
//! - [`WireConfig`]: local and minimum versions, peer negotiation
//!
//! # Example
//!
//! ```rust
//! use infer_config::{ConfigUpdate, TokenizationUpdate, Truncate};
//! use infer_config_wire::{decode, encode, TransportVersion};
//!
//! let update = ConfigUpdate::builder()
//!     .multi_label(true)
//!     .tokenization_update(TokenizationUpdate::Bert { truncate: Truncate::None })
//!     .build();
//!
//! let bytes = encode(&update, TransportVersion::V_8_0_0)?;
//! let seen_by_old_peer = decode(&bytes, TransportVersion::V_8_0_0)?;
//! assert_eq!(seen_by_old_peer.multi_label(), Some(true));
//! assert_eq!(seen_by_old_peer.tokenization_update(), None);
//! # Ok::<(), infer_config_wire::WireError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod adapter;
mod codec;
mod config;
mod error;
mod stream;
mod version;

pub use adapter::{downgrade, min_version, supports, FIELD_GATES};
pub use codec::{decode, encode, read_update, write_update};
pub use config::WireConfig;
pub use error::WireError;
pub use stream::{StreamInput, StreamOutput};
pub use version::TransportVersion;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
