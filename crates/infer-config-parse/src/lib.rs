//! Strict decoding of inference config updates
//!
//! The trusted boundary between client-supplied maps and [`ConfigUpdate`].
//!
//! # Core Operations
//!
//! - **Decode**: [`from_map`] validates an untyped map into an update
//! - **Ingress**: [`from_json_str`] / [`from_yaml_str`] parse text first
//! - **Egress**: [`to_map`] renders an update back to its map form
//!
//! # Architecture
//!
//! ```text
//! JSON/YAML text → serde_json::Value → from_map → ConfigUpdate → to_map → Map
//! ```
//!
//! Unknown keys at any level fail the decode; all unknown keys of an object
//! are reported in one error.
//!
//! # Example
//!
//! ```rust
//! use infer_config_parse::from_json_str;
//!
//! let update = from_json_str(r#"{"labels": ["foo", "bar"], "multi_label": false}"#)?;
//! assert_eq!(update.multi_label(), Some(false));
//!
//! let err = from_json_str(r#"{"a": 1, "b": 2}"#).unwrap_err();
//! assert_eq!(err.to_string(), "Unrecognized fields [a, b].");
//! # Ok::<(), infer_config_parse::ParseError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod decoder;
pub mod error;
pub mod formats;

pub use decoder::{from_map, from_value, to_map};
pub use error::ParseError;
pub use formats::{from_json_str, from_yaml_str, JsonParser, UpdateParser, YamlParser};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
