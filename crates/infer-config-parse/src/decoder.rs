//! Strict decoding of updates from untyped maps
//!
//! Accepted shape:
//!
//! ```text
//! {
//!   "labels": [string, ...],
//!   "multi_label": bool,
//!   "results_field": string,
//!   "tokenization": { "<family>": { "truncate": "<policy>" } }
//! }
//! ```
//!
//! Every key is optional except `truncate` inside a family entry. Keys
//! outside this shape are collected per object and reported together.

use crate::error::ParseError;
use infer_config::{ConfigUpdate, TokenizationUpdate, TokenizerFamily, Truncate, UpdateField};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Object view that remembers which keys were read
struct StrictObject<'a> {
    map: &'a Map<String, Value>,
    consumed: HashSet<&'a str>,
}

impl<'a> StrictObject<'a> {
    fn new(map: &'a Map<String, Value>) -> Self {
        Self {
            map,
            consumed: HashSet::with_capacity(map.len()),
        }
    }

    /// Read a key, marking it consumed
    fn take(&mut self, key: &'a str) -> Option<&'a Value> {
        let value = self.map.get(key)?;
        self.consumed.insert(key);
        Some(value)
    }

    /// Fail with every key that was never read, in input order
    fn finish(self) -> Result<(), ParseError> {
        let unknown: Vec<String> = self
            .map
            .keys()
            .filter(|key| !self.consumed.contains(key.as_str()))
            .cloned()
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = unknown.len(), "rejecting unrecognized fields");
            Err(ParseError::UnrecognizedFields(unknown))
        }
    }
}

/// Decode an update from its map form
///
/// Pure: reads only the given map.
///
/// # Errors
/// Returns the first type or name error encountered, otherwise
/// [`ParseError::UnrecognizedFields`] listing every unknown top-level key
pub fn from_map(map: &Map<String, Value>) -> Result<ConfigUpdate, ParseError> {
    tracing::trace!(keys = map.len(), "decoding config update");
    let mut object = StrictObject::new(map);

    let labels = object
        .take(UpdateField::Labels.name())
        .map(decode_labels)
        .transpose()?;

    let multi_label = object
        .take(UpdateField::MultiLabel.name())
        .map(|value| {
            value.as_bool().ok_or_else(|| {
                ParseError::wrong_type(UpdateField::MultiLabel.name(), "a boolean", value)
            })
        })
        .transpose()?;

    let results_field = object
        .take(UpdateField::ResultsField.name())
        .map(|value| {
            value.as_str().map(str::to_string).ok_or_else(|| {
                ParseError::wrong_type(UpdateField::ResultsField.name(), "a string", value)
            })
        })
        .transpose()?;

    let tokenization = object
        .take(UpdateField::Tokenization.name())
        .map(decode_tokenization)
        .transpose()?;

    object.finish()?;

    Ok(ConfigUpdate::new(labels, multi_label, results_field, tokenization))
}

/// Decode an update from any JSON value
///
/// # Errors
/// Fails if the value is not an object, or as [`from_map`]
pub fn from_value(value: &Value) -> Result<ConfigUpdate, ParseError> {
    let map = value
        .as_object()
        .ok_or_else(|| ParseError::wrong_type("inference_config", "an object", value))?;
    from_map(map)
}

/// Render an update back to the map form [`from_map`] accepts
///
/// Unset fields are omitted.
///
/// # Errors
/// Returns [`ParseError::Json`] if serialization fails
pub fn to_map(update: &ConfigUpdate) -> Result<Map<String, Value>, ParseError> {
    match serde_json::to_value(update)? {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::wrong_type("inference_config", "an object", &other)),
    }
}

fn decode_labels(value: &Value) -> Result<Vec<String>, ParseError> {
    const EXPECTED: &str = "an array of strings";
    let field = UpdateField::Labels.name();
    value
        .as_array()
        .ok_or_else(|| ParseError::wrong_type(field, EXPECTED, value))?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ParseError::wrong_type(field, EXPECTED, item))
        })
        .collect()
}

fn decode_tokenization(value: &Value) -> Result<TokenizationUpdate, ParseError> {
    let field = UpdateField::Tokenization.name();
    let entries = value
        .as_object()
        .ok_or_else(|| ParseError::wrong_type(field, "an object", value))?;

    let mut iter = entries.iter();
    let (name, body) = match (iter.next(), iter.next()) {
        (Some(entry), None) => entry,
        _ => return Err(ParseError::TokenizationEntries(entries.len())),
    };

    let update = match name.parse::<TokenizerFamily>()? {
        TokenizerFamily::Bert => TokenizationUpdate::Bert {
            truncate: decode_truncate(name, body)?,
        },
        TokenizerFamily::MpNet => TokenizationUpdate::MpNet {
            truncate: decode_truncate(name, body)?,
        },
        TokenizerFamily::Roberta => TokenizationUpdate::Roberta {
            truncate: decode_truncate(name, body)?,
        },
    };
    tracing::trace!(family = %update.family(), truncate = %update.truncate(), "decoded tokenization update");
    Ok(update)
}

/// Sub-decoder shared by the family entries: `{"truncate": "<policy>"}`
fn decode_truncate(family: &str, body: &Value) -> Result<Truncate, ParseError> {
    let map = body
        .as_object()
        .ok_or_else(|| ParseError::wrong_type(family, "an object", body))?;
    let mut object = StrictObject::new(map);

    let value = object
        .take("truncate")
        .ok_or_else(|| ParseError::missing_field("truncate", family))?;
    let name = value
        .as_str()
        .ok_or_else(|| ParseError::wrong_type("truncate", "a string", value))?;
    let truncate = name.parse::<Truncate>()?;

    object.finish()?;
    Ok(truncate)
}
