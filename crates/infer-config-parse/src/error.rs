//! Error types for update decoding
//!
//! Every variant renders a stable message; callers surface them verbatim.

use infer_config::NameError;

/// Errors while decoding an update from its map form
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Keys outside the schema, in input order
    #[error("Unrecognized fields [{}].", .0.join(", "))]
    UnrecognizedFields(Vec<String>),

    /// Value of a known key has the wrong kind
    #[error("[{field}] must be {expected}, found [{found}]")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Required key is absent
    #[error("[{within}] is missing required field [{field}]")]
    MissingField { field: String, within: String },

    /// `tokenization` must name exactly one family
    #[error("[tokenization] must contain exactly one tokenizer entry, found [{0}]")]
    TokenizationEntries(usize),

    /// Unknown tokenizer family or truncate policy
    #[error(transparent)]
    Name(#[from] NameError),

    /// JSON syntax error in text input
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax error in text input
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ParseError {
    /// Create wrong type error, naming the kind actually found
    pub fn wrong_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            found: kind_of(found),
        }
    }

    /// Create missing field error
    pub fn missing_field(field: impl Into<String>, within: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            within: within.into(),
        }
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
