//! JSON update parser

use crate::decoder::from_value;
use crate::error::ParseError;
use crate::formats::UpdateParser;
use infer_config::ConfigUpdate;
use serde_json::Value;

/// JSON parser
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl UpdateParser for JsonParser {
    fn parse(&self, content: &str) -> Result<ConfigUpdate, ParseError> {
        let value: Value = serde_json::from_str(content)?;
        from_value(&value)
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }
}
