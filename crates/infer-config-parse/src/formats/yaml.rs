//! YAML update parser

use crate::decoder::from_value;
use crate::error::ParseError;
use crate::formats::UpdateParser;
use infer_config::ConfigUpdate;
use serde_json::Value;

/// YAML parser
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl UpdateParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ConfigUpdate, ParseError> {
        let value: Value = serde_yaml::from_str(content)?;
        from_value(&value)
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
