//! Text formats carrying an update
//!
//! Each format is parsed into a generic value first, then handed to the
//! strict map decoder:
//! - JSON via serde_json
//! - YAML via serde_yaml

use crate::error::ParseError;
use infer_config::ConfigUpdate;
use std::path::Path;

mod json;
mod yaml;

pub use json::JsonParser;
pub use yaml::YamlParser;

/// Parser trait for converting text into a [`ConfigUpdate`]
///
/// Implement this trait to add support for new text formats.
pub trait UpdateParser: Send + Sync + 'static {
    /// Parse text into an update
    fn parse(&self, content: &str) -> Result<ConfigUpdate, ParseError>;

    /// Check if this parser can handle the given path
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Supported file extensions (without dot)
    fn extensions(&self) -> &[&str];
}

/// Parse JSON text into an update
///
/// # Errors
/// Returns [`ParseError::Json`] on syntax errors, otherwise as
/// [`crate::from_map`]
pub fn from_json_str(content: &str) -> Result<ConfigUpdate, ParseError> {
    JsonParser.parse(content)
}

/// Parse YAML text into an update
///
/// # Errors
/// Returns [`ParseError::Yaml`] on syntax errors, otherwise as
/// [`crate::from_map`]
pub fn from_yaml_str(content: &str) -> Result<ConfigUpdate, ParseError> {
    YamlParser.parse(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsers_claim_their_extensions() {
        assert!(JsonParser.can_parse(Path::new("update.json")));
        assert!(!JsonParser.can_parse(Path::new("update.yaml")));
        assert!(YamlParser.can_parse(Path::new("update.yml")));
        assert!(YamlParser.can_parse(Path::new("update.yaml")));
        assert!(!YamlParser.can_parse(Path::new("update")));
    }
}
