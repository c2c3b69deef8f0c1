//! Output formats for printed data.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::AppError;

/// Output format for printed data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default).
    #[default]
    Json,
    /// TOON (Token-Oriented Object Notation), more compact.
    Toon,
}

impl OutputFormat {
    /// Serialize `value` in this format.
    pub fn render<T: Serialize>(self, value: &T) -> Result<String, AppError> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Toon => {
                serde_toon::to_string(value).map_err(|e| AppError::Toon(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentCatalog;

    #[test]
    fn test_json_render_roundtrips_catalog() {
        let catalog = ContentCatalog::builtin();
        let json = OutputFormat::Json.render(catalog.data()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["layers"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_toon_render_mentions_layer_keys() {
        let catalog = ContentCatalog::builtin();
        let toon = OutputFormat::Toon.render(catalog.data()).unwrap();
        assert!(toon.contains("automation"));
        assert!(toon.contains("generative"));
    }
}
