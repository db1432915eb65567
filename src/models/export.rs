use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color_math::is_valid_hex;
use crate::error::SwatchError;
use crate::models::{Color, Palette};

/// Export options for customizing what to export
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub favorites_only: bool,
    pub pretty: bool,
}

/// Export file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub colors: Vec<Color>,
    pub palettes: Vec<Palette>,
}

impl ExportDocument {
    pub fn new(colors: &[Color], palettes: &[Palette], options: &ExportOptions) -> Self {
        let colors = colors
            .iter()
            .filter(|color| !options.favorites_only || color.is_favorite)
            .cloned()
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            colors,
            palettes: palettes.to_vec(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("Failed to serialize export document")
    }
}

/// A validated import payload. Each present field replaces the matching
/// collection wholesale; an absent field leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImportDocument {
    pub colors: Option<Vec<Color>>,
    pub palettes: Option<Vec<Palette>>,
}

/// Parse and validate raw import text.
///
/// Unknown top-level fields are ignored. Anything else that does not fit the
/// document shape fails the whole import with `MalformedDocument`.
pub fn parse_document(raw: &str) -> Result<ImportDocument, SwatchError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SwatchError::MalformedDocument(e.to_string()))?;

    if !value.is_object() {
        return Err(SwatchError::MalformedDocument(
            "expected a JSON object at the top level".to_string(),
        ));
    }

    let document: ImportDocument =
        serde_json::from_value(value).map_err(|e| SwatchError::MalformedDocument(e.to_string()))?;

    if let Some(colors) = &document.colors {
        if let Some(bad) = colors.iter().find(|color| !is_valid_hex(&color.hex)) {
            return Err(SwatchError::MalformedDocument(format!(
                "color {} has invalid hex {:?}",
                bad.id, bad.hex
            )));
        }
    }

    Ok(document)
}

/// Write an export document to a file, pretty-printed when `options.pretty` is set
pub fn write_export(path: &Path, document: &ExportDocument, options: &ExportOptions) -> Result<()> {
    let json = document.to_json(options.pretty)?;
    fs::write(path, json).context("Failed to write JSON export file")?;
    Ok(())
}

/// Read the raw text of an import file.
pub async fn read_import_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read import file {}", path.display()))
}
