use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named grouping of colors.
///
/// The engine never builds or edits palettes; it only persists and
/// round-trips them, so the payload is kept as the JSON it arrived as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Value);

impl Palette {
    /// The palette's `name` field, when it has one.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}
