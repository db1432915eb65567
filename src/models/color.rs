use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::color_math::{hex_to_rgb, normalize_hex, rgb_to_hsl};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// A saved swatch.
///
/// `hex`, `rgb` and `hsl` are computed together when the color is created and
/// never re-derived afterwards; only `name` and `is_favorite` change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: String,
    pub name: String,
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Color {
    /// Build a color captured at `now`. The name is stored trimmed.
    pub fn new(name: &str, hex: &str, now: DateTime<Utc>) -> Result<Self> {
        let hex = normalize_hex(hex)?;
        let rgb = hex_to_rgb(&hex)?;
        let hsl = rgb_to_hsl(rgb.r, rgb.g, rgb.b);

        Ok(Self {
            id: id_from_clock(now),
            name: name.trim().to_string(),
            hex,
            rgb,
            hsl,
            is_favorite: false,
            created_at: now,
        })
    }

    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}

/// Ids are the millisecond clock reading at creation. Two entities created in
/// the same millisecond share an id.
pub fn id_from_clock(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

/// Accepts RFC 3339 strings as well as epoch milliseconds.
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom),
    }
}
