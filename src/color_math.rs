//! Conversions between hex, RGB and HSL.
//! Hex strings are `#rrggbb`; HSL hue is in degrees, saturation and lightness in 0.0–1.0.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SwatchError};
use crate::models::{Hsl, Rgb};

static HEX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?[0-9a-fA-F]{6}$").expect("hex pattern is valid"));

/// Returns true for six hex digits with an optional leading `#`.
pub fn is_valid_hex(hex: &str) -> bool {
    HEX_PATTERN.is_match(hex)
}

/// Canonical `#rrggbb` form of a valid hex string.
pub fn normalize_hex(hex: &str) -> Result<String> {
    if !is_valid_hex(hex) {
        return Err(SwatchError::InvalidHex(hex.to_string()));
    }
    Ok(format!("#{}", hex.trim_start_matches('#').to_lowercase()))
}

/// Parse `#rrggbb` (or `rrggbb`) into 8-bit channels.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    if !is_valid_hex(hex) {
        return Err(SwatchError::InvalidHex(hex.to_string()));
    }
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| SwatchError::InvalidHex(hex.to_string()))
    };

    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Each channel is clamped to 0–255 before formatting.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    let clamp = |c: i32| c.clamp(0, 255);
    format!("#{:02x}{:02x}{:02x}", clamp(r), clamp(g), clamp(b))
}

pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // Achromatic
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: (h * 60.0) % 360.0,
        s,
        l,
    }
}
