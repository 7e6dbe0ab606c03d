//! `#RRGGBB` parsing and sRGB helpers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected a #RRGGBB color, got {0:?}")]
    Format(String),
    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

/// Parse `#RRGGBB` (case-insensitive) into 8-bit channels.
pub fn parse_hex(hex: &str) -> Result<[u8; 3], ColorError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.is_ascii())
        .ok_or_else(|| ColorError::Format(hex.to_string()))?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::Digits(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError::Digits(hex.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Parse `#RRGGBB` into sRGB-encoded floats in \[0, 1\].
pub fn hex_to_rgb(hex: &str) -> Result<[f32; 3], ColorError> {
    let [r, g, b] = parse_hex(hex)?;
    Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Parse `#RRGGBB` into linear-light floats, the space the shaders light in.
pub fn hex_to_linear(hex: &str) -> Result<[f32; 3], ColorError> {
    hex_to_rgb(hex).map(|c| c.map(srgb_to_linear))
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
