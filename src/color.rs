//! Palette colours and their projection into CSS `rgb` components.

use crate::config::{ColorConfig, Normalization};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Linear colour with channels nominally in `0.0..=1.0` (overbright allowed).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Scale, normalize, then round to 0–255. Rounding happens last so
    /// that normalization sees the unrounded channels.
    pub fn to_rgb8(self, config: &ColorConfig) -> Rgb8 {
        let (r, g, b) = (
            self.r * config.scale,
            self.g * config.scale,
            self.b * config.scale,
        );
        let max = match config.normalization {
            Normalization::ClampToUnit => r.max(g).max(b).max(1.0),
            Normalization::Max => r.max(g).max(b),
        };
        if max <= 0.0 {
            return Rgb8(0, 0, 0);
        }
        let channel = |v: f32| (255.0 * (v / max)).round().clamp(0.0, 255.0) as u8;
        Rgb8(channel(r), channel(g), channel(b))
    }
}

/// Integer colour, displayed as `r, g, b` for CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

/// Parse a palette colour: a `[r, g, b]` array string or a named colour.
pub fn parse_color(val: &str) -> Option<Color> {
    let val = val.trim();
    if let Some(inner) = val.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        let parts: Vec<&str> = inner.split(',').map(|s| s.trim()).collect();
        if parts.len() != 3 {
            return None;
        }
        let mut channels = [0.0f32; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.parse().ok()?;
        }
        return Some(Color::new(channels[0], channels[1], channels[2]));
    }
    let hex = match val.to_ascii_lowercase().as_str() {
        "white" => 0xffffff,
        "black" => 0x000000,
        "red" => 0xff0000,
        "green" | "lime" => 0x00ff00,
        "blue" => 0x0000ff,
        "yellow" => 0xffff00,
        "orange" => 0xffa500,
        "cyan" => 0x00ffff,
        "magenta" => 0xff00ff,
        "lightblue" => 0xadd8e6,
        "darkgreen" => 0x006400,
        "gray" | "grey" => 0x808080,
        "lightgray" | "lightgrey" => 0xd3d3d3,
        "darkgray" | "darkgrey" => 0xa9a9a9,
        "brown" => 0xa52a2a,
        "purple" => 0x800080,
        "pink" => 0xffc0cb,
        "navy" => 0x000080,
        "teal" => 0x008080,
        "olive" => 0x808000,
        "maroon" => 0x800000,
        "silver" => 0xc0c0c0,
        other => parse_hex(other.strip_prefix('#')?)?,
    };
    let byte = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Some(Color::new(byte(16), byte(8), byte(0)))
}

/// `rrggbb` or the `rgb` shorthand; any other length is rejected.
fn parse_hex(digits: &str) -> Option<u32> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => u32::from_str_radix(digits, 16).ok(),
        3 => {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            u32::from_str_radix(&doubled, 16).ok()
        }
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Channels([f32; 3]),
            Text(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Channels([r, g, b]) => Ok(Color::new(r, g, b)),
            Repr::Text(s) => parse_color(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid colour '{}'", s))),
        }
    }
}
