use crate::error::{ChordError, ChordResult};
use crate::Category;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An opaque 24 bit color, written as `#RRGGBB` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`, `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ChordError;

    fn from_str(s: &str) -> ChordResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChordError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ChordError::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ChordError;

    fn try_from(value: String) -> ChordResult<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Display color for every category, indexed by category priority.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Palette {
    colors: [Rgb; Category::COUNT],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                Rgb::new(0x8B, 0x00, 0x00), // alcoholic: dark red
                Rgb::new(0x00, 0x64, 0x00), // nonalcoholic: dark green
                Rgb::new(0x00, 0x00, 0x8B), // mixers: dark blue
                Rgb::new(0x8B, 0x00, 0x8B), // spices: dark magenta
                Rgb::new(0xDA, 0xA5, 0x20), // fruits: goldenrod
                Rgb::new(0x00, 0x8B, 0x8B), // other: dark cyan
            ],
        }
    }
}

impl Palette {
    pub fn color(&self, category: Category) -> Rgb {
        self.colors[category.rank()]
    }

    pub fn set(&mut self, category: Category, color: Rgb) {
        self.colors[category.rank()] = color;
    }

    /// Default palette with the given categories recolored.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a Category, &'a Rgb)>) -> Self {
        let mut palette = Palette::default();
        for (category, color) in overrides {
            palette.set(*category, *color);
        }
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_print_hex() {
        let c: Rgb = "#daa520".parse().unwrap();
        assert_eq!(c, Rgb::new(0xDA, 0xA5, 0x20));
        assert_eq!(c.to_string(), "#DAA520");
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        assert_eq!(black.lerp(white, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(black.lerp(white, 7.0), white);
    }

    #[test]
    fn palette_defaults_follow_category() {
        let palette = Palette::default();
        assert_eq!(palette.color(Category::Alcoholic).to_string(), "#8B0000");
        assert_eq!(palette.color(Category::Fruits).to_string(), "#DAA520");
        assert_eq!(palette.color(Category::Other).to_string(), "#008B8B");
    }

    #[test]
    fn palette_overrides() {
        let overrides = [(Category::Mixers, Rgb::new(1, 2, 3))];
        let palette = Palette::with_overrides(overrides.iter().map(|(c, r)| (c, r)));
        assert_eq!(palette.color(Category::Mixers), Rgb::new(1, 2, 3));
        assert_eq!(palette.color(Category::Spices), Palette::default().color(Category::Spices));
    }
}
