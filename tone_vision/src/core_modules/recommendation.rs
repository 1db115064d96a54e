// THEORY:
// Recommendations are static data: one fixed set of lip, foundation and
// eyeshadow colours per tone bucket, identical for every user and every capture.
// Entries are stored structured, as a label plus a validated colour, instead of
// the "Label: #RRGGBB" strings they were first written as. `ColorEntry::parse`
// still accepts that legacy form at the boundary.

use crate::core_modules::tone_classifier::ToneCategory;
use crate::error::{Result, VisionError};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated `#RRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl HexColor {
    /// Builds a colour from a `0xRRGGBB` literal.
    pub const fn from_u32(rgb: u32) -> Self {
        HexColor {
            red: ((rgb >> 16) & 0xFF) as u8,
            green: ((rgb >> 8) & 0xFF) as u8,
            blue: (rgb & 0xFF) as u8,
        }
    }

    /// Parses `#` followed by exactly six hex digits, in either case.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || VisionError::InvalidHexColor(text.to_string());
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let rgb = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        Ok(HexColor::from_u32(rgb))
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }
}

impl FromStr for HexColor {
    type Err = VisionError;

    fn from_str(text: &str) -> Result<Self> {
        HexColor::parse(text)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A named colour suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorEntry<'a> {
    pub label: &'a str,
    pub color: HexColor,
}

impl<'a> ColorEntry<'a> {
    pub const fn new(label: &'a str, color: HexColor) -> Self {
        ColorEntry { label, color }
    }

    /// Parses the legacy `"Label: #RRGGBB"` form.
    pub fn parse(text: &'a str) -> Result<Self> {
        let (label, color) = text
            .split_once(':')
            .ok_or_else(|| VisionError::InvalidColorEntry(text.to_string()))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(VisionError::InvalidColorEntry(text.to_string()));
        }
        Ok(ColorEntry::new(label, HexColor::parse(color.trim())?))
    }
}

impl fmt::Display for ColorEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.color)
    }
}

/// Cosmetic colour suggestions for one tone bucket.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct RecommendationSet {
    pub lip: &'static [ColorEntry<'static>],
    pub foundation: &'static [ColorEntry<'static>],
    pub eyeshadow: &'static [ColorEntry<'static>],
}

const fn entry(label: &'static str, rgb: u32) -> ColorEntry<'static> {
    ColorEntry::new(label, HexColor::from_u32(rgb))
}

static LIGHT: RecommendationSet = RecommendationSet {
    lip: &[
        entry("Soft pink", 0xFFC0CB),
        entry("Coral", 0xF88379),
        entry("Nude", 0xE3BEB5),
    ],
    foundation: &[entry("Light beige", 0xF5E2D4), entry("Ivory", 0xFAF0E6)],
    eyeshadow: &[
        entry("Pastel", 0xFFDAB9),
        entry("Beige", 0xF5F5DC),
        entry("Soft gold", 0xFFD700),
    ],
};

static LIGHT_MEDIUM: RecommendationSet = RecommendationSet {
    lip: &[
        entry("Hot pink", 0xFF69B4),
        entry("Warm nude", 0xD8B6A4),
        entry("Peach", 0xFFA07A),
    ],
    foundation: &[entry("Medium beige", 0xE3C4A8), entry("Sand", 0xF4DECB)],
    eyeshadow: &[
        entry("Bronze", 0xCD7F32),
        entry("Soft brown", 0xD2B48C),
        entry("Neutral", 0x8B4513),
    ],
};

static MEDIUM: RecommendationSet = RecommendationSet {
    lip: &[
        entry("Red", 0xFF0000),
        entry("Mauve", 0x993366),
        entry("Earth", 0x8B4513),
    ],
    foundation: &[entry("Dark beige", 0xD2B48C), entry("Golden", 0xFFD700)],
    eyeshadow: &[
        entry("Gold", 0xFFD700),
        entry("Copper", 0xB87333),
        entry("Plum", 0x7D0552),
    ],
};

static DARK: RecommendationSet = RecommendationSet {
    lip: &[
        entry("Burgundy", 0x800020),
        entry("Dark purple", 0x4B0082),
        entry("Brown", 0x654321),
    ],
    foundation: &[entry("Dark coffee", 0x4B3A2A), entry("Ebony", 0x3D0C02)],
    eyeshadow: &[
        entry("Bronze", 0xCD7F32),
        entry("Goldenrod", 0xDAA520),
        entry("Dark green", 0x006400),
        entry("Deep blue", 0x000080),
    ],
};

/// The fixed recommendation set for `category`.
pub fn recommend(category: ToneCategory) -> &'static RecommendationSet {
    match category {
        ToneCategory::Light => &LIGHT,
        ToneCategory::LightMedium => &LIGHT_MEDIUM,
        ToneCategory::Medium => &MEDIUM,
        ToneCategory::Dark => &DARK,
    }
}
