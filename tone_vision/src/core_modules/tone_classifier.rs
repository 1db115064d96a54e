// THEORY:
// The classifier is a decision table, not a set of independent rules. Each tier
// is checked in order and the first one whose three channel floors are all
// strictly exceeded wins; anything that clears none of them is `Dark`. The
// tiers are nested (each one's floors sit above the next one's), so the order of
// the table is part of its meaning.

use crate::core_modules::region_sampler::ColorAverage;
use crate::core_modules::pixel::pixel::Channel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of four ordinal skin tone buckets, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneCategory {
    Light,
    LightMedium,
    Medium,
    Dark,
}

impl ToneCategory {
    pub const ALL: [ToneCategory; 4] = [
        ToneCategory::Light,
        ToneCategory::LightMedium,
        ToneCategory::Medium,
        ToneCategory::Dark,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToneCategory::Light => "light",
            ToneCategory::LightMedium => "light medium",
            ToneCategory::Medium => "medium",
            ToneCategory::Dark => "dark",
        }
    }
}

impl fmt::Display for ToneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exclusive lower bounds a colour must beat on every channel to land in `category`.
struct ToneThreshold {
    category: ToneCategory,
    red: Channel,
    green: Channel,
    blue: Channel,
}

impl ToneThreshold {
    fn admits(&self, average: &ColorAverage) -> bool {
        average.red > self.red && average.green > self.green && average.blue > self.blue
    }
}

const TONE_THRESHOLDS: [ToneThreshold; 3] = [
    ToneThreshold { category: ToneCategory::Light, red: 200, green: 170, blue: 150 },
    ToneThreshold { category: ToneCategory::LightMedium, red: 150, green: 130, blue: 110 },
    ToneThreshold { category: ToneCategory::Medium, red: 100, green: 90, blue: 80 },
];

/// Maps an averaged colour to its tone bucket. Total over every input.
pub fn classify(average: &ColorAverage) -> ToneCategory {
    TONE_THRESHOLDS
        .iter()
        .find(|threshold| threshold.admits(average))
        .map_or(ToneCategory::Dark, |threshold| threshold.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify_rgb(red: u8, green: u8, blue: u8) -> ToneCategory {
        classify(&ColorAverage::new(red, green, blue))
    }

    #[test]
    fn boundaries_are_strict() {
        assert_eq!(classify_rgb(201, 171, 151), ToneCategory::Light);
        assert_eq!(classify_rgb(200, 171, 151), ToneCategory::LightMedium);
        assert_eq!(classify_rgb(151, 131, 111), ToneCategory::LightMedium);
        assert_eq!(classify_rgb(150, 131, 111), ToneCategory::Medium);
        assert_eq!(classify_rgb(101, 91, 81), ToneCategory::Medium);
        assert_eq!(classify_rgb(100, 91, 81), ToneCategory::Dark);
    }

    #[test]
    fn every_channel_must_clear_its_floor() {
        assert_eq!(classify_rgb(255, 170, 255), ToneCategory::LightMedium);
        assert_eq!(classify_rgb(255, 255, 150), ToneCategory::LightMedium);
        assert_eq!(classify_rgb(255, 255, 80), ToneCategory::Dark);
        assert_eq!(classify_rgb(0, 0, 0), ToneCategory::Dark);
        assert_eq!(classify_rgb(255, 255, 255), ToneCategory::Light);
    }

    #[test]
    fn categories_are_ordered_light_to_dark() {
        let mut sorted = ToneCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, ToneCategory::ALL);
        assert!(ToneCategory::Light < ToneCategory::Dark);
        assert_eq!(ToneCategory::LightMedium.to_string(), "light medium");
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(red in any::<u8>(), green in any::<u8>(), blue in any::<u8>()) {
            let average = ColorAverage::new(red, green, blue);
            prop_assert_eq!(classify(&average), classify(&average));
        }

        #[test]
        fn brightening_never_darkens(red in any::<u8>(), green in any::<u8>(), blue in any::<u8>()) {
            let base = classify_rgb(red, green, blue);
            let brighter = classify_rgb(red.saturating_add(10), green.saturating_add(10), blue.saturating_add(10));
            prop_assert!(brighter <= base);
        }
    }
}
