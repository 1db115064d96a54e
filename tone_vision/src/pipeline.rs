// THEORY:
// The `pipeline` module is the top-level API for the engine. It wires the core
// stages into a single call: one capture in, one report out.
//
//   decode → region sampler → tone classifier → recommendation lookup
//
// Its only knob is where to sample. Two region shapes have been used for the
// same job (a large ellipse that matches the face guide, and a small square at
// the centre), so the choice is configuration rather than a second code path.

use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::recommendation::{RecommendationSet, recommend};
use crate::core_modules::region_sampler::{ColorAverage, sample};
use crate::core_modules::sample_region::SampleRegion;
use crate::core_modules::tone_classifier::{ToneCategory, classify};
use crate::decode::{decode_data_url_async, decode_image_async};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const DEFAULT_ELLIPSE_RADIUS_X: f64 = 200.0;
pub const DEFAULT_ELLIPSE_RADIUS_Y: f64 = 250.0;
pub const DEFAULT_SQUARE_SIZE: u32 = 50;

/// Shape and size of the region sampled at the centre of every capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RegionConfig {
    Ellipse { radius_x: f64, radius_y: f64 },
    Square { size: u32 },
}

impl Default for RegionConfig {
    fn default() -> Self {
        RegionConfig::Ellipse {
            radius_x: DEFAULT_ELLIPSE_RADIUS_X,
            radius_y: DEFAULT_ELLIPSE_RADIUS_Y,
        }
    }
}

impl RegionConfig {
    /// The concrete region for an image of the given size, centred on it.
    pub fn region_for(&self, width: u32, height: u32) -> Result<SampleRegion> {
        match *self {
            RegionConfig::Ellipse { radius_x, radius_y } => {
                SampleRegion::centered_ellipse(width, height, radius_x, radius_y)
            }
            RegionConfig::Square { size } => SampleRegion::centered_square(width, height, size),
        }
    }
}

/// Configuration for the ToneAnalyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub region: RegionConfig,
}

impl AnalyzerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// The result of analysing one capture.
#[derive(Debug, Clone, Serialize)]
pub struct ToneReport {
    pub region: SampleRegion,
    pub average: ColorAverage,
    pub category: ToneCategory,
    pub recommendations: &'static RecommendationSet,
}

/// The main, top-level struct for the engine.
#[derive(Debug, Clone, Default)]
pub struct ToneAnalyzer {
    config: AnalyzerConfig,
}

impl ToneAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self, buffer: &PixelBuffer) -> Result<ToneReport> {
        // Stage 1: Region of interest for this capture's dimensions
        let region = self.config.region.region_for(buffer.width(), buffer.height())?;

        // Stage 2: Regional average
        let average = sample(buffer, &region)?;

        // Stage 3: Classification and lookup
        let category = classify(&average);
        let recommendations = recommend(category);

        info!(
            %average,
            hex = %average.to_hex(),
            luminance = average.as_pixel().luminance(),
            %category,
            "analysed capture"
        );
        Ok(ToneReport {
            region,
            average,
            category,
            recommendations,
        })
    }

    /// Decodes an encoded image off the async executor, then analyses it.
    pub async fn analyze_encoded(&self, bytes: Vec<u8>) -> Result<ToneReport> {
        let buffer = decode_image_async(bytes).await?;
        self.analyze(&buffer)
    }

    /// Decodes a capture data URL off the async executor, then analyses it.
    pub async fn analyze_data_url(&self, url: String) -> Result<ToneReport> {
        let buffer = decode_data_url_async(url).await?;
        self.analyze(&buffer)
    }
}
