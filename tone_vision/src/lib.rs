// THEORY:
// This file is the main entry point for the `tone_vision` library crate.
// It defines the public API exposed to external consumers (a mobile bridge, the
// `tone_tester` binary, or any other capture front end).
//
// The primary export is the `ToneAnalyzer` and its associated data structures
// (`AnalyzerConfig`, `ToneReport`). The `core_modules` hold the individual
// stages (pixel buffers, sample regions, the sampler, the classifier and the
// recommendation tables). `decode` turns captured bytes into pixel buffers, and
// `camera` sequences the capture lifecycle over a pluggable backend.

pub mod camera;
pub mod core_modules;
pub mod decode;
pub mod error;
pub mod pipeline;

pub use crate::camera::{CameraBackend, CameraPosition, CameraSession, PermissionState};
pub use crate::core_modules::pixel::pixel::Pixel;
pub use crate::core_modules::pixel_buffer::PixelBuffer;
pub use crate::core_modules::recommendation::{ColorEntry, HexColor, RecommendationSet, recommend};
pub use crate::core_modules::region_sampler::{ColorAverage, sample};
pub use crate::core_modules::sample_region::SampleRegion;
pub use crate::core_modules::tone_classifier::{ToneCategory, classify};
pub use crate::error::{CameraError, Result, VisionError};
pub use crate::pipeline::{AnalyzerConfig, RegionConfig, ToneAnalyzer, ToneReport};
