// THEORY:
// A single error type for the whole engine. The sampling core has exactly one
// failure of its own (`EmptyRegion`); everything else here belongs to the
// boundaries around it: building buffers and regions, decoding captures,
// loading configuration, and driving the camera.

use thiserror::Error;

/// Errors produced by the tone vision engine.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The sample region selected zero pixels, so no channel average exists.
    #[error("Sample region covers no pixels")]
    EmptyRegion,

    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid sample region: {0}")]
    InvalidRegion(String),

    #[error("Invalid hex color: {0:?}")]
    InvalidHexColor(String),

    #[error("Invalid color entry: {0:?}")]
    InvalidColorEntry(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error("Background task failed: {0}")]
    TaskJoin(String),
}

/// A camera lifecycle failure: a human-readable message plus the name of the
/// operation that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error in {operation}: {message}")]
pub struct CameraError {
    pub operation: &'static str,
    pub message: String,
}

impl CameraError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VisionError>;
