// THEORY:
// A `SampleRegion` decides which pixels of a capture count as "skin". Two shapes
// are supported because both have been used in practice: a large ellipse over
// the centre of the frame (matching the face guide drawn over the preview) and a
// small square patch at the exact centre. The shape is data, not a code path;
// the sampler only ever asks `contains(x, y)`.

use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};

/// The region of interest used when averaging a capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SampleRegion {
    /// Axis-aligned ellipse in pixel coordinates. Radii are strictly positive.
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    /// Square anchored at its top-left corner. The anchor may sit outside the
    /// buffer; only in-buffer pixels are ever sampled.
    Square { x_start: i64, y_start: i64, size: u32 },
}

impl SampleRegion {
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Result<Self> {
        if !(cx.is_finite() && cy.is_finite()) {
            return Err(VisionError::InvalidRegion(format!(
                "ellipse center ({cx}, {cy}) is not finite"
            )));
        }
        if !(rx.is_finite() && ry.is_finite() && rx > 0.0 && ry > 0.0) {
            return Err(VisionError::InvalidRegion(format!(
                "ellipse radii ({rx}, {ry}) must be positive"
            )));
        }
        Ok(SampleRegion::Ellipse { cx, cy, rx, ry })
    }

    pub fn square(x_start: i64, y_start: i64, size: u32) -> Result<Self> {
        if size == 0 {
            return Err(VisionError::InvalidRegion(
                "square size must be positive".to_string(),
            ));
        }
        Ok(SampleRegion::Square {
            x_start,
            y_start,
            size,
        })
    }

    /// An ellipse centred on an image of the given dimensions.
    pub fn centered_ellipse(width: u32, height: u32, rx: f64, ry: f64) -> Result<Self> {
        Self::ellipse(width as f64 / 2.0, height as f64 / 2.0, rx, ry)
    }

    /// A `size`×`size` square centred on an image of the given dimensions.
    pub fn centered_square(width: u32, height: u32, size: u32) -> Result<Self> {
        let x_start = (width as f64 / 2.0 - size as f64 / 2.0).floor() as i64;
        let y_start = (height as f64 / 2.0 - size as f64 / 2.0).floor() as i64;
        Self::square(x_start, y_start, size)
    }

    /// Whether the pixel at `(x, y)` belongs to the region.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        match *self {
            SampleRegion::Ellipse { cx, cy, rx, ry } => {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                (dx * dx) / (rx * rx) + (dy * dy) / (ry * ry) <= 1.0
            }
            SampleRegion::Square {
                x_start,
                y_start,
                size,
            } => {
                let (x, y) = (x as i64, y as i64);
                let size = size as i64;
                x >= x_start && x < x_start + size && y >= y_start && y < y_start + size
            }
        }
    }
}
