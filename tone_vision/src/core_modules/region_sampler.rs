// THEORY:
// The `region_sampler` turns a capture into a single representative colour. It
// walks every pixel of the buffer, keeps the ones the `SampleRegion` admits, and
// averages their R, G and B channels. Averaging over a large region is what makes
// the result usable: single-pixel sensor noise and small highlights wash out.
//
// Key properties:
// 1.  **Exhaustive scan**: every coordinate is visited, no early exit. The cost is
//     O(width × height), paid once per capture.
// 2.  **Integer floor**: channel means are `sum / count` in integer arithmetic, so
//     results are floored, never rounded.
// 3.  **No silent defaults**: a region that selects nothing is an error. There is no
//     meaningful colour to report, so the caller decides what to show.

use crate::core_modules::pixel::pixel::{Channel, Pixel};
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::sample_region::SampleRegion;
use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// The floored per-channel mean of every pixel inside a sample region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorAverage {
    pub red: Channel,
    pub green: Channel,
    pub blue: Channel,
}

impl ColorAverage {
    pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
        Self { red, green, blue }
    }

    /// `#RRGGBB`, upper case.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// The average as an opaque pixel, e.g. for painting a swatch.
    pub fn as_pixel(&self) -> Pixel {
        Pixel::opaque(self.red, self.green, self.blue)
    }
}

impl fmt::Display for ColorAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// Averages the R, G and B channels of every pixel of `buffer` inside `region`.
///
/// Alpha is ignored. Fails with [`VisionError::EmptyRegion`] when the region does
/// not cover a single pixel of the buffer.
pub fn sample(buffer: &PixelBuffer, region: &SampleRegion) -> Result<ColorAverage> {
    let mut sum_r = 0u64;
    let mut sum_g = 0u64;
    let mut sum_b = 0u64;
    let mut count = 0u64;

    for (x, y, pixel) in buffer.pixels() {
        if region.contains(x, y) {
            sum_r += pixel.red as u64;
            sum_g += pixel.green as u64;
            sum_b += pixel.blue as u64;
            count += 1;
        }
    }

    if count == 0 {
        warn!(
            width = buffer.width(),
            height = buffer.height(),
            ?region,
            "sample region selects no pixels"
        );
        return Err(VisionError::EmptyRegion);
    }

    let average = ColorAverage {
        red: (sum_r / count) as Channel,
        green: (sum_g / count) as Channel,
        blue: (sum_b / count) as Channel,
    };
    debug!(pixels = count, %average, "sampled region");
    Ok(average)
}
