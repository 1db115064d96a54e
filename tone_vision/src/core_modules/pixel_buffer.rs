// THEORY:
// The `PixelBuffer` is the hand-off point between the image source and the
// analysis core. It owns one decoded capture as a flat, row-major RGBA byte
// vector and guarantees `len == width * height * 4` from the moment it exists,
// so nothing downstream has to re-check the layout.
//
// It is read-only once built. A buffer lives for exactly one analysis: decode,
// sample, discard.

use crate::core_modules::pixel::pixel::{Byte, CHANNELS, Pixel};
use crate::error::{Result, VisionError};
use image::{DynamicImage, RgbaImage};

/// A decoded RGBA8 image held as a flat byte vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<Byte>,
}

impl PixelBuffer {
    /// Wraps raw RGBA bytes, rejecting any length that disagrees with the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<Byte>) -> Result<Self> {
        let expected = Self::byte_len(width, height);
        if data.len() != expected {
            return Err(VisionError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let bytes: [Byte; CHANNELS] = pixel.into();
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&bytes);
        }
        Self {
            width,
            height,
            data,
        }
    }

    fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * CHANNELS
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[Byte] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<Byte> {
        self.data
    }

    /// The pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte_index = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let bytes = &self.data[byte_index..byte_index + CHANNELS];
        Some(Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3]))
    }

    /// Every pixel with its coordinates, in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let width = self.width as usize;
        self.data
            .chunks_exact(CHANNELS)
            .enumerate()
            .map(move |(index, bytes)| {
                let x = (index % width) as u32;
                let y = (index / width) as u32;
                (x, y, Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3]))
            })
    }

    /// Mutable access to each pixel's bytes, for helpers that paint over a copy.
    pub(crate) fn pixels_mut(&mut self) -> impl Iterator<Item = (u32, u32, &mut [Byte])> + '_ {
        let width = self.width as usize;
        self.data
            .chunks_exact_mut(CHANNELS)
            .enumerate()
            .map(move |(index, bytes)| ((index % width) as u32, (index / width) as u32, bytes))
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

impl From<DynamicImage> for PixelBuffer {
    fn from(image: DynamicImage) -> Self {
        PixelBuffer::from(image.into_rgba8())
    }
}

impl From<PixelBuffer> for RgbaImage {
    fn from(buffer: PixelBuffer) -> Self {
        let (width, height) = (buffer.width, buffer.height);
        // Length was validated on construction, so `from_raw` cannot reject it.
        RgbaImage::from_raw(width, height, buffer.data).unwrap_or_else(|| RgbaImage::new(width, height))
    }
}
