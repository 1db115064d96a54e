pub mod image_helper {
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_buffer::PixelBuffer;
    use crate::core_modules::sample_region::SampleRegion;
    use crate::error::Result;
    use image::ImageEncoder;
    use std::path::Path;

    /// How much pixels outside the sample region are darkened in a mask preview.
    pub const OUTSIDE_REGION_DIM: f32 = 0.4;

    /// Writes `buffer` to `path` as a PNG.
    pub fn save(path: impl AsRef<Path>, buffer: &PixelBuffer) -> Result<()> {
        let output = std::io::BufWriter::new(std::fs::File::create(path)?);
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(())
    }

    /// A copy of `buffer` with every pixel outside `region` dimmed by `dim`,
    /// so the sampled area stands out the way the capture guide does.
    pub fn region_mask(buffer: &PixelBuffer, region: &SampleRegion, dim: f32) -> PixelBuffer {
        let mut masked = buffer.clone();
        for (x, y, bytes) in masked.pixels_mut() {
            if !region.contains(x, y) {
                let pixel = Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3]).dimmed(dim);
                bytes.copy_from_slice(&<[u8; 4]>::from(pixel));
            }
        }
        masked
    }
}

#[cfg(test)]
mod tests {

    use super::image_helper::*;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_buffer::PixelBuffer;
    use crate::core_modules::sample_region::SampleRegion;

    #[test]
    fn save_white_file() {
        let buffer = PixelBuffer::filled(50, 30, Pixel::opaque(255, 255, 255));
        let path = std::env::temp_dir().join("tone_vision_white_file.png");

        save(&path, &buffer).expect("Error Saving File.");

        let reloaded = image::open(&path).expect("Error Loading File.").into_rgba8();
        assert_eq!(reloaded.dimensions(), (50, 30));
        assert_eq!(reloaded.get_pixel(49, 29).0, [255, 255, 255, 255]);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn mask_dims_only_outside_pixels() {
        let buffer = PixelBuffer::filled(10, 10, Pixel::opaque(200, 100, 50));
        let region = SampleRegion::square(2, 2, 3).unwrap();

        let masked = region_mask(&buffer, &region, OUTSIDE_REGION_DIM);

        assert_eq!(masked.pixel(3, 3), Some(Pixel::opaque(200, 100, 50)));
        assert_eq!(masked.pixel(0, 0), Some(Pixel::opaque(80, 40, 20)));
        assert_eq!(masked.pixel(5, 2), Some(Pixel::opaque(80, 40, 20)));
    }
}
