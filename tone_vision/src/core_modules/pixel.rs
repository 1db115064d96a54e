// THEORY:
// The `Pixel` module is the smallest unit the engine reasons about: one RGBA
// sample pulled out of a decoded capture. It is a "dumb" data container plus the
// handful of single-pixel helpers the rest of the engine needs.
//
// Key principles:
// 1) Single-pixel scope: nothing here looks at neighbours or regions. Regional
//    statistics live in the `region_sampler`.
// 2) Channel order is always R, G, B, A, matching the decoded buffer layout.
// 3) Alpha is carried through untouched; tone analysis only ever reads R, G, B.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;
    pub type Luminance = f64;

    /// Number of bytes per pixel in an RGBA buffer.
    pub const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// A fully opaque pixel.
        pub const fn opaque(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel::new(red, green, blue, Channel::MAX)
        }

        /// Luminance estimate (Rec. 601 luma) on the 0..255 scale.
        pub fn luminance(&self) -> Luminance {
            0.299_f64 * self.red as f64 + 0.587_f64 * self.green as f64 + 0.114_f64 * self.blue as f64
        }

        /// Scales R, G and B by `factor` (clamped to 0..=1), leaving alpha alone.
        pub fn dimmed(&self, factor: f32) -> Pixel {
            let factor = factor.clamp(0.0, 1.0);
            let scale = |channel: Channel| (channel as f32 * factor) as Channel;
            Pixel::new(scale(self.red), scale(self.green), scale(self.blue), self.alpha)
        }
    }

    impl From<[Byte; CHANNELS]> for Pixel {
        fn from(bytes: [Byte; CHANNELS]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<Pixel> for [Byte; CHANNELS] {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }
}
