pub mod pixel;
pub mod pixel_buffer;
pub mod recommendation;
pub mod region_sampler;
pub mod sample_region;
pub mod tone_classifier;
pub mod utils;
