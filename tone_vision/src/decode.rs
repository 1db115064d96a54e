// THEORY:
// The `decode` module is the bridge between whatever the capture source hands us
// (encoded JPEG/PNG bytes, or the `data:image/...;base64,` URL a camera preview
// plugin returns) and the `PixelBuffer` the analysis core consumes.
//
// Decoding is the only potentially slow step before sampling, so the async
// variants push it onto tokio's blocking pool and resolve exactly once: either a
// buffer with its dimensions, or an error. The sampler never runs before that.

use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::{Result, VisionError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use tracing::debug;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Decodes an encoded image (any format the `image` crate recognises) to RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes)?;
    let buffer = PixelBuffer::from(image);
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        encoded_bytes = bytes.len(),
        "decoded image"
    );
    Ok(buffer)
}

/// Decodes a `data:image/<format>;base64,<payload>` URL, or a bare base64 payload.
pub fn decode_data_url(url: &str) -> Result<PixelBuffer> {
    decode_image(&data_url_payload(url)?)
}

/// Reads and decodes an image file.
pub fn load_image(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let image = image::open(path.as_ref())?;
    Ok(PixelBuffer::from(image))
}

/// [`decode_image`] on the blocking pool.
pub async fn decode_image_async(bytes: Vec<u8>) -> Result<PixelBuffer> {
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| VisionError::TaskJoin(e.to_string()))?
}

/// [`decode_data_url`] on the blocking pool.
pub async fn decode_data_url_async(url: String) -> Result<PixelBuffer> {
    tokio::task::spawn_blocking(move || decode_data_url(&url))
        .await
        .map_err(|e| VisionError::TaskJoin(e.to_string()))?
}

fn data_url_payload(url: &str) -> Result<Vec<u8>> {
    let payload = match url.trim().strip_prefix(DATA_URL_PREFIX) {
        Some(rest) => {
            let (media_type, payload) = rest
                .split_once(',')
                .ok_or_else(|| VisionError::InvalidDataUrl("missing ',' separator".to_string()))?;
            if !media_type.ends_with(BASE64_MARKER) {
                return Err(VisionError::InvalidDataUrl(format!(
                    "unsupported encoding in {media_type:?}, expected base64"
                )));
            }
            payload
        }
        None => url.trim(),
    };

    STANDARD
        .decode(payload)
        .map_err(|e| VisionError::InvalidDataUrl(e.to_string()))
}
