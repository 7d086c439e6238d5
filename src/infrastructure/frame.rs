//! Frame source standing in for a live camera feed
//!
//! A frame is any raster image the `image` crate can decode. Capturing draws
//! it into an RGB buffer and encodes it as JPEG.

use crate::domain::ImageData;
use crate::error::{DiaryError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::ImageReader;
use std::path::Path;

/// Decode the frame at `path` and re-encode it as JPEG with `quality` (1-100).
pub fn capture_frame(path: &Path, quality: u8) -> Result<ImageData> {
    let reader = ImageReader::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DiaryError::Frame(format!("no frame available at {}", path.display()))
        } else {
            DiaryError::Io(e)
        }
    })?;

    let frame = reader
        .with_guessed_format()?
        .decode()
        .map_err(|e| DiaryError::Frame(format!("cannot decode {}: {}", path.display(), e)))?;

    if frame.width() == 0 || frame.height() == 0 {
        return Err(DiaryError::Frame(format!("{} is an empty frame", path.display())));
    }

    let rgb = frame.to_rgb8();
    let mut bytes = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))
        .map_err(|e| DiaryError::Frame(format!("JPEG encoding failed: {}", e)))?;

    log::debug!(
        "Captured {}x{} frame from {} ({} bytes)",
        rgb.width(),
        rgb.height(),
        path.display(),
        bytes.len()
    );
    Ok(ImageData::jpeg(bytes))
}
