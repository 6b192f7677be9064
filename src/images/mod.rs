//! Photo capture/downscale pipeline
//!
//! Converts an arbitrary user-selected image file into a bounded-size
//! embeddable JPEG data URL, so the serialized record collection stays small
//! enough for its slot quota. Pipeline per invocation, strictly ordered:
//! read bytes, decode raster, compute scaled dimensions, resize, JPEG-encode,
//! base64-wrap. A decode failure produces no output; callers leave the
//! pending photo field unset.
//!
//! Overlapping invocations are not cancelled: if a newer file is selected
//! while an older normalization is in flight, both complete and the photo
//! field holds whichever result lands last (an accepted race).

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

use crate::errors::ImageError;

/// Longest-edge bound for normalized photos.
pub const DEFAULT_MAX_DIMENSION: u32 = 800;

/// JPEG quality factor on the encoder's 1-100 scale (0.7 of full scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 70;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Normalizes raw image files into embeddable JPEG data URLs.
#[derive(Debug, Clone)]
pub struct PhotoNormalizer {
    max_dimension: u32,
    jpeg_quality: u8,
}

impl Default for PhotoNormalizer {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl PhotoNormalizer {
    pub fn new(max_dimension: u32, jpeg_quality: u8) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    /// Read a file and normalize it.
    ///
    /// Async seam for callers; the read and the decode/scale/encode steps
    /// are the suspend points, chained strictly in order.
    pub async fn normalize_file(&self, path: &Path) -> Result<String, ImageError> {
        let bytes = tokio::fs::read(path).await.map_err(ImageError::Read)?;
        self.normalize_bytes(&bytes)
    }

    /// Decode raw bytes, downscale to the longest-edge bound preserving
    /// aspect ratio, re-encode as JPEG and wrap as a data URL.
    pub fn normalize_bytes(&self, bytes: &[u8]) -> Result<String, ImageError> {
        let img = image::load_from_memory(bytes).map_err(|e| ImageError::Decode {
            message: e.to_string(),
        })?;

        let (width, height) = (img.width(), img.height());
        let (new_width, new_height) = scaled_dimensions(width, height, self.max_dimension);

        let scaled: DynamicImage = if (new_width, new_height) == (width, height) {
            img
        } else {
            img.resize_exact(new_width, new_height, FilterType::Triangle)
        };

        // JPEG has no alpha channel
        let rgb = scaled.to_rgb8();
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut Cursor::new(&mut jpeg), self.jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| ImageError::Encode {
                message: e.to_string(),
            })?;

        debug!(
            width,
            height,
            new_width,
            new_height,
            bytes = jpeg.len(),
            "photo normalized"
        );
        Ok(format!("{DATA_URL_PREFIX}{}", BASE64.encode(&jpeg)))
    }
}

/// Compute downscaled dimensions so the longest edge fits `max_dimension`
/// while preserving aspect ratio. Images already within the bound are left
/// untouched; neither dimension ever drops below 1.
pub fn scaled_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }
    if width >= height {
        let new_width = max_dimension;
        let new_height = (f64::from(height) * f64::from(new_width) / f64::from(width)).round();
        (new_width, (new_height as u32).max(1))
    } else {
        let new_height = max_dimension;
        let new_width = (f64::from(width) * f64::from(new_height) / f64::from(height)).round();
        ((new_width as u32).max(1), new_height)
    }
}

/// Decode an embeddable photo data URL back into a raster.
///
/// Used to verify the output contract and to re-export stored photos.
pub fn decode_photo_data_url(data_url: &str) -> Result<DynamicImage, ImageError> {
    let b64 = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or(ImageError::NotADataUrl)?;
    let bytes = BASE64.decode(b64).map_err(|e| ImageError::Decode {
        message: e.to_string(),
    })?;
    image::load_from_memory(&bytes).map_err(|e| ImageError::Decode {
        message: e.to_string(),
    })
}
