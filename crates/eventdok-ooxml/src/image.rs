//! Image support for DOCX packages
//!
//! Pictures are embedded inline (`<wp:inline>`) with an extent given in
//! EMUs (English Metric Units, 914400 per inch).
//!
//! The display width comes from the block; the height follows the pixel
//! aspect ratio of the image data.

use std::io::Cursor;
use std::path::Path;

use ::image::ImageReader;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// EMUs per inch (914400)
pub const EMU_PER_INCH: i64 = 914400;

/// Height/width ratio used when the image cannot be decoded
pub const FALLBACK_ASPECT: f64 = 3.0 / 4.0;

/// Convert inches to EMUs
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// Pixel dimensions of encoded image data
pub fn pixel_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    let dimensions = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dimensions)
}

/// Display extent (cx, cy) in EMUs for an image shown `width_inches` wide
///
/// Undecodable or zero-sized images get a 4:3 extent.
pub fn extent_for_width(data: &[u8], width_inches: f64) -> (i64, i64) {
    let cx = inches_to_emu(width_inches);
    let aspect = match pixel_dimensions(data) {
        Ok((w, h)) if w > 0 && h > 0 => f64::from(h) / f64::from(w),
        _ => FALLBACK_ASPECT,
    };
    (cx, (cx as f64 * aspect).round() as i64)
}

/// Hex SHA-256 digest, used to embed identical media only once
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// File extension for embedded media, from the data first, then the path
pub fn media_extension(data: &[u8], path: &Path) -> String {
    ::image::guess_format(data)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .map(str::to_string)
        .or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase)
        })
        .unwrap_or_else(|| "png".to_string())
}

/// Get the MIME content type for an image extension
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "tiff" | "tif" => "image/tiff",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
