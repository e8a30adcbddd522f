//! Shared test utilities for eventdok-ooxml
//!
//! Fixtures are generated in memory: small PNGs via the `image` crate and
//! part extraction from produced packages.

use std::io::Cursor;
use std::path::Path;

use crate::archive::OoxmlArchive;

/// Encode a solid-color PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([30, 80, 160]));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
    buffer.into_inner()
}

/// Write a PNG fixture to disk
pub fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::write(path, png_bytes(width, height)).unwrap();
}

/// Extract one part of a DOCX package as a string
pub fn extract_file(docx: &[u8], path: &str) -> Option<String> {
    OoxmlArchive::from_bytes(docx).unwrap().get_string(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_bytes_decode() {
        let data = png_bytes(3, 2);
        assert_eq!(crate::image::pixel_dimensions(&data).unwrap(), (3, 2));
    }
}
