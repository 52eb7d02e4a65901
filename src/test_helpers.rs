//! Shared test utilities for the imgops test suite.
//!
//! Synthetic images written straight to disk, so tests never depend on
//! fixture files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("wide.jpg");
//! create_test_jpeg(&path, 300, 100);
//! assert_eq!(image_dimensions(&path), (300, 100));
//! ```

use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Fixture writers
// =========================================================================

/// Write a JPEG with a position-dependent gradient.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    write_jpeg(path, &img);
}

/// Write a single-color JPEG.
pub fn create_solid_jpeg(path: &Path, width: u32, height: u32, color: Rgb<u8>) {
    write_jpeg(path, &RgbImage::from_pixel(width, height, color));
}

fn write_jpeg(path: &Path, img: &RgbImage) {
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new_with_quality(writer, 100)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
}

/// Write an RGBA PNG whose alpha varies with x (left edge alpha 0).
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            200,
            ((x * 255) / width.max(1)) as u8,
        ])
    });
    img.save(path).unwrap();
}

/// Write a single-color RGBA PNG.
pub fn create_solid_png(path: &Path, width: u32, height: u32, color: Rgba<u8>) {
    RgbaImage::from_pixel(width, height, color)
        .save(path)
        .unwrap();
}

/// Write a single-frame GIF.
pub fn create_test_gif(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
    });
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = image::codecs::gif::GifEncoder::new(file);
    encoder.encode_frame(image::Frame::new(img)).unwrap();
}

// =========================================================================
// Inspection
// =========================================================================

/// Decoded `(width, height)` of an image on disk. Panics on failure.
pub fn image_dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}
