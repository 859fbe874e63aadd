//! Shared fixture builders for the test suite.
//!
//! Synthetic images are generated through the `image` crate's own encoders,
//! so tests never depend on checked-in binary fixtures.

use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Write a gradient JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(path).unwrap();
}

/// Write an opaque gradient PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    });
    img.save(path).unwrap();
}

/// Write a PNG whose left half is fully transparent and right half opaque.
pub fn create_test_png_with_alpha(path: &Path, width: u32, height: u32) {
    let split = width / 2;
    let img = RgbaImage::from_fn(width, height, |x, y| {
        if x < split {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
        }
    });
    img.save(path).unwrap();
}
