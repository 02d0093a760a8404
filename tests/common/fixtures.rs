//! Test images written to temporary directories.

use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Name of the source image inside a fixture directory
pub const IMAGE_NAME: &str = "source.png";

/// 2x2 image with one red, one green, one blue and one white pixel
pub fn primaries() -> RgbImage {
    RgbImage::from_fn(2, 2, |x, y| match (x, y) {
        (0, 0) => Rgb([255, 0, 0]),
        (1, 0) => Rgb([0, 255, 0]),
        (0, 1) => Rgb([0, 0, 255]),
        _ => Rgb([255, 255, 255]),
    })
}

/// Horizontal gray ramp, left dark to right bright
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / width.saturating_sub(1).max(1)) as u8;
        Rgb([v, v, v])
    })
}

/// Image with every pixel set to the same color
pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Save `img` as PNG under `dir` and return its path
pub fn write_png(dir: &Path, img: &RgbImage) -> PathBuf {
    let path = dir.join(IMAGE_NAME);
    img.save(&path).expect("Failed to write fixture image");
    path
}

/// Write bytes that are not a decodable image
pub fn write_corrupt(dir: &Path) -> PathBuf {
    let path = dir.join(IMAGE_NAME);
    std::fs::write(&path, b"this is not an image").expect("Failed to write corrupt fixture");
    path
}
