use image::{DynamicImage, GrayImage, Luma};

use super::premultiplied_rgb16;

const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Luminance of one pixel whose components are on the 16-bit scale.
///
/// The weighted sum is divided by 256 to land back on the 8-bit range;
/// the fractional part is dropped.
pub fn luminance(r: u16, g: u16, b: u16) -> u8 {
    let y = RED_WEIGHT * f64::from(r) + GREEN_WEIGHT * f64::from(g) + BLUE_WEIGHT * f64::from(b);
    (y / 256.0).floor().clamp(0.0, 255.0) as u8
}

/// Convert an image to single-channel luminance of the same dimensions.
///
/// Translucent pixels are premultiplied by alpha first, so they darken.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    let rgb = premultiplied_rgb16(img);
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luminance(r, g, b)])
    })
}
