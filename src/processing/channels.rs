use image::DynamicImage;

use super::{premultiplied_rgb16, IntensityPlane};

/// Red, green and blue intensity planes of one image.
#[derive(Debug, Clone)]
pub struct ChannelPlanes {
    pub red: IntensityPlane,
    pub green: IntensityPlane,
    pub blue: IntensityPlane,
}

/// Split a decoded image into 8-bit red, green and blue planes.
///
/// Components are read at 16-bit precision, premultiplied by alpha, and
/// truncated back to 8 bits with a right shift, so 16-bit sources lose
/// their low byte.
pub fn split_channels(img: &DynamicImage) -> ChannelPlanes {
    let rgb = premultiplied_rgb16(img);
    let (width, height) = rgb.dimensions();

    let mut red = Vec::with_capacity(width as usize * height as usize);
    let mut green = Vec::with_capacity(red.capacity());
    let mut blue = Vec::with_capacity(red.capacity());

    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        red.push((r >> 8) as u8);
        green.push((g >> 8) as u8);
        blue.push((b >> 8) as u8);
    }

    // one entry per pixel of a width x height image
    let plane = |data| IntensityPlane::from_raw(width, height, data).unwrap_or_default();
    ChannelPlanes {
        red: plane(red),
        green: plane(green),
        blue: plane(blue),
    }
}
