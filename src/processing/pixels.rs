use image::{DynamicImage, ImageBuffer, Rgb};

/// RGB image with 16-bit components.
pub type Rgb16Image = ImageBuffer<Rgb<u16>, Vec<u16>>;

const FULL_SCALE: u32 = 0xFFFF;

/// Read every pixel as alpha-premultiplied 16-bit RGB.
///
/// 8-bit components widen to `v * 257`. Color is scaled by alpha, so a
/// fully transparent pixel reads as black whatever its stored color.
/// Images without an alpha channel are read as-is.
pub fn premultiplied_rgb16(img: &DynamicImage) -> Rgb16Image {
    if !img.color().has_alpha() {
        return img.to_rgb16();
    }

    let rgba = img.to_rgba16();
    Rgb16Image::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([premultiply(r, a), premultiply(g, a), premultiply(b, a)])
    })
}

fn premultiply(component: u16, alpha: u16) -> u16 {
    (u32::from(component) * u32::from(alpha) / FULL_SCALE) as u16
}
