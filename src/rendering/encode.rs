use base64::Engine;
use image::{DynamicImage, GrayImage};
use std::io::Cursor;

use crate::error::RenderError;

/// Encode raw 8-bit pixel rows as a PNG.
pub fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::Paeth);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode a single-channel image.
pub fn encode_gray(img: &GrayImage) -> Result<Vec<u8>, RenderError> {
    encode_png(img.width(), img.height(), png::ColorType::Grayscale, img.as_raw())
}

/// Encode a decoded source image, keeping alpha when it has one.
///
/// Deeper sources are reduced to 8 bits per channel.
pub fn encode_dynamic(img: &DynamicImage) -> Result<Vec<u8>, RenderError> {
    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        encode_png(rgba.width(), rgba.height(), png::ColorType::Rgba, rgba.as_raw())
    } else {
        let rgb = img.to_rgb8();
        encode_png(rgb.width(), rgb.height(), png::ColorType::Rgb, rgb.as_raw())
    }
}

/// Inline PNG bytes as a `data:` URI.
pub fn data_uri(png_bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png_bytes)
    )
}
