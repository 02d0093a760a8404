use image::{GrayImage, Luma};

use super::{Histogram, IntensityPlane, LEVELS};
use crate::error::ProcessingError;

/// Intensity remapping table: `lut[input] == output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lut([u8; LEVELS]);

impl Lut {
    /// Build the equalization table from a histogram.
    ///
    /// `lut[i] = floor(cdf[i] / total_pixels * 255)`. `total_pixels` is the
    /// image area, which equals the histogram sum for histograms taken from
    /// that image.
    pub fn from_histogram(hist: &Histogram, total_pixels: u64) -> Self {
        let cdf = hist.cumulative();
        let total = total_pixels as f64;
        let mut table = [0u8; LEVELS];
        for (slot, &c) in table.iter_mut().zip(cdf.iter()) {
            *slot = ((c as f64 / total) * 255.0).floor().clamp(0.0, 255.0) as u8;
        }
        Self(table)
    }

    pub fn apply(&self, level: u8) -> u8 {
        self.0[level as usize]
    }

    /// True when no later entry is smaller than an earlier one.
    pub fn is_monotonic(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Output of [`equalize_histogram`].
#[derive(Debug, Clone)]
pub struct Equalized {
    pub image: GrayImage,
    pub lut: Lut,
}

/// Spread the intensities of a grayscale image across the full range.
///
/// Zero-area images are rejected with [`ProcessingError::InvalidInput`]
/// since the table normalizes by the pixel count.
pub fn equalize_histogram(img: &GrayImage) -> Result<Equalized, ProcessingError> {
    let (width, height) = img.dimensions();
    let plane = IntensityPlane::from(img);
    if plane.pixel_count() == 0 {
        return Err(ProcessingError::InvalidInput { width, height });
    }

    let hist = Histogram::from_plane(&plane);
    let lut = Lut::from_histogram(&hist, plane.pixel_count());

    let mut out = GrayImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(img.pixels()) {
        *dst = Luma([lut.apply(src.0[0])]);
    }

    tracing::debug!(
        width,
        height,
        occupied_levels = hist.occupied_levels(),
        "Equalized grayscale image"
    );

    Ok(Equalized { image: out, lut })
}
