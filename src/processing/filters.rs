//! 3x3 convolution kernels applied to grayscale images.

use image::{GrayImage, Luma};
use serde::Deserialize;
use std::fmt;

/// A named 3x3 kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    GaussianBlur,
    BoxBlur,
    SobelX,
    SobelY,
    Laplacian,
    Emboss,
    PrewittX,
    PrewittY,
    UnsharpMasking,
    HighPass,
    LowPass,
    Sharpen,
}

impl Kernel {
    pub const ALL: [Kernel; 12] = [
        Kernel::GaussianBlur,
        Kernel::BoxBlur,
        Kernel::SobelX,
        Kernel::SobelY,
        Kernel::Laplacian,
        Kernel::Emboss,
        Kernel::PrewittX,
        Kernel::PrewittY,
        Kernel::UnsharpMasking,
        Kernel::HighPass,
        Kernel::LowPass,
        Kernel::Sharpen,
    ];

    /// Kernel weights, row by row.
    pub fn weights(self) -> [[f32; 3]; 3] {
        let (w, divisor): ([[f32; 3]; 3], f32) = match self {
            Kernel::GaussianBlur => ([[1., 2., 1.], [2., 4., 2.], [1., 2., 1.]], 9.),
            Kernel::BoxBlur | Kernel::LowPass => ([[1., 1., 1.], [1., 1., 1.], [1., 1., 1.]], 9.),
            Kernel::SobelX => ([[-1., 0., 1.], [-2., 0., 2.], [-1., 0., 1.]], 1.),
            Kernel::SobelY => ([[-1., -2., -1.], [0., 0., 0.], [1., 2., 1.]], 1.),
            Kernel::Laplacian => ([[0., 1., 0.], [1., -4., 1.], [0., 1., 0.]], 1.),
            Kernel::Emboss => ([[-2., -1., 0.], [-1., 1., 1.], [0., 1., 2.]], 1.),
            Kernel::PrewittX => ([[-1., 0., 1.], [-1., 0., 1.], [-1., 0., 1.]], 1.),
            Kernel::PrewittY => ([[-1., -1., -1.], [0., 0., 0.], [1., 1., 1.]], 1.),
            Kernel::UnsharpMasking => ([[-1., -1., -1.], [-1., 9., -1.], [-1., -1., -1.]], 9.),
            Kernel::HighPass => ([[-1., -1., -1.], [-1., 8., -1.], [-1., -1., -1.]], 1.),
            Kernel::Sharpen => ([[0., -1., 0.], [-1., 5., -1.], [0., -1., 0.]], 1.),
        };
        w.map(|row| row.map(|v| v / divisor))
    }

    /// Config name of the kernel.
    pub fn name(self) -> &'static str {
        match self {
            Kernel::GaussianBlur => "gaussian_blur",
            Kernel::BoxBlur => "box_blur",
            Kernel::SobelX => "sobel_x",
            Kernel::SobelY => "sobel_y",
            Kernel::Laplacian => "laplacian",
            Kernel::Emboss => "emboss",
            Kernel::PrewittX => "prewitt_x",
            Kernel::PrewittY => "prewitt_y",
            Kernel::UnsharpMasking => "unsharp_masking",
            Kernel::HighPass => "high_pass",
            Kernel::LowPass => "low_pass",
            Kernel::Sharpen => "sharpen",
        }
    }

    /// Human-readable label for page headings.
    pub fn label(self) -> &'static str {
        match self {
            Kernel::GaussianBlur => "Gaussian Blur",
            Kernel::BoxBlur => "Box Blur",
            Kernel::SobelX => "Sobel X",
            Kernel::SobelY => "Sobel Y",
            Kernel::Laplacian => "Laplacian",
            Kernel::Emboss => "Emboss",
            Kernel::PrewittX => "Prewitt X",
            Kernel::PrewittY => "Prewitt Y",
            Kernel::UnsharpMasking => "Unsharp Masking",
            Kernel::HighPass => "High Pass",
            Kernel::LowPass => "Low Pass",
            Kernel::Sharpen => "Sharpen",
        }
    }

    /// Correlate the kernel over `img`.
    ///
    /// Borders reflect without repeating the edge pixel (`dcb|abcd|cba`).
    /// Results are rounded and clamped to 0..=255.
    pub fn apply(self, img: &GrayImage) -> GrayImage {
        let weights = self.weights();
        let (width, height) = img.dimensions();

        GrayImage::from_fn(width, height, |x, y| {
            let mut acc = 0.0f32;
            for (ky, row) in weights.iter().enumerate() {
                let sy = reflect_101(i64::from(y) + ky as i64 - 1, height);
                for (kx, &w) in row.iter().enumerate() {
                    let sx = reflect_101(i64::from(x) + kx as i64 - 1, width);
                    acc += w * f32::from(img.get_pixel(sx, sy).0[0]);
                }
            }
            Luma([acc.round().clamp(0.0, 255.0) as u8])
        })
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mirror an out-of-range coordinate back into `0..len`, one step at most.
fn reflect_101(i: i64, len: u32) -> u32 {
    let len = i64::from(len);
    if len == 1 {
        return 0;
    }
    let i = if i < 0 { -i } else { i };
    let i = if i >= len { 2 * (len - 1) - i } else { i };
    i as u32
}
