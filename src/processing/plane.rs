use image::GrayImage;

/// A height x width grid of 8-bit intensities stored row-major.
///
/// Planes own their storage; converting from an image always copies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntensityPlane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl IntensityPlane {
    /// Wrap a row-major buffer, returning `None` if its length does not
    /// match the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (width x height).
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // a zero-width plane has no data, so any non-zero chunk size yields nothing
        self.data.chunks_exact(self.width.max(1) as usize)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

impl From<&GrayImage> for IntensityPlane {
    fn from(img: &GrayImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            data: img.as_raw().clone(),
        }
    }
}
