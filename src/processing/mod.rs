//! Pixel-level pipeline: load, split, convert, count, equalize.
//!
//! Every function here is pure apart from [`load_image`]; each call
//! produces freshly owned buffers and nothing is shared between calls.

pub mod channels;
pub mod equalize;
pub mod filters;
pub mod grayscale;
pub mod histogram;
pub mod loader;
pub mod pixels;
pub mod plane;

pub use channels::{split_channels, ChannelPlanes};
pub use equalize::{equalize_histogram, Equalized, Lut};
pub use filters::Kernel;
pub use grayscale::to_grayscale;
pub use histogram::{Histogram, LEVELS};
pub use loader::load_image;
pub use pixels::{premultiplied_rgb16, Rgb16Image};
pub use plane::IntensityPlane;
