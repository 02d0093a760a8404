//! Histoscope - histogram equalization report server
//!
//! Loads one image, derives grayscale and equalized variants, plots the
//! intensity histograms and serves everything as a single HTML page.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod processing;
pub mod rendering;
pub mod server;
pub mod services;
