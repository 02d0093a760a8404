pub mod encode;
pub mod plot;

pub use encode::{data_uri, encode_dynamic, encode_gray, encode_png};
pub use plot::{HistogramPlotter, PlotColor, PlotSeries};
