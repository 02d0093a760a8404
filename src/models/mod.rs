pub mod channel;
pub mod config;

pub use channel::Channel;
pub use config::{AppConfig, ConfigError, PlotConfig};
