//! Configuration types
//!
//! Board-agnostic calibration, power and timeout settings. The firmware
//! embeds a `plotter.toml` and parses it with [`parse_config`].

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::*;
