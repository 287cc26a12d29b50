//! Configuration loading
//!
//! The configuration is compiled in from `plotter.toml` (checked by
//! build.rs) and parsed at boot with the core's TOML subset parser.

use defmt::*;

use stipple_core::config::{parse_config, ConfigError, PlotterConfig};

/// Embedded configuration (compiled into firmware)
/// Edit plotter.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../plotter.toml");

/// Parse the embedded configuration
///
/// On failure the defaults are returned along with the error so the
/// controller can report it before carrying on.
pub fn load_config() -> (PlotterConfig, Option<ConfigError>) {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded");
            (config, None)
        }
        Err(e) => {
            error!("plotter.toml rejected: {}", e);
            (PlotterConfig::default(), Some(e))
        }
    }
}
