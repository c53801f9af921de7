//! Configuration loading
//!
//! breathwatch.toml is compiled into the image and was already checked by
//! build.rs. Parsing again at boot keeps one code path for the values the
//! firmware actually runs with.

use defmt::*;

use breathwatch_core::config::{parse_config, BreathwatchConfig};

/// Embedded configuration (compiled into firmware)
/// Edit breathwatch.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../breathwatch.toml");

/// Load the embedded configuration
///
/// Falls back to built-in defaults if the text fails to parse.
pub fn load() -> BreathwatchConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: window={}, threshold={}us, timeout={}us, poll={}ms",
                config.detector.window_size,
                config.detector.diff_threshold_us,
                config.alert.timeout_us,
                config.sensor.poll_interval_ms
            );
            config
        }
        Err(e) => {
            error!("Embedded config rejected: {:?}, using defaults", e);
            BreathwatchConfig::default()
        }
    }
}
