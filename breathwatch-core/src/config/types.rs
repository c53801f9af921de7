//! Configuration type definitions
//!
//! The tuned constants of the detection pipeline. The window size and
//! threshold were found by trial against a sleeping subject; they are
//! surfaced here so they can be tuned without touching the algorithm.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Iterations between baseline refreshes
pub const DEFAULT_WINDOW_SIZE: u16 = 10;

/// Largest usable window size
///
/// The cycle counter must be able to exceed the window, so `u16::MAX` is
/// out of range.
pub const MAX_WINDOW_SIZE: u16 = u16::MAX - 1;

/// Minimum pulse width change that counts as a breath (µs)
pub const DEFAULT_DIFF_THRESHOLD_US: i32 = 30;

/// Time without a breath before the alarm is raised (µs)
pub const DEFAULT_ALERT_TIMEOUT_US: u64 = 10_000_000;

/// HC-SR04 trigger pulse length (µs)
pub const DEFAULT_TRIGGER_PULSE_US: u32 = 10;

/// Pause between detection iterations (ms)
///
/// 60 ms is the shortest measurement cycle the HC-SR04 datasheet allows.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 60;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Window size must be at least one iteration
    ZeroWindow,
    /// Window size above [`MAX_WINDOW_SIZE`]
    WindowTooLarge,
    /// Threshold must not be negative
    NegativeThreshold,
    /// Alert timeout must be non-zero
    ZeroTimeout,
    /// Trigger pulse must be non-zero
    ZeroTriggerPulse,
    /// Poll interval must be non-zero
    ZeroPollInterval,
}

/// Breathing detector tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DetectorConfig {
    /// Iterations between baseline refreshes
    pub window_size: u16,
    /// Breath threshold on |current - baseline| (µs)
    pub diff_threshold_us: i32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            diff_threshold_us: DEFAULT_DIFF_THRESHOLD_US,
        }
    }
}

/// Alert monitor tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AlertConfig {
    /// Time without a breath before alerting (µs)
    pub timeout_us: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            timeout_us: DEFAULT_ALERT_TIMEOUT_US,
        }
    }
}

/// Ultrasonic sensor timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SensorConfig {
    /// Trigger hold time (µs)
    pub trigger_pulse_us: u32,
    /// Pause between detection iterations (ms)
    pub poll_interval_ms: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            trigger_pulse_us: DEFAULT_TRIGGER_PULSE_US,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BreathwatchConfig {
    pub detector: DetectorConfig,
    pub alert: AlertConfig,
    pub sensor: SensorConfig,
}

impl BreathwatchConfig {
    /// Check that every value is usable
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detector.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.detector.window_size > MAX_WINDOW_SIZE {
            return Err(ConfigError::WindowTooLarge);
        }
        if self.detector.diff_threshold_us < 0 {
            return Err(ConfigError::NegativeThreshold);
        }
        if self.alert.timeout_us == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.sensor.trigger_pulse_us == 0 {
            return Err(ConfigError::ZeroTriggerPulse);
        }
        if self.sensor.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}
