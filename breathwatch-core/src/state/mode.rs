//! Operating mode state machine
//!
//! Two states, one event: the user toggle flips between them. The mode is
//! written from the button context and read by the detection loop, so it
//! lives in an atomic cell.

use portable_atomic::{AtomicU8, Ordering};

/// Machine modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Waiting for the user to start; no pulses fired
    #[default]
    Standby,
    /// Measuring and alerting
    Detecting,
}

impl OperatingMode {
    /// Mode after a user toggle
    pub fn toggled(self) -> Self {
        match self {
            OperatingMode::Standby => OperatingMode::Detecting,
            OperatingMode::Detecting => OperatingMode::Standby,
        }
    }

    /// Check if this mode runs the detection pipeline
    ///
    /// Alerting is only meaningful while detecting.
    pub fn is_detecting(&self) -> bool {
        matches!(self, OperatingMode::Detecting)
    }

    const fn as_u8(self) -> u8 {
        match self {
            OperatingMode::Standby => 0,
            OperatingMode::Detecting => 1,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        if raw & 1 == 0 {
            OperatingMode::Standby
        } else {
            OperatingMode::Detecting
        }
    }
}

/// Atomic cell holding the current [`OperatingMode`]
#[derive(Debug)]
pub struct ModeSwitch {
    raw: AtomicU8,
}

impl Default for ModeSwitch {
    fn default() -> Self {
        Self::new(OperatingMode::Standby)
    }
}

impl ModeSwitch {
    /// Create a switch in `mode`
    pub const fn new(mode: OperatingMode) -> Self {
        Self {
            raw: AtomicU8::new(mode.as_u8()),
        }
    }

    /// Current mode
    pub fn get(&self) -> OperatingMode {
        OperatingMode::from_u8(self.raw.load(Ordering::Acquire))
    }

    /// Flip the mode and return the new one
    ///
    /// A single read-modify-write, so two toggles racing each other both
    /// take effect.
    pub fn toggle(&self) -> OperatingMode {
        let previous = self.raw.fetch_xor(1, Ordering::AcqRel);
        OperatingMode::from_u8(previous).toggled()
    }
}
