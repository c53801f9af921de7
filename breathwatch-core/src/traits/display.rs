//! Status display trait
//!
//! The display collaborator owns all rendering, colors and layout. The core
//! only hands it semantic values and clear requests.

/// Errors that can occur while updating the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Transport to the panel failed
    Bus,
    /// Text did not fit the line buffer
    Overflow,
}

/// What the display shows while detecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreathStatus {
    /// Whole seconds since the last breath event
    pub seconds_since_breath: u32,
    /// Alarm raised
    pub alerting: bool,
}

/// Trait for the status display
pub trait StatusDisplay {
    /// Wipe everything, including any stale alert marker
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Show the "press the button to start" prompt
    fn show_awaiting_start(&mut self) -> Result<(), DisplayError>;

    /// Show time since the last breath and the alert marker
    fn show_status(&mut self, status: &BreathStatus) -> Result<(), DisplayError>;
}
