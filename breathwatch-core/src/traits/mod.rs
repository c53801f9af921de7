//! Collaborator traits
//!
//! These traits define the interface between the detection logic and the
//! hardware-specific implementations: time source, trigger line, alarm
//! outputs and status display.

pub mod actuator;
pub mod clock;
pub mod display;

pub use actuator::{AlarmOutput, TriggerOutput};
pub use clock::MonotonicClock;
pub use display::{BreathStatus, DisplayError, StatusDisplay};
