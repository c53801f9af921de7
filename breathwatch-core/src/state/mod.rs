//! Operating mode state machine
//!
//! Standby or Detecting, toggled by the user button.

pub mod mode;

pub use mode::{ModeSwitch, OperatingMode};
