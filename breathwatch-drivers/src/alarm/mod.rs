//! Alarm output drivers

pub mod gpio;

pub use gpio::{GpioAlarm, Polarity};
