//! Ultrasonic echo measurement

pub mod pulse;

pub use pulse::{PulseMeasurement, PulseTimer};
