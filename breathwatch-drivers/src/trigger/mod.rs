//! Ultrasonic trigger drivers

pub mod gpio;

pub use gpio::GpioTrigger;
