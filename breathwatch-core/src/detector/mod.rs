//! Breath event detection

pub mod breathing;

pub use breathing::{BreathingDetector, CycleSample, Detection};
