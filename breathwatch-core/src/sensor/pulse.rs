//! Echo pulse width capture
//!
//! The HC-SR04 holds its echo line high from the end of the burst until the
//! reflection returns. The rising edge restarts a stopwatch; the falling
//! edge publishes the elapsed time into a single measurement slot.
//!
//! Edge handlers are the only writers of the slot and the detection loop is
//! the only reader. If the falling edge never arrives the slot keeps its
//! last value; the detector reads that as "no movement".

use portable_atomic::{AtomicI32, Ordering};

use crate::timing::Stopwatch;

/// One echo round-trip time in microseconds
pub type PulseMeasurement = i32;

/// Edge-triggered echo width timer
#[derive(Debug, Default)]
pub struct PulseTimer {
    /// Running since the last rising edge
    echo: Stopwatch,
    /// Latest published width (µs)
    width_us: AtomicI32,
}

impl PulseTimer {
    /// Create a timer with an empty (zero) measurement slot
    pub const fn new() -> Self {
        Self {
            echo: Stopwatch::new(),
            width_us: AtomicI32::new(0),
        }
    }

    /// Echo line went high: start timing
    pub fn on_rising_edge(&self, now_us: u64) {
        self.echo.reset(now_us);
    }

    /// Echo line went low: publish the pulse width
    ///
    /// Widths beyond `i32::MAX` µs saturate.
    pub fn on_falling_edge(&self, now_us: u64) {
        let width = self.echo.elapsed_us(now_us);
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        self.width_us.store(width, Ordering::Release);
    }

    /// Most recently published measurement
    pub fn latest(&self) -> PulseMeasurement {
        self.width_us.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_measurement_is_zero() {
        let timer = PulseTimer::new();
        assert_eq!(timer.latest(), 0);
    }

    #[test]
    fn test_edge_pair_publishes_width() {
        let timer = PulseTimer::new();
        timer.on_rising_edge(1_000);
        timer.on_falling_edge(2_740);
        assert_eq!(timer.latest(), 1_740);
    }

    #[test]
    fn test_rising_edge_alone_keeps_last_value() {
        let timer = PulseTimer::new();
        timer.on_rising_edge(0);
        timer.on_falling_edge(1_200);

        // Echo lost: rising edge without a falling edge
        timer.on_rising_edge(60_000);
        assert_eq!(timer.latest(), 1_200);
    }

    #[test]
    fn test_each_falling_edge_overwrites() {
        let timer = PulseTimer::new();
        timer.on_rising_edge(0);
        timer.on_falling_edge(1_000);
        timer.on_rising_edge(60_000);
        timer.on_falling_edge(61_050);
        assert_eq!(timer.latest(), 1_050);
    }

    #[test]
    fn test_huge_width_saturates() {
        let timer = PulseTimer::new();
        timer.on_rising_edge(0);
        timer.on_falling_edge(u64::MAX);
        assert_eq!(timer.latest(), i32::MAX);
    }
}
