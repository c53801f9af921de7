//! Embassy-backed monotonic clock

use breathwatch_core::traits::MonotonicClock;
use embassy_time::Instant;

/// Microseconds since boot from the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}

/// Current time for edge handlers
pub fn now_us() -> u64 {
    Instant::now().as_micros()
}
