//! Resettable stopwatch over a monotonic microsecond clock
//!
//! A stopwatch only remembers when it was last reset. Reset and read are
//! its only operations, and both take `&self` so an edge handler and the
//! main loop can hold the same instance. The origin is a single atomic
//! word, so a read racing a reset sees either the old or the new origin,
//! never a torn value.

use portable_atomic::{AtomicU64, Ordering};

/// Free-running elapsed-time counter
#[derive(Debug)]
pub struct Stopwatch {
    /// Clock reading (µs) at the last reset
    origin_us: AtomicU64,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a stopwatch started at clock time zero (boot)
    pub const fn new() -> Self {
        Self {
            origin_us: AtomicU64::new(0),
        }
    }

    /// Restart counting from `now_us`
    pub fn reset(&self, now_us: u64) {
        self.origin_us.store(now_us, Ordering::Release);
    }

    /// Microseconds since the last reset
    ///
    /// Saturates at zero if `now_us` predates the origin, which can happen
    /// when a reset from another context lands between the caller reading
    /// the clock and calling this.
    pub fn elapsed_us(&self, now_us: u64) -> u64 {
        now_us.saturating_sub(self.origin_us.load(Ordering::Acquire))
    }
}
