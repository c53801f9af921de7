//! Monotonic time source

/// Microsecond clock that never goes backwards
///
/// Firmware backs this with the embassy time driver; tests use a manual
/// clock they advance by hand.
pub trait MonotonicClock {
    /// Microseconds since boot
    fn now_us(&self) -> u64;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
