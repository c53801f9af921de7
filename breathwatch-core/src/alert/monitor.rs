//! Breath-absence alert monitor
//!
//! Tracks time since the last breath event on a shared stopwatch. The
//! stopwatch is reset only by a breath event or by entering Detecting mode;
//! the monitor never resets it on a plain iteration.

use crate::config::AlertConfig;
use crate::timing::Stopwatch;

/// Alert condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertState {
    /// Breathing seen within the timeout
    #[default]
    Quiet,
    /// No breath for at least the timeout
    Alerting,
}

/// What the alarm outputs should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertAction {
    /// Breath seen: clear any alarm
    Clear,
    /// Timeout just crossed: raise the alarm
    Raise,
    /// Nothing to change
    Hold,
}

/// Alert monitor
///
/// Holds a reference to the breath stopwatch so the mode toggle can reset
/// the same clock from another context.
#[derive(Debug)]
pub struct AlertMonitor<'a> {
    /// Time since the last breath
    clock: &'a Stopwatch,
    /// Absence that raises the alarm (µs)
    timeout_us: u64,
    /// Current condition
    state: AlertState,
}

impl<'a> AlertMonitor<'a> {
    /// Create a quiet monitor over `clock`
    pub fn new(clock: &'a Stopwatch, config: AlertConfig) -> Self {
        Self {
            clock,
            timeout_us: config.timeout_us,
            state: AlertState::Quiet,
        }
    }

    /// Process this iteration's breath event
    ///
    /// A breath always wins: the clock restarts and the monitor goes quiet,
    /// even if the timeout had already elapsed.
    pub fn update(&mut self, breath: bool, now_us: u64) -> AlertAction {
        if breath {
            self.clock.reset(now_us);
            self.state = AlertState::Quiet;
            return AlertAction::Clear;
        }

        if self.state == AlertState::Quiet && self.clock.elapsed_us(now_us) >= self.timeout_us {
            self.state = AlertState::Alerting;
            return AlertAction::Raise;
        }

        AlertAction::Hold
    }

    /// Drop back to Quiet without touching the clock
    ///
    /// Used when the operating mode changes; the toggle has already reset
    /// the clock.
    pub fn silence(&mut self) {
        self.state = AlertState::Quiet;
    }

    /// Current condition
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Check if the alarm is raised
    pub fn is_alerting(&self) -> bool {
        self.state == AlertState::Alerting
    }

    /// Time since the last breath (µs)
    pub fn elapsed_us(&self, now_us: u64) -> u64 {
        self.clock.elapsed_us(now_us)
    }

    /// Time since the last breath in whole seconds
    pub fn elapsed_secs(&self, now_us: u64) -> u32 {
        u32::try_from(self.elapsed_us(now_us) / 1_000_000).unwrap_or(u32::MAX)
    }
}
