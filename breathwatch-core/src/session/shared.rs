//! State shared between edge handlers and the detection loop
//!
//! Writers:
//! - echo edge handler: the pulse timer
//! - user toggle handler: the mode, the breath stopwatch, the restart flag
//! - detection loop: the breath stopwatch (on breath events), the restart
//!   flag (consumes it)
//!
//! Every field is a single atomic word, so the whole struct can live in a
//! `static` and be touched from interrupt or task context without locks.

use portable_atomic::{AtomicBool, Ordering};

use crate::sensor::PulseTimer;
use crate::state::{ModeSwitch, OperatingMode};
use crate::timing::Stopwatch;

/// Cross-context session state
#[derive(Debug, Default)]
pub struct SessionShared {
    /// Echo width capture
    pulse: PulseTimer,
    /// Standby / Detecting
    mode: ModeSwitch,
    /// Time since the last breath event
    breath_clock: Stopwatch,
    /// Mode changed; loop must silence alarms and clear the display
    restart_pending: AtomicBool,
}

impl SessionShared {
    /// Create session state in Standby
    pub const fn new() -> Self {
        Self {
            pulse: PulseTimer::new(),
            mode: ModeSwitch::new(OperatingMode::Standby),
            breath_clock: Stopwatch::new(),
            restart_pending: AtomicBool::new(false),
        }
    }

    /// Echo pulse timer, for the edge handlers
    pub fn pulse(&self) -> &PulseTimer {
        &self.pulse
    }

    /// Stopwatch measuring time since the last breath
    pub fn breath_clock(&self) -> &Stopwatch {
        &self.breath_clock
    }

    /// Current operating mode
    pub fn mode(&self) -> OperatingMode {
        self.mode.get()
    }

    /// User toggle handler
    ///
    /// Flips the mode. Entering Detecting restarts the breath stopwatch
    /// before the new mode becomes visible, so the loop never sees
    /// Detecting with a stale clock. Either direction leaves a restart
    /// request for the loop. Expects a single toggling context.
    pub fn on_user_toggle(&self, now_us: u64) -> OperatingMode {
        if !self.mode.get().is_detecting() {
            self.breath_clock.reset(now_us);
        }
        let mode = self.mode.toggle();
        self.restart_pending.store(true, Ordering::Release);
        mode
    }

    /// Consume a pending restart request
    pub(crate) fn take_restart(&self) -> bool {
        self.restart_pending.swap(false, Ordering::AcqRel)
    }
}
