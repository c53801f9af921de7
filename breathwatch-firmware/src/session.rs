//! Session state shared between tasks
//!
//! The echo and button tasks write into it from their edge handlers; the
//! detector task reads it once per iteration.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use breathwatch_core::session::SessionShared;
use breathwatch_core::state::OperatingMode;

/// Pulse timer, mode, breath stopwatch and restart flag
pub static SESSION: SessionShared = SessionShared::new();

/// Mode changed by the user button (wakes the detector task early)
pub static MODE_CHANGED: Signal<CriticalSectionRawMutex, OperatingMode> = Signal::new();
