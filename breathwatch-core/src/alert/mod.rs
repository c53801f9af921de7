//! Breath-absence alerting
//!
//! Raises the single actionable signal of the system: breathing may have
//! stopped.

pub mod monitor;

pub use monitor::{AlertAction, AlertMonitor, AlertState};
