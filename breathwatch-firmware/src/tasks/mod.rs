//! Embassy async tasks
//!
//! The edge tasks feed the shared session state; the detector task runs
//! the measurement pipeline over it.

pub mod button;
pub mod detector;
pub mod echo;

pub use button::{button_task, ButtonConfig};
pub use detector::{detector_task, DetectorHardware};
pub use echo::echo_task;
