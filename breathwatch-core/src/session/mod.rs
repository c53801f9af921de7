//! Detection session
//!
//! [`SessionShared`] holds every value touched from more than one execution
//! context. [`SessionController`] owns the pipeline and runs it once per
//! main-loop iteration.

pub mod controller;
pub mod shared;

pub use controller::{DetectionReport, Iteration, SessionController};
pub use shared::SessionShared;
