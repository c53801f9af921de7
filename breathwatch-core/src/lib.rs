//! Board-agnostic core logic for the breathing monitor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Echo pulse timing shared between edge handlers and the main loop
//! - Cycle-windowed breathing detector
//! - Absence-timeout alert monitor
//! - Standby/Detecting mode state machine and the session controller
//! - Collaborator traits (clock, trigger, alarm, status display)
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod alert;
pub mod config;
pub mod detector;
pub mod sensor;
pub mod session;
pub mod state;
pub mod timing;
pub mod traits;
