//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in breathwatch-core, built on `embedded-hal` 1.0 pins and delays:
//!
//! - HC-SR04 trigger emitter
//! - Buzzer + LED alarm

#![no_std]
#![deny(unsafe_code)]

pub mod alarm;
pub mod trigger;
