//! Configuration types
//!
//! Tuning values for the detection pipeline and the no_std parser that
//! reads them from the embedded TOML file.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
