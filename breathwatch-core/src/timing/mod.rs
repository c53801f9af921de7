//! Time measurement shared across execution contexts

pub mod stopwatch;

pub use stopwatch::Stopwatch;
