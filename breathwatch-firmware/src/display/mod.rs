//! Status display
//!
//! The board's character LCD is driven through its vendor BSP, which has
//! no Rust counterpart. The console display renders the same text screens
//! and prints them over RTT instead.

pub mod console;

pub use console::ConsoleDisplay;
