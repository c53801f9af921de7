//! Console status display
//!
//! Screens are built into fixed line buffers and only printed when their
//! content changes, so the detection loop can redraw every iteration
//! without flooding the log.

use core::fmt::{self, Write};

use defmt::*;
use heapless::String;

use breathwatch_core::traits::{BreathStatus, DisplayError, StatusDisplay};

/// Characters per line
pub const LINE_WIDTH: usize = 24;

/// Lines per screen
pub const ROWS: usize = 3;

/// Text of one screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    lines: [String<LINE_WIDTH>; ROWS],
}

impl Screen {
    /// Create a blank screen
    pub const fn new() -> Self {
        Self {
            lines: [String::new(), String::new(), String::new()],
        }
    }

    /// Blank every line
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Format text into a row
    ///
    /// Fails with [`DisplayError::Overflow`] if the text is wider than a
    /// line or the row does not exist.
    pub fn set_line(&mut self, row: usize, args: fmt::Arguments<'_>) -> Result<(), DisplayError> {
        let line = self.lines.get_mut(row).ok_or(DisplayError::Overflow)?;
        line.clear();
        line.write_fmt(args).map_err(|_| DisplayError::Overflow)
    }

    /// Text of a row (empty if out of range)
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(|l| l.as_str()).unwrap_or("")
    }
}

/// Display that prints screens over defmt
pub struct ConsoleDisplay {
    /// Last printed screen
    shown: Screen,
    /// Screen being composed
    next: Screen,
}

impl ConsoleDisplay {
    /// Create a display showing a blank screen
    pub const fn new() -> Self {
        Self {
            shown: Screen::new(),
            next: Screen::new(),
        }
    }

    /// Print `next` if it differs from what is shown
    fn flush(&mut self) {
        if self.next == self.shown {
            return;
        }
        self.shown = self.next.clone();

        for row in 0..ROWS {
            let text = self.shown.line(row);
            if !text.is_empty() {
                info!("LCD[{}]: {}", row, text);
            }
        }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for ConsoleDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.next.clear();
        self.shown.clear();
        debug!("LCD cleared");
        Ok(())
    }

    fn show_awaiting_start(&mut self) -> Result<(), DisplayError> {
        self.next.clear();
        self.next.set_line(0, format_args!("Press user button to"))?;
        self.next.set_line(1, format_args!("start detection"))?;
        self.flush();
        Ok(())
    }

    fn show_status(&mut self, status: &BreathStatus) -> Result<(), DisplayError> {
        self.next.clear();
        self.next.set_line(0, format_args!("Stopped Breathing for"))?;
        self.next
            .set_line(1, format_args!("{} seconds", status.seconds_since_breath))?;
        if status.alerting {
            self.next.set_line(2, format_args!("Alert!!!"))?;
        }
        self.flush();
        Ok(())
    }
}
