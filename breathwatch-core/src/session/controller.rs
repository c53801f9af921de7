//! Session controller
//!
//! The controller sequences one main-loop iteration:
//! - Standby: prompt the user, fire nothing
//! - Detecting: trigger a burst, read the latest echo width, run the
//!   detector, update the alert monitor, drive the alarm, report status
//!
//! The echo width read in an iteration comes from an earlier burst; edge
//! handlers and the loop run independently and no attempt is made to pair
//! a reading with its trigger.

use crate::alert::{AlertAction, AlertMonitor};
use crate::config::BreathwatchConfig;
use crate::detector::{BreathingDetector, Detection};
use crate::state::OperatingMode;
use crate::traits::{
    AlarmOutput, BreathStatus, DisplayError, MonotonicClock, StatusDisplay, TriggerOutput,
};

use super::shared::SessionShared;

/// Outcome of a detecting iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetectionReport {
    /// Breath decision and diagnostic sample
    pub detection: Detection,
    /// What happened to the alarm
    pub action: AlertAction,
    /// Values sent to the display
    pub status: BreathStatus,
}

/// Outcome of one controller iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Iteration {
    /// Waiting for the user; pipeline skipped
    Standby,
    /// Pipeline ran
    Detecting(DetectionReport),
}

/// Controller for the measurement-to-decision pipeline
pub struct SessionController<'a, C, T, A, D> {
    /// Cross-context state
    shared: &'a SessionShared,
    /// Time source
    clock: C,
    /// Emitter
    trigger: T,
    /// Buzzer and LED
    alarm: A,
    /// Status output
    display: D,
    /// Breath event detection
    detector: BreathingDetector,
    /// Absence timeout
    monitor: AlertMonitor<'a>,
    /// Display clear requested by a toggle and not yet done
    clear_pending: bool,
}

impl<'a, C, T, A, D> SessionController<'a, C, T, A, D>
where
    C: MonotonicClock,
    T: TriggerOutput,
    A: AlarmOutput,
    D: StatusDisplay,
{
    /// Create a controller over `shared` with the given collaborators
    pub fn new(
        shared: &'a SessionShared,
        config: &BreathwatchConfig,
        clock: C,
        trigger: T,
        alarm: A,
        display: D,
    ) -> Self {
        Self {
            shared,
            clock,
            trigger,
            alarm,
            display,
            detector: BreathingDetector::new(config.detector),
            monitor: AlertMonitor::new(shared.breath_clock(), config.alert),
            clear_pending: false,
        }
    }

    /// Run one main-loop iteration
    ///
    /// Pipeline and alarm state are updated before the display is touched,
    /// so a display error never loses a breath event or an alarm. A clear
    /// that fails is retried on the next iteration.
    pub fn step(&mut self) -> Result<Iteration, DisplayError> {
        // A toggle since the last iteration: start from a clean alarm
        if self.shared.take_restart() {
            self.silence();
            self.clear_pending = true;
        }

        match self.shared.mode() {
            OperatingMode::Standby => {
                // Alerting only exists while detecting
                if self.monitor.is_alerting() || self.alarm.is_alarm_on() {
                    self.silence();
                }

                self.clear_if_pending()?;
                self.display.show_awaiting_start()?;
                Ok(Iteration::Standby)
            }
            OperatingMode::Detecting => {
                let report = self.detect();

                self.clear_if_pending()?;
                self.display.show_status(&report.status)?;
                Ok(Iteration::Detecting(report))
            }
        }
    }

    /// Emitter -> pulse timer -> detector -> alert monitor
    fn detect(&mut self) -> DetectionReport {
        self.trigger.fire();

        let measurement = self.shared.pulse().latest();
        let detection = self.detector.update(measurement);

        let now_us = self.clock.now_us();
        let action = self.monitor.update(detection.breath, now_us);
        match action {
            AlertAction::Clear => self.alarm.set_alarm(false),
            AlertAction::Raise => self.alarm.set_alarm(true),
            AlertAction::Hold => {}
        }

        DetectionReport {
            detection,
            action,
            status: BreathStatus {
                seconds_since_breath: self.monitor.elapsed_secs(now_us),
                alerting: self.monitor.is_alerting(),
            },
        }
    }

    fn clear_if_pending(&mut self) -> Result<(), DisplayError> {
        if self.clear_pending {
            self.display.clear()?;
            self.clear_pending = false;
        }
        Ok(())
    }

    fn silence(&mut self) {
        self.monitor.silence();
        self.alarm.set_alarm(false);
    }

    /// Current operating mode
    pub fn mode(&self) -> OperatingMode {
        self.shared.mode()
    }

    /// Alert monitor
    pub fn monitor(&self) -> &AlertMonitor<'a> {
        &self.monitor
    }

    /// Breathing detector
    pub fn detector(&self) -> &BreathingDetector {
        &self.detector
    }

    /// Alarm outputs
    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    /// Trigger output
    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    /// Status display
    pub fn display(&self) -> &D {
        &self.display
    }
}
