//! Detection loop task
//!
//! Runs the session controller once per poll interval. A mode change from
//! the button cuts the wait short so the screen follows the press
//! immediately.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_stm32::gpio::Output;
use embassy_time::{Delay, Duration, Timer};

use breathwatch_core::alert::AlertAction;
use breathwatch_core::config::BreathwatchConfig;
use breathwatch_core::session::{DetectionReport, Iteration, SessionController};
use breathwatch_drivers::alarm::GpioAlarm;
use breathwatch_drivers::trigger::GpioTrigger;

use crate::clock::EmbassyClock;
use crate::display::ConsoleDisplay;
use crate::session::{MODE_CHANGED, SESSION};

type Trigger = GpioTrigger<Output<'static>, Delay>;
type Alarm = GpioAlarm<Output<'static>, Output<'static>>;
type Controller = SessionController<'static, EmbassyClock, Trigger, Alarm, ConsoleDisplay>;

/// Pins owned by the detector task
pub struct DetectorHardware {
    /// HC-SR04 TRIG
    pub trigger: Output<'static>,
    /// Buzzer
    pub buzzer: Output<'static>,
    /// Alert LED
    pub led: Output<'static>,
}

/// Detection loop task
#[embassy_executor::task]
pub async fn detector_task(hw: DetectorHardware, config: BreathwatchConfig) {
    info!("Detector task started");

    let trigger = GpioTrigger::new(hw.trigger, Delay, config.sensor.trigger_pulse_us);
    let alarm = GpioAlarm::new_active_high(hw.buzzer, hw.led);
    let mut controller: Controller = SessionController::new(
        &SESSION,
        &config,
        EmbassyClock,
        trigger,
        alarm,
        ConsoleDisplay::new(),
    );

    let poll = Duration::from_millis(u64::from(config.sensor.poll_interval_ms));

    loop {
        match controller.step() {
            Ok(Iteration::Standby) => {}
            Ok(Iteration::Detecting(report)) => log_report(&report),
            Err(e) => warn!("Display update failed: {:?}", e),
        }

        match select(Timer::after(poll), MODE_CHANGED.wait()).await {
            Either::First(()) => {}
            Either::Second(mode) => debug!("Woken by mode change: {:?}", mode),
        }
    }
}

fn log_report(report: &DetectionReport) {
    let sample = &report.detection.sample;
    debug!(
        "cycle={} current={}us baseline={}us diff={}us",
        sample.cycle, sample.current_us, sample.baseline_us, sample.diff_us
    );

    match report.action {
        AlertAction::Raise => warn!(
            "No breath for {}s, alarm raised",
            report.status.seconds_since_breath
        ),
        AlertAction::Clear if report.detection.breath => trace!("Breath detected"),
        _ => {}
    }
}
