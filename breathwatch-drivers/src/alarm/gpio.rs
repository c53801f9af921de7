//! GPIO alarm output
//!
//! A buzzer and an LED switched together from two GPIO pins. Either can be
//! wired active-low (e.g. through a PNP stage).

use breathwatch_core::traits::AlarmOutput;
use embedded_hal::digital::{OutputPin, PinState};

/// Electrical level that means "on"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// On = pin high
    #[default]
    ActiveHigh,
    /// On = pin low
    ActiveLow,
}

impl Polarity {
    /// Pin level for the given logical state
    pub fn level(self, on: bool) -> PinState {
        match self {
            Polarity::ActiveHigh => PinState::from(on),
            Polarity::ActiveLow => PinState::from(!on),
        }
    }
}

/// Buzzer + LED alarm
pub struct GpioAlarm<B, L> {
    buzzer: B,
    led: L,
    buzzer_polarity: Polarity,
    led_polarity: Polarity,
    /// Current logical state (true = alarm on)
    on: bool,
}

impl<B: OutputPin, L: OutputPin> GpioAlarm<B, L> {
    /// Create an alarm with explicit output polarity
    ///
    /// Both outputs are switched off immediately.
    pub fn new(buzzer: B, buzzer_polarity: Polarity, led: L, led_polarity: Polarity) -> Self {
        let mut alarm = Self {
            buzzer,
            led,
            buzzer_polarity,
            led_polarity,
            on: false,
        };
        alarm.set_alarm(false);
        alarm
    }

    /// Create an alarm with both outputs active-high
    pub fn new_active_high(buzzer: B, led: L) -> Self {
        Self::new(buzzer, Polarity::ActiveHigh, led, Polarity::ActiveHigh)
    }
}

impl<B: OutputPin, L: OutputPin> AlarmOutput for GpioAlarm<B, L> {
    fn set_alarm(&mut self, on: bool) {
        self.on = on;

        // Pin errors are infallible on supported boards
        let _ = self.buzzer.set_state(self.buzzer_polarity.level(on));
        let _ = self.led.set_state(self.led_polarity.level(on));
    }

    fn is_alarm_on(&self) -> bool {
        self.on
    }
}
