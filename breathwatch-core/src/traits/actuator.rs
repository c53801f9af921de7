//! Sensor trigger and alarm output traits

/// Ultrasonic trigger line (the emitter)
///
/// One call sends one burst. The underlying I/O is assumed not to fail.
pub trait TriggerOutput {
    /// Pulse the trigger line high for the configured hold time
    fn fire(&mut self);
}

/// Audible and visual alarm outputs
///
/// Implementations drive the buzzer and LED together.
pub trait AlarmOutput {
    /// Turn the alarm on or off
    fn set_alarm(&mut self, on: bool);

    /// Check if the alarm is currently on
    fn is_alarm_on(&self) -> bool;
}
