//! GPIO trigger emitter
//!
//! Drives the HC-SR04 TRIG line high for a fixed hold time. The sensor
//! answers with eight 40 kHz bursts and then raises its echo line.
//!
//! The hold is a blocking delay. It stalls the caller for the whole pulse,
//! which is far shorter than one detection cycle.

use breathwatch_core::config::DEFAULT_TRIGGER_PULSE_US;
use breathwatch_core::traits::TriggerOutput;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Trigger line driven from a GPIO pin
pub struct GpioTrigger<P, D> {
    pin: P,
    delay: D,
    /// Hold time (µs)
    pulse_us: u32,
}

impl<P: OutputPin, D: DelayNs> GpioTrigger<P, D> {
    /// Create a trigger with the given hold time
    ///
    /// The line is driven low immediately.
    pub fn new(pin: P, delay: D, pulse_us: u32) -> Self {
        let mut trigger = Self {
            pin,
            delay,
            pulse_us,
        };
        let _ = trigger.pin.set_low();
        trigger
    }

    /// Create a trigger with the HC-SR04's 10 µs hold time
    pub fn hcsr04(pin: P, delay: D) -> Self {
        Self::new(pin, delay, DEFAULT_TRIGGER_PULSE_US)
    }

    /// Configured hold time (µs)
    pub fn pulse_us(&self) -> u32 {
        self.pulse_us
    }
}

impl<P: OutputPin, D: DelayNs> TriggerOutput for GpioTrigger<P, D> {
    fn fire(&mut self) {
        // Pin errors are infallible on supported boards
        let _ = self.pin.set_high();
        self.delay.delay_us(self.pulse_us);
        let _ = self.pin.set_low();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Event log shared between the mock pin and mock delay
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        High,
        Low,
        WaitNs(u32),
    }

    type Log = Rc<RefCell<Vec<Op>>>;

    struct MockPin {
        log: Log,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Op::Low);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Op::High);
            Ok(())
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Op::WaitNs(ns));
        }
    }

    fn trigger(pulse_us: u32) -> (GpioTrigger<MockPin, MockDelay>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let pin = MockPin { log: log.clone() };
        let delay = MockDelay { log: log.clone() };
        (GpioTrigger::new(pin, delay, pulse_us), log)
    }

    /// Total nanoseconds waited between the first High and the following Low
    fn hold_ns(ops: &[Op]) -> u64 {
        ops.iter()
            .skip_while(|op| **op != Op::High)
            .take_while(|op| **op != Op::Low)
            .map(|op| match op {
                Op::WaitNs(ns) => u64::from(*ns),
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn test_starts_low() {
        let (_trigger, log) = trigger(10);
        assert_eq!(*log.borrow(), [Op::Low]);
    }

    #[test]
    fn test_fire_pulses_high_then_low() {
        let (mut trigger, log) = trigger(10);
        log.borrow_mut().clear();

        trigger.fire();

        let ops = log.borrow();
        assert_eq!(ops.first(), Some(&Op::High));
        assert_eq!(ops.last(), Some(&Op::Low));
        assert_eq!(hold_ns(&ops), 10_000);
    }

    #[test]
    fn test_custom_hold_time() {
        let (mut trigger, log) = trigger(25);
        log.borrow_mut().clear();
        trigger.fire();
        assert_eq!(hold_ns(&log.borrow()), 25_000);
        assert_eq!(trigger.pulse_us(), 25);
    }

    #[test]
    fn test_hcsr04_default_hold() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let trigger = GpioTrigger::hcsr04(MockPin { log: log.clone() }, MockDelay { log });
        assert_eq!(trigger.pulse_us(), 10);
    }

    #[test]
    fn test_each_fire_is_one_pulse() {
        let (mut trigger, log) = trigger(10);
        log.borrow_mut().clear();

        for _ in 0..3 {
            trigger.fire();
        }

        let highs = log.borrow().iter().filter(|op| **op == Op::High).count();
        assert_eq!(highs, 3);
        assert_eq!(log.borrow().last(), Some(&Op::Low));
    }
}
