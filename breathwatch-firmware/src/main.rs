//! Breathwatch - Contactless Breathing Monitor Firmware
//!
//! Main firmware binary for STM32F429-based boards. An HC-SR04 ultrasonic
//! transceiver is aimed at a sleeper's chest; when the echo stops changing
//! for longer than the alert timeout, a buzzer and LED are switched on.
//!
//! Pin map:
//! - PA9: HC-SR04 TRIG
//! - PA8: HC-SR04 ECHO (both edges)
//! - PA0: user button (release edge)
//! - PA11: buzzer
//! - PG13: alert LED

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::interrupt;
use {defmt_rtt as _, panic_probe as _};

use crate::tasks::{button_task, detector_task, echo_task, ButtonConfig, DetectorHardware};

mod clock;
mod config;
mod display;
mod session;
mod tasks;

bind_interrupts!(struct Irqs {
    EXTI0 => exti::InterruptHandler<interrupt::typelevel::EXTI0>;
    EXTI9_5 => exti::InterruptHandler<interrupt::typelevel::EXTI9_5>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Breathwatch firmware starting...");

    // Initialize STM32 peripherals
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Sensor: TRIG idles low, ECHO held low while the sensor is silent
    let trigger = Output::new(p.PA9, Level::Low, Speed::VeryHigh);
    let echo = ExtiInput::new(p.PA8, p.EXTI8, Pull::Down, Irqs);

    // User button is active-high with a pull-down
    let button = ExtiInput::new(p.PA0, p.EXTI0, Pull::Down, Irqs);

    // Alarm outputs start off
    let buzzer = Output::new(p.PA11, Level::Low, Speed::Low);
    let led = Output::new(p.PG13, Level::Low, Speed::Low);

    // Spawn tasks
    spawner.spawn(echo_task(echo)).unwrap();
    spawner
        .spawn(button_task(button, ButtonConfig::default()))
        .unwrap();
    spawner
        .spawn(detector_task(
            DetectorHardware {
                trigger,
                buzzer,
                led,
            },
            config,
        ))
        .unwrap();

    info!("All tasks spawned, press the user button to start detection");
}
