//! Echo capture task
//!
//! Timestamps both edges of the HC-SR04 echo pulse. The width lands in the
//! shared pulse timer, where the detector task picks it up on its next
//! iteration.

use defmt::*;
use embassy_stm32::exti::ExtiInput;

use crate::clock::now_us;
use crate::session::SESSION;

/// Echo capture task
#[embassy_executor::task]
pub async fn echo_task(mut echo: ExtiInput<'static>) {
    info!("Echo capture task started");

    let pulse = SESSION.pulse();

    loop {
        echo.wait_for_rising_edge().await;
        pulse.on_rising_edge(now_us());

        echo.wait_for_falling_edge().await;
        pulse.on_falling_edge(now_us());
        trace!("Echo width: {}us", pulse.latest());
    }
}
