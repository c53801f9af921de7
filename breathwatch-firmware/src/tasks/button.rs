//! User button task
//!
//! Each press flips between Standby and Detecting. The toggle happens on
//! the release edge; bounces inside the debounce window are ignored.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_time::{Duration, Timer};

use crate::clock::now_us;
use crate::session::{MODE_CHANGED, SESSION};

/// Button task configuration
pub struct ButtonConfig {
    /// Ignore further edges for this long after a toggle (ms)
    pub debounce_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { debounce_ms: 20 }
    }
}

/// User button task
#[embassy_executor::task]
pub async fn button_task(mut button: ExtiInput<'static>, config: ButtonConfig) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;

        let mode = SESSION.on_user_toggle(now_us());
        info!("Mode: {:?}", mode);
        MODE_CHANGED.signal(mode);

        Timer::after(Duration::from_millis(config.debounce_ms)).await;
    }
}
