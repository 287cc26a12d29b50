//! Button scan task
//!
//! Samples the front panel every few milliseconds on core 1 so presses
//! are latched even while core 0 is busy in a long motion.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::BUTTONS;

/// Scan interval in milliseconds
pub const SCAN_INTERVAL_MS: u64 = 5;

#[embassy_executor::task]
pub async fn button_scan_task() {
    info!("Button scan task started");

    let mut ticker = Ticker::every(Duration::from_millis(SCAN_INTERVAL_MS));

    loop {
        ticker.next().await;

        BUTTONS.lock(|cell| {
            if let Some(pad) = cell.borrow_mut().as_mut() {
                pad.scan();
            }
        });
    }
}
