//! Monotonic clock backed by the embassy time driver

use embassy_time::{block_for, Duration, Instant};

use stipple_core::traits::Clock;

/// Millisecond clock and busy-wait delay
///
/// Core 0 runs the print controller as one blocking loop, so delays spin
/// rather than yield.
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&mut self) -> u64 {
        Instant::now().as_millis()
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
