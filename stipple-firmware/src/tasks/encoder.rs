//! Quadrature encoder task
//!
//! One task per motor, on core 1. Every edge of channel A is compared
//! with channel B to decide direction; the count is published through an
//! atomic that the motor driver on core 0 reads.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::gpio::Input;
use portable_atomic::AtomicI32;

#[embassy_executor::task(pool_size = 4)]
pub async fn encoder_task(
    mut a: Input<'static>,
    b: Input<'static>,
    counter: &'static AtomicI32,
) {
    debug!("Encoder task started");

    loop {
        a.wait_for_any_edge().await;

        // A leading B counts up, B leading A counts down
        if a.is_high() != b.is_high() {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            counter.fetch_sub(1, Ordering::Relaxed);
        }
    }
}
