//! Glue between embassy-rp peripherals and the driver traits

use core::sync::atomic::Ordering;

use embassy_rp::adc::{Adc, Blocking, Channel};
use portable_atomic::AtomicI32;

use stipple_core::traits::{Button, OperatorInput};
use stipple_drivers::motor::EncoderCount;
use stipple_drivers::sensor::AdcReader;

use crate::channels::BUTTONS;

/// Encoder count published by an encoder task
pub struct AtomicEncoder(pub &'static AtomicI32);

impl EncoderCount for AtomicEncoder {
    fn count(&mut self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }
}

/// One ADC channel read in blocking mode
pub struct AdcChannel {
    pub adc: Adc<'static, Blocking>,
    pub channel: Channel<'static>,
}

impl AdcReader for AdcChannel {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc.blocking_read(&mut self.channel).map_err(|_| ())
    }
}

/// Button latches owned by the core 1 scan task
pub struct SharedButtons;

impl OperatorInput for SharedButtons {
    fn take_press(&mut self, button: Button) -> bool {
        BUTTONS.lock(|cell| {
            cell.borrow_mut()
                .as_mut()
                .is_some_and(|pad| pad.take(button))
        })
    }
}
