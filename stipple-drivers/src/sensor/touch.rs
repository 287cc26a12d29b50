//! Touch limit switch

use embedded_hal::digital::InputPin;

/// A momentary switch on a digital input
///
/// A pin read error is reported as pressed, so a carriage seeking the
/// switch stops rather than driving into the frame.
pub struct TouchSwitch<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> TouchSwitch<P> {
    /// Create a switch that reads pressed when the pin is high
    pub fn new_active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    /// Create a switch that reads pressed when the pin is low (pull-up wiring)
    pub fn new_active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    pub fn is_pressed(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.active_low,
            Err(_) => true,
        }
    }
}
