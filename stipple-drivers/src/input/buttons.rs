//! Debounced front-panel buttons
//!
//! [`ButtonPad::scan`] samples every pin, debounces it, and latches a press
//! edge when a button settles into the pressed state. Edges stay latched
//! until taken, so a press between two engine polls is not lost and a held
//! button counts once.

use embedded_hal::digital::InputPin;
use stipple_core::traits::{Button, OperatorInput};

/// Consecutive identical samples needed to accept a level change
pub const DEBOUNCE_SAMPLES: u8 = 3;

#[derive(Debug, Clone, Copy, Default)]
struct Debounce {
    stable: bool,
    candidate: bool,
    count: u8,
}

impl Debounce {
    /// Feed one sample; returns true on a settled press edge
    fn sample(&mut self, pressed: bool) -> bool {
        if pressed == self.stable {
            self.count = 0;
            return false;
        }
        if pressed != self.candidate {
            self.candidate = pressed;
            self.count = 1;
        } else {
            self.count = self.count.saturating_add(1);
        }
        if self.count >= DEBOUNCE_SAMPLES {
            self.stable = pressed;
            self.count = 0;
            return pressed;
        }
        false
    }
}

/// Five buttons on active-low inputs, in [`Button::ALL`] order
pub struct ButtonPad<P> {
    pins: [P; 5],
    debounce: [Debounce; 5],
    latched: [bool; 5],
}

impl<P: InputPin> ButtonPad<P> {
    pub fn new(pins: [P; 5]) -> Self {
        Self {
            pins,
            debounce: [Debounce::default(); 5],
            latched: [false; 5],
        }
    }

    /// Sample every button once
    ///
    /// Call at a steady rate (every few ms). A pin read error is treated
    /// as released.
    pub fn scan(&mut self) {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            let pressed = pin.is_low().unwrap_or(false);
            if self.debounce[i].sample(pressed) {
                self.latched[i] = true;
            }
        }
    }

    /// Consume a latched press edge
    pub fn take(&mut self, button: Button) -> bool {
        core::mem::take(&mut self.latched[button.index()])
    }
}

impl<P: InputPin> OperatorInput for ButtonPad<P> {
    fn take_press(&mut self, button: Button) -> bool {
        self.scan();
        self.take(button)
    }
}
