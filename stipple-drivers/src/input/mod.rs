//! Operator input

pub mod buttons;

pub use buttons::{ButtonPad, DEBOUNCE_SAMPLES};
