//! State shared between the two cores
//!
//! Core 1 counts encoder edges and scans the buttons; core 0 runs the
//! blocking print controller and reads what core 1 publishes.

use core::cell::RefCell;

use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::AtomicI32;

use stipple_drivers::input::ButtonPad;

/// Free-running encoder counts, indexed by `ActuatorId::index()`
pub static ENCODER_COUNTS: [AtomicI32; 4] = [
    AtomicI32::new(0),
    AtomicI32::new(0),
    AtomicI32::new(0),
    AtomicI32::new(0),
];

/// Front-panel buttons, scanned on core 1 and drained on core 0
pub static BUTTONS: Mutex<CriticalSectionRawMutex, RefCell<Option<ButtonPad<Input<'static>>>>> =
    Mutex::new(RefCell::new(None));
