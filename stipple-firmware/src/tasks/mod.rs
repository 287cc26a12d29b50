//! Embassy async tasks
//!
//! Both tasks run on core 1 and publish through [`crate::channels`].

pub mod buttons;
pub mod encoder;

pub use buttons::button_scan_task;
pub use encoder::encoder_task;
