//! Motion control
//!
//! Distance-bounded moves built on encoder feedback, plus the vertical
//! homing routine. Every wait loop goes through [`wait`] so a jammed motor
//! or a dead sensor ends in [`PlotError::ActuatorTimeout`] instead of a
//! hang.
//!
//! [`PlotError::ActuatorTimeout`]: crate::error::PlotError::ActuatorTimeout

pub mod homing;
pub mod primitives;
pub mod wait;

pub use homing::{prepare, reset_top};
pub use primitives::{feed_paper, home_carriage, stroke_marker, translate_carriage};
pub use wait::{check_fault, wait_for, wait_until, Deadline};
