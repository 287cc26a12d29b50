//! State machine for the operator flow
//!
//! The controller drives the plotter through an explicit, finite and
//! deterministic sequence: load paper, pick an image, prepare, print,
//! park. Motion is only commanded in states that allow it.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ErrorKind, State};
