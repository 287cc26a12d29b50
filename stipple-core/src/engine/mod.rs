//! Print engine
//!
//! Turns rows of pixels into carriage moves and marker strokes, and runs
//! whole print sessions with the operator's pause and abort controls woven
//! in between column steps.
//!
//! The engine talks to the machine through [`PrintHead`], which offers the
//! motion primitives already bound to a configuration. [`Plotter`] is the
//! real implementation on top of any [`Machine`](crate::traits::Machine).

pub mod control;
pub mod paper;
pub mod plotter;
pub mod row;
pub mod session;

pub use control::{check_abort, pause_adjust};
pub use paper::{eject_paper, finish, load_paper};
pub use plotter::Plotter;
pub use row::{print_row, RowOutcome, SessionState};
pub use session::{start_print, SessionOutcome, SessionReport};

use crate::error::PlotError;
use crate::traits::Console;

/// Motion primitives as seen by the print engine
pub trait PrintHead: Console {
    /// Move the carriage by `pixels` pixel widths
    fn translate_carriage(&mut self, pixels: u16, power: i16) -> Result<(), PlotError>;

    /// Stroke the marker `depth` degrees down and back up
    fn stroke_marker(&mut self, depth: i32, power: i16) -> Result<(), PlotError>;

    /// Feed the paper forward
    fn feed_paper(&mut self, distance_um: u32, power: i16) -> Result<(), PlotError>;

    /// Return the carriage to its zero reference
    fn home_carriage(&mut self, power: i16) -> Result<(), PlotError>;

    /// Command zero power on every actuator
    ///
    /// Fails with [`PlotError::ActuatorFault`] when a driver could not
    /// apply the stop.
    fn stop_all(&mut self) -> Result<(), PlotError>;
}
