//! State machine definition
//!
//! Everything the controller shows and every motion it starts is a
//! function of the current state and an event.

use super::events::Event;
use crate::error::PlotError;

/// Plotter states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on initialization, config loading
    Boot,
    /// Waiting for the operator to start
    Idle,
    /// Paper being inserted and advanced to the start position
    LoadingPaper,
    /// Image menu shown
    SelectingImage,
    /// Homing lifts and carriage
    Preparing,
    /// Print session running (pause and abort handled inside)
    Printing,
    /// Parking the head and ejecting the paper
    Finishing,
    /// Session over, result shown
    Complete,
    /// Fault detected; motors stopped
    Error(ErrorKind),
}

/// Types of errors that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Image data could not be parsed
    MalformedImage,
    /// A motor did not reach its target in time
    ActuatorTimeout,
    /// A motor driver stopped accepting commands
    ActuatorFault,
    /// The selected image does not exist
    UnknownImage,
    /// Configuration rejected
    ConfigError,
    /// Engine invariant broken
    Internal,
}

impl From<&PlotError> for ErrorKind {
    fn from(error: &PlotError) -> Self {
        match error {
            PlotError::MalformedImage(_) => ErrorKind::MalformedImage,
            PlotError::ActuatorTimeout(_) => ErrorKind::ActuatorTimeout,
            PlotError::ActuatorFault(_) => ErrorKind::ActuatorFault,
            PlotError::UnknownImage(_) => ErrorKind::UnknownImage,
            PlotError::IndexOutOfRange { .. } => ErrorKind::Internal,
        }
    }
}

impl State {
    /// Check if this state allows motor operation
    pub fn motors_allowed(&self) -> bool {
        matches!(
            self,
            State::LoadingPaper | State::Preparing | State::Printing | State::Finishing
        )
    }

    /// Check if this is an error state
    pub fn is_error(&self) -> bool {
        matches!(self, State::Error(_))
    }

    /// Check if this is a terminal state requiring user action
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Idle | State::Complete | State::Error(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Error(_), AcknowledgeError) => Idle,
            (Error(_), _) => self,
            (_, ErrorDetected(kind)) => Error(kind),

            (Boot, BootComplete) => Idle,
            (Idle, Start) => LoadingPaper,
            (LoadingPaper, PaperLoaded) => SelectingImage,
            (SelectingImage, ImageSelected) => Preparing,
            (Preparing, Prepared) => Printing,
            // An aborted print still parks the head and hands the paper back
            (Printing, PrintFinished) | (Printing, PrintAborted) => Finishing,
            (Finishing, Finished) => Complete,
            (Complete, Start) => LoadingPaper,

            // Default: stay in current state
            _ => self,
        }
    }
}
