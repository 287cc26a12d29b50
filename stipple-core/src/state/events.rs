//! Events that trigger state transitions

use super::machine::ErrorKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Boot sequence completed successfully
    BootComplete,

    // Operator events
    /// Operator pressed start
    Start,
    /// Operator confirmed the paper is in place
    PaperLoaded,
    /// Operator picked an image
    ImageSelected,
    /// Operator acknowledged an error
    AcknowledgeError,

    // Plotter events
    /// Lifts and carriage homed
    Prepared,
    /// Every row printed
    PrintFinished,
    /// Operator aborted the print
    PrintAborted,
    /// Head parked and paper ejected
    Finished,

    /// Error detected
    ErrorDetected(ErrorKind),
}

impl Event {
    /// Check if this event is operator-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(
            self,
            Event::Start | Event::PaperLoaded | Event::ImageSelected | Event::AcknowledgeError
        )
    }

    /// Check if this event indicates an error
    pub fn is_error_event(&self) -> bool {
        matches!(self, Event::ErrorDetected(_))
    }
}
