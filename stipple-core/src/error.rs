//! Error types shared by the raster, motion and engine layers

use crate::traits::ActuatorId;

/// Problems found while reading an image source
///
/// Row and column positions are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// The column/row header is missing or incomplete
    MissingHeader,
    /// A header value is not a positive integer
    InvalidHeader,
    /// Declared column count exceeds the configured row capacity
    TooManyColumns { columns: u16, max: u16 },
    /// A pixel value is not 0 or 1
    InvalidValue { row: u16, column: u16 },
    /// The data ended before the declared row was complete
    Truncated { row: u16 },
    /// Values remain after the last declared row
    TrailingData,
}

/// Print errors
///
/// An operator abort is not an error; it is reported through
/// [`RowOutcome`](crate::engine::RowOutcome) and
/// [`SessionOutcome`](crate::engine::SessionOutcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlotError {
    /// The image failed validation; no motion has been commanded
    MalformedImage(ImageError),
    /// A wait loop ran past its bound; every actuator has been powered off
    ActuatorTimeout(ActuatorId),
    /// A motor driver failed to apply a command; the motor may still run
    ActuatorFault(ActuatorId),
    /// The row encoder was queried past the end of the row
    IndexOutOfRange { index: usize, len: usize },
    /// The image catalog has no entry with this id
    UnknownImage(u8),
}

impl From<ImageError> for PlotError {
    fn from(e: ImageError) -> Self {
        PlotError::MalformedImage(e)
    }
}
