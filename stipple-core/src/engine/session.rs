//! Print sessions

use crate::config::PlotterConfig;
use crate::error::PlotError;
use crate::raster::{ImageSource, PixelRow};
use crate::traits::Status;

use super::row::{print_row, RowOutcome, SessionState};
use super::PrintHead;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionOutcome {
    /// Every row printed
    Completed,
    /// The operator aborted during `row` (zero-based)
    Aborted { row: u16 },
}

/// Summary of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    /// Rows completed, including carriage return and paper feed
    pub rows_printed: u16,
    pub elapsed_ms: u64,
    /// Marker depth in effect at the end, after any operator adjustment
    pub final_depth: i32,
}

/// Print a whole image
///
/// The image is read through once before anything moves, so a malformed
/// image is reported without powering a single actuator. The source is
/// then rewound and printed row by row. An operator abort ends the session
/// normally with [`SessionOutcome::Aborted`]; a motion error stops every
/// actuator and is returned.
pub fn start_print<P, S>(
    head: &mut P,
    source: &mut S,
    config: &PlotterConfig,
) -> Result<SessionReport, PlotError>
where
    P: PrintHead,
    S: ImageSource,
{
    let header = source.header();
    let mut row = PixelRow::new();

    for _ in 0..header.rows {
        source.read_row(&mut row)?;
    }
    source.finish()?;
    source.rewind();

    info!("printing {}x{} image", header.columns, header.rows);
    let mut state = SessionState::new(config);
    let started = head.now_ms();
    let mut outcome = SessionOutcome::Completed;
    let mut rows_printed = 0;

    for index in 0..header.rows {
        head.show(Status::Printing {
            row: index,
            rows: header.rows,
            depth: state.deg_down,
        });

        let printed = source
            .read_row(&mut row)
            .map_err(PlotError::from)
            .and_then(|()| print_row(head, &row, &mut state, config));

        match printed {
            Ok(RowOutcome::Completed) => rows_printed += 1,
            Ok(RowOutcome::Aborted) => {
                outcome = SessionOutcome::Aborted { row: index };
                break;
            }
            Err(e) => {
                error!("row {} failed: {}", index, e);
                // A motor that cannot be stopped outranks the original error
                head.stop_all()?;
                return Err(e);
            }
        }
    }

    let elapsed_ms = head.elapsed_ms(started);
    head.show(Status::Finished {
        outcome,
        elapsed_ms,
    });
    info!("session ended after {} rows in {} ms", rows_printed, elapsed_ms);

    Ok(SessionReport {
        outcome,
        rows_printed,
        elapsed_ms,
        final_depth: state.deg_down,
    })
}
