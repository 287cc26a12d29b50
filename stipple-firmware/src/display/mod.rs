//! Status output over RTT
//!
//! The plotter has no screen of its own; status lines go to the debug
//! probe through defmt.

use defmt::*;

use stipple_core::engine::SessionOutcome;
use stipple_core::traits::{format_elapsed, Status, StatusDisplay};

/// Status display that logs each update
pub struct RttDisplay;

impl StatusDisplay for RttDisplay {
    fn show(&mut self, status: Status) {
        match status {
            Status::Printing { row, rows, depth } => {
                info!("printing row {}/{} (depth {})", row + 1, rows, depth);
            }
            Status::Paused { depth } => {
                info!("PAUSED  depth {}  [up/down adjust, enter resume]", depth);
            }
            Status::Resumed { depth } => info!("resumed at depth {}", depth),
            Status::Aborted => warn!("print aborted"),
            Status::Finished {
                outcome,
                elapsed_ms,
            } => {
                let time = format_elapsed(elapsed_ms);
                match outcome {
                    SessionOutcome::Completed => info!("print complete in {}", time.as_str()),
                    SessionOutcome::Aborted { row } => {
                        info!("print stopped at row {} after {}", row + 1, time.as_str())
                    }
                }
            }
        }
    }
}
