//! Status display trait
//!
//! The plotter reports progress and the pause screen through this trait.
//! The firmware renders it over RTT; tests record it.

use core::fmt::Write;

use heapless::String;

use crate::engine::SessionOutcome;

/// Longest `m:ss` rendering: 15 minute digits for `u64::MAX` ms plus `:ss`
pub const ELAPSED_LEN: usize = 18;

/// A status update for the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// A row is about to print (`row` is zero-based)
    Printing { row: u16, rows: u16, depth: i32 },
    /// Paused; shows the depth that will apply on resume
    Paused { depth: i32 },
    /// Resumed after a pause
    Resumed { depth: i32 },
    /// Operator abort detected, all motors stopped
    Aborted,
    /// The session ended
    Finished {
        outcome: SessionOutcome,
        elapsed_ms: u64,
    },
}

/// Trait for the operator-facing status output
pub trait StatusDisplay {
    /// Show a status update
    fn show(&mut self, status: Status);
}

/// Render a duration as `m:ss`
pub fn format_elapsed(elapsed_ms: u64) -> String<ELAPSED_LEN> {
    let seconds = elapsed_ms / 1000;
    let mut out = String::new();
    // Cannot overflow: ELAPSED_LEN covers the largest minute count
    let _ = write!(out, "{}:{:02}", seconds / 60, seconds % 60);
    out
}
