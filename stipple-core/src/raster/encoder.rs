//! Row encoder
//!
//! Answers the print engine's one question about a row: from this column,
//! is there a mark here, a run of blanks before the next mark, or nothing
//! left to draw?

use super::row::PixelRow;
use crate::error::PlotError;

/// Result of scanning a row from a given column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scan {
    /// The pixel at the index is a mark
    Mark,
    /// Every pixel from the index to the end of the row is blank
    NoMoreMarks,
    /// This many blanks precede the next mark (always ≥ 1)
    BlankRun(u16),
}

/// Scan `row` starting at `index`
///
/// Pure function of its inputs. Returns
/// [`PlotError::IndexOutOfRange`] when `index` is not inside the row.
pub fn find_next(row: &PixelRow, index: usize) -> Result<Scan, PlotError> {
    let pixels = row.as_slice();
    if index >= pixels.len() {
        return Err(PlotError::IndexOutOfRange {
            index,
            len: pixels.len(),
        });
    }

    if pixels[index] {
        return Ok(Scan::Mark);
    }

    Ok(match pixels[index..].iter().position(|&mark| mark) {
        Some(blanks) => Scan::BlankRun(blanks as u16),
        None => Scan::NoMoreMarks,
    })
}
