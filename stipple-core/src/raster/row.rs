//! Pixel row storage

use heapless::Vec;

use crate::error::ImageError;

/// Capacity of the row buffer (columns)
pub const MAX_COLUMNS: usize = 126;

/// One row of binary pixels, left to right in carriage-travel order
///
/// `true` is a mark, `false` is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelRow {
    pixels: Vec<bool, MAX_COLUMNS>,
}

impl PixelRow {
    /// Create an empty row
    pub const fn new() -> Self {
        Self { pixels: Vec::new() }
    }

    /// Build a row from 0/1 values
    pub fn from_bits(bits: &[u8]) -> Result<Self, ImageError> {
        let mut row = Self::new();
        for (column, &bit) in bits.iter().enumerate() {
            let mark = match bit {
                0 => false,
                1 => true,
                _ => {
                    return Err(ImageError::InvalidValue {
                        row: 0,
                        column: column as u16,
                    })
                }
            };
            row.push(mark)?;
        }
        Ok(row)
    }

    /// Remove all pixels, keeping the buffer
    pub fn clear(&mut self) {
        self.pixels.clear();
    }

    /// Append a pixel
    pub fn push(&mut self, mark: bool) -> Result<(), ImageError> {
        self.pixels.push(mark).map_err(|_| ImageError::TooManyColumns {
            columns: MAX_COLUMNS as u16 + 1,
            max: MAX_COLUMNS as u16,
        })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the row has no columns
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Check the pixel at `index`, or `None` past the end
    pub fn is_mark(&self, index: usize) -> Option<bool> {
        self.pixels.get(index).copied()
    }

    /// Number of marks in the row
    pub fn mark_count(&self) -> usize {
        self.pixels.iter().filter(|&&mark| mark).count()
    }

    /// Pixels as a slice
    pub fn as_slice(&self) -> &[bool] {
        &self.pixels
    }
}
