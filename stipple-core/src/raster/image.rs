//! Image sources
//!
//! An image is a `columns rows` header followed by `rows × columns` pixel
//! values (0 or 1) in row-major order. Sources hand rows out one at a time
//! so the full bitmap never needs to be in memory.

use core::str::SplitAsciiWhitespace;

use super::row::PixelRow;
use crate::error::ImageError;

/// Declared image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageHeader {
    /// Pixels per row
    pub columns: u16,
    /// Number of rows
    pub rows: u16,
}

/// A sequential reader of pixel rows
pub trait ImageSource {
    /// Get the declared dimensions
    fn header(&self) -> ImageHeader;

    /// Read the next row into `row`, replacing its contents
    fn read_row(&mut self, row: &mut PixelRow) -> Result<(), ImageError>;

    /// Check that nothing follows the last row
    fn finish(&mut self) -> Result<(), ImageError>;

    /// Go back to the first row
    fn rewind(&mut self);
}

/// Image source over whitespace-separated integers in a string
///
/// This is the plain-text format images are authored in:
///
/// ```text
/// 5 2
/// 0 0 1 0 1
/// 1 0 0 0 0
/// ```
#[derive(Debug, Clone)]
pub struct TextImage<'a> {
    header: ImageHeader,
    body: SplitAsciiWhitespace<'a>,
    tokens: SplitAsciiWhitespace<'a>,
    next_row: u16,
}

impl<'a> TextImage<'a> {
    /// Parse the header and prepare to stream rows
    ///
    /// Rejects images wider than `max_columns`. Pixel data is checked as
    /// rows are read.
    pub fn parse(data: &'a str, max_columns: u16) -> Result<Self, ImageError> {
        let mut tokens = data.split_ascii_whitespace();

        let columns = parse_dimension(tokens.next())?;
        let rows = parse_dimension(tokens.next())?;

        if columns == 0 {
            return Err(ImageError::InvalidHeader);
        }
        if columns > max_columns {
            return Err(ImageError::TooManyColumns {
                columns,
                max: max_columns,
            });
        }

        Ok(Self {
            header: ImageHeader { columns, rows },
            body: tokens.clone(),
            tokens,
            next_row: 0,
        })
    }

    /// Index of the next row to be read
    pub fn next_row(&self) -> u16 {
        self.next_row
    }
}

fn parse_dimension(token: Option<&str>) -> Result<u16, ImageError> {
    let token = token.ok_or(ImageError::MissingHeader)?;
    token.parse().map_err(|_| ImageError::InvalidHeader)
}

impl ImageSource for TextImage<'_> {
    fn header(&self) -> ImageHeader {
        self.header
    }

    fn read_row(&mut self, row: &mut PixelRow) -> Result<(), ImageError> {
        let row_index = self.next_row;
        if row_index >= self.header.rows {
            return Err(ImageError::Truncated { row: row_index });
        }

        row.clear();
        for column in 0..self.header.columns {
            let mark = match self.tokens.next() {
                Some("0") => false,
                Some("1") => true,
                Some(_) => {
                    return Err(ImageError::InvalidValue {
                        row: row_index,
                        column,
                    })
                }
                None => return Err(ImageError::Truncated { row: row_index }),
            };
            row.push(mark)?;
        }

        self.next_row += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ImageError> {
        if self.next_row < self.header.rows {
            return Err(ImageError::Truncated { row: self.next_row });
        }
        match self.tokens.next() {
            Some(_) => Err(ImageError::TrailingData),
            None => Ok(()),
        }
    }

    fn rewind(&mut self) {
        self.tokens = self.body.clone();
        self.next_row = 0;
    }
}
