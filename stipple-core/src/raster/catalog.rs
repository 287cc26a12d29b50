//! Image catalog
//!
//! Maps an operator's image choice to a stored bitmap.

use super::image::TextImage;
use crate::error::PlotError;

/// A named, stored image in text form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageEntry {
    /// Display name
    pub name: &'static str,
    /// Image data (see [`TextImage`])
    pub data: &'static str,
}

/// Fixed list of printable images
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    entries: &'a [ImageEntry],
}

impl<'a> Catalog<'a> {
    /// Create a catalog over a list of entries
    pub const fn new(entries: &'a [ImageEntry]) -> Self {
        Self { entries }
    }

    /// Number of images
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id
    pub fn get(&self, id: u8) -> Option<&'a ImageEntry> {
        self.entries.get(id as usize)
    }

    /// Open an image for printing
    ///
    /// Header problems are reported as
    /// [`PlotError::MalformedImage`]; pixel data is checked by the session.
    pub fn open(&self, id: u8, max_columns: u16) -> Result<TextImage<'a>, PlotError> {
        let entry = self.get(id).ok_or(PlotError::UnknownImage(id))?;
        Ok(TextImage::parse(entry.data, max_columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageError;
    use crate::raster::ImageSource;

    const ENTRIES: &[ImageEntry] = &[
        ImageEntry {
            name: "Dot",
            data: "1 1\n1\n",
        },
        ImageEntry {
            name: "Broken",
            data: "x 1\n",
        },
    ];

    #[test]
    fn test_open() {
        let catalog = Catalog::new(ENTRIES);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).map(|e| e.name), Some("Dot"));
        let image = catalog.open(0, 126).unwrap();
        assert_eq!(image.header().rows, 1);
    }

    #[test]
    fn test_unknown_image() {
        let catalog = Catalog::new(ENTRIES);
        assert_eq!(
            catalog.open(7, 126).unwrap_err(),
            PlotError::UnknownImage(7)
        );
    }

    #[test]
    fn test_malformed_header() {
        let catalog = Catalog::new(ENTRIES);
        assert_eq!(
            catalog.open(1, 126).unwrap_err(),
            PlotError::MalformedImage(ImageError::InvalidHeader)
        );
    }
}
