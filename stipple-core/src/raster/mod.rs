//! Raster handling
//!
//! Images arrive as a stream of binary pixel rows. Only one row is held in
//! memory at a time; the row encoder turns it into marks and blank runs.

pub mod catalog;
pub mod encoder;
pub mod image;
pub mod row;

pub use catalog::{Catalog, ImageEntry};
pub use encoder::{find_next, Scan};
pub use image::{ImageHeader, ImageSource, TextImage};
pub use row::{PixelRow, MAX_COLUMNS};
