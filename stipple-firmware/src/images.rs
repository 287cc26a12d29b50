//! Bundled images (checked by build.rs)

use stipple_core::raster::{Catalog, ImageEntry};

const IMAGES: &[ImageEntry] = &[
    ImageEntry {
        name: "heart",
        data: include_str!("../images/heart.txt"),
    },
    ImageEntry {
        name: "smiley face",
        data: include_str!("../images/smile.txt"),
    },
    ImageEntry {
        name: "dog",
        data: include_str!("../images/dog.txt"),
    },
];

pub static CATALOG: Catalog<'static> = Catalog::new(IMAGES);
