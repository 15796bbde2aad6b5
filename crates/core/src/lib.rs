//! Core domain types, image discovery, and slide geometry
//! for photo deck generation.

pub mod discover;
pub mod error;
pub mod geometry;
pub mod types;
pub mod units;

pub use discover::find_images;
pub use error::{Error, Result};
pub use geometry::{fit_image, label_box, PlacementRect, SlideSize};
pub use types::{Deck, ImageFile, LabelBox, Slide};
pub use units::Emu;
