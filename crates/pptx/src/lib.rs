//! PPTX (Office Open XML) writer backend for photo decks.
//!
//! Serializes a built [`photodeck_core::Deck`] into a .pptx package: a ZIP
//! archive of XML parts plus the image media copied verbatim.

pub mod constants;
pub mod package;
pub mod slide;
pub mod templates;

pub use package::PptxWriter;
