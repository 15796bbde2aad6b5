//! Domain types for the deck being built.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{self, PlacementRect, SlideSize};

/// A discovered image file.
///
/// Pixel dimensions are not stored; they are read from the file header on
/// demand so that no image stays open across slides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    /// Full path to the image.
    pub path: PathBuf,

    /// Filename without the directory part.
    pub basename: String,
}

impl ImageFile {
    /// Create an image file record from a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, basename }
    }

    /// Read the pixel dimensions from the file header.
    ///
    /// Opens, measures, and closes the file; the image data itself is never
    /// decoded.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        image::image_dimensions(&self.path).map_err(|e| {
            Error::ImageError(format!(
                "Failed to read dimensions of '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// File extension as given on disk, without the dot.
    pub fn extension(&self) -> &str {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
    }
}

/// The filename label box placed over a picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelBox {
    /// Label text (the image basename).
    pub text: String,

    /// Position and extent of the box.
    pub rect: PlacementRect,
}

impl LabelBox {
    /// Build the label for an image basename.
    pub fn for_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let rect = geometry::label_box(&text);
        Self { text, rect }
    }
}

/// One slide of the deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Slide {
    /// Leading slide with a title and subtitle placeholder.
    Title { title: String, subtitle: String },

    /// Blank-layout slide carrying one picture and its filename label.
    Image {
        image: ImageFile,
        placement: PlacementRect,
        label: LabelBox,
    },
}

/// An in-memory deck under construction.
///
/// Slides are only ever appended; serialization happens once, after the
/// deck is complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Output slide dimensions.
    pub slide_size: SlideSize,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck with the default slide size.
    pub fn new() -> Self {
        Self::with_slide_size(SlideSize::new())
    }

    /// Create an empty deck with the given slide size.
    pub fn with_slide_size(slide_size: SlideSize) -> Self {
        Self {
            slide_size,
            slides: Vec::new(),
        }
    }

    /// Append the title slide.
    pub fn add_title_slide(&mut self, title: impl Into<String>, subtitle: impl Into<String>) {
        self.slides.push(Slide::Title {
            title: title.into(),
            subtitle: subtitle.into(),
        });
    }

    /// Append one image slide.
    ///
    /// Reads the image dimensions, computes the centered placement and the
    /// filename label, and appends the slide.
    pub fn add_image_slide(&mut self, image: ImageFile) -> Result<()> {
        let (width_px, height_px) = image.dimensions()?;
        let placement = geometry::fit_image(width_px, height_px, self.slide_size);
        let label = LabelBox::for_text(image.basename.clone());

        log::debug!(
            "placing {} ({}x{}px) at ({}, {}) size {}x{} EMU",
            image.basename,
            width_px,
            height_px,
            placement.left.0,
            placement.top.0,
            placement.width.0,
            placement.height.0
        );

        self.slides.push(Slide::Image {
            image,
            placement,
            label,
        });
        Ok(())
    }

    /// Number of slides appended so far.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Paths of all images referenced by the deck, in slide order.
    pub fn image_paths(&self) -> Vec<&Path> {
        self.slides
            .iter()
            .filter_map(|s| match s {
                Slide::Image { image, .. } => Some(image.path.as_path()),
                Slide::Title { .. } => None,
            })
            .collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_basename() {
        let img = ImageFile::new("/photos/trip/beach.jpg");
        assert_eq!(img.basename, "beach.jpg");
        assert_eq!(img.extension(), "jpg");
    }

    #[test]
    fn test_title_slide_appends() {
        let mut deck = Deck::new();
        assert_eq!(deck.slide_count(), 0);
        deck.add_title_slide("Holiday", "Summer 2023");
        assert_eq!(deck.slide_count(), 1);
        match &deck.slides[0] {
            Slide::Title { title, subtitle } => {
                assert_eq!(title, "Holiday");
                assert_eq!(subtitle, "Summer 2023");
            }
            _ => panic!("expected title slide"),
        }
    }

    #[test]
    fn test_label_matches_basename() {
        let label = LabelBox::for_text("beach.jpg");
        assert_eq!(label.text, "beach.jpg");
        assert_eq!(label.rect, geometry::label_box("beach.jpg"));
    }
}
