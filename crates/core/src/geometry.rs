//! Slide placement geometry.
//!
//! Pure calculations only: fitting a picture onto a slide while preserving
//! its aspect ratio, and sizing the filename label box. No I/O here.

use serde::{Deserialize, Serialize};

use crate::units::{points_to_pixels, Emu};

/// Slide dimensions of the output deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: Emu,
    pub height: Emu,
}

impl SlideSize {
    /// The 10in x 7.5in (4:3) deck geometry.
    pub fn new() -> Self {
        Self {
            width: Emu::from_inches(10.0),
            height: Emu::from_inches(7.5),
        }
    }

    /// Slide width in pixels at 96 dpi.
    pub fn width_px(&self) -> f64 {
        points_to_pixels(self.width.points())
    }

    /// Slide height in pixels at 96 dpi.
    pub fn height_px(&self) -> f64 {
        points_to_pixels(self.height.points())
    }
}

impl Default for SlideSize {
    fn default() -> Self {
        Self::new()
    }
}

/// Position and extent of a shape on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRect {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

/// Horizontal and vertical label inset from the slide origin.
pub const LABEL_OFFSET_INCHES: f64 = 0.5;

/// Approximate advance width of one character of the label font.
pub const LABEL_CHAR_WIDTH_INCHES: f64 = 0.13;

/// Label box height.
pub const LABEL_HEIGHT_INCHES: f64 = 0.35;

/// Em height of the label font.
pub const LABEL_FONT_SIZE_INCHES: f64 = 0.2;

/// Typeface used for filename labels.
pub const LABEL_FONT_NAME: &str = "Courier New";

/// Compute the centered, aspect-ratio-preserving placement of an image.
///
/// Landscape images (aspect ratio > 1) are fit to the slide width; portrait
/// and square images are fit to the slide height. The fitted dimension fills
/// the slide exactly, the derived one is truncated to a whole pixel before
/// conversion back to EMU.
pub fn fit_image(width_px: u32, height_px: u32, slide: SlideSize) -> PlacementRect {
    let aspect_ratio = width_px as f64 / height_px as f64;

    let slide_width_px = slide.width_px();
    let slide_height_px = slide.height_px();

    let (out_width_px, out_height_px) = if aspect_ratio > 1.0 {
        (slide_width_px, (slide_width_px / aspect_ratio).floor())
    } else {
        ((slide_height_px * aspect_ratio).floor(), slide_height_px)
    };

    let width = Emu::from_pixels(out_width_px);
    let height = Emu::from_pixels(out_height_px);

    PlacementRect {
        left: Emu((slide.width.0 - width.0) / 2),
        top: Emu((slide.height.0 - height.0) / 2),
        width,
        height,
    }
}

/// Compute the filename label box for an image slide.
///
/// The box sits at a fixed inset from the slide origin and is widened per
/// character of the label text. This is a heuristic autofit for a
/// fixed-width font, not exact text measurement.
pub fn label_box(text: &str) -> PlacementRect {
    let char_count = text.chars().count();
    PlacementRect {
        left: Emu::from_inches(LABEL_OFFSET_INCHES),
        top: Emu::from_inches(LABEL_OFFSET_INCHES),
        width: Emu::from_inches(char_count as f64 * LABEL_CHAR_WIDTH_INCHES),
        height: Emu::from_inches(LABEL_HEIGHT_INCHES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_fits_width() {
        // 1600x900 on a 960x720px slide: width-fit to 960px, 540px tall.
        let rect = fit_image(1600, 900, SlideSize::new());
        assert_eq!(rect.width, Emu::from_pixels(960.0));
        assert_eq!(rect.height, Emu::from_pixels(540.0));
        assert_eq!(rect.left, Emu(0));
        assert_eq!(rect.top, Emu((6_858_000 - 5_143_500) / 2));
    }

    #[test]
    fn test_portrait_fits_height() {
        let slide = SlideSize::new();
        let rect = fit_image(900, 1600, slide);
        assert_eq!(rect.height, Emu::from_pixels(720.0));
        assert!(rect.width.0 <= slide.width.0);
        assert_eq!(rect.width, Emu::from_pixels((720.0f64 * 900.0 / 1600.0).floor()));
    }

    #[test]
    fn test_square_takes_height_fit_branch() {
        // Ratio exactly 1 is height-fit, filling the slide height on both axes.
        let slide = SlideSize::new();
        let rect = fit_image(500, 500, slide);
        assert_eq!(rect.width, Emu::from_pixels(720.0));
        assert_eq!(rect.height, Emu::from_pixels(720.0));
        assert_eq!(rect.top, Emu(0));
        assert_eq!(rect.left, Emu((slide.width.0 - slide.height.0) / 2));
    }

    #[test]
    fn test_centering_invariants() {
        let slide = SlideSize::new();
        let sizes = [
            (1, 1),
            (1, 10_000),
            (10_000, 1),
            (1600, 900),
            (900, 1600),
            (4032, 3024),
            (3024, 4032),
            (640, 641),
        ];
        for (w, h) in sizes {
            let rect = fit_image(w, h, slide);
            assert!(rect.left.0 >= 0, "{}x{}: left {}", w, h, rect.left.0);
            assert!(rect.top.0 >= 0, "{}x{}: top {}", w, h, rect.top.0);
            assert!(
                rect.left.0 + rect.width.0 <= slide.width.0,
                "{}x{}: overflows slide width",
                w,
                h
            );
            assert!(
                rect.top.0 + rect.height.0 <= slide.height.0,
                "{}x{}: overflows slide height",
                w,
                h
            );
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let slide = SlideSize::new();
        assert_eq!(fit_image(1234, 567, slide), fit_image(1234, 567, slide));
    }

    #[test]
    fn test_label_box_scales_with_text() {
        let short = label_box("a.jpg");
        let long = label_box("a-much-longer-filename.jpg");
        assert_eq!(short.left, Emu::from_inches(0.5));
        assert_eq!(short.top, Emu::from_inches(0.5));
        assert_eq!(short.height, long.height);
        assert_eq!(short.width, Emu::from_inches(5.0 * 0.13));
        assert!(long.width > short.width);
    }
}
