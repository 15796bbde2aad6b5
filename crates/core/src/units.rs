//! Document length units.
//!
//! OOXML measures everything in English Metric Units (EMU). The slide
//! geometry math works in pixels at 96 dpi, so this module carries the
//! EMU/inch/point/pixel conversions used by the rest of the workspace.

use serde::{Deserialize, Serialize};

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMU per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// Reference display density used for pixel math.
pub const PIXELS_PER_INCH: f64 = 96.0;

/// Typographic points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert a length in points to pixels at 96 dpi.
pub fn points_to_pixels(points: f64) -> f64 {
    points * PIXELS_PER_INCH / POINTS_PER_INCH
}

/// A length in English Metric Units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Emu(pub i64);

impl Emu {
    /// Create a length from inches.
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * EMU_PER_INCH as f64) as i64)
    }

    /// Create a length from typographic points.
    pub fn from_points(points: f64) -> Self {
        Self((points * EMU_PER_POINT as f64) as i64)
    }

    /// Create a length from pixels at 96 dpi.
    pub fn from_pixels(pixels: f64) -> Self {
        Self::from_inches(pixels / PIXELS_PER_INCH)
    }

    /// This length in inches.
    pub fn inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }

    /// This length in typographic points.
    pub fn points(self) -> f64 {
        self.0 as f64 / EMU_PER_POINT as f64
    }

    /// This length in pixels at 96 dpi.
    pub fn pixels(self) -> f64 {
        points_to_pixels(self.points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_round_trip() {
        assert_eq!(Emu::from_inches(1.0), Emu(914_400));
        assert_eq!(Emu::from_inches(0.5), Emu(457_200));
        assert_eq!(Emu(914_400).inches(), 1.0);
    }

    #[test]
    fn test_points() {
        assert_eq!(Emu::from_points(72.0), Emu::from_inches(1.0));
        assert_eq!(Emu::from_inches(10.0).points(), 720.0);
    }

    #[test]
    fn test_pixel_bridge() {
        // 10in slide width: 720pt, 960px at 96dpi.
        assert_eq!(points_to_pixels(720.0), 960.0);
        assert_eq!(Emu::from_inches(10.0).pixels(), 960.0);
        assert_eq!(Emu::from_pixels(960.0), Emu::from_inches(10.0));
    }
}
