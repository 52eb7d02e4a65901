//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which validates paths and works out geometry) and the
//! [`backend`](super::backend) (which does the actual pixel work). This
//! separation allows swapping backends (e.g. for testing with a mock) without
//! changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 100). Clamped on construction.
//! - [`ResizeParams`]: source, output path and exact target dimensions.
//! - [`CropParams`]: source, output path and the pixel rectangle to copy.
//! - [`RotateParams`]: file to rotate in place, clockwise angle, background fill.

use super::calculations::CropRect;
use std::path::PathBuf;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// Fill used for canvas area not covered by source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Fully transparent (alpha 0).
    Transparent,
    /// Opaque black.
    Black,
}

impl Background {
    pub fn rgba(self) -> image::Rgba<u8> {
        match self {
            Self::Transparent => image::Rgba([255, 255, 255, 0]),
            Self::Black => image::Rgba([0, 0, 0, 255]),
        }
    }
}

/// Parameters for an exact (aspect-ignoring) resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Parameters for copying a rectangle of source pixels onto a new canvas.
///
/// The canvas is exactly `rect.width` x `rect.height`; parts of the rectangle
/// that fall outside the source keep the canvas background.
#[derive(Debug, Clone, PartialEq)]
pub struct CropParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub rect: CropRect,
}

/// Parameters for an in-place rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateParams {
    pub path: PathBuf,
    /// Clockwise angle in degrees. Negative turns counter-clockwise.
    pub degrees: f32,
    pub background: Background,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(75).value(), 75);
        assert_eq!(Quality::new(250).value(), 100);
    }

    #[test]
    fn quality_default_is_maximum() {
        assert_eq!(Quality::default().value(), 100);
    }

    #[test]
    fn background_pixels() {
        assert_eq!(Background::Transparent.rgba().0[3], 0);
        assert_eq!(Background::Black.rgba(), image::Rgba([0, 0, 0, 255]));
    }
}
