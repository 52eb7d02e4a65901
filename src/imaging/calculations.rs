//! Pure calculation functions for image geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// A rectangle of pixels, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Map a rectangle from preview coordinates back to true pixels.
    ///
    /// `ratio` is actual width / displayed width. Each component is scaled
    /// independently and truncated toward zero.
    ///
    /// # Examples
    /// ```
    /// # use imgops::imaging::CropRect;
    /// // Selection made on a half-size preview
    /// let rect = CropRect::new(10, 10, 50, 50).scaled(2.0);
    /// assert_eq!(rect, CropRect::new(20, 20, 100, 100));
    /// ```
    pub fn scaled(self, ratio: f64) -> Self {
        let scale = |v: u32| (ratio * v as f64) as u32;
        Self {
            x: scale(self.x),
            y: scale(self.y),
            width: scale(self.width),
            height: scale(self.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Largest canvas any operation allocates: 2^28 pixels, 1 GiB as RGBA8.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Whether a `width` x `height` RGBA canvas is within [`MAX_CANVAS_PIXELS`].
pub fn canvas_fits(width: u32, height: u32) -> bool {
    width as u64 * height as u64 <= MAX_CANVAS_PIXELS
}

fn floor_ratio(a: u32, b: u32, c: u32) -> u32 {
    // a * b / c in u64 so large images cannot overflow the product
    (a as u64 * b as u64 / c as u64).min(u32::MAX as u64) as u32
}

/// Dimensions after scaling to `new_height` with the aspect ratio kept.
///
/// Width is `floor(new_height * width / height)`.
pub fn scale_to_height_dimensions(source: (u32, u32), new_height: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    (floor_ratio(new_height, src_w, src_h), new_height)
}

/// Dimensions after scaling to `new_width` with the aspect ratio kept.
///
/// Height is `floor(new_width * height / width)`.
pub fn scale_to_width_dimensions(source: (u32, u32), new_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    (new_width, floor_ratio(new_width, src_h, src_w))
}

/// How a thumbnail is produced from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailPlan {
    /// Aspect ratios match: a single exact resize.
    Scale { width: u32, height: u32 },
    /// Source is wider: match the height, then trim both sides.
    ScaleToHeight { scaled: (u32, u32), crop: CropRect },
    /// Source is taller: match the width, then trim top and bottom.
    ScaleToWidth { scaled: (u32, u32), crop: CropRect },
}

/// Work out the cover-crop steps for a `target` thumbnail of `source`.
///
/// Ratios are compared by cross-multiplication, so "equal" means exactly
/// equal. The crop is centered with an offset of
/// `floor(|scaled - target| / 2)` on the overflowing axis.
///
/// # Examples
/// ```
/// # use imgops::imaging::{CropRect, ThumbnailPlan, plan_thumbnail};
/// // 300x100 source, 100x100 thumb: scale to height, crop the sides
/// assert_eq!(
///     plan_thumbnail((300, 100), (100, 100)),
///     ThumbnailPlan::ScaleToHeight {
///         scaled: (300, 100),
///         crop: CropRect::new(100, 0, 100, 100),
///     }
/// );
/// ```
pub fn plan_thumbnail(source: (u32, u32), target: (u32, u32)) -> ThumbnailPlan {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let thumb_side = tgt_w as u64 * src_h as u64;
    let orig_side = src_w as u64 * tgt_h as u64;

    if thumb_side < orig_side {
        let scaled = scale_to_height_dimensions(source, tgt_h);
        let x = scaled.0.abs_diff(tgt_w) / 2;
        ThumbnailPlan::ScaleToHeight {
            scaled,
            crop: CropRect::new(x, 0, tgt_w, tgt_h),
        }
    } else if thumb_side > orig_side {
        let scaled = scale_to_width_dimensions(source, tgt_w);
        let y = scaled.1.abs_diff(tgt_h) / 2;
        ThumbnailPlan::ScaleToWidth {
            scaled,
            crop: CropRect::new(0, y, tgt_w, tgt_h),
        }
    } else {
        ThumbnailPlan::Scale {
            width: tgt_w,
            height: tgt_h,
        }
    }
}

/// Number of clockwise quarter turns if `degrees` is a multiple of 90.
pub fn quarter_turns(degrees: f32) -> Option<u8> {
    let normalized = degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < 1e-3 {
        Some((turns as u32 % 4) as u8)
    } else {
        None
    }
}

/// Canvas size that holds a `width` x `height` image rotated by `degrees`.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    if let Some(turns) = quarter_turns(degrees) {
        return if turns % 2 == 1 {
            (height, width)
        } else {
            (width, height)
        };
    }

    let theta = (degrees as f64).to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (width as f64, height as f64);
    // Shave float noise so an exact fit does not grow by a pixel
    let fit = |v: f64| ((v - 1e-6).ceil().max(1.0)) as u32;
    (fit(w * cos + h * sin), fit(w * sin + h * cos))
}
