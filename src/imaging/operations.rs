//! High-level image operations.
//!
//! These functions validate paths, work out geometry with
//! [`calculations`](super::calculations), and hand the pixel work to an
//! [`ImageBackend`]. Every operation returns the path it wrote.
//!
//! ## Destination preparation
//!
//! [`scale`], [`scale_to_height`], [`scale_to_width`] and [`thumbnail`] run
//! [`prepare_destination`] first. Nothing on disk changes until both the
//! destination extension and the source file check out.

use super::backend::{ImageBackend, ImagingError};
use super::calculations::{
    CropRect, ThumbnailPlan, canvas_fits, plan_thumbnail, scale_to_height_dimensions,
    scale_to_width_dimensions,
};
use super::format::ImageFormat;
use super::params::{Background, CropParams, ResizeParams, RotateParams};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let (src, _) = check_source(path)?;
    let dims = backend.identify(src)?;
    Ok(dims.into())
}

fn check_source(src: &Path) -> Result<(&Path, ImageFormat)> {
    if !src.is_file() {
        return Err(ImagingError::FileNotFound(src.to_path_buf()));
    }
    Ok((src, ImageFormat::resolve(src)?))
}

/// Output must be non-empty and small enough to allocate.
fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || !canvas_fits(width, height) {
        return Err(ImagingError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn ensure_parent_dir(dst: &Path) -> Result<()> {
    let Some(parent) = dst.parent() else {
        return Ok(());
    };
    if !parent.as_os_str().is_empty() && !parent.exists() {
        debug!(dir = %parent.display(), "creating destination directory");
        std::fs::create_dir_all(parent).map_err(|e| ImagingError::io(parent, e))?;
    }
    Ok(())
}

/// Make `dst` ready to receive an image derived from `src`.
///
/// 1. `dst` must have a supported extension.
/// 2. `src` must exist with a supported extension.
/// 3. An existing file at `dst` is deleted, unless it is `src` itself.
/// 4. Missing parent directories of `dst` are created.
///
/// Steps 1 and 2 fail without touching the filesystem.
pub fn prepare_destination(src: &Path, dst: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::resolve(dst)?;
    check_source(src)?;

    if dst.exists() && !same_file(src, dst) {
        debug!(dst = %dst.display(), "removing existing destination");
        std::fs::remove_file(dst).map_err(|e| ImagingError::io(dst, e))?;
    }
    ensure_parent_dir(dst)?;
    Ok(format)
}

/// Resize to exactly `new_width` x `new_height`. May distort the aspect ratio.
pub fn scale(
    backend: &impl ImageBackend,
    src: &Path,
    dst: &Path,
    new_width: u32,
    new_height: u32,
) -> Result<PathBuf> {
    check_dimensions(new_width, new_height)?;
    prepare_destination(src, dst)?;
    resize(backend, src, dst, (new_width, new_height))
}

/// Resize to `new_height`, deriving the width from the source aspect ratio.
pub fn scale_to_height(
    backend: &impl ImageBackend,
    src: &Path,
    dst: &Path,
    new_height: u32,
) -> Result<PathBuf> {
    check_dimensions(1, new_height)?;
    prepare_destination(src, dst)?;
    let original = backend.identify(src)?;
    let target = scale_to_height_dimensions(original.into(), new_height);
    resize(backend, src, dst, target)
}

/// Resize to `new_width`, deriving the height from the source aspect ratio.
pub fn scale_to_width(
    backend: &impl ImageBackend,
    src: &Path,
    dst: &Path,
    new_width: u32,
) -> Result<PathBuf> {
    check_dimensions(new_width, 1)?;
    prepare_destination(src, dst)?;
    let original = backend.identify(src)?;
    let target = scale_to_width_dimensions(original.into(), new_width);
    resize(backend, src, dst, target)
}

fn resize(
    backend: &impl ImageBackend,
    src: &Path,
    dst: &Path,
    (width, height): (u32, u32),
) -> Result<PathBuf> {
    check_dimensions(width, height)?;
    info!(src = %src.display(), dst = %dst.display(), width, height, "scale");
    backend.resize(&ResizeParams {
        source: src.to_path_buf(),
        output: dst.to_path_buf(),
        width,
        height,
    })?;
    Ok(dst.to_path_buf())
}

/// Crop `rect` out of `src` and write it to `dst`.
///
/// `ratio` is the source image's actual width divided by the width it was
/// displayed at when `rect` was selected; pass `1.0` for true pixel
/// coordinates. `src` and `dst` may be the same path.
pub fn crop(
    backend: &impl ImageBackend,
    src: &Path,
    dst: &Path,
    rect: CropRect,
    ratio: f64,
) -> Result<PathBuf> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ImagingError::InvalidRatio(ratio));
    }
    ImageFormat::resolve(dst)?;
    check_source(src)?;

    let scaled = rect.scaled(ratio);
    check_dimensions(scaled.width, scaled.height)?;
    ensure_parent_dir(dst)?;

    write_crop(backend, src, dst, scaled)
}

fn write_crop(
    backend: &impl ImageBackend,
    src: &Path,
    dst: &Path,
    rect: CropRect,
) -> Result<PathBuf> {
    info!(
        src = %src.display(),
        dst = %dst.display(),
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        "crop"
    );
    backend.crop(&CropParams {
        source: src.to_path_buf(),
        output: dst.to_path_buf(),
        rect,
    })?;
    Ok(dst.to_path_buf())
}

/// Create a `width` x `height` thumbnail that fully covers the frame.
///
/// When the aspect ratios differ the source is scaled so the frame is
/// covered, then center-cropped in place at `dst`:
///
/// ```text
///   300x100 source → 100x100 thumb
///   +---------------------+
///   |      ¦       ¦      |
///   |      ¦ thumb ¦      |
///   |      ¦       ¦      |
///   +---------------------+
/// ```
pub fn thumbnail(
    backend: &impl ImageBackend,
    src: &Path,
    dst: &Path,
    width: u32,
    height: u32,
) -> Result<PathBuf> {
    check_dimensions(width, height)?;
    prepare_destination(src, dst)?;

    let original = backend.identify(src)?;
    let plan = plan_thumbnail(original.into(), (width, height));
    debug!(?original, ?plan, "thumbnail plan");

    match plan {
        ThumbnailPlan::Scale { width, height } => resize(backend, src, dst, (width, height)),
        ThumbnailPlan::ScaleToHeight { scaled, crop }
        | ThumbnailPlan::ScaleToWidth { scaled, crop } => {
            resize(backend, src, dst, scaled)?;
            // Second pass reads and rewrites the scaled image in place
            write_crop(backend, dst, dst, crop)
        }
    }
}

/// Rotate the image at `src` in place.
///
/// With `clockwise` the picture turns clockwise by `degrees`; otherwise
/// counter-clockwise. Exposed corners are transparent for PNG and GIF and
/// black for JPEG. A NaN or infinite angle is rejected before the file is
/// read.
pub fn rotate(
    backend: &impl ImageBackend,
    src: &Path,
    degrees: f32,
    clockwise: bool,
) -> Result<PathBuf> {
    if !degrees.is_finite() {
        return Err(ImagingError::InvalidAngle(degrees));
    }
    let (src, format) = check_source(src)?;
    let degrees = if clockwise { degrees } else { -degrees };
    let background = if format.keeps_alpha() {
        Background::Transparent
    } else {
        Background::Black
    };

    info!(src = %src.display(), degrees, "rotate");
    backend.rotate(&RotateParams {
        path: src.to_path_buf(),
        degrees,
        background,
    })?;
    Ok(src.to_path_buf())
}
