//! # imgops
//!
//! Crop, scale, thumbnail and rotate JPEG, GIF and PNG files on local disk.
//! Every operation reads a source file, applies one geometric transform, and
//! writes the result, optionally back onto the source.
//!
//! ```no_run
//! use imgops::imaging::{self, CropRect, RustBackend};
//! use std::path::Path;
//!
//! let backend = RustBackend::default();
//!
//! // 100x100 cover-cropped thumbnail, whatever the source aspect ratio
//! imaging::thumbnail(&backend, Path::new("photo.jpg"), Path::new("thumbs/photo.jpg"), 100, 100)?;
//!
//! // Crop selected on a half-size preview, applied to the full image in place
//! let rect = CropRect::new(10, 10, 50, 50);
//! imaging::crop(&backend, Path::new("photo.png"), Path::new("photo.png"), rect, 2.0)?;
//!
//! // Quarter turn clockwise
//! imaging::rotate(&backend, Path::new("photo.jpg"), 90.0, true)?;
//! # Ok::<(), imaging::ImagingError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Operations, geometry, format dispatch and the `image`-crate backend |
//! | [`config`] | Optional `imgops.toml`: resample filter, JPEG quality, PNG compression |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Format By Extension
//!
//! The lowercase file extension alone picks the codec (`jpg`, `jpeg`, `gif`,
//! `png`). Contents are never sniffed, so a mislabelled file fails to decode
//! instead of being silently accepted.
//!
//! ## Cover-Crop Thumbnails
//!
//! Thumbnails always fill the requested box exactly. The source is scaled
//! until the box is covered, then the overflowing axis is center-cropped.
//! There is no letterbox mode.
//!
//! ## Atomic Writes
//!
//! Encoded output goes to a temporary file beside the destination and is
//! renamed into place. In-place edits (crop onto the source, rotate) either
//! fully succeed or leave the original untouched.

pub mod config;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
