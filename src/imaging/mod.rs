//! Image processing in pure Rust, with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Scale** | `resize_exact` (configurable filter) |
//! | **Crop** | `imageops::crop_imm` + `imageops::replace` |
//! | **Thumbnail** | scale to cover, then center crop in place |
//! | **Rotate** | quarter turns, or `imageproc` warp for other angles |
//!
//! The module is split into:
//! - **Format**: Extension → [`ImageFormat`] dispatch
//! - **Calculations**: Pure functions for geometry (unit testable)
//! - **Parameters**: Data structures describing backend operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod format;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{Dimensions, ImageBackend, ImagingError};
pub use calculations::{
    CropRect, ThumbnailPlan, plan_thumbnail, rotated_bounds, scale_to_height_dimensions,
    scale_to_width_dimensions,
};
pub use format::{ImageFormat, supported_extensions};
pub use operations::{
    crop, get_dimensions, prepare_destination, rotate, scale, scale_to_height, scale_to_width,
    thumbnail,
};
pub use params::{Background, CropParams, Quality, ResizeParams, RotateParams};
pub use rust_backend::RustBackend;
