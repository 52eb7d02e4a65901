//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, GIF, PNG) | `image::ImageReader` with the format pinned from the extension |
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Resize | `DynamicImage::resize_exact` with the configured filter |
//! | Crop | `imageops::crop_imm` + `imageops::replace` onto a fresh RGBA canvas |
//! | Rotate (quarter turns) | `DynamicImage::rotate90` / `rotate180` / `rotate270` |
//! | Rotate (other angles) | `imageproc::geometric_transformations::warp_into` |
//! | Encode | `JpegEncoder` (RGB8), `PngEncoder` (RGBA8), `GifEncoder` (RGBA frame) |
//!
//! Output is written to a temporary file next to the destination and renamed
//! into place, so a failed encode never leaves a truncated image behind and
//! in-place edits are atomic.

use super::backend::{Dimensions, ImageBackend, ImagingError};
use super::calculations::{canvas_fits, quarter_turns, rotated_bounds};
use super::format::ImageFormat;
use super::params::{CropParams, Quality, ResizeParams, RotateParams};
use crate::config::{ImagingConfig, PngCompression, ResampleFilter, RotateInterpolation};
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{self, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageReader, RgbaImage};
use image::{Frame, imageops};
use imageproc::geometric_transformations::{Projection, warp_into};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone)]
pub struct RustBackend {
    filter: ResampleFilter,
    jpeg_quality: Quality,
    png_compression: PngCompression,
    interpolation: RotateInterpolation,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::from_config(&ImagingConfig::default())
    }

    pub fn from_config(config: &ImagingConfig) -> Self {
        Self {
            filter: config.resize.filter,
            jpeg_quality: Quality::new(config.jpeg.quality),
            png_compression: config.png.compression,
            interpolation: config.rotate.interpolation,
        }
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, ImagingError> {
    let format = ImageFormat::resolve(path)?;
    let mut reader = ImageReader::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ImagingError::FileNotFound(path.to_path_buf()),
        _ => ImagingError::io(path, e),
    })?;
    reader.set_format(format.codec());
    Ok(reader)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, ImagingError> {
    open_reader(path)?
        .decode()
        .map_err(|e| codec_error(path, e))
}

/// Refuse canvases that would exhaust memory before anything is allocated.
fn check_canvas(width: u32, height: u32) -> Result<(), ImagingError> {
    if width == 0 || height == 0 || !canvas_fits(width, height) {
        return Err(ImagingError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn codec_error(path: &Path, err: ImageError) -> ImagingError {
    match err {
        ImageError::IoError(e) => ImagingError::io(path, e),
        other => ImagingError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

fn encode_error(path: &Path, err: ImageError) -> ImagingError {
    match err {
        ImageError::IoError(e) => ImagingError::io(path, e),
        other => ImagingError::io(path, std::io::Error::other(other)),
    }
}

/// New files get 0644; replaced files keep their mode.
#[cfg(unix)]
fn match_permissions(tmp: &File, path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = match std::fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(_) => std::fs::Permissions::from_mode(0o644),
    };
    tmp.set_permissions(perms)
}

#[cfg(not(unix))]
fn match_permissions(_tmp: &File, _path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl RustBackend {
    /// Encode `img` in the format named by `path` and atomically replace it.
    fn save_image(&self, img: &DynamicImage, path: &Path) -> Result<(), ImagingError> {
        let format = ImageFormat::resolve(path)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".imgops-")
            .tempfile_in(dir)
            .map_err(|e| ImagingError::io(path, e))?;

        let mut writer = BufWriter::new(tmp.as_file_mut());
        self.encode(img, format, &mut writer)
            .map_err(|e| encode_error(path, e))?;
        writer.flush().map_err(|e| ImagingError::io(path, e))?;
        drop(writer);

        match_permissions(tmp.as_file(), path).map_err(|e| ImagingError::io(path, e))?;
        tmp.persist(path)
            .map_err(|e| ImagingError::io(path, e.error))?;
        Ok(())
    }

    fn encode<W: Write>(
        &self,
        img: &DynamicImage,
        format: ImageFormat,
        writer: W,
    ) -> Result<(), ImageError> {
        match format {
            ImageFormat::Jpeg => {
                let rgb = img.to_rgb8();
                JpegEncoder::new_with_quality(writer, self.jpeg_quality.value()).write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    ExtendedColorType::Rgb8,
                )
            }
            ImageFormat::Png => {
                // Always RGBA so transparency survives every operation
                let rgba = img.to_rgba8();
                PngEncoder::new_with_quality(
                    writer,
                    self.png_compression.compression_type(),
                    png::FilterType::Adaptive,
                )
                .write_image(
                    rgba.as_raw(),
                    rgba.width(),
                    rgba.height(),
                    ExtendedColorType::Rgba8,
                )
            }
            ImageFormat::Gif => {
                let mut encoder = GifEncoder::new(writer);
                encoder.encode_frame(Frame::new(img.to_rgba8()))
            }
        }
    }

    /// Rotate clockwise about the center onto a canvas sized to the rotated bounds.
    fn rotate_free(
        &self,
        img: &DynamicImage,
        params: &RotateParams,
    ) -> Result<DynamicImage, ImagingError> {
        let (out_w, out_h) = rotated_bounds(img.width(), img.height(), params.degrees);
        check_canvas(out_w, out_h)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let fill = params.background.rgba();

        let projection = Projection::translate(-(width as f32) / 2.0, -(height as f32) / 2.0)
            .and_then(Projection::rotate(params.degrees.to_radians()))
            .and_then(Projection::translate(out_w as f32 / 2.0, out_h as f32 / 2.0));

        let mut out = RgbaImage::from_pixel(out_w, out_h, fill);
        warp_into(
            &rgba,
            &projection,
            self.interpolation.interpolation(),
            fill,
            &mut out,
        );
        Ok(DynamicImage::ImageRgba8(out))
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, ImagingError> {
        let (width, height) = open_reader(path)?
            .into_dimensions()
            .map_err(|e| codec_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), ImagingError> {
        check_canvas(params.width, params.height)?;
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, self.filter.filter_type());
        self.save_image(&resized, &params.output)
    }

    fn crop(&self, params: &CropParams) -> Result<(), ImagingError> {
        let rect = params.rect;
        check_canvas(rect.width, rect.height)?;
        let img = load_image(&params.source)?;

        // Out-of-bounds parts of the rect stay transparent (black once flattened to JPEG)
        let mut canvas = RgbaImage::new(rect.width, rect.height);
        let region = imageops::crop_imm(&img, rect.x, rect.y, rect.width, rect.height).to_image();
        imageops::replace(&mut canvas, &region, 0, 0);

        self.save_image(&DynamicImage::ImageRgba8(canvas), &params.output)
    }

    fn rotate(&self, params: &RotateParams) -> Result<(), ImagingError> {
        if !params.degrees.is_finite() {
            return Err(ImagingError::InvalidAngle(params.degrees));
        }
        let img = load_image(&params.path)?;
        let rotated = match quarter_turns(params.degrees) {
            Some(0) => img,
            Some(1) => img.rotate90(),
            Some(2) => img.rotate180(),
            Some(3) => img.rotate270(),
            _ => self.rotate_free(&img, params)?,
        };
        self.save_image(&rotated, &params.path)
    }
}
