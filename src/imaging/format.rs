//! File-extension based format dispatch.
//!
//! The format of every file is decided by its lowercase extension alone; the
//! file's contents are never sniffed. Anything outside the table below is
//! rejected with [`ImagingError::UnsupportedFormat`] before a single byte is
//! read or written.
//!
//! | Extension | Format | Keeps alpha |
//! |---|---|---|
//! | `jpg`, `jpeg` | [`ImageFormat::Jpeg`] | no |
//! | `gif` | [`ImageFormat::Gif`] | yes (1-bit) |
//! | `png` | [`ImageFormat::Png`] | yes |

use super::backend::ImagingError;
use std::path::Path;

const EXTENSIONS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("gif", ImageFormat::Gif),
    ("png", ImageFormat::Png),
];

/// Returns the file extensions every operation accepts.
pub fn supported_extensions() -> Vec<&'static str> {
    EXTENSIONS.iter().map(|(ext, _)| *ext).collect()
}

/// Raster formats the crate reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Gif,
    Png,
}

impl ImageFormat {
    /// Look up the format for a path, or `None` if the extension is unknown.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, format)| *format)
    }

    /// Like [`from_path`](Self::from_path) but fails with `UnsupportedFormat`.
    pub fn resolve(path: &Path) -> Result<Self, ImagingError> {
        Self::from_path(path).ok_or_else(|| ImagingError::UnsupportedFormat(path.to_path_buf()))
    }

    /// The codec identifier used to pin the `image` decoder.
    pub fn codec(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Gif => image::ImageFormat::Gif,
            Self::Png => image::ImageFormat::Png,
        }
    }

    /// Whether exposed background should be transparent rather than black.
    pub fn keeps_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_extensions_case_insensitively() {
        assert_eq!(
            ImageFormat::from_path(Path::new("a/photo.JPG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("photo.jpeg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("anim.Gif")),
            Some(ImageFormat::Gif)
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("/tmp/x.png")),
            Some(ImageFormat::Png)
        );
    }

    #[test]
    fn rejects_unknown_and_missing_extensions() {
        assert_eq!(ImageFormat::from_path(Path::new("image.bmp")), None);
        assert_eq!(ImageFormat::from_path(Path::new("image.webp")), None);
        assert_eq!(ImageFormat::from_path(Path::new("noext")), None);
        assert_eq!(ImageFormat::from_path(Path::new("archive.png.bak")), None);
    }

    #[test]
    fn resolve_reports_the_offending_path() {
        let err = ImageFormat::resolve(Path::new("out/thumb.bmp")).unwrap_err();
        assert!(
            matches!(&err, ImagingError::UnsupportedFormat(p) if p == Path::new("out/thumb.bmp"))
        );
    }

    #[test]
    fn only_jpeg_drops_alpha() {
        assert!(!ImageFormat::Jpeg.keeps_alpha());
        assert!(ImageFormat::Gif.keeps_alpha());
        assert!(ImageFormat::Png.keeps_alpha());
    }

    #[test]
    fn supported_extensions_lists_all_four() {
        let exts = supported_extensions();
        for expected in &["jpg", "jpeg", "gif", "png"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
        assert_eq!(exts.len(), 4);
    }
}
