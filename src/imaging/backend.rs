//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four pixel operations every backend
//! must support: identify, resize, crop and rotate. Each call decodes its input
//! by file extension, transforms it, and encodes to the output's extension.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust and built on the
//! `image` and `imageproc` crates.

use super::params::{CropParams, ResizeParams, RotateParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("Unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid crop ratio: {0}")]
    InvalidRatio(f64),
    #[error("Invalid rotation angle: {0}")]
    InvalidAngle(f32),
}

impl ImagingError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<Dimensions> for (u32, u32) {
    fn from(dims: Dimensions) -> Self {
        (dims.width, dims.height)
    }
}

/// Trait for image processing backends.
///
/// Path validation and geometry live in
/// [`operations`](super::operations); a backend only moves pixels, so the
/// same operation logic runs against a mock in tests.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, ImagingError>;

    /// Resize to exactly `width` x `height`, ignoring aspect ratio.
    fn resize(&self, params: &ResizeParams) -> Result<(), ImagingError>;

    /// Copy a rectangle of the source onto a fresh canvas of the same size.
    fn crop(&self, params: &CropParams) -> Result<(), ImagingError>;

    /// Rotate a file in place.
    fn rotate(&self, params: &RotateParams) -> Result<(), ImagingError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::calculations::CropRect;
    use crate::imaging::params::Background;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    /// Uses Mutex (not RefCell) so it satisfies the `Sync` bound.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
        },
        Crop {
            source: String,
            output: String,
            rect: CropRect,
        },
        Rotate {
            path: String,
            degrees: f32,
            background: Background,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, ImagingError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ImagingError::Decode {
                    path: path.to_path_buf(),
                    message: "No mock dimensions".to_string(),
                })
        }

        fn resize(&self, params: &ResizeParams) -> Result<(), ImagingError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
            });
            Ok(())
        }

        fn crop(&self, params: &CropParams) -> Result<(), ImagingError> {
            self.operations.lock().unwrap().push(RecordedOp::Crop {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                rect: params.rect,
            });
            Ok(())
        }

        fn rotate(&self, params: &RotateParams) -> Result<(), ImagingError> {
            self.operations.lock().unwrap().push(RecordedOp::Rotate {
                path: params.path.to_string_lossy().to_string(),
                degrees: params.degrees,
                background: params.background,
            });
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_without_results_errors() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.identify(Path::new("/test/image.jpg")),
            Err(ImagingError::Decode { .. })
        ));
    }

    #[test]
    fn mock_records_crop() {
        let backend = MockBackend::new();

        backend
            .crop(&CropParams {
                source: "/in.png".into(),
                output: "/in.png".into(),
                rect: CropRect::new(1, 2, 3, 4),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(
            ops,
            vec![RecordedOp::Crop {
                source: "/in.png".into(),
                output: "/in.png".into(),
                rect: CropRect::new(1, 2, 3, 4),
            }]
        );
    }

    #[test]
    fn error_messages_name_the_path() {
        let err = ImagingError::FileNotFound(PathBuf::from("/missing.jpg"));
        assert_eq!(err.to_string(), "File not found: /missing.jpg");

        let err = ImagingError::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid dimensions: 0x10");
    }
}
