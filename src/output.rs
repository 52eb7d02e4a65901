//! CLI output formatting.
//!
//! # Output Format
//!
//! Each command prints one header line naming the operation and the files
//! involved, followed by indented detail lines:
//!
//! ```text
//! thumbnail photo.jpg → thumbs/photo.jpg
//!     Size: 100x100
//! rotate photo.png (in place)
//!     Size: 142x142
//! identify photo.jpg
//!     Format: jpeg
//!     Size: 1920x1080
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` for testability and `print_*`
//! wrappers write to stdout. Format functions are pure: no I/O, no side
//! effects.

use crate::imaging::ImageFormat;
use std::path::Path;

/// What a finished command reports.
#[derive(Debug, Clone, PartialEq)]
pub struct OpReport<'a> {
    pub operation: &'a str,
    pub source: &'a Path,
    pub output: &'a Path,
    /// Decoded size of the written file, if it could be read back.
    pub size: Option<(u32, u32)>,
}

fn size_line(size: (u32, u32)) -> String {
    format!("    Size: {}x{}", size.0, size.1)
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Gif => "gif",
        ImageFormat::Png => "png",
    }
}

/// Lines describing a transform that wrote a file.
pub fn format_report(report: &OpReport) -> Vec<String> {
    let header = if report.source == report.output {
        format!("{} {} (in place)", report.operation, report.source.display())
    } else {
        format!(
            "{} {} → {}",
            report.operation,
            report.source.display(),
            report.output.display()
        )
    };

    let mut lines = vec![header];
    if let Some(size) = report.size {
        lines.push(size_line(size));
    }
    lines
}

pub fn print_report(report: &OpReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

/// Lines describing an identified image.
pub fn format_identify(path: &Path, format: ImageFormat, size: (u32, u32)) -> Vec<String> {
    vec![
        format!("identify {}", path.display()),
        format!("    Format: {}", format_name(format)),
        size_line(size),
    ]
}

pub fn print_identify(path: &Path, format: ImageFormat, size: (u32, u32)) {
    for line in format_identify(path, format, size) {
        println!("{}", line);
    }
}
