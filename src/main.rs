use clap::{Parser, Subcommand};
use imgops::config;
use imgops::imaging::{self, CropRect, ImageBackend, ImageFormat, RustBackend};
use imgops::output::{self, OpReport};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imgops")]
#[command(about = "Crop, scale, thumbnail and rotate JPEG, GIF and PNG files")]
#[command(long_about = "\
Crop, scale, thumbnail and rotate JPEG, GIF and PNG files

The output format follows the destination's extension (.jpg, .jpeg, .gif,
.png). Destination directories are created as needed and an existing
destination file is replaced. Passing the same path as source and
destination edits the image in place.

Run 'imgops gen-config' to generate a documented imgops.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = defaults)
    #[arg(long, default_value = "imgops.toml", global = true)]
    config: PathBuf,

    /// Log each step (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize to exact dimensions (may distort)
    Scale {
        src: PathBuf,
        dst: PathBuf,
        width: u32,
        height: u32,
    },
    /// Resize to a height, keeping the aspect ratio
    #[command(name = "scale2h")]
    ScaleToHeight {
        src: PathBuf,
        dst: PathBuf,
        height: u32,
    },
    /// Resize to a width, keeping the aspect ratio
    #[command(name = "scale2w")]
    ScaleToWidth {
        src: PathBuf,
        dst: PathBuf,
        width: u32,
    },
    /// Copy a rectangle of the source into a new image
    Crop {
        src: PathBuf,
        dst: PathBuf,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        /// Actual width / displayed width of the image the rectangle was picked on
        #[arg(long, default_value_t = 1.0)]
        ratio: f64,
    },
    /// Fill an exact box: scale to cover, then center crop
    Thumbnail {
        src: PathBuf,
        dst: PathBuf,
        width: u32,
        height: u32,
    },
    /// Rotate an image in place (clockwise unless told otherwise)
    Rotate {
        src: PathBuf,
        #[arg(allow_hyphen_values = true)]
        degrees: f32,
        #[arg(long)]
        counter_clockwise: bool,
    },
    /// Print an image's format and dimensions
    Identify { path: PathBuf },
    /// Print a stock imgops.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // gen-config must work even when the current config file is broken
    let backend = match cli.command {
        Command::GenConfig => RustBackend::default(),
        _ => RustBackend::from_config(&config::load_config(&cli.config)?),
    };

    match &cli.command {
        Command::Scale {
            src,
            dst,
            width,
            height,
        } => {
            let written = imaging::scale(&backend, src, dst, *width, *height)?;
            report(&backend, "scale", src, &written);
        }
        Command::ScaleToHeight { src, dst, height } => {
            let written = imaging::scale_to_height(&backend, src, dst, *height)?;
            report(&backend, "scale2h", src, &written);
        }
        Command::ScaleToWidth { src, dst, width } => {
            let written = imaging::scale_to_width(&backend, src, dst, *width)?;
            report(&backend, "scale2w", src, &written);
        }
        Command::Crop {
            src,
            dst,
            x,
            y,
            width,
            height,
            ratio,
        } => {
            let rect = CropRect::new(*x, *y, *width, *height);
            let written = imaging::crop(&backend, src, dst, rect, *ratio)?;
            report(&backend, "crop", src, &written);
        }
        Command::Thumbnail {
            src,
            dst,
            width,
            height,
        } => {
            let written = imaging::thumbnail(&backend, src, dst, *width, *height)?;
            report(&backend, "thumbnail", src, &written);
        }
        Command::Rotate {
            src,
            degrees,
            counter_clockwise,
        } => {
            let written = imaging::rotate(&backend, src, *degrees, !counter_clockwise)?;
            report(&backend, "rotate", src, &written);
        }
        Command::Identify { path } => {
            let size = imaging::get_dimensions(&backend, path)?;
            let format = ImageFormat::resolve(path)?;
            output::print_identify(path, format, size);
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Install the global fmt subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(backend: &impl ImageBackend, operation: &str, src: &Path, written: &Path) {
    let size = backend.identify(written).ok().map(Into::into);
    output::print_report(&OpReport {
        operation,
        source: src,
        output: written,
        size,
    });
}
