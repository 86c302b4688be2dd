//! imgconv: convert an image between BMP, PPM and JPEG.
//!
//! The input format comes from its extension, or its magic bytes when the
//! extension is unknown. The output format comes from its extension unless
//! `--format` overrides it; an output path without an extension then gets
//! the format's canonical one.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use imglib::ImageFormat;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input image (.bmp, .ppm, .jpg/.jpeg).
    input: PathBuf,

    /// Output image.
    output: PathBuf,

    /// Output format; defaults to the output file's extension.
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// JPEG quality (1-100).
    #[arg(short, long, default_value_t = imglib::jpeg::DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Bmp,
    Ppm,
    Jpeg,
}

impl FormatArg {
    fn to_image_format(self) -> ImageFormat {
        match self {
            FormatArg::Bmp => ImageFormat::Bmp,
            FormatArg::Ppm => ImageFormat::Ppm,
            FormatArg::Jpeg => ImageFormat::Jpeg,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();

    let out_format = match args.format {
        Some(f) => f.to_image_format(),
        None => ImageFormat::from_path(&args.output).with_context(|| {
            format!("unknown format of output file {}", args.output.display())
        })?,
    };

    if args.output.extension().is_none() {
        args.output.set_extension(out_format.extension());
    }

    let image = imglib::load(&args.input);
    if image.is_empty() {
        bail!("loading {} failed", args.input.display());
    }

    let saved = match out_format {
        ImageFormat::Jpeg => imglib::jpeg::save_with_quality(&args.output, &image, args.quality),
        other => imglib::save_as(&args.output, &image, other),
    };
    if !saved {
        bail!("saving {} failed", args.output.display());
    }

    eprintln!(
        "{} -> {} ({}x{})",
        args.input.display(),
        args.output.display(),
        image.width(),
        image.height()
    );
    Ok(())
}
