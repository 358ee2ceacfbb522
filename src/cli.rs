//! Command-line interface definitions and helpers.
//!
//! The chat platform glue is an external collaborator, so the binary
//! exercises the engine offline: render a local file as ASCII art, or apply
//! one raster transform and write the result.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::ascii::{self, GlyphRamp, DEFAULT_OUTPUT_WIDTH};
use crate::raster::{self, MirrorAxis, DEFAULT_CELL_SIZE, STICKER_MAX_SIDE};

/// Raster transform selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Effect {
    Pixelate,
    Invert,
    MirrorHorizontal,
    MirrorVertical,
    Heatmap,
    Grayscale,
    Sticker,
}

/// Parse and validate the ASCII output width (at least 1).
fn parse_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    if width == 0 {
        return Err("Width must be at least 1".to_string());
    }
    Ok(width)
}

/// Parse and validate the pixelation cell size (at least 1).
fn parse_cell_size(s: &str) -> Result<u32, String> {
    let cell: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid cell size", s))?;
    if cell == 0 {
        return Err("Cell size must be at least 1".to_string());
    }
    Ok(cell)
}

/// Image transform engine for chat bots, runnable offline on local files
#[derive(Parser, Debug)]
#[command(name = "art-booth")]
#[command(version, about = "ASCII art and image transforms for chat photos", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an image as ASCII art on stdout
    Ascii {
        /// Input image file
        input: PathBuf,

        /// Output width in glyphs
        #[arg(long, default_value_t = DEFAULT_OUTPUT_WIDTH, value_parser = parse_width)]
        width: u32,

        /// Glyph ramp, dark to light (default: built-in ramp)
        #[arg(long)]
        charset: Option<String>,
    },
    /// Apply one transform to an image file
    Transform {
        /// Input image file
        input: PathBuf,

        /// Output image file (JPEG, or PNG for sticker)
        output: PathBuf,

        /// Transform to apply
        #[arg(long, value_enum)]
        effect: Effect,

        /// Pixelation cell size in pixels
        #[arg(long, default_value_t = DEFAULT_CELL_SIZE, value_parser = parse_cell_size)]
        cell_size: u32,
    },
}

/// Render ASCII art to stdout.
pub fn run_ascii(input: &PathBuf, width: u32, charset: Option<&str>) -> Result<(), Box<dyn Error>> {
    let bytes = std::fs::read(input)?;
    let ramp = match charset {
        Some(charset) => GlyphRamp::new(charset)?,
        None => GlyphRamp::default_ramp(),
    };
    let art = ascii::render_bytes(&bytes, width, &ramp)?;
    print!("{}", art);
    Ok(())
}

/// Apply a transform and write the encoded result.
pub fn run_transform(
    input: &PathBuf,
    output: &PathBuf,
    effect: Effect,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    let bytes = std::fs::read(input)?;
    let image = raster::decode(&bytes)?;

    let encoded = match effect {
        Effect::Pixelate => raster::encode_jpeg(&raster::pixelate(&image, cell_size)?)?,
        Effect::Invert => raster::encode_jpeg(&raster::invert(&image))?,
        Effect::MirrorHorizontal => {
            raster::encode_jpeg(&raster::mirror(&image, MirrorAxis::Horizontal))?
        }
        Effect::MirrorVertical => {
            raster::encode_jpeg(&raster::mirror(&image, MirrorAxis::Vertical))?
        }
        Effect::Heatmap => raster::encode_jpeg(&raster::heatmap(&image))?,
        Effect::Grayscale => raster::encode_jpeg(&raster::grayscale(&image))?,
        Effect::Sticker => raster::encode_png(&raster::resize_to_bound(&image, STICKER_MAX_SIDE)?)?,
    };

    std::fs::write(output, encoded)?;
    Ok(())
}
