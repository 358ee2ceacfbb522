//! Raster transform library.
//!
//! Pure, stateless functions from one in-memory image to another, plus the
//! decode/encode boundary. Every transform preserves the input's coordinate
//! topology (no cropping); only pixelate's temporary downsample and the
//! sticker resize change dimensions, and pixelate restores the originals.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};

/// Default pixelation cell size in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Longest-side bound for sticker output in pixels.
pub const STICKER_MAX_SIDE: u32 = 512;

/// JPEG quality for delivered photo results.
pub const JPEG_QUALITY: u8 = 85;

/// Heatmap endpoint for intensity 0 (cold: blue).
pub const HEATMAP_COLD: [u8; 3] = [0, 0, 255];

/// Heatmap endpoint for intensity 255 (hot: red).
pub const HEATMAP_HOT: [u8; 3] = [255, 0, 0];

/// Errors from decoding, encoding, or parameter validation.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Why the parameter was rejected
        reason: String,
    },
}

/// Mirror axis for [`mirror`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Flip left-right.
    Horizontal,
    /// Flip top-bottom.
    Vertical,
}

/// Decode raw bytes into an image.
///
/// The container format is sniffed from the bytes; anything the raster
/// library supports is accepted.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, RasterError> {
    image::load_from_memory(bytes).map_err(RasterError::Decode)
}

/// Encode an image as JPEG for photo delivery.
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, RasterError> {
    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    encoder.encode_image(&rgb).map_err(RasterError::Encode)?;
    Ok(buf)
}

/// Encode an image as PNG, preserving transparency.
///
/// Used for the sticker path, which feeds further sticker-pack ingestion
/// and therefore wants a lossless format with alpha.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, RasterError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(RasterError::Encode)?;
    Ok(buf)
}

/// Convert an image to single-channel grayscale.
pub fn grayscale(image: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image.to_luma8())
}

/// Pixelate an image into blocky cells of side `cell_size`.
///
/// Downsamples by integer-dividing both dimensions by `cell_size` with
/// nearest-neighbor sampling, then upsamples back to the original
/// dimensions, again nearest-neighbor.
///
/// # Errors
/// `InvalidParameter` if `cell_size` is 0 or not strictly smaller than both
/// image dimensions; either would degenerate to a zero-sized intermediate.
pub fn pixelate(image: &DynamicImage, cell_size: u32) -> Result<DynamicImage, RasterError> {
    let (width, height) = image.dimensions();
    if cell_size == 0 {
        return Err(RasterError::InvalidParameter {
            reason: "cell size must be at least 1".to_string(),
        });
    }
    if cell_size >= width || cell_size >= height {
        return Err(RasterError::InvalidParameter {
            reason: format!(
                "cell size {} must be smaller than both image dimensions ({}x{})",
                cell_size, width, height
            ),
        });
    }

    let down = image.resize_exact(width / cell_size, height / cell_size, FilterType::Nearest);
    Ok(down.resize_exact(width, height, FilterType::Nearest))
}

/// Invert every color channel: value becomes `255 - value`.
///
/// Exact involution: applying twice restores the original image.
pub fn invert(image: &DynamicImage) -> DynamicImage {
    let mut rgb = image.to_rgb8();
    for pixel in rgb.pixels_mut() {
        let Rgb([r, g, b]) = *pixel;
        *pixel = Rgb([255 - r, 255 - g, 255 - b]);
    }
    DynamicImage::ImageRgb8(rgb)
}

/// Flip pixel order along the chosen axis.
pub fn mirror(image: &DynamicImage, axis: MirrorAxis) -> DynamicImage {
    match axis {
        MirrorAxis::Horizontal => image.fliph(),
        MirrorAxis::Vertical => image.flipv(),
    }
}

/// Map grayscale intensity onto a cold-to-hot color gradient.
///
/// Intensity 0 maps exactly to [`HEATMAP_COLD`], 255 exactly to
/// [`HEATMAP_HOT`], with per-channel linear interpolation in between.
pub fn heatmap(image: &DynamicImage) -> DynamicImage {
    let gray = grayscale(image).into_luma8();
    let (width, height) = gray.dimensions();
    let mut out = RgbImage::new(width, height);

    for (x, y, pixel) in gray.enumerate_pixels() {
        let t = pixel.0[0] as u32;
        let mut channels = [0u8; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            let cold = HEATMAP_COLD[i] as u32;
            let hot = HEATMAP_HOT[i] as u32;
            *channel = ((cold * (255 - t) + hot * t) / 255) as u8;
        }
        out.put_pixel(x, y, Rgb(channels));
    }

    DynamicImage::ImageRgb8(out)
}

/// Aspect-preserving resize so the longer side equals `max_side`.
///
/// Keeps the color layout (and any alpha channel) of the input.
///
/// # Errors
/// `InvalidParameter` if `max_side` is 0.
pub fn resize_to_bound(image: &DynamicImage, max_side: u32) -> Result<DynamicImage, RasterError> {
    if max_side == 0 {
        return Err(RasterError::InvalidParameter {
            reason: "resize bound must be at least 1".to_string(),
        });
    }

    let (width, height) = image.dimensions();
    let (new_width, new_height) = if width >= height {
        let scaled = ((height as u64 * max_side as u64) / width as u64).max(1) as u32;
        (max_side, scaled)
    } else {
        let scaled = ((width as u64 * max_side as u64) / height as u64).max(1) as u32;
        (scaled, max_side)
    };

    Ok(image.resize_exact(new_width, new_height, FilterType::Lanczos3))
}
