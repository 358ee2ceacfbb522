//! ASCII renderer: converts an image into a bounded block of glyph rows.
//!
//! The user supplies an ordered glyph ramp (dark to light, or any order they
//! like; the renderer never reorders it). Each output row is exactly the
//! output width in glyphs and the whole payload stays under the transport
//! message-size ceiling.

use image::imageops::FilterType;
use image::DynamicImage;

use crate::raster::{self, RasterError};

/// Default glyph ramp, dark to light.
pub const DEFAULT_GLYPH_RAMP: &str = "@%#*+=-:. ";

/// Default output width in glyphs.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 40;

/// Height compensation for glyph cells being taller than wide in typical
/// monospace rendering. A design constant, not derived from font metrics;
/// output parity depends on it staying exactly 0.55.
pub const CHAR_CELL_ASPECT: f32 = 0.55;

/// Transport ceiling on total payload characters (glyphs plus newlines),
/// dictated by the delivery channel's message-size limit.
pub const TRANSPORT_CHAR_LIMIT: usize = 4000;

/// Errors from glyph ramp construction or rendering.
#[derive(Debug, thiserror::Error)]
pub enum AsciiError {
    #[error("glyph ramp must contain at least one character")]
    EmptyRamp,

    #[error("output width must be at least 1")]
    ZeroWidth,

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// An ordered sequence of glyphs indexed by pixel brightness.
///
/// Mapping is purely positional: index `pixel * len / 256`. Brightness 0
/// always selects the first glyph and 255 the last, for any non-empty ramp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from a user-supplied charset string.
    ///
    /// The string is taken verbatim; whitespace glyphs are legitimate.
    ///
    /// # Errors
    /// `AsciiError::EmptyRamp` if the string contains no characters.
    pub fn new(charset: &str) -> Result<Self, AsciiError> {
        let glyphs: Vec<char> = charset.chars().collect();
        if glyphs.is_empty() {
            return Err(AsciiError::EmptyRamp);
        }
        Ok(Self { glyphs })
    }

    /// The default dark-to-light ramp.
    pub fn default_ramp() -> Self {
        // DEFAULT_GLYPH_RAMP is non-empty, so this cannot fail
        Self {
            glyphs: DEFAULT_GLYPH_RAMP.chars().collect(),
        }
    }

    /// Number of glyphs in the ramp.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false: `new` rejects an empty charset, so a constructed ramp
    /// holds at least one glyph. Provided to pair with [`GlyphRamp::len`].
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Select the glyph for a pixel brightness.
    ///
    /// `value * len / 256` floors into `[0, len-1]` for every `value` in
    /// 0..=255, so the lookup cannot go out of bounds.
    pub fn glyph_for(&self, value: u8) -> char {
        self.glyphs[value as usize * self.glyphs.len() / 256]
    }
}

/// Render an image as ASCII art.
///
/// The image is grayscaled, resized to `output_width` columns with a height
/// derived from the source aspect ratio and [`CHAR_CELL_ASPECT`], mapped
/// through the ramp in row-major order, and truncated to fit the transport
/// ceiling. Rows past the ceiling are dropped, not wrapped: a tall image
/// yields a truncated top-of-image rendering.
///
/// Every emitted row is exactly `output_width` glyphs, newline-terminated.
pub fn render(
    image: &DynamicImage,
    output_width: u32,
    ramp: &GlyphRamp,
) -> Result<String, AsciiError> {
    if output_width == 0 {
        return Err(AsciiError::ZeroWidth);
    }

    let gray = raster::grayscale(image).into_luma8();
    let (src_width, src_height) = gray.dimensions();

    // Height follows the source aspect ratio, squeezed by the glyph cell
    // aspect. Rounds to nearest; clamped so at least one row renders even
    // for extremely wide sources.
    let target_height = ((output_width as f32) * (src_height as f32 / src_width as f32)
        * CHAR_CELL_ASPECT)
        .round()
        .max(1.0) as u32;

    let resized = image::imageops::resize(&gray, output_width, target_height, FilterType::Nearest);

    let glyphs: Vec<char> = resized
        .pixels()
        .map(|pixel| ramp.glyph_for(pixel.0[0]))
        .collect();

    Ok(cap_for_transport(&glyphs, output_width as usize))
}

/// Decode raw bytes and render them as ASCII art.
pub fn render_bytes(
    bytes: &[u8],
    output_width: u32,
    ramp: &GlyphRamp,
) -> Result<String, AsciiError> {
    let image = raster::decode(bytes)?;
    render(&image, output_width, ramp)
}

/// Split a flat glyph sequence into newline-terminated rows, capped so the
/// total payload (glyphs plus newlines) stays under [`TRANSPORT_CHAR_LIMIT`].
fn cap_for_transport(glyphs: &[char], width: usize) -> String {
    let max_characters = TRANSPORT_CHAR_LIMIT.saturating_sub(width + 1);
    let max_rows = max_characters / (width + 1);
    let emitted = (max_rows * width).min(glyphs.len());

    let mut out = String::with_capacity(emitted + emitted / width.max(1) + 1);
    for row in glyphs[..emitted].chunks(width) {
        out.extend(row);
        out.push('\n');
    }
    out
}
