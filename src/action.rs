//! Action tags for the transform selection menu.
//!
//! Each tag names one transform the user can request once a photo is on file.
//! The wire representation (`tag`) is what the platform sends back when a
//! menu button is pressed.

/// A transform the user can select from the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTag {
    /// Blocky pixelation at a fixed cell size.
    Pixelate,
    /// ASCII-art rendering using the session's glyph ramp.
    Ascii,
    /// Per-channel color inversion.
    Invert,
    /// Left-right flip.
    MirrorHorizontal,
    /// Top-bottom flip.
    MirrorVertical,
    /// False-color heatmap from grayscale intensity.
    Heatmap,
    /// Aspect-preserving resize to the sticker bound, delivered as PNG.
    Sticker,
}

/// Menu ordering presented to the user.
pub const MENU_ACTIONS: [ActionTag; 7] = [
    ActionTag::Pixelate,
    ActionTag::Ascii,
    ActionTag::Invert,
    ActionTag::MirrorHorizontal,
    ActionTag::MirrorVertical,
    ActionTag::Heatmap,
    ActionTag::Sticker,
];

impl ActionTag {
    /// Parse a wire tag from a button callback.
    ///
    /// Returns None for unrecognized tags; the coordinator drops those
    /// without surfacing an error.
    pub fn from_tag(s: &str) -> Option<Self> {
        match s {
            "pixelate" => Some(Self::Pixelate),
            "ascii" => Some(Self::Ascii),
            "invert" => Some(Self::Invert),
            "mirror_horizontal" => Some(Self::MirrorHorizontal),
            "mirror_vertical" => Some(Self::MirrorVertical),
            "heatmap" => Some(Self::Heatmap),
            "sticker" => Some(Self::Sticker),
            _ => None,
        }
    }

    /// The stable wire tag for this action.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pixelate => "pixelate",
            Self::Ascii => "ascii",
            Self::Invert => "invert",
            Self::MirrorHorizontal => "mirror_horizontal",
            Self::MirrorVertical => "mirror_vertical",
            Self::Heatmap => "heatmap",
            Self::Sticker => "sticker",
        }
    }

    /// Human-readable button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pixelate => "Pixelate",
            Self::Ascii => "ASCII Art",
            Self::Invert => "Invert Colors",
            Self::MirrorHorizontal => "Mirror Horizontal",
            Self::MirrorVertical => "Mirror Vertical",
            Self::Heatmap => "Heatmap",
            Self::Sticker => "Sticker",
        }
    }

    /// Progress notice delivered before the transform runs.
    pub fn progress_notice(&self) -> &'static str {
        match self {
            Self::Pixelate => "Pixelating your image...",
            Self::Ascii => "Converting your image to ASCII art...",
            Self::Invert => "Inverting colors of your image...",
            Self::MirrorHorizontal => "Mirroring your image horizontally...",
            Self::MirrorVertical => "Mirroring your image vertically...",
            Self::Heatmap => "Rendering your image as a heatmap...",
            Self::Sticker => "Resizing your image into a sticker...",
        }
    }

    /// Whether this action needs the session's glyph ramp to be set.
    ///
    /// Only ASCII rendering consumes the charset; every other action needs
    /// just the photo.
    pub fn needs_charset(&self) -> bool {
        matches!(self, Self::Ascii)
    }
}

impl std::fmt::Display for ActionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
