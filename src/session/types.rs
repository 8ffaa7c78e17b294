//! Closed vocabularies for the session state machine.
//!
//! Every selectable dimension of the studio is a closed enum, so an
//! unknown mode or function is unrepresentable rather than a silently
//! ignored string.

use serde::{Deserialize, Serialize};

/// Top-level choice between generating a new image from text and
/// modifying existing image(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Generate a new image from a text prompt.
    #[default]
    Create,
    /// Edit or compose uploaded image(s).
    Edit,
}

/// Prompt styling applied when generating from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateFunction {
    /// Send the prompt unchanged.
    #[default]
    Free,
    /// Vector sticker with a bold white outline.
    Sticker,
    /// Minimalist logo built around the prompt text.
    Text,
    /// Graphic-novel panel.
    Comic,
}

impl CreateFunction {
    /// Expands the user's raw prompt into the final generation prompt.
    ///
    /// `Free` is an identity transform; the other functions wrap the
    /// prompt in a fixed template.
    pub fn styled_prompt(&self, prompt: &str) -> String {
        match self {
            Self::Free => prompt.to_string(),
            Self::Sticker => format!(
                "a high-quality vector sticker of {prompt}, with a bold white outline, \
                 on a plain white background"
            ),
            Self::Text => format!(
                "a professional logo featuring the text \"{prompt}\", minimalist design, \
                 vector art, high resolution"
            ),
            Self::Comic => format!(
                "a panel from a graphic novel depicting {prompt}, comic book art style, \
                 vibrant colors, dynamic action lines"
            ),
        }
    }
}

/// Edit operation applied to uploaded image(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditFunction {
    /// Add or remove elements from a single image.
    #[default]
    AddRemove,
    /// Retouch a single image.
    Retouch,
    /// Restyle a single image.
    Style,
    /// Merge two images into one.
    Compose,
}

impl EditFunction {
    /// Compose needs both secondary slots filled; every other function
    /// works on the primary slot alone.
    pub fn requires_two_images(&self) -> bool {
        matches!(self, Self::Compose)
    }
}

/// Output aspect ratios offered when creating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1 square aspect ratio.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 16:9 landscape (widescreen) aspect ratio.
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16 portrait (tall) aspect ratio.
    #[serde(rename = "9:16")]
    Portrait,
    /// 4:3 standard landscape aspect ratio.
    #[serde(rename = "4:3")]
    Standard,
    /// 3:4 standard portrait aspect ratio.
    #[serde(rename = "3:4")]
    StandardPortrait,
}

impl AspectRatio {
    /// Returns the aspect ratio as a string (e.g., "16:9").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Standard => "4:3",
            Self::StandardPortrait => "3:4",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named holder for one uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadSlot {
    /// The single input for add/remove, retouch and style edits.
    Primary,
    /// First input of a compose pair.
    Secondary1,
    /// Second input of a compose pair.
    Secondary2,
}
