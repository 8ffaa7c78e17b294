//! Maps session state to one of the two service request shapes and
//! interprets what comes back.
//!
//! All validation happens here, before any network call: a request that
//! builds is a request worth sending.

use crate::error::{ImgForgeError, Result};
use crate::image::{ImageData, ImageFormat};
use crate::session::{AspectRatio, Mode, SessionState, UploadSlot};

/// Instruction sent when the user asks for an edit without typing anything.
pub const FALLBACK_EDIT_PROMPT: &str = "Perform the requested edit on the image.";

/// One unit of a multi-part request or response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Inline image bytes with their MIME type.
    Image(ImageData),
    /// Plain text.
    Text(String),
}

/// Text-to-image request (Create mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    /// Final prompt, after function styling.
    pub prompt: String,
    /// Number of images requested.
    pub count: u32,
    /// Desired output format.
    pub format: ImageFormat,
    /// Desired output aspect ratio.
    pub aspect_ratio: AspectRatio,
}

/// Edit/compose request (Edit mode): ordered content parts, answered with
/// both image and text modalities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartsRequest {
    /// Input images first, then exactly one text instruction.
    pub parts: Vec<Part>,
}

/// The single service call derived from the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationCall {
    /// Text-to-image.
    Text(TextRequest),
    /// Image edit or compose.
    Parts(PartsRequest),
}

/// Builds the one request the current state calls for.
///
/// Fails with [`ImgForgeError::InvalidRequest`] when the prompt or the
/// required upload slots are missing; the caller must not reach the
/// service in that case.
pub fn build_request(state: &SessionState) -> Result<GenerationCall> {
    match state.mode() {
        Mode::Create => build_create(state),
        Mode::Edit => build_edit(state),
    }
}

fn build_create(state: &SessionState) -> Result<GenerationCall> {
    let prompt = state.prompt().trim();
    if prompt.is_empty() {
        return Err(ImgForgeError::InvalidRequest("empty prompt".into()));
    }

    Ok(GenerationCall::Text(TextRequest {
        prompt: state.create_function().styled_prompt(prompt),
        count: 1,
        format: ImageFormat::Png,
        aspect_ratio: state.aspect_ratio(),
    }))
}

fn build_edit(state: &SessionState) -> Result<GenerationCall> {
    let mut parts = Vec::with_capacity(3);

    if state.edit_function().requires_two_images() {
        let (Some(first), Some(second)) = (
            state.slot(UploadSlot::Secondary1),
            state.slot(UploadSlot::Secondary2),
        ) else {
            return Err(ImgForgeError::InvalidRequest("two images required".into()));
        };
        parts.push(Part::Image(first.clone()));
        parts.push(Part::Image(second.clone()));
    } else {
        let Some(image) = state.slot(UploadSlot::Primary) else {
            return Err(ImgForgeError::InvalidRequest("one image required".into()));
        };
        parts.push(Part::Image(image.clone()));
    }

    let prompt = state.prompt().trim();
    parts.push(Part::Text(if prompt.is_empty() {
        FALLBACK_EDIT_PROMPT.to_string()
    } else {
        prompt.to_string()
    }));

    Ok(GenerationCall::Parts(PartsRequest { parts }))
}

/// Picks the result out of an edit/compose response.
///
/// The first image part in order wins, carrying its own MIME type (which
/// may differ from the inputs'). A text-only answer becomes the failure
/// message; an empty one reports that no image came back.
pub fn select_image_part(parts: Vec<Part>) -> Result<ImageData> {
    let mut first_text = None;

    for part in parts {
        match part {
            Part::Image(image) => return Ok(image),
            Part::Text(text) if first_text.is_none() => first_text = Some(text),
            Part::Text(_) => {}
        }
    }

    Err(ImgForgeError::Service(match first_text {
        Some(text) => format!("edit failed: {text}"),
        None => "no image returned".to_string(),
    }))
}
