//! The remote generation service boundary.

mod gemini;

pub use gemini::{GeminiService, GeminiServiceBuilder};

use crate::error::Result;
use crate::image::ImageData;
use crate::request::{Part, PartsRequest, TextRequest};
use async_trait::async_trait;

/// A remote generative-image backend.
///
/// Both operations are single-shot and unretried; failures surface as
/// [`crate::ImgForgeError`] values with a human-readable message.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generates images from a styled text prompt.
    async fn generate_from_text(&self, request: &TextRequest) -> Result<Vec<ImageData>>;

    /// Runs an edit/compose request and returns the response parts in the
    /// order the service produced them.
    async fn generate_from_parts(&self, request: &PartsRequest) -> Result<Vec<Part>>;
}
