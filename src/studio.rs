//! Ties the session controller to a generation backend.

use crate::error::{ImgForgeError, Result};
use crate::image::ImageData;
use crate::request::{build_request, select_image_part, GenerationCall};
use crate::service::GenerationService;
use crate::session::SessionController;

/// A session controller wired to a generation service.
///
/// At most one generation is in flight per studio: [`Studio::generate`]
/// borrows the studio mutably for the whole round trip, so a second call
/// cannot start until the first settles.
pub struct Studio<S> {
    controller: SessionController,
    service: S,
}

impl<S: GenerationService> Studio<S> {
    /// Creates a studio with page-load defaults.
    pub fn new(service: S) -> Self {
        Self {
            controller: SessionController::new(),
            service,
        }
    }

    /// The state controller; all session mutation goes through here.
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Mutable access to the state controller.
    pub fn controller_mut(&mut self) -> &mut SessionController {
        &mut self.controller
    }

    /// Builds the request for the current state, runs the single service
    /// call, and records the result.
    ///
    /// Validation failures return before any network traffic. On any
    /// failure the session state is exactly as it was before the call;
    /// `last_result` is only written on success.
    pub async fn generate(&mut self) -> Result<ImageData> {
        let image = match build_request(self.controller.state())? {
            GenerationCall::Text(request) => {
                let mut images = self.service.generate_from_text(&request).await?;
                if images.is_empty() {
                    return Err(ImgForgeError::Service("no image returned".into()));
                }
                images.swap_remove(0)
            }
            GenerationCall::Parts(request) => {
                let parts = self.service.generate_from_parts(&request).await?;
                select_image_part(parts)?
            }
        };

        self.controller.record_result(image.clone());
        Ok(image)
    }
}
