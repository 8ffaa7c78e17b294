#![warn(missing_docs)]
//! ImgForge - create and edit images through Google's generative image APIs.
//!
//! The studio workflow is modelled as two pieces: a [`SessionController`]
//! state machine tracking what the user has selected and uploaded, and a
//! request layer that turns that state into exactly one call against a
//! [`GenerationService`] backend. [`Studio`] wires the two together.
//!
//! # Quick Start - Create
//!
//! ```no_run
//! use imgforge::{CreateFunction, GeminiService, Studio};
//!
//! #[tokio::main]
//! async fn main() -> imgforge::Result<()> {
//!     let mut studio = Studio::new(GeminiService::builder().build()?);
//!     studio.controller_mut().set_create_function(CreateFunction::Sticker);
//!     studio.controller_mut().set_prompt("a golden retriever puppy");
//!     let image = studio.generate().await?;
//!     image.save("sticker.png")?;
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Edit
//!
//! ```no_run
//! use imgforge::{GeminiService, ImageData, Mode, Studio, UploadSlot};
//!
//! #[tokio::main]
//! async fn main() -> imgforge::Result<()> {
//!     let mut studio = Studio::new(GeminiService::builder().build()?);
//!     let photo = ImageData::from_bytes(std::fs::read("photo.png")?)?;
//!     studio.controller_mut().set_mode(Mode::Edit);
//!     studio.controller_mut().record_upload(UploadSlot::Primary, photo);
//!     studio.controller_mut().set_prompt("remove the lamp post");
//!     let image = studio.generate().await?;
//!     image.save("edited.png")?;
//!     Ok(())
//! }
//! ```

mod error;
pub mod image;
pub mod request;
pub mod service;
pub mod session;
mod studio;

// Re-export error types at crate root
pub use error::{ImgForgeError, Result};

// Re-export the types a host adapter needs day to day
pub use image::{ImageData, ImageFormat};
pub use request::{build_request, select_image_part, GenerationCall, Part, PartsRequest, TextRequest};
pub use service::{GeminiService, GeminiServiceBuilder, GenerationService};
pub use session::{
    AspectRatio, CreateFunction, EditFunction, Mode, Panels, SessionController, SessionState,
    UploadSlot,
};
pub use studio::Studio;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{ImgForgeError, Result};
    pub use crate::image::ImageData;
    pub use crate::service::{GeminiService, GenerationService};
    pub use crate::session::{AspectRatio, CreateFunction, EditFunction, Mode, UploadSlot};
    pub use crate::studio::Studio;
}
