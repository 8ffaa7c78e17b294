//! Session state machine: the single mutable record, its controller, and
//! the derived UI visibility.

mod controller;
mod types;

pub use controller::{Panels, SessionController, SessionState};
pub use types::{AspectRatio, CreateFunction, EditFunction, Mode, UploadSlot};
