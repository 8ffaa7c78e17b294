//! The session record and its sole write path.

use crate::image::ImageData;
use crate::session::types::{AspectRatio, CreateFunction, EditFunction, Mode, UploadSlot};

/// The single mutable record backing one studio session.
///
/// Created once with page-load defaults, mutated only through
/// [`SessionController`], never persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    mode: Mode,
    create_function: CreateFunction,
    edit_function: EditFunction,
    aspect_ratio: AspectRatio,
    prompt: String,
    primary: Option<ImageData>,
    secondary1: Option<ImageData>,
    secondary2: Option<ImageData>,
    last_result: Option<ImageData>,
}

impl SessionState {
    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Selected create function (meaningful in [`Mode::Create`]).
    pub fn create_function(&self) -> CreateFunction {
        self.create_function
    }

    /// Selected edit function (meaningful in [`Mode::Edit`]).
    pub fn edit_function(&self) -> EditFunction {
        self.edit_function
    }

    /// Selected output aspect ratio (meaningful in [`Mode::Create`]).
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// The free-text prompt as typed, untrimmed.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The image stored at the given slot, if any.
    pub fn slot(&self, slot: UploadSlot) -> Option<&ImageData> {
        match slot {
            UploadSlot::Primary => self.primary.as_ref(),
            UploadSlot::Secondary1 => self.secondary1.as_ref(),
            UploadSlot::Secondary2 => self.secondary2.as_ref(),
        }
    }

    /// The most recently generated or edited image.
    pub fn last_result(&self) -> Option<&ImageData> {
        self.last_result.as_ref()
    }

    fn slot_mut(&mut self, slot: UploadSlot) -> &mut Option<ImageData> {
        match slot {
            UploadSlot::Primary => &mut self.primary,
            UploadSlot::Secondary1 => &mut self.secondary1,
            UploadSlot::Secondary2 => &mut self.secondary2,
        }
    }
}

/// Which UI regions are visible for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    /// Create-function selector.
    pub create_functions: bool,
    /// Aspect-ratio selector.
    pub aspect_ratios: bool,
    /// Edit-function selector.
    pub edit_functions: bool,
    /// Single-image upload region.
    pub single_upload: bool,
    /// Dual-image upload region (compose).
    pub dual_upload: bool,
}

/// Owns the session state; every mutation flows through these methods.
///
/// All operations are plain synchronous calls with no I/O. There are no
/// error conditions: the closed enums in [`crate::session::types`] make
/// invalid selections unrepresentable.
#[derive(Debug, Default)]
pub struct SessionController {
    state: SessionState,
}

impl SessionController {
    /// Creates a controller with page-load defaults: Create mode, the
    /// Free function, a 1:1 ratio, and everything else empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the session record.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Switches between Create and Edit.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
    }

    /// Selects the create function.
    pub fn set_create_function(&mut self, function: CreateFunction) {
        self.state.create_function = function;
    }

    /// Selects the edit function; whether it needs one or two inputs is
    /// derived from the variant.
    pub fn set_edit_function(&mut self, function: EditFunction) {
        self.state.edit_function = function;
    }

    /// Selects the output aspect ratio.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.state.aspect_ratio = ratio;
    }

    /// Replaces the free-text prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.state.prompt = prompt.into();
    }

    /// Stores an uploaded image at the given slot, overwriting any prior
    /// value. Last write to a slot wins.
    pub fn record_upload(&mut self, slot: UploadSlot, image: ImageData) {
        *self.state.slot_mut(slot) = Some(image);
    }

    /// Empties the given slot.
    pub fn clear_upload(&mut self, slot: UploadSlot) {
        *self.state.slot_mut(slot) = None;
    }

    /// Stores a successful generation result.
    pub fn record_result(&mut self, image: ImageData) {
        self.state.last_result = Some(image);
    }

    /// Restores every field to the page-load defaults: Create mode, Free
    /// function, 1:1 ratio, all slots empty, prompt empty, result cleared.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
    }

    /// Copies the last result into the primary slot and switches to Edit
    /// mode with the add/remove function, enabling generate-edit-edit
    /// workflows. No-op when there is no result; returns whether it acted.
    pub fn adopt_result_as_input(&mut self) -> bool {
        let Some(result) = self.state.last_result.clone() else {
            return false;
        };

        self.state.primary = Some(result);
        self.state.mode = Mode::Edit;
        self.state.edit_function = EditFunction::AddRemove;
        true
    }

    /// Derives which UI regions should be visible for the current state.
    pub fn panels(&self) -> Panels {
        match self.state.mode {
            Mode::Create => Panels {
                create_functions: true,
                aspect_ratios: true,
                edit_functions: false,
                single_upload: false,
                dual_upload: false,
            },
            Mode::Edit => {
                let dual = self.state.edit_function.requires_two_images();
                Panels {
                    create_functions: false,
                    aspect_ratios: false,
                    edit_functions: !dual,
                    single_upload: !dual,
                    dual_upload: dual,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(byte: u8) -> ImageData {
        ImageData::new(vec![byte; 4], "image/png")
    }

    #[test]
    fn test_new_has_page_load_defaults() {
        let controller = SessionController::new();
        let state = controller.state();

        assert_eq!(state.mode(), Mode::Create);
        assert_eq!(state.create_function(), CreateFunction::Free);
        assert_eq!(state.edit_function(), EditFunction::AddRemove);
        assert_eq!(state.aspect_ratio(), AspectRatio::Square);
        assert_eq!(state.prompt(), "");
        assert!(state.slot(UploadSlot::Primary).is_none());
        assert!(state.slot(UploadSlot::Secondary1).is_none());
        assert!(state.slot(UploadSlot::Secondary2).is_none());
        assert!(state.last_result().is_none());
    }

    #[test]
    fn test_create_mode_panels() {
        let controller = SessionController::new();
        let panels = controller.panels();

        assert!(panels.create_functions);
        assert!(panels.aspect_ratios);
        assert!(!panels.edit_functions);
        assert!(!panels.single_upload);
        assert!(!panels.dual_upload);
    }

    #[test]
    fn test_compose_shows_dual_upload_only() {
        let mut controller = SessionController::new();
        controller.set_mode(Mode::Edit);
        controller.set_edit_function(EditFunction::Compose);

        let panels = controller.panels();
        assert!(panels.dual_upload);
        assert!(!panels.single_upload);
        assert!(!panels.edit_functions);
        assert!(!panels.create_functions);
        assert!(!panels.aspect_ratios);
    }

    #[test]
    fn test_single_edit_functions_show_single_upload() {
        for function in [
            EditFunction::AddRemove,
            EditFunction::Retouch,
            EditFunction::Style,
        ] {
            let mut controller = SessionController::new();
            controller.set_mode(Mode::Edit);
            controller.set_edit_function(function);

            let panels = controller.panels();
            assert!(panels.single_upload);
            assert!(panels.edit_functions);
            assert!(!panels.dual_upload);
        }
    }

    #[test]
    fn test_record_upload_overwrites_slot() {
        let mut controller = SessionController::new();
        controller.record_upload(UploadSlot::Primary, png(1));
        controller.record_upload(UploadSlot::Primary, png(2));

        let stored = controller.state().slot(UploadSlot::Primary).unwrap();
        assert_eq!(stored.data, vec![2; 4]);
    }

    #[test]
    fn test_clear_upload() {
        let mut controller = SessionController::new();
        controller.record_upload(UploadSlot::Secondary1, png(1));
        controller.clear_upload(UploadSlot::Secondary1);

        assert!(controller.state().slot(UploadSlot::Secondary1).is_none());
    }

    #[test]
    fn test_reset_restores_defaults_from_any_state() {
        let mut controller = SessionController::new();
        controller.set_mode(Mode::Edit);
        controller.set_create_function(CreateFunction::Comic);
        controller.set_edit_function(EditFunction::Compose);
        controller.set_aspect_ratio(AspectRatio::Portrait);
        controller.set_prompt("a castle");
        controller.record_upload(UploadSlot::Primary, png(1));
        controller.record_upload(UploadSlot::Secondary1, png(2));
        controller.record_upload(UploadSlot::Secondary2, png(3));
        controller.record_result(png(4));

        controller.reset();

        let state = controller.state();
        assert_eq!(state.mode(), Mode::Create);
        assert_eq!(state.create_function(), CreateFunction::Free);
        assert_eq!(state.aspect_ratio(), AspectRatio::Square);
        assert_eq!(state.prompt(), "");
        assert!(state.slot(UploadSlot::Primary).is_none());
        assert!(state.slot(UploadSlot::Secondary1).is_none());
        assert!(state.slot(UploadSlot::Secondary2).is_none());
        assert!(state.last_result().is_none());
    }

    #[test]
    fn test_adopt_result_without_result_is_noop() {
        let mut controller = SessionController::new();
        controller.set_prompt("unchanged");

        assert!(!controller.adopt_result_as_input());

        let state = controller.state();
        assert_eq!(state.mode(), Mode::Create);
        assert_eq!(state.prompt(), "unchanged");
        assert!(state.slot(UploadSlot::Primary).is_none());
    }

    #[test]
    fn test_adopt_result_copies_into_primary_and_switches_mode() {
        let mut controller = SessionController::new();
        controller.set_edit_function(EditFunction::Compose);
        controller.record_result(png(7));

        assert!(controller.adopt_result_as_input());

        let state = controller.state();
        assert_eq!(state.mode(), Mode::Edit);
        assert_eq!(state.edit_function(), EditFunction::AddRemove);
        assert_eq!(state.slot(UploadSlot::Primary), state.last_result());
    }
}
