//! Per-chip edit state machine.
//!
//! A [`TagCellController`] interprets the edit events of one chip's text
//! field. It decides whether a proposed edit is applied and which
//! [`CellIntent`] the collection controller has to act on. It does not own
//! the chip text: the store does, and every handler receives the current text.
//!
//! # Modes
//!
//! | Text      | Valid | Focused | Mode      |
//! |-----------|-------|---------|-----------|
//! | empty     | -     | -       | `Edit`    |
//! | non-empty | no    | -       | `Invalid` |
//! | non-empty | yes   | yes     | `Edit`    |
//! | non-empty | yes   | no      | `View`    |

use std::ops::Range;

use tagflow_core::logging::targets;

use crate::config::Configuration;
use crate::widget::validator::{Validation, evaluate};

/// Horizontal padding added to the measured text width of a chip.
pub const CHIP_PADDING: f32 = 10.0;

/// Display mode of a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagMode {
    /// Finished, valid tag.
    View,
    /// Being typed into, or empty.
    #[default]
    Edit,
    /// Finished or being typed, but failing validation.
    Invalid,
}

/// Derive a chip's mode from its text.
///
/// Empty text is always `Edit`. Otherwise failing `validation` gives
/// `Invalid`, and passing gives `Edit` while focused, `View` otherwise.
pub fn derive_mode(text: &str, is_focused: bool, validation: Option<&Validation>) -> TagMode {
    if text.is_empty() {
        TagMode::Edit
    } else if !evaluate(text, validation) {
        TagMode::Invalid
    } else if is_focused {
        TagMode::Edit
    } else {
        TagMode::View
    }
}

/// Something the collection controller has to do for a chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellIntent {
    /// Finish this chip and move edit focus to the next open slot.
    AdvanceToNextChip,
    /// Remove the chip in front of this one.
    RequestDeletePreviousChip,
    /// Give up edit focus without advancing.
    ResignFocus,
    /// Editing finished with the given final text.
    EditingEnded(String),
}

/// Outcome of a cell event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellResponse {
    /// Whether the text field should apply the event's default behaviour.
    pub accept: bool,
    pub intent: Option<CellIntent>,
}

impl CellResponse {
    fn accept() -> Self {
        Self {
            accept: true,
            intent: None,
        }
    }

    fn reject() -> Self {
        Self {
            accept: false,
            intent: None,
        }
    }

    fn with_intent(mut self, intent: CellIntent) -> Self {
        self.intent = Some(intent);
        self
    }
}

/// State machine for a single chip.
#[derive(Debug, Clone, Default)]
pub struct TagCellController {
    mode: TagMode,
    focused: bool,
}

impl TagCellController {
    /// Create a cell for a chip displaying `text`.
    pub fn new(text: &str, validation: Option<&Validation>) -> Self {
        let mut cell = Self::default();
        cell.configure(text, validation);
        cell
    }

    #[inline]
    pub fn mode(&self) -> TagMode {
        self.mode
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Reset display state for `text`, as when a chip is bound to a tag.
    pub fn configure(&mut self, text: &str, validation: Option<&Validation>) {
        let requested = if evaluate(text, validation) {
            TagMode::View
        } else {
            TagMode::Invalid
        };
        self.set_mode(requested, text);
    }

    /// Request a mode. Empty text forces `Edit` regardless of the request.
    pub fn set_mode(&mut self, requested: TagMode, text: &str) -> TagMode {
        self.mode = if text.is_empty() {
            TagMode::Edit
        } else {
            requested
        };
        self.mode
    }

    /// Re-derive the mode after the chip text changed.
    pub fn handle_text_changed(&mut self, text: &str, validation: Option<&Validation>) -> TagMode {
        self.mode = derive_mode(text, self.focused, validation);
        self.mode
    }

    /// Interpret a proposed replacement of a character range.
    ///
    /// `text` is the chip text before the edit. Only the replacement string
    /// influences the decision; the range is applied by the caller.
    pub fn handle_range_replace(
        &mut self,
        text: &str,
        replacement: &str,
        config: &Configuration,
    ) -> CellResponse {
        let valid = config.is_valid(text);

        if replacement == " " && config.advance_on_whitespace && valid {
            tracing::trace!(target: targets::CELL, "space advances to next chip");
            return CellResponse::reject().with_intent(CellIntent::AdvanceToNextChip);
        }

        if replacement.is_empty() && text.is_empty() {
            tracing::trace!(target: targets::CELL, "delete at empty chip");
            return CellResponse::reject().with_intent(CellIntent::RequestDeletePreviousChip);
        }

        let mode = if valid { TagMode::Edit } else { TagMode::Invalid };
        self.set_mode(mode, text);
        CellResponse::accept()
    }

    /// Interpret the return key.
    ///
    /// The key press itself is always rejected.
    pub fn handle_return(&mut self, text: &str, config: &Configuration) -> CellResponse {
        if !config.advance_on_return {
            return CellResponse::reject().with_intent(CellIntent::ResignFocus);
        }
        if config.is_valid(text) {
            CellResponse::reject().with_intent(CellIntent::AdvanceToNextChip)
        } else {
            tracing::trace!(target: targets::CELL, "return ignored on invalid chip");
            CellResponse::reject()
        }
    }

    /// The chip gained edit focus.
    pub fn handle_focus_gained(&mut self, text: &str) -> CellResponse {
        self.focused = true;
        self.set_mode(TagMode::Edit, text);
        CellResponse::accept()
    }

    /// The chip lost edit focus.
    pub fn handle_focus_lost(&mut self, text: &str, validation: Option<&Validation>) -> CellResponse {
        self.focused = false;
        self.configure(text, validation);
        CellResponse::accept().with_intent(CellIntent::EditingEnded(text.to_string()))
    }

    /// A backward delete key press, before the text field applies it.
    ///
    /// On an empty chip the text field performs no replacement of its own,
    /// so the press is routed through the range-replace path as an empty
    /// deletion.
    pub fn handle_delete_backward(&mut self, text: &str, config: &Configuration) -> CellResponse {
        if text.is_empty() {
            return self.handle_range_replace(text, "", config);
        }
        CellResponse::accept()
    }

    /// Chip width for a given measured text width.
    #[inline]
    pub fn intrinsic_width(measured_text_width: f32) -> f32 {
        measured_text_width + CHIP_PADDING
    }
}

/// Apply a replacement over a character range of `text`.
///
/// The range is in characters and is clamped to the text.
pub fn apply_replacement(text: &str, range: Range<usize>, replacement: &str) -> String {
    let byte_at = |chars: usize| {
        text.char_indices()
            .nth(chars)
            .map_or(text.len(), |(offset, _)| offset)
    };
    let start = byte_at(range.start);
    let end = byte_at(range.end.max(range.start));

    let mut result = String::with_capacity(text.len() + replacement.len());
    result.push_str(&text[..start]);
    result.push_str(replacement);
    result.push_str(&text[end..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_config() -> Configuration {
        Configuration::new().with_validation(Validation::email_address())
    }

    #[test]
    fn test_derive_mode_table() {
        let v = Validation::max_length(2);
        assert_eq!(derive_mode("", false, Some(&v)), TagMode::Edit);
        assert_eq!(derive_mode("", true, Some(&v)), TagMode::Edit);
        assert_eq!(derive_mode("abc", false, Some(&v)), TagMode::Invalid);
        assert_eq!(derive_mode("abc", true, Some(&v)), TagMode::Invalid);
        assert_eq!(derive_mode("ab", true, Some(&v)), TagMode::Edit);
        assert_eq!(derive_mode("ab", false, Some(&v)), TagMode::View);
        assert_eq!(derive_mode("anything", false, None), TagMode::View);
    }

    #[test]
    fn test_empty_text_forces_edit() {
        let mut cell = TagCellController::default();
        assert_eq!(cell.set_mode(TagMode::View, ""), TagMode::Edit);
        assert_eq!(cell.set_mode(TagMode::Invalid, ""), TagMode::Edit);
        assert_eq!(cell.set_mode(TagMode::View, "x"), TagMode::View);
    }

    #[test]
    fn test_configure() {
        let v = Validation::email_address();
        assert_eq!(TagCellController::new("a@b.com", Some(&v)).mode(), TagMode::View);
        assert_eq!(TagCellController::new("nope", Some(&v)).mode(), TagMode::Invalid);
        assert_eq!(TagCellController::new("", Some(&v)).mode(), TagMode::Edit);
    }

    #[test]
    fn test_space_advances_when_valid() {
        let config = email_config();
        let mut cell = TagCellController::new("a@b.com", config.validation.as_ref());

        let response = cell.handle_range_replace("a@b.com", " ", &config);
        assert!(!response.accept);
        assert_eq!(response.intent, Some(CellIntent::AdvanceToNextChip));
    }

    #[test]
    fn test_space_inserted_when_invalid() {
        let config = email_config();
        let mut cell = TagCellController::new("a@b", config.validation.as_ref());

        let response = cell.handle_range_replace("a@b", " ", &config);
        assert!(response.accept);
        assert_eq!(response.intent, None);
        assert_eq!(cell.mode(), TagMode::Invalid);
    }

    #[test]
    fn test_space_inserted_when_whitespace_does_not_advance() {
        let config = Configuration::new()
            .without_validation()
            .with_advance_on_whitespace(false);
        let mut cell = TagCellController::default();

        let response = cell.handle_range_replace("new", " ", &config);
        assert!(response.accept);
        assert_eq!(response.intent, None);
        assert_eq!(cell.mode(), TagMode::Edit);
    }

    #[test]
    fn test_delete_at_empty_requests_previous_delete() {
        let config = Configuration::new();
        let mut cell = TagCellController::default();

        let response = cell.handle_range_replace("", "", &config);
        assert!(!response.accept);
        assert_eq!(response.intent, Some(CellIntent::RequestDeletePreviousChip));
    }

    #[test]
    fn test_typing_sets_edit_or_invalid() {
        let config = Configuration::new().with_validation(Validation::max_length(2));
        let mut cell = TagCellController::default();

        assert!(cell.handle_range_replace("ab", "c", &config).accept);
        assert_eq!(cell.mode(), TagMode::Edit);

        assert!(cell.handle_range_replace("abc", "d", &config).accept);
        assert_eq!(cell.mode(), TagMode::Invalid);
    }

    #[test]
    fn test_text_changed_rederives() {
        let v = Validation::max_length(2);
        let mut cell = TagCellController::default();
        cell.handle_focus_gained("");

        assert_eq!(cell.handle_text_changed("abc", Some(&v)), TagMode::Invalid);
        assert_eq!(cell.handle_text_changed("ab", Some(&v)), TagMode::Edit);
        assert_eq!(cell.handle_text_changed("", Some(&v)), TagMode::Edit);
    }

    #[test]
    fn test_return_advances_when_valid() {
        let config = Configuration::new();
        let mut cell = TagCellController::default();

        let response = cell.handle_return("tag", &config);
        assert!(!response.accept);
        assert_eq!(response.intent, Some(CellIntent::AdvanceToNextChip));

        let response = cell.handle_return("", &config);
        assert!(!response.accept);
        assert_eq!(response.intent, None);
    }

    #[test]
    fn test_return_resigns_without_advance() {
        let config = Configuration::new().with_advance_on_return(false);
        let mut cell = TagCellController::default();

        let response = cell.handle_return("tag", &config);
        assert!(!response.accept);
        assert_eq!(response.intent, Some(CellIntent::ResignFocus));
    }

    #[test]
    fn test_focus_cycle() {
        let v = Validation::non_empty();
        let mut cell = TagCellController::new("tag", Some(&v));
        assert_eq!(cell.mode(), TagMode::View);

        cell.handle_focus_gained("tag");
        assert!(cell.is_focused());
        assert_eq!(cell.mode(), TagMode::Edit);

        let response = cell.handle_focus_lost("tag", Some(&v));
        assert!(!cell.is_focused());
        assert_eq!(cell.mode(), TagMode::View);
        assert_eq!(response.intent, Some(CellIntent::EditingEnded("tag".into())));
    }

    #[test]
    fn test_focus_lost_on_invalid_text() {
        let v = Validation::email_address();
        let mut cell = TagCellController::default();
        cell.handle_focus_gained("x");
        cell.handle_focus_lost("x", Some(&v));
        assert_eq!(cell.mode(), TagMode::Invalid);
    }

    #[test]
    fn test_delete_backward() {
        let config = Configuration::new();
        let mut cell = TagCellController::default();

        let response = cell.handle_delete_backward("", &config);
        assert_eq!(response.intent, Some(CellIntent::RequestDeletePreviousChip));

        let response = cell.handle_delete_backward("ab", &config);
        assert!(response.accept);
        assert_eq!(response.intent, None);
    }

    #[test]
    fn test_intrinsic_width_padding() {
        assert_eq!(TagCellController::intrinsic_width(42.0), 52.0);
    }

    #[test]
    fn test_apply_replacement() {
        assert_eq!(apply_replacement("", 0..0, "a"), "a");
        assert_eq!(apply_replacement("abc", 3..3, "d"), "abcd");
        assert_eq!(apply_replacement("abc", 1..2, ""), "ac");
        assert_eq!(apply_replacement("äbc", 0..1, "a"), "abc");
        assert_eq!(apply_replacement("abc", 2..10, "!"), "ab!");
        assert_eq!(apply_replacement("abc", 5..7, "!"), "abc!");
    }
}
