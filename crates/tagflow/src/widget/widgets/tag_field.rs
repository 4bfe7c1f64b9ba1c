//! The tag collection controller.
//!
//! [`TagCollectionController`] owns the [`TagStore`] and one
//! [`TagCellController`] per tag. It turns chip edit events into store
//! mutations, keeps the "one open slot, always last" invariant, decides where
//! edit focus goes, and recomputes layout and natural size after every
//! change.
//!
//! # Event flow
//!
//! 1. The host reports user input through the `handle_*` methods.
//! 2. The chip's cell interprets it and may raise a [`CellIntent`].
//! 3. The controller applies the intent to the store and issues the matching
//!    commands to the [`TagSurface`].
//! 4. The flow layout is recomputed and a size change is announced.
//!
//! # Signals
//!
//! - `finished_editing`: a chip lost focus with non-empty text
//! - `text_changed`: a chip's text changed, or a chip was merged away (`""`)
//! - `size_changed`: the natural size of the field changed
//!
//! # Example
//!
//! ```
//! use tagflow::prelude::*;
//!
//! struct NullSurface;
//!
//! impl TagSurface for NullSurface {
//!     fn measure_text(&self, text: &str, _font: &FontSpec) -> f32 {
//!         text.chars().count() as f32 * 7.0
//!     }
//!     fn insert_chip(&mut self, _index: usize) {}
//!     fn remove_chip(&mut self, _index: usize) {}
//!     fn render_chip(&mut self, _index: usize, _text: &str, _mode: TagMode, _style: &ModeStyle) {}
//!     fn focus_chip(&mut self, _index: usize) {}
//!     fn resign_focus(&mut self, _index: usize) {}
//!     fn reload_all(&mut self, _tags: &[Tag]) {}
//!     fn set_placeholder(&mut self, _text: &str, _visible: bool, _style: &PlaceholderStyle) {}
//!     fn invalidate_size(&mut self, _size: Size, _animated: bool) {}
//!     fn apply_layout(&mut self, _frames: &[Rect]) {}
//! }
//!
//! let mut field = TagCollectionController::new(NullSurface, Configuration::default());
//! field.set_width(320.0);
//!
//! field.handle_tap_empty_area();
//! field.replace_range(0, 0..0, "rust");
//! field.handle_range_replace(0, 4..4, " ");
//!
//! assert_eq!(field.visible_values(), vec!["rust"]);
//! assert_eq!(field.focused_index(), Some(1));
//! ```

use std::ops::Range;
use std::time::Instant;

use tagflow_core::logging::{span_names, targets};
use tagflow_core::{PerfSpan, Signal, Size};

use crate::config::Configuration;
use crate::error::TagResult;
use crate::model::{Tag, TagStore};
use crate::widget::animation::SizeTransition;
use crate::widget::layout::{FlowGeometry, FlowLayout};
use crate::widget::surface::TagSurface;

use super::tag_cell::{CellIntent, TagCellController, TagMode, apply_replacement};

/// Orchestrates the tags of one inline tag field.
pub struct TagCollectionController<S: TagSurface> {
    surface: S,
    config: Configuration,
    store: TagStore,
    /// One cell per tag, parallel to `store`.
    cells: Vec<TagCellController>,
    focused: Option<usize>,
    placeholder_visible: bool,
    /// Text from `set_placeholder`, kept across configuration swaps.
    placeholder_text: Option<String>,

    layout: FlowLayout,
    geometry: FlowGeometry,
    width: f32,
    /// Last natural size announced to the surface.
    reported_size: Size,
    /// Size currently on screen, trailing `reported_size` while animating.
    displayed_size: Size,
    transition: SizeTransition,

    /// Emitted with the final text when a chip loses focus with non-empty text.
    pub finished_editing: Signal<String>,
    /// Emitted when a chip's text changes. Emitted with `""` when a chip is
    /// removed by deleting past the start of the following chip.
    pub text_changed: Signal<String>,
    /// Emitted with the new natural size.
    pub size_changed: Signal<Size>,
}

impl<S: TagSurface> TagCollectionController<S> {
    /// Create an empty field rendering through `surface`.
    pub fn new(surface: S, config: Configuration) -> Self {
        let layout = config.flow_layout();
        let geometry = layout.compute(&[], 0.0);
        let store = TagStore::with_limit(config.tag_limit);

        let mut controller = Self {
            surface,
            config,
            store,
            cells: Vec::new(),
            focused: None,
            placeholder_visible: true,
            placeholder_text: None,
            layout,
            geometry,
            width: 0.0,
            reported_size: Size::ZERO,
            displayed_size: Size::ZERO,
            transition: SizeTransition::new(),
            finished_editing: Signal::new(),
            text_changed: Signal::new(),
            size_changed: Signal::new(),
        };
        controller.reported_size = controller.natural_size();
        controller.displayed_size = controller.reported_size;
        controller.sync_placeholder();
        controller
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the controller and hand back the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    #[inline]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Read-only view of the tag store.
    #[inline]
    pub fn store(&self) -> &TagStore {
        &self.store
    }

    /// All tags, including an open slot.
    pub fn tags(&self) -> &[Tag] {
        self.store.as_slice()
    }

    /// Mode of the chip at `index`.
    pub fn mode_at(&self, index: usize) -> Option<TagMode> {
        self.cells.get(index).map(TagCellController::mode)
    }

    /// The chip holding edit focus, if any.
    #[inline]
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    #[inline]
    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    /// Chip frames and content size from the latest layout pass.
    #[inline]
    pub fn geometry(&self) -> &FlowGeometry {
        &self.geometry
    }

    /// All non-empty tag texts, in order.
    pub fn visible_values(&self) -> Vec<String> {
        self.store.visible_values()
    }

    /// Non-empty tag texts passing the configured validation, in order.
    pub fn valid_values(&self) -> Vec<String> {
        self.store.valid_values(self.config.validation.as_ref())
    }

    // =========================================================================
    // Content & configuration
    // =========================================================================

    /// Replace every tag.
    ///
    /// Empty strings are skipped and the list is cut at the tag limit. Edit
    /// focus is dropped without ending editing.
    pub fn set_tags<I, T>(&mut self, texts: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut tags: Vec<Tag> = texts
            .into_iter()
            .map(Tag::new)
            .filter(|tag| !tag.is_empty())
            .collect();

        if let Some(max) = self.config.tag_limit.max()
            && tags.len() > max
        {
            tracing::warn!(
                target: targets::CONTROLLER,
                given = tags.len(),
                limit = max,
                "tags beyond the limit dropped"
            );
            tags.truncate(max);
        }

        if let Some(index) = self.focused.take() {
            tracing::debug!(target: targets::CONTROLLER, index, "focus dropped by reload");
        }

        self.store.reset(tags);
        let validation = self.config.validation.as_ref();
        self.cells = self
            .store
            .iter()
            .map(|tag| TagCellController::new(&tag.text, validation))
            .collect();

        self.surface.reload_all(self.store.as_slice());
        self.render_all();
        self.set_placeholder_visible(self.store.is_empty());
        self.finish_updates(false);
    }

    /// Replace the configuration wholesale.
    ///
    /// Chip modes are re-derived against the new validation. Tags beyond a
    /// lower tag limit are dropped; if the focused chip is among them, focus
    /// is dropped without ending editing. Placeholder text set through
    /// [`set_placeholder`](Self::set_placeholder) survives the swap.
    pub fn set_configuration(&mut self, config: Configuration) {
        self.config = config;
        if let Some(text) = &self.placeholder_text {
            self.config.placeholder.text.clone_from(text);
        }
        self.store.set_limit(self.config.tag_limit);
        self.layout = self.config.flow_layout();

        let dropped = self.store.truncate_to_limit();
        if dropped > 0 {
            let len = self.store.len();
            tracing::warn!(
                target: targets::CONTROLLER,
                dropped,
                limit = len,
                "tags beyond the new limit dropped"
            );
            self.cells.truncate(len);
            if self.focused.is_some_and(|index| index >= len) {
                self.focused = None;
                tracing::debug!(target: targets::CONTROLLER, "focused chip dropped by limit");
            }
            self.surface.reload_all(self.store.as_slice());
        }

        let validation = self.config.validation.as_ref();
        for (cell, tag) in self.cells.iter_mut().zip(self.store.iter()) {
            if cell.is_focused() {
                cell.handle_text_changed(&tag.text, validation);
            } else {
                cell.configure(&tag.text, validation);
            }
        }

        tracing::debug!(target: targets::CONTROLLER, "configuration replaced");
        self.render_all();
        self.placeholder_visible = self.store.is_empty();
        self.sync_placeholder();
        self.relayout(false);
    }

    /// Change the placeholder text.
    ///
    /// The text overrides the configured one, including after later calls to
    /// [`set_configuration`](Self::set_configuration).
    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.config.placeholder.text.clone_from(&text);
        self.placeholder_text = Some(text);
        self.sync_placeholder();
    }

    /// Report the width available to the field.
    pub fn set_width(&mut self, width: f32) {
        if (self.width - width).abs() < f32::EPSILON {
            return;
        }
        self.width = width;
        self.relayout(false);
    }

    // =========================================================================
    // Programmatic editing
    // =========================================================================

    /// Add a tag, filling the open slot if there is one.
    ///
    /// Returns `false` if the tag limit is reached and there is no open slot.
    pub fn add_tag(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();

        if self.store.has_open_slot() {
            let index = self.store.len() - 1;
            return self.write_text(index, text).is_ok();
        }

        if self.store.is_at_capacity() {
            tracing::debug!(target: targets::CONTROLLER, "add_tag refused at tag limit");
            return false;
        }

        self.insert_tag(Tag::new(text)).is_some()
    }

    /// Remove the first tag with the given text.
    pub fn remove_tag(&mut self, text: &str) -> bool {
        let Some(index) = self.store.find(text) else {
            return false;
        };
        self.remove_tag_at(index).is_ok()
    }

    /// Put `text` into the last tag if that one fails validation, otherwise
    /// add it as a new tag.
    ///
    /// A replaced tag loses edit focus. With `switch_to_next`, focus then
    /// moves on as if the empty area of the field had been tapped.
    pub fn replace_last_invalid_or_insert(&mut self, text: impl Into<String>, switch_to_next: bool) {
        let text = text.into();

        let last_is_invalid = self.config.validation.is_some()
            && self
                .store
                .last()
                .is_some_and(|tag| !self.config.is_valid(&tag.text));

        if last_is_invalid {
            let index = self.store.len() - 1;
            if let Err(err) = self.write_text(index, text) {
                tracing::warn!(target: targets::CONTROLLER, %err, "replacing last tag failed");
                return;
            }
            self.resign(index);
        } else {
            self.add_tag(text);
        }

        if switch_to_next {
            self.handle_tap_empty_area();
        }
    }

    // =========================================================================
    // Collaborator events
    // =========================================================================

    /// A chip's text field proposes replacing `range` (in characters) with
    /// `replacement`. Returns whether the field should apply it.
    ///
    /// An applied edit must be followed by
    /// [`handle_text_changed`](Self::handle_text_changed), or use
    /// [`replace_range`](Self::replace_range) to do both.
    pub fn handle_range_replace(&mut self, index: usize, range: Range<usize>, replacement: &str) -> bool {
        if index >= self.store.len() {
            self.log_out_of_bounds(index, "range replace");
            return false;
        }
        let (Some(tag), Some(cell)) = (self.store.get(index), self.cells.get_mut(index)) else {
            return false;
        };

        tracing::trace!(target: targets::CELL, index, ?range, replacement, "range replace proposed");
        let response = cell.handle_range_replace(&tag.text, replacement, &self.config);

        self.render_chip(index);
        self.dispatch(index, response.intent);
        response.accept
    }

    /// Intercept and, if accepted, apply a range replacement in one step.
    pub fn replace_range(&mut self, index: usize, range: Range<usize>, replacement: &str) -> bool {
        let Some(current) = self.store.get(index).map(|tag| tag.text.clone()) else {
            self.log_out_of_bounds(index, "replace range");
            return false;
        };

        if !self.handle_range_replace(index, range.clone(), replacement) {
            return false;
        }

        let updated = apply_replacement(&current, range, replacement);
        if updated != current {
            self.handle_text_changed(index, updated);
        }
        true
    }

    /// The text of the chip at `index` changed.
    pub fn handle_text_changed(&mut self, index: usize, text: impl Into<String>) {
        let text = text.into();
        if let Err(err) = self.write_text(index, text.clone()) {
            tracing::warn!(target: targets::CONTROLLER, %err, "text change ignored");
            return;
        }
        self.text_changed.emit(text);
    }

    /// The chip at `index` became first responder on the host's initiative.
    pub fn handle_begin_edit(&mut self, index: usize) {
        if index >= self.store.len() {
            self.log_out_of_bounds(index, "begin edit");
            return;
        }
        self.move_focus(index, false);
    }

    /// The chip at `index` stopped being first responder on the host's
    /// initiative.
    pub fn handle_end_edit(&mut self, index: usize) {
        if index >= self.store.len() {
            self.log_out_of_bounds(index, "end edit");
            return;
        }
        self.end_editing(index, false);
    }

    /// Return was pressed in the chip at `index`. Returns whether the text
    /// field should apply its default behaviour.
    pub fn handle_return(&mut self, index: usize) -> bool {
        if index >= self.store.len() {
            self.log_out_of_bounds(index, "return");
            return false;
        }
        let (Some(tag), Some(cell)) = (self.store.get(index), self.cells.get_mut(index)) else {
            return false;
        };
        let response = cell.handle_return(&tag.text, &self.config);
        self.dispatch(index, response.intent);
        response.accept
    }

    /// Backward delete was pressed in the chip at `index`, before the text
    /// field applies it. Returns whether the deletion should proceed.
    pub fn handle_delete_backward(&mut self, index: usize) -> bool {
        if index >= self.store.len() {
            self.log_out_of_bounds(index, "delete backward");
            return false;
        }
        let (Some(tag), Some(cell)) = (self.store.get(index), self.cells.get_mut(index)) else {
            return false;
        };
        let response = cell.handle_delete_backward(&tag.text, &self.config);
        self.dispatch(index, response.intent);
        response.accept
    }

    /// The field was tapped outside every chip.
    ///
    /// Focuses the last chip if it is empty, invalid, or the field is full;
    /// otherwise opens a new chip.
    pub fn handle_tap_empty_area(&mut self) {
        let focus_last = self.store.last().is_some_and(|last| {
            last.is_empty() || !self.config.is_valid(&last.text) || self.store.is_at_capacity()
        });

        if focus_last {
            self.focus_chip(self.store.len() - 1);
        } else {
            self.insert_tag(Tag::pending());
        }
    }

    /// The chip at `index` is about to be displayed.
    ///
    /// Consumes its pending focus request, if any.
    pub fn will_display(&mut self, index: usize) {
        if self.store.take_pending_focus(index) {
            self.focus_chip(index);
        }
    }

    // =========================================================================
    // Size
    // =========================================================================

    /// Size the field wants at its current width.
    pub fn natural_size(&self) -> Size {
        Size::new(
            self.width,
            self.config.min_height().max(self.geometry.content_size.height),
        )
    }

    /// Sample the size animation at `now` and return the size to display.
    ///
    /// Never touches the tags.
    pub fn tick(&mut self, now: Instant) -> Size {
        if let Some(size) = self.transition.update(now).size() {
            self.displayed_size = size;
        }
        self.displayed_size
    }

    /// Whether a size animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.transition.is_running()
    }

    // =========================================================================
    // Intents
    // =========================================================================

    fn dispatch(&mut self, index: usize, intent: Option<CellIntent>) {
        let Some(intent) = intent else {
            return;
        };
        tracing::trace!(target: targets::CONTROLLER, index, ?intent, "cell intent");

        match intent {
            CellIntent::AdvanceToNextChip => self.advance(index),
            CellIntent::RequestDeletePreviousChip => self.delete_previous(index),
            CellIntent::ResignFocus => self.resign(index),
            CellIntent::EditingEnded(text) => self.editing_ended(index, text),
        }
    }

    fn advance(&mut self, index: usize) {
        let Some(tag) = self.store.get(index) else {
            return;
        };
        if tag.is_empty() {
            return;
        }
        if let Some(cell) = self.cells.get_mut(index) {
            cell.set_mode(TagMode::View, &tag.text);
        }
        self.render_chip(index);

        if self.store.is_at_capacity() {
            tracing::debug!(target: targets::CONTROLLER, index, "tag limit reached, not advancing");
            self.resign(index);
            return;
        }

        let last = self.store.len() - 1;
        if last != index && self.store.has_open_slot() {
            self.focus_chip(last);
        } else {
            self.insert_tag(Tag::pending());
        }
    }

    fn delete_previous(&mut self, index: usize) {
        if index == 0 {
            return;
        }
        match self.remove_tag_at(index - 1) {
            Ok(_) => self.text_changed.emit(String::new()),
            Err(err) => {
                tracing::warn!(target: targets::CONTROLLER, %err, "could not remove previous chip");
            }
        }
    }

    fn editing_ended(&mut self, index: usize, text: String) {
        if !text.is_empty() {
            self.finished_editing.emit(text);
            return;
        }
        if let Err(err) = self.remove_tag_at(index) {
            tracing::warn!(target: targets::CONTROLLER, %err, "could not remove abandoned chip");
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    fn focus_chip(&mut self, index: usize) {
        self.move_focus(index, true);
    }

    /// Give edit focus to `index`, ending editing on the previous chip.
    fn move_focus(&mut self, mut index: usize, notify_surface: bool) {
        if self.focused == Some(index) {
            return;
        }

        if let Some(current) = self.focused {
            let len_before = self.store.len();
            self.end_editing(current, true);
            // Ending an empty chip removes it.
            if self.store.len() < len_before && current < index {
                index -= 1;
            }
        }

        let Some(tag) = self.store.get(index) else {
            return;
        };
        if let Some(cell) = self.cells.get_mut(index) {
            cell.handle_focus_gained(&tag.text);
        }

        self.focused = Some(index);
        tracing::debug!(target: targets::CONTROLLER, index, "chip focused");
        if notify_surface {
            self.surface.focus_chip(index);
        }
        self.render_chip(index);
    }

    fn resign(&mut self, index: usize) {
        if self.focused == Some(index) {
            self.end_editing(index, true);
        }
    }

    fn end_editing(&mut self, index: usize, notify_surface: bool) {
        if self.focused == Some(index) {
            self.focused = None;
        }
        if notify_surface {
            self.surface.resign_focus(index);
        }

        let (Some(tag), Some(cell)) = (self.store.get(index), self.cells.get_mut(index)) else {
            return;
        };
        let response = cell.handle_focus_lost(&tag.text, self.config.validation.as_ref());

        self.render_chip(index);
        self.dispatch(index, response.intent);
    }

    // =========================================================================
    // Structural updates
    // =========================================================================

    /// Run `updates` as one batch, then recompute layout and hand off any
    /// pending focus.
    fn perform_batch_updates(&mut self, updates: impl FnOnce(&mut Self)) {
        {
            let _perf = PerfSpan::new(span_names::BATCH);
            self.surface.begin_updates();
            updates(self);
            self.surface.end_updates();
        }
        self.finish_updates(true);
    }

    fn finish_updates(&mut self, animated: bool) {
        self.relayout(animated);
        let pending = self.store.iter().position(|tag| tag.pending_focus);
        if let Some(index) = pending {
            self.will_display(index);
        }
    }

    fn insert_tag(&mut self, tag: Tag) -> Option<usize> {
        let was_empty = self.store.is_empty();
        let len_before = self.store.len();

        let index = match self.store.try_append(tag) {
            Ok(index) => index,
            Err(err) => {
                tracing::debug!(target: targets::CONTROLLER, %err, "tag not added");
                return None;
            }
        };
        let text = self.store.get(index).map(|tag| tag.text.clone()).unwrap_or_default();
        let cell = TagCellController::new(&text, self.config.validation.as_ref());

        self.perform_batch_updates(|this| {
            if this.store.len() > len_before {
                this.cells.insert(index, cell);
                this.surface.insert_chip(index);
            } else if let Some(slot) = this.cells.get_mut(index) {
                *slot = cell;
            }
            this.render_chip(index);
            if was_empty {
                this.set_placeholder_visible(false);
            }
        });
        Some(index)
    }

    fn remove_tag_at(&mut self, index: usize) -> TagResult<Tag> {
        let removed = self.store.remove_at(index)?;

        self.focused = match self.focused {
            Some(focused) if focused == index => {
                self.surface.resign_focus(index);
                None
            }
            Some(focused) if focused > index => Some(focused - 1),
            other => other,
        };

        self.perform_batch_updates(|this| {
            if index < this.cells.len() {
                this.cells.remove(index);
            }
            this.surface.remove_chip(index);
            if this.store.is_empty() {
                this.set_placeholder_visible(true);
            }
        });
        Ok(removed)
    }

    /// Store `text` at `index`, re-derive the chip's mode and relayout.
    fn write_text(&mut self, index: usize, text: String) -> TagResult<()> {
        self.store.replace_text(index, text)?;
        if let (Some(tag), Some(cell)) = (self.store.get(index), self.cells.get_mut(index)) {
            cell.handle_text_changed(&tag.text, self.config.validation.as_ref());
        }
        self.render_chip(index);
        self.relayout(true);
        Ok(())
    }

    // =========================================================================
    // Rendering & layout
    // =========================================================================

    fn render_chip(&mut self, index: usize) {
        let (Some(tag), Some(cell)) = (self.store.get(index), self.cells.get(index)) else {
            return;
        };
        let mode = cell.mode();
        self.surface
            .render_chip(index, &tag.text, mode, self.config.styles.get(mode));
    }

    fn render_all(&mut self) {
        for index in 0..self.store.len() {
            self.render_chip(index);
        }
    }

    fn set_placeholder_visible(&mut self, visible: bool) {
        if self.placeholder_visible != visible {
            self.placeholder_visible = visible;
            self.sync_placeholder();
        }
    }

    fn sync_placeholder(&mut self) {
        let placeholder = &self.config.placeholder;
        self.surface
            .set_placeholder(&placeholder.text, self.placeholder_visible, placeholder);
    }

    fn relayout(&mut self, animated: bool) {
        let max_width = self.config.max_chip_width(self.width);
        let sizes: Vec<Size> = self
            .store
            .iter()
            .zip(&self.cells)
            .map(|(tag, cell)| {
                let font = &self.config.styles.get(cell.mode()).font;
                let measured = self.surface.measure_text(&tag.text, font);
                let width = TagCellController::intrinsic_width(measured).min(max_width);
                Size::new(width, self.config.cell_height)
            })
            .collect();

        self.geometry = self.layout.compute(&sizes, self.width);
        self.surface.apply_layout(&self.geometry.frames);
        self.invalidate_size(animated);
    }

    fn invalidate_size(&mut self, animated: bool) {
        let size = self.natural_size();
        if size.approx_eq(&self.reported_size) {
            return;
        }

        tracing::debug!(
            target: targets::LAYOUT,
            width = size.width,
            height = size.height,
            animated,
            "natural size changed"
        );

        self.reported_size = size;
        if animated {
            self.transition.start(self.displayed_size, size, Instant::now());
        } else {
            self.transition.stop();
            self.displayed_size = size;
        }
        self.surface.invalidate_size(size, animated);
        self.size_changed.emit(size);
    }

    fn log_out_of_bounds(&self, index: usize, operation: &str) {
        tracing::warn!(
            target: targets::CONTROLLER,
            index,
            len = self.store.len(),
            operation,
            "chip event out of bounds"
        );
    }
}
