//! The rendering collaborator.
//!
//! The engine never draws anything. Everything toolkit specific lives behind
//! [`TagSurface`]: text measurement, chip views, first-responder plumbing and
//! resizing the field. The controller issues commands through this trait and
//! the host reports user input back through the controller's `handle_*`
//! methods.

use tagflow_core::{Rect, Size};

use crate::config::{FontSpec, ModeStyle, PlaceholderStyle};
use crate::model::Tag;
use crate::widget::widgets::TagMode;

/// Commands the engine issues to the rendering layer.
///
/// Chip indices always refer to the engine's current tag order, after the
/// mutation that triggered the command.
pub trait TagSurface {
    /// Width of `text` set in `font`, without chip padding.
    fn measure_text(&self, text: &str, font: &FontSpec) -> f32;

    /// Start a batch of structural changes.
    ///
    /// Inserts and removals between `begin_updates` and `end_updates` should
    /// be presented as one atomic visual update.
    fn begin_updates(&mut self) {}

    /// Finish the current batch.
    fn end_updates(&mut self) {}

    /// A chip was inserted at `index`.
    fn insert_chip(&mut self, index: usize);

    /// The chip at `index` was removed.
    fn remove_chip(&mut self, index: usize);

    /// Show `text` in `mode` on the chip at `index`.
    fn render_chip(&mut self, index: usize, text: &str, mode: TagMode, style: &ModeStyle);

    /// Give the chip at `index` keyboard focus.
    fn focus_chip(&mut self, index: usize);

    /// Take keyboard focus away from the chip at `index`.
    ///
    /// The host must not report this back through `handle_end_edit`: the
    /// engine has already processed the end of editing.
    fn resign_focus(&mut self, index: usize);

    /// Rebuild every chip from scratch.
    fn reload_all(&mut self, tags: &[Tag]);

    /// Update the placeholder.
    fn set_placeholder(&mut self, text: &str, visible: bool, style: &PlaceholderStyle);

    /// The field's natural size changed.
    ///
    /// When `animated` is set the host should animate to `size` by sampling
    /// the controller's `tick` each frame.
    fn invalidate_size(&mut self, size: Size, animated: bool);

    /// New chip frames, one per tag, in the field's coordinate space.
    fn apply_layout(&mut self, frames: &[Rect]);
}
