//! Shared test surface that records every command it receives.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use tagflow::prelude::*;
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A command issued by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    BeginUpdates,
    EndUpdates,
    Insert(usize),
    Remove(usize),
    Render { index: usize, text: String, mode: TagMode },
    Focus(usize),
    Resign(usize),
    ReloadAll(Vec<String>),
    Placeholder { text: String, visible: bool },
    InvalidateSize { size: Size, animated: bool },
    Layout(Vec<Rect>),
}

/// Surface that mirrors the chips it was told about and logs commands.
///
/// Text is measured as 7pt per character.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub chips: Vec<String>,
    pub commands: Vec<Command>,
}

impl RecordingSurface {
    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    pub fn saw(&self, command: &Command) -> bool {
        self.commands.contains(command)
    }

    pub fn last_placeholder_visible(&self) -> Option<bool> {
        self.commands.iter().rev().find_map(|command| match command {
            Command::Placeholder { visible, .. } => Some(*visible),
            _ => None,
        })
    }
}

impl TagSurface for RecordingSurface {
    fn measure_text(&self, text: &str, _font: &FontSpec) -> f32 {
        text.chars().count() as f32 * 7.0
    }

    fn begin_updates(&mut self) {
        self.commands.push(Command::BeginUpdates);
    }

    fn end_updates(&mut self) {
        self.commands.push(Command::EndUpdates);
    }

    fn insert_chip(&mut self, index: usize) {
        self.chips.insert(index, String::new());
        self.commands.push(Command::Insert(index));
    }

    fn remove_chip(&mut self, index: usize) {
        self.chips.remove(index);
        self.commands.push(Command::Remove(index));
    }

    fn render_chip(&mut self, index: usize, text: &str, mode: TagMode, _style: &ModeStyle) {
        if let Some(chip) = self.chips.get_mut(index) {
            *chip = text.to_string();
        }
        self.commands.push(Command::Render {
            index,
            text: text.to_string(),
            mode,
        });
    }

    fn focus_chip(&mut self, index: usize) {
        self.commands.push(Command::Focus(index));
    }

    fn resign_focus(&mut self, index: usize) {
        self.commands.push(Command::Resign(index));
    }

    fn reload_all(&mut self, tags: &[Tag]) {
        self.chips = tags.iter().map(|tag| tag.text.clone()).collect();
        self.commands.push(Command::ReloadAll(self.chips.clone()));
    }

    fn set_placeholder(&mut self, text: &str, visible: bool, _style: &PlaceholderStyle) {
        self.commands.push(Command::Placeholder {
            text: text.to_string(),
            visible,
        });
    }

    fn invalidate_size(&mut self, size: Size, animated: bool) {
        self.commands.push(Command::InvalidateSize { size, animated });
    }

    fn apply_layout(&mut self, frames: &[Rect]) {
        self.commands.push(Command::Layout(frames.to_vec()));
    }
}

pub type Field = TagCollectionController<RecordingSurface>;

/// A 300pt wide field with `config`.
pub fn field(config: Configuration) -> Field {
    init_tracing();
    let mut field = TagCollectionController::new(RecordingSurface::default(), config);
    field.set_width(300.0);
    field
}

/// Type `text` at the end of the chip at `index`, one character at a time.
pub fn type_text(field: &mut Field, index: usize, text: &str) {
    for ch in text.chars() {
        let end = field.tags()[index].text.chars().count();
        field.replace_range(index, end..end, &ch.to_string());
    }
}

/// Collect every emission of a string signal.
pub fn record(signal: &Signal<String>) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    signal.connect(move |text: &String| sink.lock().push(text.clone()));
    log
}

/// At most one empty tag outside the focused chip, and it is the last one.
///
/// The focused chip is exempt: a user can clear the text of a chip in the
/// middle of the field, leaving e.g. `["", "b"]` while it is being edited.
/// That chip is removed as soon as it loses focus.
pub fn assert_open_slot_invariant(field: &Field) {
    let tags = field.tags();
    let focused = field.focused_index();
    let empties: Vec<usize> = tags
        .iter()
        .enumerate()
        .filter(|(index, tag)| tag.text.is_empty() && Some(*index) != focused)
        .map(|(index, _)| index)
        .collect();

    assert!(empties.len() <= 1, "more than one open slot: {tags:?}");
    if let Some(&index) = empties.first() {
        assert_eq!(index, tags.len() - 1, "open slot is not last: {tags:?}");
    }
}
