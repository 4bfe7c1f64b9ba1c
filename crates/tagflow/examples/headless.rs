//! Headless tag field session.
//!
//! Drives a `TagCollectionController` through a short editing session with a
//! surface that prints every command it receives. Text is measured as if set
//! in a monospace font.
//!
//! Run with: RUST_LOG=tagflow=debug cargo run -p tagflow --example headless

use std::time::{Duration, Instant};

use tagflow::TagResult;
use tagflow::prelude::*;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r##"
placeholder = { text = "Add recipients..." }
tag_limit = { exactly = 3 }

[validation]
kind = "email_address"
"##;

/// Prints what a real toolkit would draw.
struct ConsoleSurface {
    /// Advance of one glyph at 12pt.
    glyph_width: f32,
}

impl TagSurface for ConsoleSurface {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * self.glyph_width * font.size / 12.0
    }

    fn begin_updates(&mut self) {
        println!("  [batch begin]");
    }

    fn end_updates(&mut self) {
        println!("  [batch end]");
    }

    fn insert_chip(&mut self, index: usize) {
        println!("  insert chip {index}");
    }

    fn remove_chip(&mut self, index: usize) {
        println!("  remove chip {index}");
    }

    fn render_chip(&mut self, index: usize, text: &str, mode: TagMode, style: &ModeStyle) {
        println!("  chip {index}: {text:?} {mode:?} on {:?}", style.background);
    }

    fn focus_chip(&mut self, index: usize) {
        println!("  focus chip {index}");
    }

    fn resign_focus(&mut self, index: usize) {
        println!("  resign chip {index}");
    }

    fn reload_all(&mut self, tags: &[Tag]) {
        println!("  reload {} chips", tags.len());
    }

    fn set_placeholder(&mut self, text: &str, visible: bool, _style: &PlaceholderStyle) {
        println!("  placeholder {text:?} visible={visible}");
    }

    fn invalidate_size(&mut self, size: Size, animated: bool) {
        println!("  size {}x{} animated={animated}", size.width, size.height);
    }

    fn apply_layout(&mut self, frames: &[Rect]) {
        let origins: Vec<(f32, f32)> = frames.iter().map(|f| (f.origin.x, f.origin.y)).collect();
        println!("  layout {origins:?}");
    }
}

fn type_text(field: &mut TagCollectionController<ConsoleSurface>, index: usize, text: &str) {
    for ch in text.chars() {
        let end = field.tags()[index].text.chars().count();
        field.replace_range(index, end..end, &ch.to_string());
    }
}

fn main() -> TagResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Configuration::from_toml_str(CONFIG)?;
    let mut field = TagCollectionController::new(ConsoleSurface { glyph_width: 7.0 }, config);

    field.finished_editing.connect(|text: &String| println!("> finished editing {text:?}"));
    field.text_changed.connect(|text: &String| {
        if text.is_empty() {
            println!("> chip merged away");
        }
    });

    println!("width 220");
    field.set_width(220.0);

    println!("tap");
    field.handle_tap_empty_area();

    println!("type ada@example.com + space");
    type_text(&mut field, 0, "ada@example.com");
    field.replace_range(0, 15..15, " ");

    println!("type grace + return");
    type_text(&mut field, 1, "grace");
    field.handle_return(1);

    println!("end editing");
    field.handle_end_edit(1);

    println!("replace invalid with grace@example.com");
    field.replace_last_invalid_or_insert("grace@example.com", true);

    let start = Instant::now();
    while field.is_animating() {
        let size = field.tick(Instant::now());
        println!("  tick {:?} -> {}", start.elapsed(), size.height);
        std::thread::sleep(Duration::from_millis(50));
    }

    println!("visible: {:?}", field.visible_values());
    println!("valid:   {:?}", field.valid_values());
    Ok(())
}
