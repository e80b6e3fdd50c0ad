//! A drawing surface that records every operation.
//!
//! [`RecordingSurface`] backs headless rendering and tests. Text is measured
//! with a fixed advance per grapheme cluster, which gives a proportional,
//! deterministic metric without a font rasterizer.

use unicode_segmentation::UnicodeSegmentation;

use crate::surface::{DrawingSurface, FontSpec};
use crate::types::{Color, Point, Rect, Size};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The surface was resized.
    Resize(Size),
    /// A region was cleared.
    Clear(Rect),
    /// A rectangle was filled.
    FillRect { rect: Rect, color: Color },
    /// The font changed.
    SetFont(FontSpec),
    /// Text was drawn.
    Text {
        text: String,
        origin: Point,
        color: Color,
    },
    /// A line was stroked.
    Line { from: Point, to: Point, color: Color },
}

/// In-memory surface that keeps a log of [`DrawCommand`]s.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    font: Option<FontSpec>,
    char_width: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Default advance width per grapheme, in pixels.
    pub const DEFAULT_CHAR_WIDTH: f32 = 8.0;

    /// Create a recording surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            font: None,
            char_width: Self::DEFAULT_CHAR_WIDTH,
            commands: Vec::new(),
        }
    }

    /// Set the advance width used by [`measure_text_width`](DrawingSurface::measure_text_width).
    pub fn with_char_width(mut self, char_width: f32) -> Self {
        self.char_width = char_width;
        self
    }

    /// The advance width per grapheme.
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    /// The font most recently set, if any.
    pub fn font(&self) -> Option<&FontSpec> {
        self.font.as_ref()
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Forget all recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// The text of every recorded `Text` command, in draw order.
    pub fn drawn_texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every filled rectangle of the given color.
    pub fn fills_of(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded line strokes.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        tracing::trace!(target: "virtual_select::render", width = size.width, height = size.height, "recording surface resized");
        self.size = size;
        self.commands.push(DrawCommand::Resize(size));
    }

    fn clear(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font = Some(font.clone());
        self.commands.push(DrawCommand::SetFont(font.clone()));
    }

    fn measure_text_width(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.char_width
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_counts_graphemes() {
        let surface = RecordingSurface::new(Size::new(100.0, 100.0)).with_char_width(10.0);
        assert_eq!(surface.measure_text_width(""), 0.0);
        assert_eq!(surface.measure_text_width("abc"), 30.0);
        // "e" + combining acute accent is one cluster.
        assert_eq!(surface.measure_text_width("e\u{301}x"), 20.0);
    }

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::default();
        surface.resize(Size::new(50.0, 20.0));
        surface.fill_rect(Rect::new(0.0, 0.0, 50.0, 20.0), Color::WHITE);
        surface.draw_text("hi", Point::new(6.0, 10.0), Color::BLACK);
        surface.stroke_line(Point::new(0.0, 19.5), Point::new(50.0, 19.5), Color::SEPARATOR_GRAY);

        assert_eq!(surface.size(), Size::new(50.0, 20.0));
        assert_eq!(surface.commands().len(), 4);
        assert_eq!(surface.drawn_texts(), vec!["hi"]);
        assert_eq!(surface.fills_of(Color::WHITE).len(), 1);
        assert_eq!(surface.line_count(), 1);

        let drained = surface.take_commands();
        assert_eq!(drained.len(), 4);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_set_font_is_remembered() {
        let mut surface = RecordingSurface::default();
        assert!(surface.font().is_none());
        let font = FontSpec::default();
        surface.set_font(&font);
        assert_eq!(surface.font(), Some(&font));
    }
}
