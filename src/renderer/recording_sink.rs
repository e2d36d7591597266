use crate::font::{FontConfig, TextColor};

use super::RenderSink;

/// A single `draw_text` request captured by [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub text: String,
    pub position: [f32; 2],
    pub font_size: f32,
    pub color: TextColor,
}

/// Sink that stores draw calls instead of drawing.
///
/// Useful when the final surface lives elsewhere (another thread, a display
/// list) or to inspect where lines landed.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<DrawCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all recorded calls so the sink can be reused.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Replays the recorded calls into another sink with the same font.
    pub fn replay<S: RenderSink + ?Sized>(&self, font: &FontConfig, sink: &mut S) {
        for call in &self.calls {
            sink.draw_text(font, &call.text, call.position);
        }
    }
}

impl RenderSink for RecordingSink {
    fn draw_text(&mut self, font: &FontConfig, text: &str, position: [f32; 2]) {
        self.calls.push(DrawCall {
            text: text.to_owned(),
            position,
            font_size: font.size(),
            color: font.color,
        });
    }
}
