use crate::font::FontConfig;

pub mod raster_sink;
pub mod recording_sink;

pub use raster_sink::RasterSink;
pub use recording_sink::{DrawCall, RecordingSink};

/// Drawing surface that places a measured line of text.
///
/// `position` is the top-left corner of the line's box in surface
/// coordinates, **Y-axis goes down**. Layout calls this once per produced
/// line and ignores whatever the surface does with it.
pub trait RenderSink {
    fn draw_text(&mut self, font: &FontConfig, text: &str, position: [f32; 2]);
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn draw_text(&mut self, font: &FontConfig, text: &str, position: [f32; 2]) {
        (**self).draw_text(font, text, position);
    }
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn draw_text(&mut self, font: &FontConfig, text: &str, position: [f32; 2]) {
        (**self).draw_text(font, text, position);
    }
}
