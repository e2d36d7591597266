use crate::{
    error::Result,
    font::{FontConfig, TextColor},
    font_storage::FontStorage,
    metrics::{FontMetrics, FontdueMetrics},
    renderer::RenderSink,
    text::layout::{LayoutConstraints, TextLayout, TextLayoutConfig},
};

/// A block of text bound to one font, laid out once at construction.
///
/// Building a `StyledText` runs the full line breaker, so construction costs
/// time proportional to the content length. The resulting [`TextLayout`] is
/// stored and never recomputed; drawing replays it.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledText {
    content: String,
    font: FontConfig,
    constraints: LayoutConstraints,
    layout: TextLayout,
}

impl StyledText {
    /// Lays out `content` using an already bound metrics provider.
    ///
    /// `metrics` must measure with the same face and size as `font`.
    pub fn new<M: FontMetrics + ?Sized>(
        content: impl Into<String>,
        font: FontConfig,
        config: &TextLayoutConfig,
        metrics: &M,
    ) -> Result<Self> {
        let constraints = config.resolve()?;
        let content = content.into();
        let layout = TextLayout::compute(&content, metrics, &constraints);

        Ok(Self {
            content,
            font,
            constraints,
            layout,
        })
    }

    /// Resolves the face for `font` from `font_storage`, then lays out `content`.
    pub fn load(
        content: impl Into<String>,
        font: FontConfig,
        config: &TextLayoutConfig,
        font_storage: &mut FontStorage,
    ) -> Result<Self> {
        // Validate before touching the font database.
        config.resolve()?;
        let (_, face) = font_storage.resolve(font.source())?;
        let metrics = FontdueMetrics::new(face, font.size());
        Self::new(content, font, config, &metrics)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font(&self) -> &FontConfig {
        &self.font
    }

    pub fn constraints(&self) -> &LayoutConstraints {
        &self.constraints
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Total block height, padding included.
    pub fn height(&self) -> u32 {
        self.layout.total_height
    }

    /// Swaps the fill colour. Layout does not depend on it, so nothing is recomputed.
    pub fn set_color(&mut self, color: TextColor) {
        self.font.color = color;
    }

    /// Width of the whole content on a single line, ignoring wrapping.
    pub fn content_width<M: FontMetrics + ?Sized>(&self, metrics: &M) -> f32 {
        metrics.width(&self.content)
    }

    /// Draws the stored lines with their top-left corner at `origin`.
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S, origin: [f32; 2]) -> u32 {
        self.layout.render(&self.font, sink, origin)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::TextError,
        font::FontSource,
        metrics::testing::FixedAdvance,
        renderer::RecordingSink,
    };

    fn font() -> FontConfig {
        FontConfig::new(FontSource::family("sans-serif"), 16.0).unwrap()
    }

    #[test]
    fn height_includes_padding() {
        let metrics = FixedAdvance::new(5.0, 10.0);
        let config = TextLayoutConfig {
            padding_bottom: 12,
            ..TextLayoutConfig::with_max_width(25)
        };
        let text = StyledText::new("abc def", font(), &config, &metrics).unwrap();

        assert_eq!(text.height(), 2 * 10 + 12);
        assert!(text.height() >= text.constraints().padding_bottom());
    }

    #[test]
    fn empty_content_still_takes_one_line() {
        let metrics = FixedAdvance::new(5.0, 10.0);
        let config = TextLayoutConfig {
            padding_bottom: 4,
            ..TextLayoutConfig::default()
        };
        let text = StyledText::new("", font(), &config, &metrics).unwrap();
        assert_eq!(text.height(), 14);
        assert!(text.layout().lines.is_empty());
    }

    #[test]
    fn measuring_and_drawing_agree() {
        let metrics = FixedAdvance::new(5.0, 10.0);
        let config = TextLayoutConfig::with_max_width(30);
        let text = StyledText::new(
            "supercalifragilistic and\n\nsome trailing words",
            font(),
            &config,
            &metrics,
        )
        .unwrap();

        let mut sink = RecordingSink::default();
        assert_eq!(text.render(&mut sink, [0.0, 0.0]), text.height());
        assert_eq!(text.render(&mut sink, [0.0, 0.0]), text.height());
        assert_eq!(sink.calls.len(), 2 * text.layout().line_count());

        let again = StyledText::new(text.content(), font(), &config, &metrics).unwrap();
        assert_eq!(again, text);
    }

    #[test]
    fn colour_swap_keeps_layout() {
        let metrics = FixedAdvance::new(5.0, 10.0);
        let mut text =
            StyledText::new("abc def", font(), &TextLayoutConfig::with_max_width(25), &metrics)
                .unwrap();
        let before = text.layout().clone();

        text.set_color(TextColor::rgb(0.9, 0.1, 0.1));
        assert_eq!(text.layout(), &before);

        let mut sink = RecordingSink::default();
        text.render(&mut sink, [0.0, 0.0]);
        assert!(sink.calls.iter().all(|call| call.color == TextColor::rgb(0.9, 0.1, 0.1)));
    }

    #[test]
    fn content_width_ignores_wrapping() {
        let metrics = FixedAdvance::new(5.0, 10.0);
        let text =
            StyledText::new("abc def", font(), &TextLayoutConfig::with_max_width(25), &metrics)
                .unwrap();
        assert_eq!(text.content_width(&metrics), 35.0);
    }

    #[test]
    fn invalid_config_is_rejected_before_layout() {
        let metrics = FixedAdvance::new(5.0, 10.0);
        let err = StyledText::new("abc", font(), &TextLayoutConfig::with_max_width(0), &metrics)
            .unwrap_err();
        assert!(matches!(err, TextError::InvalidConfiguration(_)));
    }

    #[test]
    fn load_propagates_font_errors() {
        let mut storage = FontStorage::new();
        let font = FontConfig::new(FontSource::file("/missing/Heading-Bold.ttf"), 24.0).unwrap();

        let err = StyledText::load("title", font, &TextLayoutConfig::default(), &mut storage)
            .unwrap_err();
        assert!(matches!(err, TextError::FontLoad { .. }));
    }
}
