use std::sync::Arc;

/// Glyph whose height defines the vertical step of every line.
pub const REFERENCE_GLYPH: &str = "A";

/// Measures strings rendered in one bound font configuration.
///
/// Implementations must be pure: the same text always yields the same extent.
/// The layout code relies on that to make measuring and drawing agree.
pub trait FontMetrics {
    /// Returns `[width, height]` of `text`.
    fn measure(&self, text: &str) -> [f32; 2];

    /// Vertical step shared by every line laid out with this font.
    fn line_height(&self) -> f32 {
        self.measure(REFERENCE_GLYPH)[1]
    }

    /// Width component of [`Self::measure`].
    fn width(&self, text: &str) -> f32 {
        self.measure(text)[0]
    }
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn measure(&self, text: &str) -> [f32; 2] {
        (**self).measure(text)
    }

    fn line_height(&self) -> f32 {
        (**self).line_height()
    }
}

/// [`FontMetrics`] backed by a parsed `fontdue` face at a fixed pixel size.
///
/// Widths are the sum of advance widths with pair kerning applied between
/// neighbouring glyphs. Heights are the face's line size (ascent, descent and
/// line gap) so every non-empty string reports the same height.
#[derive(Clone)]
pub struct FontdueMetrics {
    font: Arc<fontdue::Font>,
    font_size: f32,
    line_size: f32,
}

impl FontdueMetrics {
    pub fn new(font: Arc<fontdue::Font>, font_size: f32) -> Self {
        let line_size = font
            .horizontal_line_metrics(font_size)
            .map(|m| m.ascent - m.descent + m.line_gap)
            .unwrap_or(font_size);

        Self {
            font,
            font_size,
            line_size,
        }
    }

    pub fn font(&self) -> &Arc<fontdue::Font> {
        &self.font
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl FontMetrics for FontdueMetrics {
    fn measure(&self, text: &str) -> [f32; 2] {
        let mut width = 0.0;
        let mut previous: Option<u16> = None;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let glyph_idx = self.font.lookup_glyph_index(ch);
            if let Some(prev) = previous {
                width += self
                    .font
                    .horizontal_kern_indexed(prev, glyph_idx, self.font_size)
                    .unwrap_or(0.0);
            }
            width += self
                .font
                .metrics_indexed(glyph_idx, self.font_size)
                .advance_width;
            previous = Some(glyph_idx);
        }

        match previous {
            Some(_) => [width, self.line_size],
            None => [0.0, 0.0],
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::FontMetrics;

    /// Every character advances by the same amount; used to make layout tests exact.
    pub struct FixedAdvance {
        pub advance: f32,
        pub height: f32,
    }

    impl FixedAdvance {
        pub fn new(advance: f32, height: f32) -> Self {
            Self { advance, height }
        }
    }

    impl FontMetrics for FixedAdvance {
        fn measure(&self, text: &str) -> [f32; 2] {
            let count = text.chars().count();
            if count == 0 {
                [0.0, 0.0]
            } else {
                [count as f32 * self.advance, self.height]
            }
        }
    }

    /// `i`, `l` and spaces are narrow, `m` and `w` are wide, the rest are average.
    pub struct Proportional;

    impl FontMetrics for Proportional {
        fn measure(&self, text: &str) -> [f32; 2] {
            let width = text
                .chars()
                .map(|ch| match ch {
                    'i' | 'l' | ' ' => 2.0,
                    'm' | 'w' | 'M' | 'W' => 9.0,
                    _ => 5.0,
                })
                .sum();
            [width, 12.0]
        }
    }
}
