use std::collections::VecDeque;

use crate::{
    error::{Result, TextError},
    font::FontConfig,
    metrics::FontMetrics,
    renderer::RenderSink,
};

/// Line width used when [`TextLayoutConfig::max_width`] is left unset.
pub const DEFAULT_MAX_WIDTH: u32 = 1024;

/// Configuration knobs used by the line breaker.
///
/// This is the boundary value callers fill in; [`Self::resolve`] validates it
/// into the [`LayoutConstraints`] the algorithm actually consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayoutConfig {
    /// Maximum line width. `None` falls back to `default_max_width`.
    pub max_width: Option<u32>,
    pub default_max_width: u32,
    /// Scales the reference line height to get the vertical step per line.
    pub line_multiplier: f32,
    /// Added once below the last line.
    pub padding_bottom: u32,
}

impl Default for TextLayoutConfig {
    fn default() -> Self {
        Self {
            max_width: None,
            default_max_width: DEFAULT_MAX_WIDTH,
            line_multiplier: 1.0,
            padding_bottom: 0,
        }
    }
}

impl TextLayoutConfig {
    pub fn with_max_width(max_width: u32) -> Self {
        Self {
            max_width: Some(max_width),
            ..Self::default()
        }
    }

    /// Resolves the default width and rejects values the breaker cannot honor.
    pub fn resolve(&self) -> Result<LayoutConstraints> {
        let max_width = self.max_width.unwrap_or(self.default_max_width);
        if max_width == 0 {
            return Err(TextError::invalid("max width must be positive"));
        }
        if !self.line_multiplier.is_finite() || self.line_multiplier < 0.0 {
            return Err(TextError::invalid(format!(
                "line multiplier must be a non-negative number, got {}",
                self.line_multiplier
            )));
        }

        Ok(LayoutConstraints {
            max_width,
            line_multiplier: self.line_multiplier,
            padding_bottom: self.padding_bottom,
        })
    }
}

/// Validated layout parameters. Only obtainable through
/// [`TextLayoutConfig::resolve`], so `max_width` is always positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConstraints {
    max_width: u32,
    line_multiplier: f32,
    padding_bottom: u32,
}

impl LayoutConstraints {
    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    pub fn line_multiplier(&self) -> f32 {
        self.line_multiplier
    }

    pub fn padding_bottom(&self) -> u32 {
        self.padding_bottom
    }

    /// Vertical advance per produced line, truncated once so repeated
    /// advances never drift. Saturates at `u32::MAX`.
    pub fn line_step(&self, line_height: f32) -> u32 {
        (line_height * self.line_multiplier) as u32
    }
}

/// One physical line produced by the breaker.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    /// Offset from the top of the block. Non-decreasing across lines.
    pub top: u32,
    pub width: f32,
    /// Index of the `\n`-delimited line this was cut from.
    pub source_line: usize,
    /// `true` for every line after the first one cut from the same source line.
    pub continuation: bool,
}

/// Final layout output: the broken lines plus the block height.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<LayoutLine>,
    pub line_step: u32,
    pub padding_bottom: u32,
    /// Every line advance, blank lines included, plus `padding_bottom`.
    /// Saturates instead of wrapping.
    pub total_height: u32,
}

impl TextLayout {
    /// Breaks `content` into lines and sums the vertical space they need.
    pub fn compute<M: FontMetrics + ?Sized>(
        content: &str,
        metrics: &M,
        constraints: &LayoutConstraints,
    ) -> Self {
        let mut breaker = LineBreaker::new(content, metrics, constraints);
        let lines: Vec<LayoutLine> = breaker.by_ref().collect();
        let total_height = breaker.cursor().saturating_add(constraints.padding_bottom);

        log::debug!(
            "laid out {} lines (step {}, width {}), total height {}",
            lines.len(),
            breaker.line_step(),
            constraints.max_width,
            total_height
        );

        Self {
            lines,
            line_step: breaker.line_step(),
            padding_bottom: constraints.padding_bottom,
            total_height,
        }
    }

    /// Emits one draw call per line, left aligned at `origin[0]` and shifted
    /// down by each line's `top`. Returns the block height.
    pub fn render<S: RenderSink + ?Sized>(
        &self,
        font: &FontConfig,
        sink: &mut S,
        origin: [f32; 2],
    ) -> u32 {
        for line in &self.lines {
            sink.draw_text(font, &line.text, [origin[0], origin[1] + line.top as f32]);
        }
        self.total_height
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Splits one explicit line into word tokens.
///
/// A token is a run of non-whitespace characters with any whitespace in
/// front of it attached. Whitespace at the end of the line forms a token of
/// its own.
pub fn word_tokens(line: &str) -> WordTokens<'_> {
    WordTokens { rest: line }
}

/// Iterator returned by [`word_tokens`].
#[derive(Clone, Debug)]
pub struct WordTokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for WordTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let space_end = self
            .rest
            .find(|ch: char| !ch.is_whitespace())
            .unwrap_or(self.rest.len());
        let word_end = self.rest[space_end..]
            .find(char::is_whitespace)
            .map_or(self.rest.len(), |i| space_end + i);

        let (token, rest) = self.rest.split_at(word_end);
        self.rest = rest;
        Some(token)
    }
}

/// Lazy greedy line breaker.
///
/// Lines are produced one explicit (`\n`-delimited) line at a time. Blank
/// explicit lines yield nothing but still advance [`Self::cursor`], so the
/// cursor is only the block height once the iterator is exhausted.
pub struct LineBreaker<'a, M: FontMetrics + ?Sized> {
    metrics: &'a M,
    source_lines: std::iter::Enumerate<std::str::Split<'a, char>>,
    max_width: f32,
    line_step: u32,
    cursor: u32,
    ready: VecDeque<LayoutLine>,
}

impl<'a, M: FontMetrics + ?Sized> LineBreaker<'a, M> {
    pub fn new(content: &'a str, metrics: &'a M, constraints: &LayoutConstraints) -> Self {
        Self {
            metrics,
            source_lines: content.split('\n').enumerate(),
            max_width: constraints.max_width as f32,
            line_step: constraints.line_step(metrics.line_height()),
            cursor: 0,
            ready: VecDeque::new(),
        }
    }

    /// Vertical offset consumed so far.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn line_step(&self) -> u32 {
        self.line_step
    }

    fn emit(&mut self, source_line: usize, text: String, width: f32, continuation: bool) {
        self.ready.push_back(LayoutLine {
            text,
            top: self.cursor,
            width,
            source_line,
            continuation,
        });
        self.cursor = self.cursor.saturating_add(self.line_step);
    }

    fn break_source_line(&mut self, source_line: usize, line: &str) {
        if line.trim().is_empty() {
            self.cursor = self.cursor.saturating_add(self.line_step);
            return;
        }

        let mut pending = String::new();
        let mut pending_width = 0.0;
        let mut first_line = true;

        for token in word_tokens(line) {
            let mut word = token;
            let mut width = self.metrics.width(word);

            let projected = pending_width + width;
            if projected <= self.max_width {
                pending.push_str(word);
                pending_width = projected;
                continue;
            }

            if !pending.is_empty() {
                self.emit(source_line, std::mem::take(&mut pending), pending_width, !first_line);
                first_line = false;
            }

            if !first_line {
                let stripped = word.trim_start();
                if stripped.len() != word.len() {
                    word = stripped;
                    width = self.metrics.width(word);
                }
            }

            while width > self.max_width {
                let (cut, cut_width) = self.fit_prefix(word, width);
                // leading indentation wider than the line is dropped, not drawn
                if !word[..cut].trim().is_empty() {
                    self.emit(source_line, word[..cut].to_owned(), cut_width, !first_line);
                    first_line = false;
                }

                word = word[cut..].trim_start();
                width = self.metrics.width(word);
            }

            pending.clear();
            pending.push_str(word);
            pending_width = width;
        }

        if !pending.is_empty() {
            self.emit(source_line, pending, pending_width, !first_line);
        }
    }

    /// Finds the byte length of a prefix of `word` that fits on one line.
    ///
    /// The first guess assumes uniform glyph widths; it is then shrunk one
    /// character at a time until it fits. At least one character is always
    /// consumed so the caller makes progress.
    fn fit_prefix(&self, word: &str, width: f32) -> (usize, f32) {
        let boundaries: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(word.len()))
            .collect();

        let pieces = (width / self.max_width).ceil().max(1.0) as usize;
        let mut chars = boundaries.len() / pieces;

        while chars > 0 {
            let cut = boundaries[chars - 1];
            let cut_width = self.metrics.width(&word[..cut]);
            if cut_width <= self.max_width {
                return (cut, cut_width);
            }
            chars -= 1;
        }

        let cut = boundaries[0];
        let cut_width = self.metrics.width(&word[..cut]);
        if cut_width > self.max_width {
            log::warn!(
                "glyph {:?} is wider ({}) than the line ({}); placing it on its own line",
                &word[..cut],
                cut_width,
                self.max_width
            );
        }
        (cut, cut_width)
    }
}

impl<M: FontMetrics + ?Sized> Iterator for LineBreaker<'_, M> {
    type Item = LayoutLine;

    fn next(&mut self) -> Option<LayoutLine> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(line);
            }
            let (index, line) = self.source_lines.next()?;
            self.break_source_line(index, line);
        }
    }
}
