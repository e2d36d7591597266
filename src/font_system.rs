use parking_lot::Mutex;

use crate::{
    error::Result,
    font::{FontConfig, TextColor},
    font_storage::FontStorage,
    metrics::{FontMetrics, FontdueMetrics},
    renderer::RasterSink,
    text::{StyledText, TextLayoutConfig},
};

/// High-level entry point for laying out and drawing text.
///
/// This struct owns the [`FontStorage`] behind a `Mutex` so one instance can be
/// shared between threads, which is common in UI frameworks. Layout itself
/// holds the lock only while resolving the face; line breaking runs on an
/// `Arc` of the parsed font.
///
/// The storage is public to allow direct access when necessary
/// (e.g. for batch loading without re-locking per call).
pub struct FontSystem {
    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    /// Creates a new font system with empty storage.
    pub fn new() -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
        }
    }
}

/// font storage initialization
impl FontSystem {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_storage.lock().is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_storage.lock().len()
    }

    /// Sets the family name for the "serif" generic family.
    pub fn set_serif_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_serif_family(family);
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_sans_serif_family(family);
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_monospace_family(family);
    }
}

/// measuring and layout
impl FontSystem {
    /// Binds `font` to a metrics provider.
    pub fn metrics(&self, font: &FontConfig) -> Result<FontdueMetrics> {
        let (_, face) = self.font_storage.lock().resolve(font.source())?;
        Ok(FontdueMetrics::new(face, font.size()))
    }

    /// Returns `[width, height]` of `text` on a single line.
    pub fn text_size(&self, font: &FontConfig, text: &str) -> Result<[f32; 2]> {
        Ok(self.metrics(font)?.measure(text))
    }

    /// Builds a [`StyledText`], laying it out immediately.
    pub fn styled_text(
        &self,
        content: impl Into<String>,
        font: FontConfig,
        config: &TextLayoutConfig,
    ) -> Result<StyledText> {
        config.resolve()?;
        let metrics = self.metrics(&font)?;
        StyledText::new(content, font, config, &metrics)
    }
}

/// cpu rendering
impl FontSystem {
    /// Rasterizes `text` with its top-left corner at `origin`.
    ///
    /// The callback `f` is called for each covered pixel inside `image_size`.
    /// Returns the block height, as [`StyledText::height`].
    pub fn raster_render(
        &self,
        text: &StyledText,
        origin: [f32; 2],
        image_size: [usize; 2],
        f: &mut dyn FnMut([usize; 2], u8, &TextColor),
    ) -> u32 {
        let mut font_storage = self.font_storage.lock();
        let mut sink = RasterSink::new(&mut font_storage, image_size, f);
        text.render(&mut sink, origin)
    }
}
