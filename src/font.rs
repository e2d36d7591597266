use std::{fmt, path::PathBuf, sync::Arc};

use crate::error::{Result, TextError};

/// Where the face for a [`FontConfig`] comes from.
#[derive(Clone, PartialEq)]
pub enum FontSource {
    /// A family name plus weight, resolved against the loaded font database.
    ///
    /// The names `serif`, `sans-serif`, `monospace`, `cursive` and `fantasy`
    /// select the matching generic family.
    Family { name: String, weight: u16 },
    /// A font file on disk. The first face in the file is used.
    File(PathBuf),
    /// In-memory font data. The first face is used.
    Binary(Arc<Vec<u8>>),
}

impl FontSource {
    /// Shorthand for a regular-weight family.
    pub fn family(name: impl Into<String>) -> Self {
        Self::Family {
            name: name.into(),
            weight: fontdb::Weight::NORMAL.0,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Human readable label used in errors and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Family { name, weight } => format!("family `{name}` (weight {weight})"),
            Self::File(path) => format!("file `{}`", path.display()),
            Self::Binary(data) => format!("binary font ({} bytes)", data.len()),
        }
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Straight (non-premultiplied) RGBA fill colour, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl TextColor {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a colour from 3 (opaque) or 4 components.
    pub fn from_components(components: &[f32]) -> Result<Self> {
        match *components {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            [r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
            _ => Err(TextError::invalid(format!(
                "font colour needs 3 or 4 components, got {}",
                components.len()
            ))),
        }
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<TextColor> for [f32; 4] {
    fn from(color: TextColor) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

/// Font selection, point size and fill colour for one styled text block.
///
/// Only `source` and `size` influence layout. The colour can be swapped at any
/// time without invalidating measurements.
#[derive(Clone, Debug, PartialEq)]
pub struct FontConfig {
    source: FontSource,
    size: f32,
    pub color: TextColor,
}

impl FontConfig {
    pub fn new(source: FontSource, size: f32) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(TextError::invalid(format!(
                "font size must be a positive number, got {size}"
            )));
        }

        Ok(Self {
            source,
            size,
            color: TextColor::default(),
        })
    }

    pub fn with_color(mut self, color: TextColor) -> Self {
        self.color = color;
        self
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Pixel size the face is measured and rasterized at.
    pub fn size(&self) -> f32 {
        self.size
    }
}
