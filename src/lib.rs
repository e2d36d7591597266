//! # Orikaeshi
//!
//! Greedy word-wrap text layout for a single font per block.
//!
//! ## Overview
//!
//! `Orikaeshi` breaks a string into physical lines that fit a maximum width and
//! reports how tall the result is. Explicit `\n` characters are hard breaks,
//! words wrap at whitespace, and a word wider than the line is cut at a
//! character boundary that fits. Drawing is delegated to a [`RenderSink`], so
//! the same layout can feed a CPU rasterizer, a display list or a test recorder.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use orikaeshi::{FontConfig, FontSource, FontSystem, RecordingSink, TextLayoutConfig};
//!
//! # fn main() -> orikaeshi::Result<()> {
//! // 1. Create a FontSystem and load fonts
//! let font_system = FontSystem::new();
//! font_system.load_system_fonts();
//!
//! // 2. Lay out a block; this measures it once
//! let font = FontConfig::new(FontSource::family("sans-serif"), 36.0)?;
//! let config = TextLayoutConfig {
//!     max_width: Some(960),
//!     line_multiplier: 1.5,
//!     ..TextLayoutConfig::default()
//! };
//! let text = font_system.styled_text("Typesetting is the arrangement of text.", font, &config)?;
//! println!("height: {}", text.height());
//!
//! // 3. Draw the stored lines
//! let mut sink = RecordingSink::new();
//! text.render(&mut sink, [32.0, 32.0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! *   **Deterministic layout**: a block is broken once; drawing replays the stored lines.
//! *   **Pluggable metrics**: any [`FontMetrics`] implementation can drive the breaker.
//! *   **Font Management**: system fonts, font files and in-memory fonts via `fontdb`.
//! *   **Thread Safety**: [`FontSystem`] locks its storage internally.

pub mod error;
pub mod font;
pub mod font_storage;
pub mod font_system;
pub mod metrics;
pub mod renderer;
pub mod text;

// common re-exports
pub use error::{Result, TextError};
pub use font::{FontConfig, FontSource, TextColor};
pub use font_storage::FontStorage;
pub use font_system::FontSystem;
pub use metrics::{FontMetrics, FontdueMetrics};
pub use renderer::{DrawCall, RasterSink, RecordingSink, RenderSink};
pub use text::{StyledText, TextLayout, TextLayoutConfig, stacked_height};

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use parking_lot;
