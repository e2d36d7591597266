/// The line breaker, its configuration and its output.
pub mod layout;
/// Stacking several text blocks vertically.
pub mod stack;
/// Text blocks bound to a font and laid out at construction.
pub mod styled;

pub use layout::{
    DEFAULT_MAX_WIDTH, LayoutConstraints, LayoutLine, LineBreaker, TextLayout, TextLayoutConfig,
    WordTokens, word_tokens,
};
pub use stack::{render_stacked, stacked_height};
pub use styled::StyledText;
