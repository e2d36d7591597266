/// Errors surfaced while configuring text or loading fonts.
///
/// Line breaking itself never fails; every variant here is raised at
/// construction time, before any layout work runs.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The font resource could not be located or parsed.
    #[error("failed to load font {font}: {reason}")]
    FontLoad { font: String, reason: String },

    /// A layout or font parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl TextError {
    pub(crate) fn font_load(font: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FontLoad {
            font: font.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TextError>;
