use crate::device_display::interface::DisplayError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LcdError>;

#[derive(Debug, Error)]
pub enum LcdError {
    #[error("No JSON string defined for the text device (Unit sValue empty).")]
    EmptyCommand,

    #[error("Malformed JSON command: {0}")]
    MalformedCommand(#[from] serde_json::Error),

    #[error("Wrong line number: {line}. Ensure 0-3.")]
    LineOutOfRange { line: i64 },

    #[error("Wrong position number: {position}. Ensure 0-19.")]
    PositionOutOfRange { position: i64 },

    #[error("Bricklet UID not set. Get the UID using the Brick Viewer.")]
    MissingUid,

    #[error("Connection failed: {0}")]
    Connection(#[source] DisplayError),

    #[error("Display operation failed: {0}")]
    Display(#[from] DisplayError),

    #[error("Can not open file={path} ({reason}).")]
    CustomCharacterFile { path: String, reason: String },

    #[error("No or wrong characters defined.")]
    NoCustomCharacters,

    #[error("Index={id} not in range 0-7.")]
    CustomCharacterIndex { id: i64 },

    #[error("Index={id} pattern '{pattern}' is not 8 values in range 0-255.")]
    CustomCharacterPattern { id: i64, pattern: String },
}

impl LcdError {
    #[must_use]
    pub fn custom_character_file(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::CustomCharacterFile {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Range violations abort a batch but are reported with their own text.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::LineOutOfRange { .. } | Self::PositionOutOfRange { .. }
        )
    }
}
