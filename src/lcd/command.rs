use crate::device_display::interface::{DeviceDisplay, CHARS_PER_LINE, NUM_LINES};
use crate::lcd::error::{LcdError, Result};
use crate::lcd::json::integer;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    None,
    Line,
    Display,
}

/// Only 1 and 2 clear anything. Every other value writes without clearing.
impl From<i64> for ClearMode {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Line,
            2 => Self::Display,
            _ => Self::None,
        }
    }
}

fn clear_mode<'de, D>(deserializer: D) -> std::result::Result<ClearMode, D::Error>
where
    D: Deserializer<'de>,
{
    integer(deserializer).map(ClearMode::from)
}

/// One `{"line":..,"position":..,"clear":..,"text":..}` item. Line and
/// position are kept as parsed so range checks can report the bad value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineDirective {
    #[serde(deserialize_with = "integer")]
    pub line: i64,
    #[serde(deserialize_with = "integer")]
    pub position: i64,
    #[serde(rename = "clear", deserialize_with = "clear_mode")]
    pub clear_mode: ClearMode,
    pub text: String,
}

impl LineDirective {
    /// Returns the checked (line, position).
    pub fn validate(&self) -> Result<(u8, u8)> {
        if self.line < 0 || self.line >= NUM_LINES as i64 {
            return Err(LcdError::LineOutOfRange { line: self.line });
        }
        if self.position < 0 || self.position >= CHARS_PER_LINE as i64 {
            return Err(LcdError::PositionOutOfRange {
                position: self.position,
            });
        }
        Ok((self.line as u8, self.position as u8))
    }

    /// Validates, applies the clear mode, then writes the text.
    pub fn execute(&self, display: &mut dyn DeviceDisplay) -> Result<()> {
        let (line, position) = self.validate()?;

        match self.clear_mode {
            ClearMode::None => {}
            ClearMode::Line => {
                let blank = " ".repeat(display.chars_per_line() as usize);
                display.write_line(line, 0, &blank)?;
            }
            ClearMode::Display => display.clear_display()?,
        }

        display.write_line(line, position, &self.text)?;
        Ok(())
    }
}

/// Directives in the order they must be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBatch {
    pub directives: Vec<LineDirective>,
}

impl CommandBatch {
    /// Parses the whole text up front so malformed input never reaches the
    /// display. Ranges are not checked here.
    pub fn parse(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Err(LcdError::EmptyCommand);
        }

        let directives: Vec<LineDirective> = serde_json::from_str(json)?;
        Ok(Self { directives })
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}
