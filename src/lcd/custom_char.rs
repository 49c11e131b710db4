use crate::device_display::interface::CUSTOM_CHAR_SLOTS;
use crate::lcd::error::{LcdError, Result};
use crate::lcd::json::integer;
use serde::Deserialize;
use std::path::Path;

/// One glyph from the custom character file, e.g.
/// `{"id":0,"name":"battery","char":"14,27,17,17,17,17,17,31"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomCharacterEntry {
    #[serde(deserialize_with = "integer")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "char")]
    pub pattern: String,
}

impl CustomCharacterEntry {
    pub fn slot(&self) -> Result<u8> {
        if self.id < 0 || self.id >= CUSTOM_CHAR_SLOTS as i64 {
            return Err(LcdError::CustomCharacterIndex { id: self.id });
        }
        Ok(self.id as u8)
    }

    /// Eight comma separated pixel rows.
    pub fn rows(&self) -> Result<[u8; 8]> {
        let invalid = || LcdError::CustomCharacterPattern {
            id: self.id,
            pattern: self.pattern.clone(),
        };

        let values = self
            .pattern
            .trim()
            .split(',')
            .map(|item| item.trim().parse::<u8>())
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|_| invalid())?;

        values.try_into().map_err(|_| invalid())
    }
}

/// Reads the definition file. Every call goes back to disk.
pub fn load(path: &Path) -> Result<Vec<CustomCharacterEntry>> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| LcdError::custom_character_file(path, e))?;
    serde_json::from_str(&contents).map_err(|e| LcdError::custom_character_file(path, e))
}
