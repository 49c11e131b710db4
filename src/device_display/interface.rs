use crate::config::DisplayEndpoint;
use thiserror::Error;

pub const NUM_LINES: u8 = 4;
pub const CHARS_PER_LINE: u8 = 20;
pub const CUSTOM_CHAR_SLOTS: u8 = 8;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Could not connect to {host}:{port}: {reason}")]
    Connect {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("Invalid UID '{uid}': {reason}")]
    InvalidUid { uid: String, reason: String },

    #[error("Device with UID '{uid}' did not answer")]
    NotFound { uid: String },

    #[error("Device with UID '{uid}' is not an LCD 20x4 (device identifier {device_identifier})")]
    WrongDevice { uid: String, device_identifier: u16 },

    #[error("Timed out waiting for response to {function}")]
    Timeout { function: &'static str },

    #[error("Device rejected {function}: {reason}")]
    Rejected {
        function: &'static str,
        reason: String,
    },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Display is not connected")]
    NotConnected,
}

/// One open connect→operate→disconnect session against the peripheral.
/// Calls are applied by the device in the order they are made.
pub trait DeviceDisplay {
    fn backlight_on(&mut self) -> Result<(), DisplayError>;

    fn backlight_off(&mut self) -> Result<(), DisplayError>;

    /// Cursor visibility and blinking.
    fn set_config(&mut self, cursor: bool, blinking: bool) -> Result<(), DisplayError>;

    /// Write `text` at `line` (0-3) starting at column `position` (0-19).
    fn write_line(&mut self, line: u8, position: u8, text: &str) -> Result<(), DisplayError>;

    fn clear_display(&mut self) -> Result<(), DisplayError>;

    /// Program custom character slot `index` (0-7). Each byte is one pixel row.
    fn set_custom_character(&mut self, index: u8, pattern: [u8; 8]) -> Result<(), DisplayError>;

    fn disconnect(&mut self) -> Result<(), DisplayError>;

    fn chars_per_line(&self) -> u8 {
        CHARS_PER_LINE
    }
}

/// Opens sessions. One connector lives for the whole process, sessions are
/// opened per hub invocation.
pub trait DeviceDisplayConnector {
    fn connect(&self, endpoint: &DisplayEndpoint) -> Result<Box<dyn DeviceDisplay>, DisplayError>;
}
