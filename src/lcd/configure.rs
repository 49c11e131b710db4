use crate::device_display::interface::DeviceDisplay;
use crate::lcd::custom_char;
use crate::lcd::error::{LcdError, Result};
use crate::lcd::main::{DisplayConfig, LcdPlugin};
use crate::lcd::session::run_session;

/// Outcome of loading the custom character file into the display.
#[derive(Debug, Default)]
pub struct CustomCharacterReport {
    pub programmed: Vec<u8>,
    /// Non-fatal problems, each already logged.
    pub skipped: Vec<LcdError>,
}

impl LcdPlugin {
    /// Startup session: backlight, cursor, custom characters. A missing or
    /// broken character file is logged and does not fail the session.
    pub fn configure(&self, display_config: DisplayConfig) -> Result<CustomCharacterReport> {
        let _ = self.logger.debug("set_configuration");

        run_session(
            self.connector.as_ref(),
            &self.config.endpoint,
            self.logger.as_ref(),
            |display| {
                if display_config.backlight_on {
                    display.backlight_on()?;
                } else {
                    display.backlight_off()?;
                }
                display.set_config(display_config.cursor_on, display_config.cursor_blinking)?;

                self.load_custom_characters(display)
            },
        )
    }

    fn load_custom_characters(
        &self,
        display: &mut dyn DeviceDisplay,
    ) -> Result<CustomCharacterReport> {
        let mut report = CustomCharacterReport::default();

        let entries = match custom_char::load(&self.config.custom_char_file) {
            Ok(entries) => entries,
            Err(e) => {
                let _ = self.logger.error(&format!("Customchar: {}", e));
                report.skipped.push(e);
                return Ok(report);
            }
        };

        let _ = self
            .logger
            .debug(&format!("Customchar: #characters defined: {}", entries.len()));

        if entries.is_empty() {
            let error = LcdError::NoCustomCharacters;
            let _ = self.logger.error(&format!("Customchar: {}", error));
            report.skipped.push(error);
            return Ok(report);
        }

        for entry in &entries {
            let checked = entry
                .slot()
                .and_then(|slot| entry.rows().map(|rows| (slot, rows)));
            match checked {
                Ok((slot, rows)) => {
                    display.set_custom_character(slot, rows)?;
                    let _ = self.logger.debug(&format!(
                        "Customchar: Index={},Name={},Char={}",
                        slot, entry.name, entry.pattern
                    ));
                    report.programmed.push(slot);
                }
                Err(e) => {
                    let _ = self.logger.error(&format!("Customchar: {}", e));
                    report.skipped.push(e);
                }
            }
        }

        Ok(report)
    }
}
