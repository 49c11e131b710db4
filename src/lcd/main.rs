use crate::config::Config;
use crate::device_display::interface::DeviceDisplayConnector;
use crate::hub::interface::{HubPlugin, TextField};
use crate::lcd::error::LcdError;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Backlight and cursor state applied by the configuration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub backlight_on: bool,
    pub cursor_on: bool,
    pub cursor_blinking: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            backlight_on: true,
            cursor_on: false,
            cursor_blinking: false,
        }
    }
}

pub const MSG_SET_CONFIG_FAILED: &str =
    "Set bricklet configuration failed. Check bricklet and settings.";

#[derive(Clone)]
pub struct LcdPlugin {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub connector: Arc<dyn DeviceDisplayConnector + Send + Sync>,
}

impl LcdPlugin {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        connector: Arc<dyn DeviceDisplayConnector + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger,
            connector,
        }
    }

    fn write_error_message(&self, error: &LcdError, field: &TextField) -> String {
        match error {
            LcdError::EmptyCommand => format!("write_lines: {}", error),
            e if e.is_out_of_range() => format!(
                "write_lines: {} (Unit={},ID={},JSON={})",
                error, field.unit, field.device_id, field.value
            ),
            _ => format!(
                "write_lines: Failed writing text (Unit={},ID={},JSON={}). Check JSON definition.",
                field.unit, field.device_id, field.value
            ),
        }
    }
}

impl HubPlugin for LcdPlugin {
    fn on_start(&mut self) {
        let _ = self.logger.debug("onStart called");

        if self.config.debug {
            for line in self.config.dump() {
                let _ = self.logger.debug(&line);
            }
        }

        if self.config.endpoint.uid.is_empty() {
            let _ = self.logger.error(&LcdError::MissingUid.to_string());
            return;
        }

        match self.configure(DisplayConfig::default()) {
            Ok(report) => {
                let _ = self.logger.debug(&format!(
                    "set_configuration: OK ({} custom characters, {} skipped)",
                    report.programmed.len(),
                    report.skipped.len()
                ));
            }
            Err(e) => {
                let _ = self.logger.debug(&format!("set_configuration: {}", e));
                let _ = self.logger.error(MSG_SET_CONFIG_FAILED);
            }
        }
    }

    fn on_text_field_changed(&mut self, field: &TextField) {
        let _ = self.logger.debug(&format!(
            "onDeviceModified called Unit:{},ID={},sValue={}",
            field.unit, field.device_id, field.value
        ));

        match self.write_lines(field) {
            Ok(written) => {
                let _ = self
                    .logger
                    .debug(&format!("write_lines: OK ({} directives)", written));
            }
            Err(e) => {
                let _ = self.logger.debug(&format!("write_lines: {}", e));
                let _ = self.logger.error(&self.write_error_message(&e, field));
            }
        }
    }

    fn on_stop(&mut self) {
        let _ = self.logger.debug("Plugin is stopping.");
    }
}
