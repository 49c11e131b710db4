use crate::config::Config;
use crate::device_display::impl_fake::DeviceDisplayFakeConnector;
use crate::hub::interface::TextField;
use crate::lcd::main::LcdPlugin;
use crate::library::logger::impl_fake::LoggerFake;
use std::path::PathBuf;
use std::sync::Arc;

pub struct Fixture {
    pub logger: LoggerFake,
    pub display: DeviceDisplayFakeConnector,
    pub plugin: LcdPlugin,
    custom_char_file: PathBuf,
}

impl Fixture {
    /// `name` keeps the custom character file of each test apart.
    pub fn new(name: &str) -> Self {
        let mut config = Config::default();
        config.custom_char_file = std::env::temp_dir().join(format!(
            "lcd20x4-hub-{}-{}.json",
            name,
            std::process::id()
        ));

        let logger = LoggerFake::new();
        let display = DeviceDisplayFakeConnector::new(Arc::new(logger.clone()));
        let plugin = LcdPlugin::new(
            config.clone(),
            Arc::new(logger.clone()),
            Arc::new(display.clone()),
        );

        Self {
            logger,
            display,
            plugin,
            custom_char_file: config.custom_char_file,
        }
    }

    pub fn write_custom_char_file(&self, contents: &str) {
        std::fs::write(&self.custom_char_file, contents).unwrap();
    }

    pub fn text(value: &str) -> TextField {
        TextField {
            unit: 1,
            device_id: 17,
            value: value.to_string(),
        }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.custom_char_file);
    }
}
