use config::{Config, DisplayBackend};
use device_display::impl_console::DeviceDisplayConsoleConnector;
use device_display::impl_fake::DeviceDisplayFakeConnector;
use device_display::impl_tinkerforge::DeviceDisplayTinkerforgeConnector;
use device_display::interface::DeviceDisplayConnector;
use hub::impl_stdin::HubStdin;
use lcd::main::LcdPlugin;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::Arc;

mod config;
mod device_display;
mod hub;
mod lcd;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let logger = Arc::new(LoggerConsole::new(config.logger_timezone, config.debug));

    let connector: Arc<dyn DeviceDisplayConnector + Send + Sync> = match config.backend {
        DisplayBackend::Tinkerforge => Arc::new(DeviceDisplayTinkerforgeConnector::new(
            config.connect_timeout,
            config.response_timeout,
            logger.clone(),
        )),
        DisplayBackend::Console => Arc::new(DeviceDisplayConsoleConnector::new()),
        DisplayBackend::Fake => Arc::new(DeviceDisplayFakeConnector::new(logger.clone())),
    };

    let mut plugin = LcdPlugin::new(config.clone(), logger.with_namespace("lcd20x4"), connector);

    let stdin = std::io::stdin();
    let mut hub = HubStdin::new(stdin.lock(), config.text_unit, config.text_unit as u32, logger);

    hub.run(&mut plugin)?;

    Ok(())
}
