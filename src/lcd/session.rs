use crate::config::DisplayEndpoint;
use crate::device_display::interface::{DeviceDisplay, DeviceDisplayConnector};
use crate::lcd::error::{LcdError, Result};
use crate::library::logger::interface::Logger;

/// Connects, hands the open display to `operate`, then disconnects whatever
/// `operate` returned. A failed connect leaves nothing to close.
pub fn run_session<T, F>(
    connector: &dyn DeviceDisplayConnector,
    endpoint: &DisplayEndpoint,
    logger: &dyn Logger,
    operate: F,
) -> Result<T>
where
    F: FnOnce(&mut dyn DeviceDisplay) -> Result<T>,
{
    let mut display = connector.connect(endpoint).map_err(LcdError::Connection)?;

    let result = operate(display.as_mut());

    if let Err(e) = display.disconnect() {
        let _ = logger.debug(&format!("Disconnect failed: {}", e));
    }

    result
}
