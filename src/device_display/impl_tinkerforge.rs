use crate::config::DisplayEndpoint;
use crate::device_display::charset;
use crate::device_display::interface::{
    DeviceDisplay, DeviceDisplayConnector, DisplayError, CHARS_PER_LINE,
};
use crate::library::logger::interface::Logger;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;
use tinkerforge::base58::Base58;
use tinkerforge::converting_receiver::BrickletRecvTimeoutError;
use tinkerforge::ip_connection::IpConnection;
use tinkerforge::lcd_20x4_bricklet::Lcd20x4Bricklet;

/// Opens brick daemon sessions through the vendor binding and checks that
/// the UID belongs to an LCD 20x4 bricklet before handing out the session.
pub struct DeviceDisplayTinkerforgeConnector {
    connect_timeout: Duration,
    response_timeout: Duration,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceDisplayTinkerforgeConnector {
    pub fn new(
        connect_timeout: Duration,
        response_timeout: Duration,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            connect_timeout,
            response_timeout,
            logger: logger.with_namespace("display").with_namespace("tinkerforge"),
        }
    }

    fn open(&self, endpoint: &DisplayEndpoint) -> Result<IpConnection, DisplayError> {
        let connect_error = |reason: String| DisplayError::Connect {
            host: endpoint.host.clone(),
            port: endpoint.port,
            reason,
        };

        let mut ipcon = IpConnection::new();
        ipcon.set_timeout(self.response_timeout);
        ipcon.set_auto_reconnect(false);

        match ipcon
            .connect((endpoint.host.as_str(), endpoint.port))
            .recv_timeout(self.connect_timeout)
        {
            Ok(Ok(())) => Ok(ipcon),
            Ok(Err(e)) => Err(connect_error(e.to_string())),
            Err(RecvTimeoutError::Timeout) => {
                // Dropping joins the socket thread, which is still inside its own connect.
                std::thread::spawn(move || drop(ipcon));
                Err(connect_error(format!(
                    "no answer within {} ms",
                    self.connect_timeout.as_millis()
                )))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(connect_error("connection thread stopped".to_string()))
            }
        }
    }
}

impl DeviceDisplayConnector for DeviceDisplayTinkerforgeConnector {
    fn connect(&self, endpoint: &DisplayEndpoint) -> Result<Box<dyn DeviceDisplay>, DisplayError> {
        // The binding panics on UIDs it cannot parse.
        endpoint
            .uid
            .as_str()
            .base58_to_u32()
            .map_err(|e| DisplayError::InvalidUid {
                uid: endpoint.uid.clone(),
                reason: e.to_string(),
            })?;

        let _ = self.logger.debug(&format!(
            "Connecting to {}:{} (UID={})",
            endpoint.host, endpoint.port, endpoint.uid
        ));
        let ipcon = self.open(endpoint)?;

        let mut session = BrickletLcd20x4Session::new(ipcon, &endpoint.uid, self.logger.clone());
        if let Err(e) = session.check_identity() {
            let _ = session.disconnect();
            return Err(e);
        }

        Ok(Box::new(session))
    }
}

/// One connected LCD 20x4 bricklet. Setters ask for a response so rejected
/// calls surface as errors instead of being dropped by the daemon.
pub struct BrickletLcd20x4Session {
    ipcon: Option<IpConnection>,
    lcd: Lcd20x4Bricklet,
    uid: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl BrickletLcd20x4Session {
    fn new(ipcon: IpConnection, uid: &str, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let mut lcd = Lcd20x4Bricklet::new(uid, &ipcon);
        lcd.set_response_expected_all(true);

        Self {
            ipcon: Some(ipcon),
            lcd,
            uid: uid.to_string(),
            logger,
        }
    }

    fn ensure_connected(&self) -> Result<(), DisplayError> {
        match self.ipcon {
            Some(_) => Ok(()),
            None => Err(DisplayError::NotConnected),
        }
    }

    fn check_identity(&mut self) -> Result<(), DisplayError> {
        self.ensure_connected()?;

        let identity = self.lcd.get_identity().recv().map_err(|e| match e {
            BrickletRecvTimeoutError::QueueTimeout => DisplayError::NotFound {
                uid: self.uid.clone(),
            },
            other => recv_error("get_identity", other),
        })?;

        if identity.device_identifier != Lcd20x4Bricklet::DEVICE_IDENTIFIER {
            return Err(DisplayError::WrongDevice {
                uid: self.uid.clone(),
                device_identifier: identity.device_identifier,
            });
        }

        let _ = self.logger.debug(&format!(
            "Found LCD 20x4 UID={} at {}:{} (hardware {:?}, firmware {:?})",
            identity.uid,
            identity.connected_uid,
            identity.position,
            identity.hardware_version,
            identity.firmware_version
        ));
        Ok(())
    }
}

fn settle(
    function: &'static str,
    result: Result<(), BrickletRecvTimeoutError>,
) -> Result<(), DisplayError> {
    match result {
        Ok(()) | Err(BrickletRecvTimeoutError::SuccessButResponseExpectedIsDisabled) => Ok(()),
        Err(e) => Err(recv_error(function, e)),
    }
}

fn recv_error(function: &'static str, error: BrickletRecvTimeoutError) -> DisplayError {
    match error {
        BrickletRecvTimeoutError::QueueTimeout => DisplayError::Timeout { function },
        BrickletRecvTimeoutError::InvalidParameter
        | BrickletRecvTimeoutError::FunctionNotSupported
        | BrickletRecvTimeoutError::UnknownError => DisplayError::Rejected {
            function,
            reason: error.to_string(),
        },
        BrickletRecvTimeoutError::NotConnected | BrickletRecvTimeoutError::QueueDisconnected => {
            DisplayError::NotConnected
        }
        BrickletRecvTimeoutError::MalformedPacket
        | BrickletRecvTimeoutError::SuccessButResponseExpectedIsDisabled => {
            DisplayError::Protocol(format!("{}: {}", function, error))
        }
    }
}

/// Display ROM bytes carried as U+0000..U+00FF, the form the binding
/// expects. The line holds 20 characters, the rest is cut.
fn wire_text(text: &str) -> String {
    charset::encode(text)
        .into_iter()
        .take(CHARS_PER_LINE as usize)
        .map(char::from)
        .collect()
}

impl DeviceDisplay for BrickletLcd20x4Session {
    fn backlight_on(&mut self) -> Result<(), DisplayError> {
        self.ensure_connected()?;
        settle("backlight_on", self.lcd.backlight_on().recv())
    }

    fn backlight_off(&mut self) -> Result<(), DisplayError> {
        self.ensure_connected()?;
        settle("backlight_off", self.lcd.backlight_off().recv())
    }

    fn set_config(&mut self, cursor: bool, blinking: bool) -> Result<(), DisplayError> {
        self.ensure_connected()?;
        settle("set_config", self.lcd.set_config(cursor, blinking).recv())
    }

    fn write_line(&mut self, line: u8, position: u8, text: &str) -> Result<(), DisplayError> {
        self.ensure_connected()?;
        settle(
            "write_line",
            self.lcd.write_line(line, position, wire_text(text)).recv(),
        )
    }

    fn clear_display(&mut self) -> Result<(), DisplayError> {
        self.ensure_connected()?;
        settle("clear_display", self.lcd.clear_display().recv())
    }

    fn set_custom_character(&mut self, index: u8, pattern: [u8; 8]) -> Result<(), DisplayError> {
        self.ensure_connected()?;
        settle(
            "set_custom_character",
            self.lcd.set_custom_character(index, pattern).recv(),
        )
    }

    fn disconnect(&mut self) -> Result<(), DisplayError> {
        if let Some(ipcon) = self.ipcon.take() {
            // The daemon may already have dropped the socket.
            let _ = ipcon.disconnect().recv();
            let _ = self
                .logger
                .debug(&format!("Disconnected from UID={}", self.uid));
        }
        Ok(())
    }
}
