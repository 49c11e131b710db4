use crate::config::DisplayEndpoint;
use crate::device_display::interface::{DeviceDisplay, DeviceDisplayConnector, DisplayError};
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Connect { host: String, port: u16, uid: String },
    BacklightOn,
    BacklightOff,
    SetConfig { cursor: bool, blinking: bool },
    WriteLine { line: u8, position: u8, text: String },
    ClearDisplay,
    SetCustomCharacter { index: u8, pattern: [u8; 8] },
    Disconnect,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<DisplayCall>,
    fail_connect: bool,
    fail_on_call: Option<usize>,
}

/// Records every peripheral call instead of talking to hardware.
#[derive(Clone)]
pub struct DeviceDisplayFakeConnector {
    state: Arc<Mutex<FakeState>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceDisplayFakeConnector {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
            logger: logger.with_namespace("display").with_namespace("fake"),
        }
    }

    /// Every following connect attempt fails as if the daemon was down.
    #[allow(dead_code)]
    pub fn fail_connect(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_connect = true;
        }
    }

    /// The `n`-th operation (1-based, counted per session, disconnect not
    /// counted) is rejected by the device.
    #[allow(dead_code)]
    pub fn fail_on_call(&self, n: usize) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_on_call = Some(n);
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<DisplayCall> {
        self.state
            .lock()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn clear_calls(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.calls.clear();
        }
    }
}

impl DeviceDisplayConnector for DeviceDisplayFakeConnector {
    fn connect(&self, endpoint: &DisplayEndpoint) -> Result<Box<dyn DeviceDisplay>, DisplayError> {
        let mut state = self.state.lock().map_err(|e| DisplayError::Protocol(e.to_string()))?;
        let _ = self.logger.debug(&format!(
            "DeviceDisplayFake::connect({}, {}, {})",
            endpoint.host, endpoint.port, endpoint.uid
        ));

        if state.fail_connect {
            return Err(DisplayError::Connect {
                host: endpoint.host.clone(),
                port: endpoint.port,
                reason: "connection refused".to_string(),
            });
        }

        state.calls.push(DisplayCall::Connect {
            host: endpoint.host.clone(),
            port: endpoint.port,
            uid: endpoint.uid.clone(),
        });

        Ok(Box::new(DeviceDisplayFake {
            state: self.state.clone(),
            logger: self.logger.clone(),
            operations: 0,
            connected: true,
        }))
    }
}

pub struct DeviceDisplayFake {
    state: Arc<Mutex<FakeState>>,
    logger: Arc<dyn Logger + Send + Sync>,
    operations: usize,
    connected: bool,
}

impl DeviceDisplayFake {
    fn record(&mut self, call: DisplayCall) -> Result<(), DisplayError> {
        if !self.connected {
            return Err(DisplayError::NotConnected);
        }
        let _ = self.logger.debug(&format!("DeviceDisplayFake::{:?}", call));

        let mut state = self.state.lock().map_err(|e| DisplayError::Protocol(e.to_string()))?;
        if call != DisplayCall::Disconnect {
            self.operations += 1;
            if state.fail_on_call == Some(self.operations) {
                return Err(DisplayError::Rejected {
                    function: "fake",
                    reason: format!("injected failure on {:?}", call),
                });
            }
        }
        state.calls.push(call);
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn backlight_on(&mut self) -> Result<(), DisplayError> {
        self.record(DisplayCall::BacklightOn)
    }

    fn backlight_off(&mut self) -> Result<(), DisplayError> {
        self.record(DisplayCall::BacklightOff)
    }

    fn set_config(&mut self, cursor: bool, blinking: bool) -> Result<(), DisplayError> {
        self.record(DisplayCall::SetConfig { cursor, blinking })
    }

    fn write_line(&mut self, line: u8, position: u8, text: &str) -> Result<(), DisplayError> {
        self.record(DisplayCall::WriteLine {
            line,
            position,
            text: text.to_string(),
        })
    }

    fn clear_display(&mut self) -> Result<(), DisplayError> {
        self.record(DisplayCall::ClearDisplay)
    }

    fn set_custom_character(&mut self, index: u8, pattern: [u8; 8]) -> Result<(), DisplayError> {
        self.record(DisplayCall::SetCustomCharacter { index, pattern })
    }

    fn disconnect(&mut self) -> Result<(), DisplayError> {
        self.record(DisplayCall::Disconnect)?;
        self.connected = false;
        Ok(())
    }
}
