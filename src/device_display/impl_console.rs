use crate::config::DisplayEndpoint;
use crate::device_display::interface::{
    DeviceDisplay, DeviceDisplayConnector, DisplayError, CHARS_PER_LINE, CUSTOM_CHAR_SLOTS,
    NUM_LINES,
};
use std::sync::{Arc, Mutex};

const ROWS: usize = NUM_LINES as usize;
const COLUMNS: usize = CHARS_PER_LINE as usize;

pub struct ConsoleScreen {
    buffer: [[char; COLUMNS]; ROWS],
    backlight_on: bool,
    custom_chars: [Option<[u8; 8]>; CUSTOM_CHAR_SLOTS as usize],
}

impl ConsoleScreen {
    fn new() -> Self {
        Self {
            buffer: [[' '; COLUMNS]; ROWS],
            backlight_on: true,
            custom_chars: [None; CUSTOM_CHAR_SLOTS as usize],
        }
    }

    #[cfg(test)]
    fn line(&self, line: usize) -> String {
        self.buffer[line].iter().collect()
    }

    fn render(&self) -> String {
        let mut out = String::new();
        out.push('┌');
        out.push_str(&"─".repeat(COLUMNS));
        out.push_str("┐\n");
        for row in &self.buffer {
            out.push('│');
            for &c in row {
                out.push(if self.backlight_on { c } else { ' ' });
            }
            out.push_str("│\n");
        }
        out.push('└');
        out.push_str(&"─".repeat(COLUMNS));
        out.push('┘');
        out
    }
}

/// Renders the 4x20 screen to stdout. Screen contents survive between
/// sessions the way a real panel keeps its contents after disconnect.
#[derive(Clone)]
pub struct DeviceDisplayConsoleConnector {
    screen: Arc<Mutex<ConsoleScreen>>,
    echo: bool,
}

impl DeviceDisplayConsoleConnector {
    pub fn new() -> Self {
        Self {
            screen: Arc::new(Mutex::new(ConsoleScreen::new())),
            echo: true,
        }
    }

    #[cfg(test)]
    pub fn silent() -> Self {
        Self {
            echo: false,
            ..Self::new()
        }
    }

    #[cfg(test)]
    fn line(&self, line: usize) -> String {
        self.screen.lock().map(|s| s.line(line)).unwrap_or_default()
    }
}

impl Default for DeviceDisplayConsoleConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplayConnector for DeviceDisplayConsoleConnector {
    fn connect(&self, _endpoint: &DisplayEndpoint) -> Result<Box<dyn DeviceDisplay>, DisplayError> {
        Ok(Box::new(DeviceDisplayConsole {
            screen: self.screen.clone(),
            echo: self.echo,
        }))
    }
}

pub struct DeviceDisplayConsole {
    screen: Arc<Mutex<ConsoleScreen>>,
    echo: bool,
}

impl DeviceDisplayConsole {
    fn update<F>(&mut self, f: F) -> Result<(), DisplayError>
    where
        F: FnOnce(&mut ConsoleScreen) -> Result<(), DisplayError>,
    {
        let mut screen = self
            .screen
            .lock()
            .map_err(|e| DisplayError::Protocol(e.to_string()))?;
        f(&mut screen)?;
        if self.echo {
            println!("{}", screen.render());
        }
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn backlight_on(&mut self) -> Result<(), DisplayError> {
        self.update(|screen| {
            screen.backlight_on = true;
            Ok(())
        })
    }

    fn backlight_off(&mut self) -> Result<(), DisplayError> {
        self.update(|screen| {
            screen.backlight_on = false;
            Ok(())
        })
    }

    fn set_config(&mut self, _cursor: bool, _blinking: bool) -> Result<(), DisplayError> {
        // No cursor on a console.
        Ok(())
    }

    fn write_line(&mut self, line: u8, position: u8, text: &str) -> Result<(), DisplayError> {
        if line >= NUM_LINES || position >= CHARS_PER_LINE {
            return Err(DisplayError::Rejected {
                function: "write_line",
                reason: format!("invalid cursor position ({}, {})", line, position),
            });
        }

        self.update(|screen| {
            // Characters past the last column are dropped.
            for (i, c) in text.chars().take(COLUMNS - position as usize).enumerate() {
                let glyph = match c as u32 {
                    slot @ 0x08..=0x0F if screen.custom_chars[slot as usize - 8].is_some() => '▒',
                    0x00..=0x1F => ' ',
                    _ => c,
                };
                screen.buffer[line as usize][position as usize + i] = glyph;
            }
            Ok(())
        })
    }

    fn clear_display(&mut self) -> Result<(), DisplayError> {
        self.update(|screen| {
            screen.buffer = [[' '; COLUMNS]; ROWS];
            Ok(())
        })
    }

    fn set_custom_character(&mut self, index: u8, pattern: [u8; 8]) -> Result<(), DisplayError> {
        if index >= CUSTOM_CHAR_SLOTS {
            return Err(DisplayError::Rejected {
                function: "set_custom_character",
                reason: format!("invalid custom character index {}", index),
            });
        }

        let mut screen = self
            .screen
            .lock()
            .map_err(|e| DisplayError::Protocol(e.to_string()))?;
        screen.custom_chars[index as usize] = Some(pattern);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}
