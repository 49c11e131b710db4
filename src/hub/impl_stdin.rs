use crate::hub::interface::{HubPlugin, TextField};
use crate::library::logger::interface::Logger;
use std::io::BufRead;
use std::sync::Arc;

/// Stands in for the hub: every input line becomes the new value of the
/// text device.
pub struct HubStdin<R: BufRead> {
    reader: R,
    unit: u8,
    device_id: u32,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl<R: BufRead> HubStdin<R> {
    pub fn new(reader: R, unit: u8, device_id: u32, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            reader,
            unit,
            device_id,
            logger: logger.with_namespace("hub"),
        }
    }

    /// Runs the plugin until input ends. Returns the number of text changes
    /// delivered.
    pub fn run(&mut self, plugin: &mut dyn HubPlugin) -> std::io::Result<usize> {
        plugin.on_start();

        let mut delivered = 0;
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }

            let field = TextField {
                unit: self.unit,
                device_id: self.device_id,
                value: line.trim_end_matches(&['\r', '\n'][..]).to_string(),
            };
            let _ = self
                .logger
                .debug(&format!("Text device Unit={} changed", field.unit));
            plugin.on_text_field_changed(&field);
            delivered += 1;
        }

        plugin.on_stop();
        Ok(delivered)
    }
}
