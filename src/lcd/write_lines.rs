use crate::hub::interface::TextField;
use crate::lcd::command::CommandBatch;
use crate::lcd::error::Result;
use crate::lcd::main::LcdPlugin;
use crate::lcd::session::run_session;

impl LcdPlugin {
    /// Line-write session for the current text field value. Returns how many
    /// directives were written.
    ///
    /// Directives run in array order. The first out-of-range line or position
    /// stops the batch; whatever was written before it stays on the display.
    pub fn write_lines(&self, field: &TextField) -> Result<usize> {
        let batch = CommandBatch::parse(&field.value)?;
        let _ = self
            .logger
            .debug(&format!("write_lines: Lines: {}", batch.len()));

        run_session(
            self.connector.as_ref(),
            &self.config.endpoint,
            self.logger.as_ref(),
            |display| {
                let mut written = 0;
                for directive in &batch.directives {
                    directive.execute(display)?;
                    let _ = self.logger.info(&format!(
                        "write_lines: Line={},Position={},Text={}",
                        directive.line, directive.position, directive.text
                    ));
                    written += 1;
                }
                Ok(written)
            },
        )
    }
}
