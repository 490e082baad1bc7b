//! Console display unit

use crate::config::OutputFormat;
use data_validator::{DisplayUnit, Reading};
use std::io::Write;
use tracing::warn;

/// Writes every accepted reading as one line to the wrapped writer
pub struct ConsoleDisplay<W> {
    out: W,
    format: OutputFormat,
    rendered: u64,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            rendered: 0,
        }
    }

    /// Number of readings rendered so far
    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_reading(&mut self, reading: &Reading) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{reading}")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, reading)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> DisplayUnit for ConsoleDisplay<W> {
    fn render(&mut self, reading: &Reading) {
        match self.write_reading(reading) {
            Ok(()) => self.rendered += 1,
            Err(e) => warn!("Failed to render reading: {}", e),
        }
    }
}
