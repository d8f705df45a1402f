//! Commit-log sink.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::{LogFormat, TraceRecord, format_default, format_spike};
use crate::common::error::{HarnessError, Result};

/// Writes trace records to a text sink, one flushed line per record.
pub struct TraceLogger {
    out: Box<dyn Write>,
    format: LogFormat,
    lines: u64,
}

impl TraceLogger {
    /// Creates (truncating) the log file at `path`.
    pub fn create(path: &Path, format: LogFormat) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| HarnessError::io("could not open sim log file", path, e))?;
        Ok(Self::from_writer(BufWriter::new(file), format))
    }

    /// Wraps an arbitrary writer.
    pub fn from_writer(out: impl Write + 'static, format: LogFormat) -> Self {
        Self {
            out: Box::new(out),
            format,
            lines: 0,
        }
    }

    /// Current line format.
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Switches the line format for subsequent records.
    pub fn set_format(&mut self, format: LogFormat) {
        self.format = format;
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Renders `rec` in the current format and flushes it.
    ///
    /// Spike format skips bubbles, so a call may write nothing.
    pub fn log(&mut self, rec: &TraceRecord) -> io::Result<()> {
        let line = match self.format {
            LogFormat::Default => Some(format_default(rec)),
            LogFormat::Spike => format_spike(rec),
        };
        if let Some(line) = line {
            writeln!(self.out, "{line}")?;
            self.out.flush()?;
            self.lines += 1;
        }
        Ok(())
    }

    /// Flushes any buffered output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceLogger")
            .field("format", &self.format)
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}
