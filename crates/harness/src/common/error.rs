//! Harness error definitions.
//!
//! Every fallible harness operation reports one of these. They fall into three groups:
//! 1. **Configuration errors:** Unreadable/unwritable files, malformed hex images, bad option values.
//! 2. **Unimplemented input:** Hex origin directives (`@address`), which must never be skipped silently.
//! 3. **Model capability errors:** Features the hosted model does not provide (e.g. waveform tracing).
//!
//! Runtime termination is not an error; see [`crate::sim::termination`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the harness outside of the run loop.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A file could not be opened, read, or written.
    #[error("{action} '{}': {source}", path.display())]
    Io {
        /// What the harness was doing (e.g. `"could not open hex file"`).
        action: &'static str,
        /// The file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An I/O error on an anonymous stream (no file name to report).
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),

    /// A hex image line is not a valid 32-bit hexadecimal word.
    #[error("malformed hex word on line {line}: {text:?}")]
    HexParse {
        /// 1-based line number.
        line: usize,
        /// Offending line content.
        text: String,
    },

    /// A hex image contains an `@address` origin directive.
    #[error("address origin directive on line {line} is not supported: {text:?}")]
    OriginDirective {
        /// 1-based line number.
        line: usize,
        /// Offending line content.
        text: String,
    },

    /// A hex image file was read but its contents were rejected.
    #[error("hex image '{}': {source}", path.display())]
    Image {
        /// The image file.
        path: PathBuf,
        /// What was wrong with it.
        #[source]
        source: Box<HarnessError>,
    },

    /// A memory image does not fit in the model's memory.
    #[error("address out of range: {addr:#010x} (memory holds {size:#x} bytes)")]
    AddressOutOfRange {
        /// First byte address (memory-local) that does not fit.
        addr: u64,
        /// Memory size in bytes.
        size: u64,
    },

    /// An unrecognised log format name.
    #[error("unknown log format: {0:?} (choices: spike, default)")]
    UnknownLogFormat(String),

    /// A verbosity level outside `0..=3`.
    #[error("invalid verbosity value: {0} (ALL=3, DEFAULT=2, ERRORS=1, NONE=0)")]
    InvalidVerbosity(i64),

    /// The hosted model cannot produce waveform traces.
    #[error("waveform tracing is not supported by this model")]
    WaveformUnsupported,

    /// A JSON configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl HarnessError {
    /// Wraps an I/O error with the file it concerns.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Wraps an image content error with the file it came from.
    pub fn image(path: impl Into<PathBuf>, source: Self) -> Self {
        Self::Image {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// Result alias used throughout the harness.
pub type Result<T> = std::result::Result<T, HarnessError>;
