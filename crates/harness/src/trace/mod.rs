//! Commit-log tracing.
//!
//! Each cycle the controller snapshots the debug probes into a [`TraceRecord`] and hands it
//! to a [`TraceLogger`], which renders it in one of two line formats:
//! 1. **Default:** One line per cycle, bubbles included and marked `INVALID`.
//! 2. **Spike:** One line per retired instruction, compatible with `spike --log-commits`.

mod format;
mod logger;
mod record;

pub use format::{LogFormat, format_default, format_spike, masked_hex};
pub use logger::TraceLogger;
pub use record::TraceRecord;
