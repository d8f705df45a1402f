//! Hardware model interface.
//!
//! The model under test is compiled from a hardware description elsewhere; the harness only
//! sees it through these traits. It provides:
//! 1. **Stepping:** `eval` plus clock and reset inputs, and the model's own finish flag.
//! 2. **Memory:** Word-addressable access to the SoC memory array.
//! 3. **Probes:** Typed read-only accessors for the writeback-stage debug signals.
//! 4. **Waveforms:** An optional tracer sink that records timestamped samples.
//!
//! All reads are meaningful only immediately after an `eval`. The host must not drive any
//! model state other than clock, reset, and the VDEV window in memory.

mod probes;

pub use probes::{DebugProbes, MemAccess, RegRead, RegWrite};

use std::path::Path;

use crate::common::error::{HarnessError, Result};

/// Waveform file encodings a tracer may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformFormat {
    /// Value Change Dump; flushed every tick.
    Vcd,
    /// Fast Signal Trace; flushed by the tracer itself.
    Fst,
}

impl WaveformFormat {
    /// Conventional default file name for this format.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Vcd => "trace.vcd",
            Self::Fst => "trace.fst",
        }
    }
}

/// A waveform tracer attached to a model.
///
/// The sink samples the model's signals itself; the driver only tells it when.
pub trait WaveformSink {
    /// Encoding written by this sink.
    fn format(&self) -> WaveformFormat;
    /// Records every traced signal at `time`.
    fn dump(&mut self, time: u64);
    /// Flushes buffered samples to the file.
    fn flush(&mut self);
    /// Finishes and closes the file.
    fn close(&mut self);
}

/// A compiled, evaluatable hardware model of the SoC.
pub trait HardwareModel: DebugProbes {
    /// Settles the model for the current input values.
    fn eval(&mut self);

    /// Drives the clock input.
    fn set_clock(&mut self, high: bool);

    /// Drives the (active-high) reset input.
    fn set_reset(&mut self, asserted: bool);

    /// Returns `true` once the model has signalled completion on its own (`$finish`).
    fn got_finish(&self) -> bool;

    /// The SoC memory array, one 32-bit word per entry.
    fn memory(&self) -> &[u32];

    /// Mutable view of the SoC memory array.
    fn memory_mut(&mut self) -> &mut [u32];

    /// Encoding [`HardwareModel::open_waveform`] would produce, or `None` without tracing.
    fn waveform_format(&self) -> Option<WaveformFormat> {
        None
    }

    /// Attaches a waveform tracer that writes to `path`.
    ///
    /// Models built without tracing support keep the default.
    fn open_waveform(&mut self, _path: &Path) -> Result<Box<dyn WaveformSink>> {
        Err(HarnessError::WaveformUnsupported)
    }

    /// Memory size in bytes.
    fn memory_bytes(&self) -> u64 {
        self.memory().len() as u64 * 4
    }
}
