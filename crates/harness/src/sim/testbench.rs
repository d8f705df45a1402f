//! Clock/reset driver.
//!
//! A generic testbench that owns the model and advances it one clock at a time. It performs:
//! 1. **Three-phase ticks:** Settle with clock low, rising edge, then falling edge.
//! 2. **Reset sequencing:** Holds reset for a number of full clock pulses.
//! 3. **Waveforms:** Emits three timestamped samples per tick to an attached tracer.
//!
//! The testbench knows nothing about the SoC; the VDEV window and probes are the
//! controller's business.

use std::fmt;
use std::path::Path;

use crate::common::constants::{TIME_OFFSET_POST_EDGE, TIME_OFFSET_PRE_EDGE, TIME_UNITS_PER_CYCLE};
use crate::common::error::Result;
use crate::model::{HardwareModel, WaveformFormat, WaveformSink};

/// Drives clock and reset of a hardware model.
pub struct Testbench<M: HardwareModel> {
    model: M,
    /// Cycles since the end of the last reset.
    cycles: u64,
    /// Ticks since construction; never cleared, so waveform time stays monotonic.
    ticks: u64,
    trace: Option<Box<dyn WaveformSink>>,
}

impl<M: HardwareModel> Testbench<M> {
    /// Wraps `model` with clock and reset released.
    pub fn new(model: M) -> Self {
        Self {
            model,
            cycles: 0,
            ticks: 0,
            trace: None,
        }
    }

    /// The model under test.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model under test.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Returns `true` if the model has signalled completion on its own.
    pub fn finished(&self) -> bool {
        self.model.got_finish()
    }

    /// Cycles elapsed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Waveform time of the last rising edge, in time units.
    pub fn time(&self) -> u64 {
        self.ticks * TIME_UNITS_PER_CYCLE
    }

    /// Holds reset for `ncycles` ticks, then releases it.
    ///
    /// At least two cycles are needed for synchronous logic to see a full clock pulse while
    /// reset is asserted. The cycle counter reads zero once this returns.
    pub fn reset(&mut self, ncycles: u32) {
        if ncycles < 2 {
            tracing::warn!(ncycles, "reset held for fewer than two cycles");
        }
        self.cycles = 0;
        self.model.set_reset(true);
        for _ in 0..ncycles {
            self.tick();
        }
        self.model.set_reset(false);
        self.cycles = 0;
    }

    /// Advances the model by one clock cycle.
    pub fn tick(&mut self) {
        self.cycles += 1;
        self.ticks += 1;
        let now = self.ticks * TIME_UNITS_PER_CYCLE;

        // Let combinational logic depending on inputs changed since the last tick settle
        // before the edge.
        self.model.set_clock(false);
        self.model.eval();
        if let Some(trace) = self.trace.as_mut() {
            trace.dump(now - TIME_OFFSET_PRE_EDGE);
        }

        self.model.set_clock(true);
        self.model.eval();
        if let Some(trace) = self.trace.as_mut() {
            trace.dump(now);
        }

        self.model.set_clock(false);
        self.model.eval();
        if let Some(trace) = self.trace.as_mut() {
            trace.dump(now + TIME_OFFSET_POST_EDGE);
            if trace.format() == WaveformFormat::Vcd {
                trace.flush();
            }
        }
    }

    /// Returns `true` if a waveform tracer is attached.
    pub fn is_trace_open(&self) -> bool {
        self.trace.is_some()
    }

    /// Attaches a waveform tracer writing to `path`. Does nothing if one is already open.
    pub fn open_trace(&mut self, path: &Path) -> Result<()> {
        if self.trace.is_none() {
            self.trace = Some(self.model.open_waveform(path)?);
        }
        Ok(())
    }

    /// Attaches an already-constructed tracer, replacing (and closing) any open one.
    pub fn attach_trace(&mut self, sink: Box<dyn WaveformSink>) {
        self.close_trace();
        self.trace = Some(sink);
    }

    /// Closes the waveform tracer, if any.
    pub fn close_trace(&mut self) {
        if let Some(mut trace) = self.trace.take() {
            trace.close();
        }
    }
}

impl<M: HardwareModel> Drop for Testbench<M> {
    fn drop(&mut self) {
        self.close_trace();
    }
}

impl<M: HardwareModel + fmt::Debug> fmt::Debug for Testbench<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Testbench")
            .field("model", &self.model)
            .field("cycles", &self.cycles)
            .field("ticks", &self.ticks)
            .field("trace_open", &self.trace.is_some())
            .finish()
    }
}
