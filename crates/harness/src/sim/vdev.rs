//! Virtual devices (VDEV).
//!
//! A 32-byte register window at the top of the model's memory through which software talks
//! to the host. Evaluated once per cycle, before the clock advances:
//! 1. **Console:** A retiring store of lane 0 to CONSOLE prints its low byte on the host; a set
//!    tx-valid bit is cleared.
//! 2. **Counters:** CYCLE/INSTRET (and their high words) are overwritten with the host counters.
//! 3. **Control:** A set SIMCTRL finish bit latches a termination request and is cleared.
//!
//! Software reading a 64-bit counter must read high, low, high and retry if the high words
//! differ; the host does not update the pair atomically.

use std::io::{self, Write};

use crate::common::bits;
use crate::common::constants::{
    CONSOLE_TX_VALID_BIT, SIMCTRL_FINISH_BIT, VDEV_CONSOLE, VDEV_CYCLE, VDEV_CYCLE_HI,
    VDEV_INSTRET, VDEV_INSTRET_HI, VDEV_SIMCTRL, VDEV_SIZE,
};
use crate::model::HardwareModel;

/// Host side of the VDEV register window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDevices {
    /// Core address of the first VDEV register.
    base: u32,
    /// Memory word index of the first VDEV register.
    base_index: usize,
    /// Return code of a latched, not yet consumed, termination request.
    pending: Option<i8>,
}

impl VirtualDevices {
    /// Places the window in the last `VDEV_SIZE` bytes of a memory of `memory_bytes`
    /// mapped at `ram_base`.
    pub fn new(ram_base: u32, memory_bytes: u64) -> Self {
        let offset = memory_bytes.saturating_sub(u64::from(VDEV_SIZE));
        Self {
            base: ram_base.wrapping_add(offset as u32),
            base_index: (offset / 4) as usize,
            pending: None,
        }
    }

    /// Core address of the window.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Core address of the register at `offset`.
    pub fn register_addr(&self, offset: u32) -> u32 {
        self.base.wrapping_add(offset)
    }

    /// Memory word index of the register at `offset`.
    pub fn register_index(&self, offset: u32) -> usize {
        self.base_index + (offset / 4) as usize
    }

    /// Zeroes every register in the window.
    pub fn clear(&self, memory: &mut [u32]) {
        let end = (self.base_index + (VDEV_SIZE / 4) as usize).min(memory.len());
        if let Some(window) = memory.get_mut(self.base_index..end) {
            window.fill(0);
        }
    }

    /// Reads the register at `offset`, or zero if it lies outside `memory`.
    pub fn read(&self, memory: &[u32], offset: u32) -> u32 {
        memory
            .get(self.register_index(offset))
            .copied()
            .unwrap_or(0)
    }

    fn write(&self, memory: &mut [u32], offset: u32, value: u32) {
        if let Some(word) = memory.get_mut(self.register_index(offset)) {
            *word = value;
        }
    }

    /// Performs one cycle of device side effects against the model's current state.
    ///
    /// Console bytes go to `console`, flushed immediately.
    pub fn eval<M: HardwareModel + ?Sized>(
        &mut self,
        model: &mut M,
        cycles: u64,
        instret: u64,
        console: &mut dyn Write,
    ) -> io::Result<()> {
        // Detected on the retiring store, not by polling CONSOLE.
        let mem = model.mem();
        if model.retire_valid()
            && mem.wmask & 0x1 != 0
            && mem.addr == self.register_addr(VDEV_CONSOLE)
        {
            console.write_all(&[mem.wdata as u8])?;
            console.flush()?;
        }

        let memory = model.memory_mut();

        // The byte came from the probes; a polled tx-valid is only acknowledged.
        let console_reg = self.read(memory, VDEV_CONSOLE);
        if bits::bit(console_reg, CONSOLE_TX_VALID_BIT) {
            self.write(
                memory,
                VDEV_CONSOLE,
                bits::clear_bit(console_reg, CONSOLE_TX_VALID_BIT),
            );
        }

        let (lo, hi) = bits::split_u64(cycles);
        self.write(memory, VDEV_CYCLE, lo);
        self.write(memory, VDEV_CYCLE_HI, hi);

        let (lo, hi) = bits::split_u64(instret);
        self.write(memory, VDEV_INSTRET, lo);
        self.write(memory, VDEV_INSTRET_HI, hi);

        let simctrl = self.read(memory, VDEV_SIMCTRL);
        if bits::bit(simctrl, SIMCTRL_FINISH_BIT) {
            let code = bits::bits(simctrl, 7, 0) as u8 as i8;
            tracing::debug!(code, "termination request latched");
            self.pending = Some(code);
            self.write(
                memory,
                VDEV_SIMCTRL,
                bits::clear_bit(simctrl, SIMCTRL_FINISH_BIT),
            );
        }
        Ok(())
    }

    /// Return code of the latched termination request, if any.
    pub fn pending_request(&self) -> Option<i8> {
        self.pending
    }

    /// Consumes the latched termination request.
    pub fn take_request(&mut self) -> Option<i8> {
        self.pending.take()
    }
}
