//! Writeback-stage debug probes.
//!
//! The probes describe the instruction leaving the pipeline on the current cycle. They are
//! used for tracing and console detection only and never feed back into the simulation.

/// A register file write observed at writeback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegWrite {
    /// Destination register index.
    pub index: u8,
    /// Value written.
    pub value: u32,
    /// Write enable.
    pub write_enable: bool,
}

/// A source register read observed at writeback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegRead {
    /// Source register index.
    pub index: u8,
    /// Value read.
    pub value: u32,
}

/// A data memory transaction observed at writeback.
///
/// Masks carry one bit per byte lane (bit 0 = least significant byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemAccess {
    /// Byte address of the access.
    pub addr: u32,
    /// Byte lanes read.
    pub rmask: u8,
    /// Byte lanes written.
    pub wmask: u8,
    /// Data returned by a read.
    pub rdata: u32,
    /// Data supplied by a write.
    pub wdata: u32,
}

impl MemAccess {
    /// Returns `true` if any byte lane was read.
    #[inline]
    pub fn is_read(&self) -> bool {
        self.rmask & 0xf != 0
    }

    /// Returns `true` if any byte lane was written.
    #[inline]
    pub fn is_write(&self) -> bool {
        self.wmask & 0xf != 0
    }
}

/// Read-only accessors for the model's debug signals.
pub trait DebugProbes {
    /// An instruction retired this cycle.
    fn retire_valid(&self) -> bool;
    /// PC of the retiring instruction.
    fn pc(&self) -> u32;
    /// Encoding of the retiring instruction.
    fn instr(&self) -> u32;
    /// Destination register write.
    fn rd(&self) -> RegWrite;
    /// First source register read.
    fn rs1(&self) -> RegRead;
    /// Second source register read.
    fn rs2(&self) -> RegRead;
    /// Data memory transaction.
    fn mem(&self) -> MemAccess;
}
