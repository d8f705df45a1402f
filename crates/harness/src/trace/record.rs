//! Per-cycle probe snapshot.

use crate::model::{DebugProbes, MemAccess, RegRead, RegWrite};

/// Snapshot of the debug probes for one cycle.
///
/// Register indices are masked to 5 bits and byte masks to 4 lanes on capture, so the
/// formatters never see out-of-range values from wider model signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceRecord {
    /// Cycle number the snapshot was taken after.
    pub cycle: u64,
    /// An instruction retired on this cycle.
    pub valid: bool,
    /// PC of the retiring instruction.
    pub pc: u32,
    /// Instruction encoding.
    pub instr: u32,
    /// Destination register write.
    pub rd: RegWrite,
    /// First source operand.
    pub rs1: RegRead,
    /// Second source operand.
    pub rs2: RegRead,
    /// Data memory transaction.
    pub mem: MemAccess,
}

impl TraceRecord {
    /// Reads every probe of `probes` into a record tagged with `cycle`.
    pub fn capture<P: DebugProbes + ?Sized>(cycle: u64, probes: &P) -> Self {
        let rd = probes.rd();
        let rs1 = probes.rs1();
        let rs2 = probes.rs2();
        let mem = probes.mem();
        Self {
            cycle,
            valid: probes.retire_valid(),
            pc: probes.pc(),
            instr: probes.instr(),
            rd: RegWrite {
                index: rd.index & 0x1f,
                ..rd
            },
            rs1: RegRead {
                index: rs1.index & 0x1f,
                ..rs1
            },
            rs2: RegRead {
                index: rs2.index & 0x1f,
                ..rs2
            },
            mem: MemAccess {
                rmask: mem.rmask & 0xf,
                wmask: mem.wmask & 0xf,
                ..mem
            },
        }
    }
}
