//! Commit-log line formats.
//!
//! Spike commit format:
//!
//! ```text
//! default:    core   0: 3 <pc> (<instr>)
//! reg update: core   0: 3 <pc> (<instr>) <rd> <new_value>
//! store:      core   0: 3 <pc> (<instr>) mem <store_target_address> <data_to_store>
//! load:       core   0: 3 <pc> (<instr>) <rd> <loaded_data> mem <load_target_address>
//! ```

use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::Deserialize;

use super::TraceRecord;
use crate::common::error::HarnessError;

/// Commit-log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One line per cycle, including bubbles.
    #[default]
    Default,
    /// One line per retired instruction in spike's commit-log layout.
    Spike,
}

impl FromStr for LogFormat {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "spike" => Ok(Self::Spike),
            other => Err(HarnessError::UnknownLogFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Spike => "spike",
        })
    }
}

/// Renders the bytes of `data` selected by `mask` as hex, most significant lane first.
///
/// The result has two digits per asserted lane, so a half-word store with mask `0b0011`
/// yields four digits.
pub fn masked_hex(data: u32, mask: u8) -> String {
    let mut out = String::with_capacity(8);
    for lane in (0..4).rev() {
        if mask & (1 << lane) != 0 {
            let byte = (data >> (lane * 8)) & 0xff;
            let _ = write!(out, "{byte:02x}");
        }
    }
    out
}

/// Formats a record as a default-format line (no trailing newline).
pub fn format_default(rec: &TraceRecord) -> String {
    format!(
        "[{:>8}] {} PC: 0x{:08x}, Instr: 0x{:08x}, rd: (x{:<2}: 0x{:08x}, we: {}), rs1: (x{:<2}: 0x{:08x}), rs2: (x{:<2}: 0x{:08x}) ",
        rec.cycle,
        if rec.valid { "       " } else { "INVALID" },
        rec.pc,
        rec.instr,
        rec.rd.index,
        rec.rd.value,
        u8::from(rec.rd.write_enable),
        rec.rs1.index,
        rec.rs1.value,
        rec.rs2.index,
        rec.rs2.value,
    )
}

/// Formats a record as a spike commit-log line, or `None` for a bubble.
pub fn format_spike(rec: &TraceRecord) -> Option<String> {
    if !rec.valid {
        return None;
    }
    let mut line = format!("core   0: 3 0x{:08x} (0x{:08x})", rec.pc, rec.instr);
    let mem = &rec.mem;
    let _ = if mem.is_read() {
        write!(
            line,
            " x{:<2} 0x{:08x} mem 0x{:08x}",
            rec.rd.index, mem.rdata, mem.addr
        )
    } else if mem.is_write() {
        write!(
            line,
            " mem 0x{:08x} 0x{}",
            mem.addr,
            masked_hex(mem.wdata, mem.wmask)
        )
    } else if rec.rd.write_enable && rec.rd.index != 0 {
        write!(line, " x{:<2} 0x{:08x}", rec.rd.index, rec.rd.value)
    } else {
        Ok(())
    };
    Some(line)
}
