//! Harness-wide constants.
//!
//! This module defines the fixed values shared by the driver, virtual devices, and controller:
//! 1. **VDEV layout:** Window size and register offsets of the virtual device block.
//! 2. **Register fields:** Bit positions inside CONSOLE and SIMCTRL.
//! 3. **Timing:** Reset length and waveform timestamp offsets.
//!
//! ```text
//! -------+------------+-----------------------------------------------
//! Offset | Name       | Description
//! -------+------------+-----------------------------------------------
//! 0x00   | CONSOLE    | [7:0] tx data, [15:8] rx data, [16] tx valid, [17] rx valid
//! 0x04   | reserved   |
//! 0x08   | CYCLE      | cycle counter, low word
//! 0x0C   | CYCLE_HI   | cycle counter, high word
//! 0x10   | INSTRET    | retired instruction counter, low word
//! 0x14   | INSTRET_HI | retired instruction counter, high word
//! 0x18   | reserved   |
//! 0x1C   | SIMCTRL    | [7:0] return code, [8] finish request
//! -------+------------+-----------------------------------------------
//! ```

/// Size of the VDEV window in bytes; it occupies the top of the model's memory.
pub const VDEV_SIZE: u32 = 0x20;

/// CONSOLE register offset.
pub const VDEV_CONSOLE: u32 = 0x00;

/// CYCLE (low word) register offset.
pub const VDEV_CYCLE: u32 = 0x08;

/// CYCLE_HI register offset.
pub const VDEV_CYCLE_HI: u32 = 0x0C;

/// INSTRET (low word) register offset.
pub const VDEV_INSTRET: u32 = 0x10;

/// INSTRET_HI register offset.
pub const VDEV_INSTRET_HI: u32 = 0x14;

/// SIMCTRL register offset.
pub const VDEV_SIMCTRL: u32 = 0x1C;

/// CONSOLE tx-valid bit.
pub const CONSOLE_TX_VALID_BIT: u32 = 16;

/// SIMCTRL finish-request bit.
pub const SIMCTRL_FINISH_BIT: u32 = 8;

/// Number of clock cycles reset is held for at the start of a run.
pub const RESET_CYCLES: u32 = 2;

/// Waveform time units per clock cycle.
pub const TIME_UNITS_PER_CYCLE: u64 = 10;

/// Waveform sample offset before the rising edge.
pub const TIME_OFFSET_PRE_EDGE: u64 = 2;

/// Waveform sample offset after the falling edge.
pub const TIME_OFFSET_POST_EDGE: u64 = 5;

/// Default ceiling on simulated cycles.
pub const DEFAULT_MAX_CYCLES: u64 = 10_000_000;

/// Default base address of RAM as seen by the core.
pub const DEFAULT_RAM_BASE: u32 = 0x0001_0000;

/// Startup banner.
pub const BANNER: &str = concat!(
    "  ____       _              _____ _\n",
    " / __ \\     (_)            / ____(_)\n",
    "| |  | |_ __ _  ___  _ __ | (___  _ _ __ ___\n",
    "| |  | | '__| |/ _ \\| '_ \\ \\___ \\| | '_ ` _ \\ \n",
    "| |__| | |  | | (_) | | | |____) | | | | | | |\n",
    " \\____/|_|  |_|\\___/|_| |_|_____/|_|_| |_| |_|\n",
    "==================================================",
);
