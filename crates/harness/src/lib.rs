//! Cycle-accurate host harness for the Orion RISC-V SoC.
//!
//! This crate drives a compiled hardware model of the SoC from the host and provides:
//! 1. **Model interface:** Traits a model-hosting layer implements (step function, memory, debug probes, waveform sink).
//! 2. **Clock/reset driver:** Three-phase clocked evaluation, reset sequencing, and waveform timestamps.
//! 3. **Virtual devices:** A polled register window for console output, counters, and termination requests.
//! 4. **Simulation:** Hex image loading, memory dumps, the run loop, and termination arbitration.
//! 5. **Tracing:** Per-cycle and spike-compatible per-instruction commit logs.

/// Common types and constants (errors, VDEV layout, bit helpers).
pub mod common;
/// Simulator configuration (defaults, log format, verbosity).
pub mod config;
/// Hardware model traits and debug probe value types.
pub mod model;
/// Clock/reset driver, virtual devices, loader, and the simulation controller.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;
/// Trace records and commit-log formatting.
pub mod trace;

/// Error type returned by fallible harness operations.
pub use crate::common::error::HarnessError;
/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Interface implemented by the hardware model under test.
pub use crate::model::HardwareModel;
/// Simulation controller; owns the testbench and the run loop.
pub use crate::sim::Simulator;
