//! Simulation driver, virtual devices, and program loading.
//!
//! Provides the clock/reset testbench, the VDEV bridge, hex image loading and dumping, and
//! the controller that runs the model until a termination condition holds.

/// Emits an info-level message if the verbosity allows default output.
macro_rules! simlog {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity.allows($crate::config::Verbosity::Default) {
            tracing::info!($($arg)*);
        }
    };
}

/// Emits a warning if the verbosity allows default output.
macro_rules! simwarn {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity.allows($crate::config::Verbosity::Default) {
            tracing::warn!($($arg)*);
        }
    };
}

/// Emits an error if the verbosity allows error output.
macro_rules! simerr {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity.allows($crate::config::Verbosity::Errors) {
            tracing::error!($($arg)*);
        }
    };
}

pub mod loader;
mod simulator;
pub mod termination;
pub mod testbench;
pub mod vdev;

pub use simulator::Simulator;
pub use termination::{RunState, Termination, TerminationCause};
pub use testbench::Testbench;
pub use vdev::VirtualDevices;
