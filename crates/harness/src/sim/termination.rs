//! Run states and termination causes.

use std::fmt;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    /// The model signalled `$finish` on its own.
    Finish,
    /// The configured cycle ceiling was reached.
    MaxCycles,
    /// Software set the SIMCTRL finish bit.
    SoftwareRequest {
        /// Return code from SIMCTRL\[7:0\].
        code: i8,
    },
    /// The loop stopped without any designed condition holding; an internal invariant broke.
    Unknown,
}

impl TerminationCause {
    /// Process exit status for this cause.
    ///
    /// Only a software request can succeed; reaching the cycle ceiling counts as failure.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Finish | Self::MaxCycles => 1,
            Self::SoftwareRequest { code } => i32::from(code),
            Self::Unknown => -1,
        }
    }
}

impl fmt::Display for TerminationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finish => f.write_str("$finish called from RTL"),
            Self::MaxCycles => f.write_str("Reached maximum cycles"),
            Self::SoftwareRequest { code } => {
                write!(f, "Termination request from software (retcode: {code})")
            }
            Self::Unknown => f.write_str("Unknown termination cause"),
        }
    }
}

/// Outcome of a run: the cause plus the PC probe value when it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    /// Why the run stopped.
    pub cause: TerminationCause,
    /// PC probe value at detection.
    pub pc: u32,
}

impl Termination {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        self.cause.exit_code()
    }
}

/// Controller state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Constructed, not yet run.
    #[default]
    Init,
    /// Reset is being driven.
    Resetting,
    /// The run loop is active.
    Running,
    /// The run loop exited.
    Terminated(Termination),
}
