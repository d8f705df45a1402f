//! Configuration for the simulation harness.
//!
//! This module defines the parameters the controller consumes. It provides:
//! 1. **Defaults:** Cycle ceiling and RAM base address.
//! 2. **Structure:** A flat `SimConfig` independent of how the values were parsed.
//! 3. **Enums:** Verbosity levels (log format lives in [`crate::trace`]).
//!
//! Configuration is built by the CLI layer from arguments, or deserialized from JSON.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::common::constants;
use crate::common::error::{HarnessError, Result};
use crate::trace::LogFormat;

/// Default configuration constants for the harness.
mod defaults {
    use super::constants;

    /// Maximum number of cycles to simulate before giving up.
    pub const MAX_CYCLES: u64 = constants::DEFAULT_MAX_CYCLES;

    /// Base address of RAM in the core's address space.
    pub const RAM_BASE: u32 = constants::DEFAULT_RAM_BASE;
}

/// Output verbosity of the harness.
///
/// Ordered so that `a >= b` means "`a` prints at least what `b` prints".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(try_from = "i64")]
pub enum Verbosity {
    /// Print nothing.
    None,
    /// Print errors only.
    Errors,
    /// Print progress, warnings, and errors.
    #[default]
    Default,
    /// Print everything, including debug detail.
    All,
}

impl Verbosity {
    /// Returns `true` if messages at `level` should be emitted under this verbosity.
    #[inline]
    pub fn allows(self, level: Self) -> bool {
        self >= level
    }

    /// Maps this verbosity to a `tracing` level filter.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::None => LevelFilter::OFF,
            Self::Errors => LevelFilter::ERROR,
            Self::Default => LevelFilter::INFO,
            Self::All => LevelFilter::TRACE,
        }
    }
}

impl TryFrom<i64> for Verbosity {
    type Error = HarnessError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Errors),
            2 => Ok(Self::Default),
            3 => Ok(Self::All),
            other => Err(HarnessError::InvalidVerbosity(other)),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Errors => "ERRORS",
            Self::Default => "DEFAULT",
            Self::All => "ALL",
        };
        f.write_str(name)
    }
}

/// Root configuration structure for a simulation run.
///
/// # Examples
///
/// ```
/// use orionsim_core::config::{SimConfig, Verbosity};
/// use orionsim_core::trace::LogFormat;
///
/// let config = SimConfig::from_json(r#"{
///     "max_cycles": 5000,
///     "log_file": "sim.log",
///     "log_format": "spike",
///     "verbosity": 1
/// }"#).unwrap();
/// assert_eq!(config.max_cycles, 5000);
/// assert_eq!(config.log_format, LogFormat::Spike);
/// assert_eq!(config.verbosity, Verbosity::Errors);
/// assert!(!config.trace);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    /// Cycle ceiling; the run stops with `MaxCycles` once reached.
    #[serde(default = "SimConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Enable waveform tracing.
    #[serde(default)]
    pub trace: bool,

    /// Waveform output file (used only when `trace` is set).
    ///
    /// `None` picks the conventional name for the model's waveform format.
    #[serde(default)]
    pub trace_file: Option<PathBuf>,

    /// Commit log output file; `None` disables the log.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Commit log line format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// File to dump memory into after the run; `None` skips the dump.
    #[serde(default)]
    pub dump_mem: Option<PathBuf>,

    /// Output verbosity.
    #[serde(default)]
    pub verbosity: Verbosity,

    /// Base address of RAM in the core's address space.
    #[serde(default = "SimConfig::default_ram_base")]
    pub ram_base: u32,
}

impl SimConfig {
    /// Returns the default cycle ceiling.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    /// Returns the default RAM base address.
    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    /// Parses a configuration from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| HarnessError::io("could not read config file", path, e))?;
        Self::from_json(&text)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            trace: false,
            trace_file: None,
            log_file: None,
            log_format: LogFormat::Default,
            dump_mem: None,
            verbosity: Verbosity::Default,
            ram_base: defaults::RAM_BASE,
        }
    }
}
