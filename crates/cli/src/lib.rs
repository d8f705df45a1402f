//! Command-line front end for the orionsim harness.
//!
//! The hardware model is compiled separately, so this crate ships the argument surface and
//! the run sequence as a library. A model-hosting binary only needs:
//!
//! ```ignore
//! fn main() -> std::process::ExitCode {
//!     orionsim_cli::run_with_model(build_model())
//! }
//! ```
//!
//! The run sequence is:
//! 1. **Configure:** Merge an optional JSON config file with command-line overrides.
//! 2. **Prepare:** Install logging, open waveform/log outputs, load the hex image.
//! 3. **Run:** Simulate until termination, optionally dump memory, and map the exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orionsim_core::common::constants::BANNER;
use orionsim_core::config::Verbosity;
use orionsim_core::{HardwareModel, HarnessError, SimConfig, Simulator};
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "orionsim",
    version,
    about = "RTL simulator for the OrionSoC",
    long_about = "Runs a hex firmware image on the compiled OrionSoC model.\n\nExamples:\n  orionsim -m 100000 build/fibonacci.hex\n  orionsim -t --trace-file fib.vcd -l fib.log --log-format spike build/fibonacci.hex"
)]
pub struct Cli {
    /// Hex memory image to load (one 32-bit word per line).
    pub program: PathBuf,

    /// Maximum number of cycles to simulate.
    #[arg(short, long)]
    pub max_cycles: Option<u64>,

    /// Enable waveform trace.
    #[arg(short, long)]
    pub trace: bool,

    /// Waveform trace file [default: trace.vcd or trace.fst, by the model's tracer].
    #[arg(long)]
    pub trace_file: Option<PathBuf>,

    /// Enable simulation log, written to this file.
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Verbosity (ALL=3, DEFAULT=2, ERRORS=1, NONE=0).
    #[arg(short, long)]
    pub verbosity: Option<i64>,

    /// Simulation log format (choices: spike, default).
    #[arg(long)]
    pub log_format: Option<String>,

    /// Dump memory contents to a file after simulation finishes.
    #[arg(long)]
    pub dump_mem: Option<PathBuf>,

    /// JSON configuration file; command-line options override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Builds the effective configuration.
    pub fn to_config(&self) -> Result<SimConfig, HarnessError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_json_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(cycles) = self.max_cycles {
            config.max_cycles = cycles;
        }
        if self.trace {
            config.trace = true;
        }
        if let Some(path) = &self.trace_file {
            config.trace_file = Some(path.clone());
        }
        if let Some(path) = &self.log {
            config.log_file = Some(path.clone());
        }
        if let Some(level) = self.verbosity {
            config.verbosity = Verbosity::try_from(level)?;
        }
        if let Some(name) = &self.log_format {
            config.log_format = name.parse()?;
        }
        if let Some(path) = &self.dump_mem {
            config.dump_mem = Some(path.clone());
        }
        Ok(config)
    }
}

/// Installs a stderr `tracing` subscriber at the level implied by `verbosity`.
///
/// `RUST_LOG` overrides the level when set.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.level_filter().into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}

/// Parses the process arguments and runs `model`.
pub fn run_with_model<M: HardwareModel>(model: M) -> ExitCode {
    run(&Cli::parse(), model)
}

/// Runs `model` as directed by `cli` and returns the process exit status.
pub fn run<M: HardwareModel>(cli: &Cli, model: M) -> ExitCode {
    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            return ExitCode::FAILURE;
        }
    };
    let verbosity = config.verbosity;
    init_logging(verbosity);
    if verbosity.allows(Verbosity::Default) {
        println!("{BANNER}");
    }
    tracing::debug!(?config, "effective configuration");

    let dump_path = config.dump_mem.clone();
    let mut sim = Simulator::new(model, config);
    sim.open_configured_outputs();

    if let Err(e) = sim.load_hex(&cli.program) {
        eprintln!("[ERROR] {e}");
        eprintln!("        Memory initialization failed");
        return ExitCode::FAILURE;
    }

    let termination = sim.run();
    if verbosity.allows(Verbosity::All) {
        sim.stats().print();
    }

    if let Some(path) = dump_path {
        if let Err(e) = sim.dump_mem(&path) {
            eprintln!("[ERROR] {e}");
        }
    }

    ExitCode::from(exit_byte(termination.exit_code()))
}

/// Low 8 bits of a signed exit code, as the OS reports it.
pub fn exit_byte(code: i32) -> u8 {
    code as u8
}
