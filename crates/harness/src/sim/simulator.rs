//! Simulation controller.
//!
//! Composes the testbench, the VDEV bridge, and the commit logger. Each loop iteration:
//! 1. **Check:** Stop on model finish, cycle ceiling, or a latched software request.
//! 2. **Devices:** Evaluate VDEV side effects against the state left by the previous tick.
//! 3. **Tick:** Advance the model one clock.
//! 4. **Log:** Write a trace record if a log is open.
//! 5. **Count:** Bump the retired-instruction counter if an instruction retired.
//!
//! A cycle on which termination is detected is never ticked.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::loader;
use super::termination::{RunState, Termination, TerminationCause};
use super::testbench::Testbench;
use super::vdev::VirtualDevices;
use crate::common::constants::{RESET_CYCLES, VDEV_SIZE};
use crate::common::error::{HarnessError, Result};
use crate::config::{SimConfig, Verbosity};
use crate::model::{HardwareModel, WaveformFormat};
use crate::stats::RunStats;
use crate::trace::{LogFormat, TraceLogger, TraceRecord};

/// Runs a hardware model to completion and reports why it stopped.
pub struct Simulator<M: HardwareModel> {
    tb: Testbench<M>,
    vdev: VirtualDevices,
    config: SimConfig,
    logger: Option<TraceLogger>,
    console: Box<dyn Write>,
    stats: RunStats,
    state: RunState,
}

impl<M: HardwareModel> Simulator<M> {
    /// Takes ownership of `model` and clears its VDEV window.
    ///
    /// Console output goes to stdout; see [`Simulator::with_console`].
    pub fn new(mut model: M, config: SimConfig) -> Self {
        let v = config.verbosity;
        let vdev = VirtualDevices::new(config.ram_base, model.memory_bytes());
        vdev.clear(model.memory_mut());

        simlog!(v, "Initializing simulator");
        simlog!(v, "Memory map:");
        simlog!(
            v,
            " - RAM : 0x{:08x} (0x{:x} B)",
            config.ram_base,
            model.memory_bytes()
        );
        simlog!(v, " - VDEV: 0x{:08x} (0x{:x})", vdev.base(), VDEV_SIZE);

        Self {
            tb: Testbench::new(model),
            vdev,
            config,
            logger: None,
            console: Box::new(io::stdout()),
            stats: RunStats::default(),
            state: RunState::Init,
        }
    }

    /// Redirects console output (CONSOLE register writes) to `console`.
    #[must_use]
    pub fn with_console(mut self, console: impl Write + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Controller state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Counters of the current (or last) run.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// The clock/reset driver.
    pub fn testbench(&self) -> &Testbench<M> {
        &self.tb
    }

    /// Mutable access to the clock/reset driver.
    pub fn testbench_mut(&mut self) -> &mut Testbench<M> {
        &mut self.tb
    }

    /// The VDEV bridge.
    pub fn vdev(&self) -> &VirtualDevices {
        &self.vdev
    }

    /// Returns `true` if a commit log is open.
    pub fn is_log_open(&self) -> bool {
        self.logger.is_some()
    }

    /// Opens the waveform and commit log outputs requested by the configuration.
    ///
    /// Failures are reported and the affected output is left disabled.
    pub fn open_configured_outputs(&mut self) {
        if self.config.trace {
            let path = self.trace_file();
            if let Err(e) = self.open_trace(&path) {
                simerr!(self.config.verbosity, "{e}");
            }
        }
        if let Some(path) = self.config.log_file.clone() {
            let _ = self.open_log(&path);
        }
    }

    /// Waveform file opened by [`Simulator::open_configured_outputs`].
    ///
    /// Without a configured name this is the conventional one for the model's format.
    pub fn trace_file(&self) -> PathBuf {
        self.config.trace_file.clone().unwrap_or_else(|| {
            let format = self
                .tb
                .model()
                .waveform_format()
                .unwrap_or(WaveformFormat::Vcd);
            PathBuf::from(format.default_file_name())
        })
    }

    /// Attaches a waveform tracer writing to `path`.
    pub fn open_trace(&mut self, path: &Path) -> Result<()> {
        simlog!(
            self.config.verbosity,
            "Opening trace file: {}",
            path.display()
        );
        self.tb.open_trace(path)
    }

    /// Opens the commit log at `path`.
    ///
    /// If the file cannot be created the error is reported once, logging stays disabled,
    /// and the run can proceed. The report goes to stderr even at [`Verbosity::None`].
    pub fn open_log(&mut self, path: &Path) -> Result<()> {
        let v = self.config.verbosity;
        simlog!(v, "Opening simulation log file: {}", path.display());
        match TraceLogger::create(path, self.config.log_format) {
            Ok(logger) => {
                self.logger = Some(logger);
                Ok(())
            }
            Err(e) => {
                if v.allows(Verbosity::Errors) {
                    simerr!(v, "{e}");
                } else {
                    eprintln!("[ERROR] {e}");
                }
                Err(e)
            }
        }
    }

    /// Uses `logger` as the commit log.
    pub fn attach_log(&mut self, logger: TraceLogger) {
        self.config.log_format = logger.format();
        self.logger = Some(logger);
    }

    /// Selects the commit log format by name (`"default"` or `"spike"`).
    ///
    /// An unknown name is rejected and the current format kept.
    pub fn set_log_format(&mut self, name: &str) -> Result<()> {
        let v = self.config.verbosity;
        simlog!(v, "Setting log format to: {name}");
        let format: LogFormat = name.parse().inspect_err(|e| simerr!(v, "{e}"))?;
        self.config.log_format = format;
        if let Some(logger) = self.logger.as_mut() {
            logger.set_format(format);
        }
        Ok(())
    }

    /// Sets the cycle ceiling.
    pub fn set_max_cycles(&mut self, cycles: u64) {
        simlog!(self.config.verbosity, "Setting maximum cycles to: {cycles}");
        self.config.max_cycles = cycles;
    }

    /// Loads a hex image file into memory from address 0.
    ///
    /// Returns the number of bytes written. Nothing is written if the image is malformed or
    /// does not fit.
    pub fn load_hex(&mut self, path: &Path) -> Result<u64> {
        simlog!(
            self.config.verbosity,
            "Loading hex file: {}",
            path.display()
        );
        let file =
            File::open(path).map_err(|e| HarnessError::io("could not open hex file", path, e))?;
        self.load_hex_from(BufReader::new(file))
            .map_err(|e| match e {
                HarnessError::Stream(source) => {
                    HarnessError::io("could not read hex file", path, source)
                }
                other => HarnessError::image(path, other),
            })
    }

    /// Loads a hex image from `reader` into memory from address 0.
    pub fn load_hex_from<R: BufRead>(&mut self, reader: R) -> Result<u64> {
        let nbytes = loader::load_hex(self.tb.model_mut().memory_mut(), reader)?;
        simlog!(self.config.verbosity, "Loaded {nbytes} bytes in memory");
        Ok(nbytes)
    }

    /// Writes every memory word to `path`, one 8-digit hex word per line.
    pub fn dump_mem(&self, path: &Path) -> Result<()> {
        simlog!(
            self.config.verbosity,
            "Dumping memory to file: {}",
            path.display()
        );
        let file = File::create(path)
            .map_err(|e| HarnessError::io("could not open dump file", path, e))?;
        loader::dump_words(self.tb.model().memory(), BufWriter::new(file))
            .map_err(|e| match e {
                HarnessError::Stream(source) => {
                    HarnessError::io("could not write dump file", path, source)
                }
                other => other,
            })
    }

    /// Writes every memory word to `writer`.
    pub fn dump_mem_to<W: Write>(&self, writer: W) -> Result<()> {
        loader::dump_words(self.tb.model().memory(), writer)
    }

    /// Termination condition holding before the next tick, if any.
    fn check_termination(&mut self) -> Option<TerminationCause> {
        if self.tb.finished() {
            return Some(TerminationCause::Finish);
        }
        if self.tb.cycles() >= self.config.max_cycles {
            return Some(TerminationCause::MaxCycles);
        }
        self.vdev
            .take_request()
            .map(|code| TerminationCause::SoftwareRequest { code })
    }

    /// Writes the current probe snapshot to the commit log, disabling it on failure.
    fn log_cycle(&mut self) {
        let Some(logger) = self.logger.as_mut() else {
            return;
        };
        let rec = TraceRecord::capture(self.tb.cycles(), self.tb.model());
        if let Err(e) = logger.log(&rec) {
            simerr!(
                self.config.verbosity,
                "sim log write failed, logging disabled: {e}"
            );
            self.logger = None;
        }
    }

    /// Resets the model and runs it until a termination condition holds.
    pub fn run(&mut self) -> Termination {
        let v = self.config.verbosity;
        simlog!(v, "Starting simulation");

        self.stats = RunStats::default();
        let _ = self.vdev.take_request();

        self.state = RunState::Resetting;
        simlog!(v, "Resetting SoC");
        self.tb.reset(RESET_CYCLES);
        self.state = RunState::Running;

        while self.state == RunState::Running {
            if let Some(cause) = self.check_termination() {
                self.state = RunState::Terminated(Termination {
                    cause,
                    pc: self.tb.model().pc(),
                });
                break;
            }

            let cycles = self.tb.cycles();
            if let Err(e) = self.vdev.eval(
                self.tb.model_mut(),
                cycles,
                self.stats.instret,
                &mut *self.console,
            ) {
                simerr!(v, "console write failed: {e}");
            }

            self.tb.tick();

            self.log_cycle();

            if self.tb.model().retire_valid() {
                self.stats.instret += 1;
            }
        }

        self.stats.cycles = self.tb.cycles();
        self.stats.time = self.tb.time();

        let termination = match self.state {
            RunState::Terminated(termination) => termination,
            _ => Termination {
                cause: TerminationCause::Unknown,
                pc: self.tb.model().pc(),
            },
        };
        self.state = RunState::Terminated(termination);
        self.report(&termination);
        termination
    }

    fn report(&self, termination: &Termination) {
        let v = self.config.verbosity;
        simlog!(v, "Instructions executed: {}", self.stats.instret);
        simlog!(v, "IPC: {:.6}", self.stats.ipc());
        simlog!(
            v,
            "Cycles: {} (Time: {})",
            self.stats.cycles,
            self.stats.time
        );
        simlog!(v, "Simulation finished @ PC: 0x{:08x}", termination.pc);
        match termination.cause {
            TerminationCause::MaxCycles => {
                simlog!(v, "  Reached maximum cycles ({})", self.config.max_cycles);
            }
            TerminationCause::Unknown => {
                simwarn!(v, "  {}", termination.cause);
            }
            cause => simlog!(v, "  {cause}"),
        }
    }
}

impl<M: HardwareModel> Drop for Simulator<M> {
    fn drop(&mut self) {
        if let Some(mut logger) = self.logger.take() {
            let _ = logger.flush();
            simlog!(self.config.verbosity, "Closed sim log file");
        }
    }
}

impl<M: HardwareModel + fmt::Debug> fmt::Debug for Simulator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("tb", &self.tb)
            .field("vdev", &self.vdev)
            .field("config", &self.config)
            .field("logger", &self.logger)
            .field("stats", &self.stats)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
