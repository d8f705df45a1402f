//! Run statistics collection and reporting.
//!
//! Tracks the counters the controller maintains during a run:
//! 1. **Cycles:** Clock cycles elapsed since reset and the matching waveform time.
//! 2. **Instructions:** Instructions retired, observed through the retirement probe.
//! 3. **Derived:** IPC and host-side simulation speed.

use std::time::Instant;

/// Counters for one run.
#[derive(Debug, Clone)]
pub struct RunStats {
    start_time: Instant,
    /// Clock cycles since reset.
    pub cycles: u64,
    /// Instructions retired.
    pub instret: u64,
    /// Waveform time at the end of the run.
    pub time: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instret: 0,
            time: 0,
        }
    }
}

impl RunStats {
    /// Instructions per cycle; zero before any cycle has elapsed.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instret as f64 / self.cycles as f64
        }
    }

    /// Prints a short report to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_time                 {}", self.time);
        println!("sim_freq                 {khz:.2} kHz");
        println!("sim_insts                {}", self.instret);
        println!("sim_ipc                  {:.6}", self.ipc());
        println!("==========================================================");
    }
}
