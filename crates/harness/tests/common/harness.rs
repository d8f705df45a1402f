use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use orionsim_core::config::{SimConfig, Verbosity};
use orionsim_core::sim::Termination;
use orionsim_core::Simulator;

use crate::common::builder::instruction::to_hex;
use crate::common::mocks::soc::{MEM_WORDS, MockSoc};

/// An in-memory writer whose contents stay readable after it is moved into the simulator.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Configuration with a small cycle ceiling suited to unit tests.
pub fn test_config(max_cycles: u64) -> SimConfig {
    SimConfig {
        max_cycles,
        verbosity: Verbosity::All,
        ..SimConfig::default()
    }
}

#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator<MockSoc>,
    pub console: SharedBuffer,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(test_config(1_000))
    }

    pub fn with_config(config: SimConfig) -> Self {
        Self::with_model(MockSoc::new(MEM_WORDS), config)
    }

    pub fn with_model(model: MockSoc, config: SimConfig) -> Self {
        init_tracing();
        let console = SharedBuffer::default();
        let sim = Simulator::new(model, config).with_console(console.clone());
        Self { sim, console }
    }

    /// Loads `words` from address 0 through the hex loader.
    pub fn load_program(mut self, words: &[u32]) -> Self {
        let text = to_hex(words);
        let _ = self.sim.load_hex_from(text.as_bytes()).unwrap();
        self
    }

    pub fn soc(&self) -> &MockSoc {
        self.sim.testbench().model()
    }

    /// Core address of the VDEV window.
    pub fn vdev_base(&self) -> u32 {
        self.sim.vdev().base()
    }

    pub fn run(&mut self) -> Termination {
        self.sim.run()
    }
}
