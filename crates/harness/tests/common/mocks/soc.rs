//! A single-cycle RV32 subset core with a flat word memory.
//!
//! Executes LUI, ADDI, LW, SW, JAL and EBREAK (as `$finish`) on the rising clock edge and
//! publishes the retired instruction on the debug probes. An all-zero word is a bubble: nothing
//! retires and the PC holds, so an empty image idles forever.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use orionsim_core::HardwareModel;
use orionsim_core::common::constants::DEFAULT_RAM_BASE;
use orionsim_core::model::{
    DebugProbes, MemAccess, RegRead, RegWrite, WaveformFormat, WaveformSink,
};

use super::waveform::{RecordingWaveform, WaveLog};

/// Memory size used by most tests, in words.
pub const MEM_WORDS: usize = 1024;

/// Writeback-stage signals of the mock core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeState {
    pub retire_valid: bool,
    pub pc: u32,
    pub instr: u32,
    pub rd: RegWrite,
    pub rs1: RegRead,
    pub rs2: RegRead,
    pub mem: MemAccess,
}

#[derive(Debug)]
pub struct MockSoc {
    pub memory: Vec<u32>,
    pub regs: [u32; 32],
    pub probes: ProbeState,
    ram_base: u32,
    pc: u32,
    clock: bool,
    last_clock: bool,
    reset: bool,
    finished: bool,
    pub evals: u64,
    pub rising_edges: u64,
    pub edges_in_reset: u64,
    wave: Option<Rc<RefCell<WaveLog>>>,
}

impl MockSoc {
    pub fn new(words: usize) -> Self {
        Self {
            memory: vec![0; words],
            regs: [0; 32],
            probes: ProbeState::default(),
            ram_base: DEFAULT_RAM_BASE,
            pc: DEFAULT_RAM_BASE,
            clock: false,
            last_clock: false,
            reset: false,
            finished: false,
            evals: 0,
            rising_edges: 0,
            edges_in_reset: 0,
            wave: None,
        }
    }

    /// Lets `open_waveform` succeed, recording every sample into the returned log.
    pub fn enable_waveform(&mut self, format: WaveformFormat) -> Rc<RefCell<WaveLog>> {
        let log = Rc::new(RefCell::new(WaveLog::new(format)));
        self.wave = Some(Rc::clone(&log));
        log
    }

    /// Core address of memory word 0.
    pub fn ram_base(&self) -> u32 {
        self.ram_base
    }

    /// Core address of the VDEV window for this memory size.
    pub fn vdev_base(&self) -> u32 {
        self.ram_base + (self.memory.len() as u32) * 4 - 0x20
    }

    /// Reads the word at core address `addr`.
    pub fn read_word(&self, addr: u32) -> u32 {
        self.index(addr)
            .and_then(|i| self.memory.get(i).copied())
            .unwrap_or(0)
    }

    fn index(&self, addr: u32) -> Option<usize> {
        addr.checked_sub(self.ram_base).map(|off| (off / 4) as usize)
    }

    fn write_word(&mut self, addr: u32, value: u32) {
        if let Some(word) = self.index(addr).and_then(|i| self.memory.get_mut(i)) {
            *word = value;
        }
    }

    fn write_reg(&mut self, rd: u32, value: u32) -> RegWrite {
        if rd != 0 {
            self.regs[rd as usize] = value;
        }
        RegWrite {
            index: rd as u8,
            value,
            write_enable: true,
        }
    }

    fn rising_edge(&mut self) {
        self.rising_edges += 1;
        if self.reset {
            self.edges_in_reset += 1;
            self.pc = self.ram_base;
            self.regs = [0; 32];
            self.finished = false;
            self.probes = ProbeState::default();
            return;
        }

        let pc = self.pc;
        let w = self.read_word(pc);
        self.probes = ProbeState {
            pc,
            instr: w,
            ..ProbeState::default()
        };
        if w == 0 || self.finished {
            return;
        }

        let opcode = w & 0x7f;
        let rd = (w >> 7) & 0x1f;
        let rs1 = (w >> 15) & 0x1f;
        let rs2 = (w >> 20) & 0x1f;
        let v1 = self.regs[rs1 as usize];
        let v2 = self.regs[rs2 as usize];
        let imm_i = (w as i32) >> 20;
        let imm_s = (((w as i32) >> 25) << 5) | ((w >> 7) & 0x1f) as i32;
        let imm_j = (((w as i32) >> 31) << 20)
            | (((w >> 12) & 0xff) << 12) as i32
            | (((w >> 20) & 1) << 11) as i32
            | (((w >> 21) & 0x3ff) << 1) as i32;

        let mut next_pc = pc.wrapping_add(4);
        match opcode {
            0x37 => self.probes.rd = self.write_reg(rd, w & 0xffff_f000),
            0x13 => {
                self.probes.rs1 = RegRead { index: rs1 as u8, value: v1 };
                self.probes.rd = self.write_reg(rd, v1.wrapping_add(imm_i as u32));
            }
            0x03 => {
                let addr = v1.wrapping_add(imm_i as u32);
                let data = self.read_word(addr);
                self.probes.rs1 = RegRead { index: rs1 as u8, value: v1 };
                self.probes.rd = self.write_reg(rd, data);
                self.probes.mem = MemAccess {
                    addr,
                    rmask: 0xf,
                    rdata: data,
                    ..MemAccess::default()
                };
            }
            0x23 => {
                let addr = v1.wrapping_add(imm_s as u32);
                self.write_word(addr, v2);
                self.probes.rs1 = RegRead { index: rs1 as u8, value: v1 };
                self.probes.rs2 = RegRead { index: rs2 as u8, value: v2 };
                self.probes.mem = MemAccess {
                    addr,
                    wmask: 0xf,
                    wdata: v2,
                    ..MemAccess::default()
                };
            }
            0x6f => {
                self.probes.rd = self.write_reg(rd, next_pc);
                next_pc = pc.wrapping_add(imm_j as u32);
            }
            0x73 if w == 0x0010_0073 => self.finished = true,
            _ => {}
        }
        self.probes.retire_valid = true;
        self.pc = next_pc;
    }
}

impl DebugProbes for MockSoc {
    fn retire_valid(&self) -> bool {
        self.probes.retire_valid
    }
    fn pc(&self) -> u32 {
        self.probes.pc
    }
    fn instr(&self) -> u32 {
        self.probes.instr
    }
    fn rd(&self) -> RegWrite {
        self.probes.rd
    }
    fn rs1(&self) -> RegRead {
        self.probes.rs1
    }
    fn rs2(&self) -> RegRead {
        self.probes.rs2
    }
    fn mem(&self) -> MemAccess {
        self.probes.mem
    }
}

impl HardwareModel for MockSoc {
    fn eval(&mut self) {
        self.evals += 1;
        if self.clock && !self.last_clock {
            self.rising_edge();
        }
        self.last_clock = self.clock;
    }

    fn set_clock(&mut self, high: bool) {
        self.clock = high;
    }

    fn set_reset(&mut self, asserted: bool) {
        self.reset = asserted;
    }

    fn got_finish(&self) -> bool {
        self.finished
    }

    fn memory(&self) -> &[u32] {
        &self.memory
    }

    fn memory_mut(&mut self) -> &mut [u32] {
        &mut self.memory
    }

    fn waveform_format(&self) -> Option<WaveformFormat> {
        self.wave.as_ref().map(|log| log.borrow().format)
    }

    fn open_waveform(
        &mut self,
        path: &Path,
    ) -> orionsim_core::common::error::Result<Box<dyn WaveformSink>> {
        match &self.wave {
            Some(log) => {
                log.borrow_mut().path = Some(path.to_path_buf());
                Ok(Box::new(RecordingWaveform::new(Rc::clone(log))))
            }
            None => Err(orionsim_core::HarnessError::WaveformUnsupported),
        }
    }
}
