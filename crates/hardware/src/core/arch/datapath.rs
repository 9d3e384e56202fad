//! Architectural State.
//!
//! This module defines the `Datapath` structure, which owns every piece of
//! architectural processor state. It provides:
//! 1. **State Management:** Registers, PC, IR, MAR, MDR, flags, and control signals.
//! 2. **Memory Interface:** Word reads and writes with the one-shot ready handshake.
//! 3. **Signal Logic:** The BEN, ACV, and condition-code update rules.
//!
//! All state lives here as explicit fields; microcode action routines receive
//! a mutable reference, so independent simulator instances never alias.

use crate::common::constants::{
    BIT_10, BIT_11, BIT_9, PSR, STATUS_BIT, USER_SPACE_END, USER_SPACE_START,
};
use crate::common::word::Word;
use crate::config::MachineConfig;

use super::flags::CondFlags;
use super::memory::Memory;
use super::regfile::RegFile;

/// The complete architectural state of the machine.
pub struct Datapath {
    /// General-purpose registers.
    pub regs: RegFile,
    /// Program counter; incremented during fetch, before execution.
    pub pc: Word,
    /// Instruction register.
    pub ir: Word,
    /// Memory address register; all microcode memory traffic goes through it.
    pub mar: Word,
    /// Memory data register.
    pub mdr: Word,
    /// N/Z/P condition codes.
    pub flags: CondFlags,
    /// Branch-enable signal, recomputed at decode.
    pub ben: bool,
    /// Pending-interrupt signal.
    pub int_pending: bool,
    /// Memory-ready handshake; cleared before each access, set by completion.
    pub mem_ready: bool,
    /// Access-control-violation flag.
    pub acv: bool,
    /// Privilege bit (PSR[15]); true in supervisor mode.
    pub supervisor: bool,
    /// The 64K-word memory and console device.
    pub memory: Memory,
}

impl Datapath {
    /// Creates a datapath in the reset state described by `machine`.
    pub fn new(machine: &MachineConfig) -> Self {
        let mut dp = Self {
            regs: RegFile::new(),
            pc: 0,
            ir: 0,
            mar: 0,
            mdr: 0,
            flags: CondFlags::new(),
            ben: false,
            int_pending: false,
            mem_ready: false,
            acv: false,
            supervisor: true,
            memory: Memory::new(machine.fill_word, machine.display_ready_at_reset),
        };
        dp.sync_psr();
        dp
    }

    /// Reads memory at `addr` through the ready handshake.
    ///
    /// The one-shot `mem_ready` flag is cleared before the access and set
    /// when it completes; memory is synchronous, so the handshake always
    /// finishes within the tick.
    pub fn read_mem(&mut self, addr: Word) -> Word {
        self.mem_ready = false;
        let word = self.memory.read(addr);
        self.mem_ready = true;
        word
    }

    /// Writes memory at `addr` through the ready handshake.
    pub fn write_mem(&mut self, addr: Word, val: Word) {
        self.mem_ready = false;
        self.memory.write(addr, val);
        self.mem_ready = true;
    }

    /// Sets exactly one of N/Z/P from the signed interpretation of `value`.
    pub fn set_cc(&mut self, value: Word) {
        self.flags.update(value);
    }

    /// Recomputes ACV: set iff the MAR lies outside user space while the
    /// machine is in user mode. Supervisor mode may touch anything.
    pub fn set_acv(&mut self) {
        self.acv =
            (self.mar < USER_SPACE_START || self.mar > USER_SPACE_END) && !self.supervisor;
    }

    /// Recomputes BEN from the IR condition bits and the current flags.
    pub fn set_ben(&mut self) {
        self.ben = (self.flags.n() && self.ir & BIT_11 != 0)
            || (self.flags.z() && self.ir & BIT_10 != 0)
            || (self.flags.p() && self.ir & BIT_9 != 0);
    }

    /// Composes the PSR word from the privilege bit and flags.
    pub fn psr_word(&self) -> Word {
        let privilege = if self.supervisor { STATUS_BIT } else { 0 };
        privilege | self.flags.psr_bits()
    }

    /// Writes the composed PSR word to its memory-mapped location.
    pub fn sync_psr(&mut self) {
        let word = self.psr_word();
        self.memory.poke(PSR, word);
    }

    /// Installs a PSR word: privilege from bit 15, flags from bits 2..0.
    ///
    /// Used by RTI when popping the saved PSR. The memory-mapped copy is
    /// updated to match.
    pub fn apply_psr(&mut self, psr: Word) {
        self.supervisor = psr & STATUS_BIT != 0;
        self.flags.set_from_psr_bits(psr);
        self.sync_psr();
    }
}
