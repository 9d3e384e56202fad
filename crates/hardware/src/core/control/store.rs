//! Microcode Store.
//!
//! This module holds the 64-entry control store. It provides:
//! 1. **Microinstructions:** 64-bit words packing per-state control signals.
//! 2. **The Store:** An immutable table indexed by state number.
//! 3. **Introspection:** Signal accessors and a textual rendering for trace output.
//!
//! The per-state action routines are the effective interpretation of each
//! word; the sequencer itself consults only the memory-enable bit (to drive
//! the one-shot ready handshake) and the descriptive fields for tracing.

use super::state::State;

/// Default-next-state field, bits 5..0.
const J_MASK: u64 = 0x3F;
/// Dispatch-on-opcode flag, bit 6.
const IRD: u64 = 1 << 6;
/// Condition-selector field, bits 9..7.
const COND_SHIFT: u32 = 7;
const COND_MASK: u64 = 0x7;

/// Condition selector: unconditional.
pub const COND_NONE: u64 = 0;
/// Condition selector: wait on the memory-ready handshake.
pub const COND_MEM_READY: u64 = 1;
/// Condition selector: branch on BEN.
pub const COND_BRANCH: u64 = 2;
/// Condition selector: interrupt test.
pub const COND_INT: u64 = 3;
/// Condition selector: access-control test.
pub const COND_ACV: u64 = 4;

/// Memory access enable, bit 10.
const MEM_EN: u64 = 1 << 10;
/// Memory direction: set for writes, bit 11.
const MEM_WR: u64 = 1 << 11;
/// Register-load strobes, bits 17..12.
const LD_MAR: u64 = 1 << 12;
const LD_MDR: u64 = 1 << 13;
const LD_IR: u64 = 1 << 14;
const LD_PC: u64 = 1 << 15;
const LD_REG: u64 = 1 << 16;
const LD_CC: u64 = 1 << 17;
/// BEN-load strobe, bit 18.
const LD_BEN: u64 = 1 << 18;

/// One 64-bit microinstruction word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Microinstruction(u64);

impl Microinstruction {
    /// The all-zero word used by unpopulated states.
    pub const NONE: Microinstruction = Microinstruction(0);

    const fn new(bits: u64, cond: u64, j: u8) -> Self {
        Microinstruction(bits | (cond << COND_SHIFT) | (j as u64 & J_MASK))
    }

    /// The raw 64-bit word.
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Default next-state number.
    pub fn j(self) -> u8 {
        (self.0 & J_MASK) as u8
    }

    /// True when this state dispatches on the opcode field.
    pub fn ird(self) -> bool {
        self.0 & IRD != 0
    }

    /// The condition-selector field.
    pub fn cond(self) -> u64 {
        (self.0 >> COND_SHIFT) & COND_MASK
    }

    /// True when this state accesses memory.
    pub fn mem_en(self) -> bool {
        self.0 & MEM_EN != 0
    }

    /// True when the memory access is a write.
    pub fn mem_wr(self) -> bool {
        self.0 & MEM_WR != 0
    }

    /// Lists the asserted signals, for trace output.
    pub fn describe(self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for (bit, label) in [
            (LD_MAR, "LD.MAR"),
            (LD_MDR, "LD.MDR"),
            (LD_IR, "LD.IR"),
            (LD_PC, "LD.PC"),
            (LD_REG, "LD.REG"),
            (LD_CC, "LD.CC"),
            (LD_BEN, "LD.BEN"),
            (MEM_EN, "MEM.EN"),
            (MEM_WR, "MEM.WR"),
            (IRD, "IRD"),
        ] {
            if self.0 & bit != 0 {
                parts.push(label);
            }
        }
        parts.join("|")
    }
}

/// The immutable 64-entry microcode store.
pub struct ControlStore {
    words: [Microinstruction; 64],
}

impl ControlStore {
    /// Builds the control store. Unused state numbers hold the all-zero word.
    pub fn new() -> Self {
        let mut words = [Microinstruction::NONE; 64];
        let mut set = |state: State, bits: u64, cond: u64, j: State| {
            words[state.index()] = Microinstruction::new(bits, cond, j as u8);
        };

        // Instruction fetch.
        set(State::Fetch1, LD_MAR | LD_PC, COND_INT, State::Fetch2);
        set(State::Fetch2, 0, COND_ACV, State::Fetch3);
        set(State::Fetch3, MEM_EN | LD_MDR, COND_MEM_READY, State::LoadIr);
        set(State::LoadIr, LD_IR, COND_NONE, State::Decode);
        set(State::Decode, LD_BEN | IRD, COND_NONE, State::Br);

        // Operate instructions.
        set(State::Add, LD_REG | LD_CC, COND_NONE, State::Fetch1);
        set(State::And, LD_REG | LD_CC, COND_NONE, State::Fetch1);
        set(State::Not, LD_REG | LD_CC, COND_NONE, State::Fetch1);
        set(State::Lea, LD_REG | LD_CC, COND_NONE, State::Fetch1);

        // Control flow.
        set(State::Br, 0, COND_BRANCH, State::Fetch1);
        set(State::BrTaken, LD_PC, COND_NONE, State::Fetch1);
        set(State::Jmp, LD_PC, COND_NONE, State::Fetch1);
        set(State::Jsr, LD_PC | LD_REG, COND_NONE, State::Fetch1);
        set(State::Jsrr, LD_PC | LD_REG, COND_NONE, State::Fetch1);

        // Loads.
        set(State::Ld1, LD_MAR, COND_ACV, State::Ld2);
        set(State::Ld2, MEM_EN | LD_MDR, COND_MEM_READY, State::Ld3);
        set(State::Ld3, LD_REG | LD_CC, COND_NONE, State::Fetch1);
        set(State::Ldr1, LD_MAR, COND_ACV, State::Ldr2);
        set(State::Ldr2, MEM_EN | LD_MDR, COND_MEM_READY, State::Ldr3);
        set(State::Ldr3, LD_REG | LD_CC, COND_NONE, State::Fetch1);
        set(State::Ldi1, LD_MAR, COND_ACV, State::Ldi2);
        set(State::Ldi2, MEM_EN | LD_MAR, COND_MEM_READY, State::Ldi3);
        set(State::Ldi3, MEM_EN | LD_MDR, COND_MEM_READY, State::Ldi4);
        set(State::Ldi4, LD_REG | LD_CC, COND_NONE, State::Fetch1);

        // Stores.
        set(State::St1, LD_MAR, COND_ACV, State::St2);
        set(State::St2, MEM_EN | MEM_WR | LD_MDR, COND_MEM_READY, State::Fetch1);
        set(State::Str1, LD_MAR, COND_ACV, State::Str2);
        set(State::Str2, MEM_EN | MEM_WR | LD_MDR, COND_MEM_READY, State::Fetch1);
        set(State::Sti1, MEM_EN | LD_MAR, COND_ACV, State::Sti2);
        set(State::Sti2, MEM_EN | MEM_WR | LD_MDR, COND_MEM_READY, State::Fetch1);

        // System.
        set(State::Trap1, LD_REG, COND_NONE, State::Trap2);
        set(State::Trap2, LD_MAR, COND_NONE, State::Trap3);
        set(State::Trap3, MEM_EN | LD_MDR, COND_MEM_READY, State::Trap4);
        set(State::Trap4, LD_PC, COND_NONE, State::Fetch1);
        set(State::Rti, MEM_EN | LD_PC, COND_MEM_READY, State::Fetch1);
        set(State::Interrupt, MEM_EN | MEM_WR | LD_PC, COND_INT, State::Fetch1);

        Self { words }
    }

    /// Looks up the microinstruction for `state`.
    pub fn word(&self, state: State) -> Microinstruction {
        self.words[state.index()]
    }

    /// Looks up a raw slot by state number; unused numbers are all-zero.
    pub fn raw(&self, index: usize) -> Microinstruction {
        self.words[index]
    }
}

impl Default for ControlStore {
    fn default() -> Self {
        Self::new()
    }
}
