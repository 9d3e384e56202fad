//! Microsequencer.
//!
//! This module drives the control unit. It provides:
//! 1. **Instruction Stepping:** Runs microstates from fetch back to fetch.
//! 2. **Next-State Logic:** A total function over the populated state space.
//! 3. **Halt Detection:** The MCR run latch, ACV, unknown opcodes, and the tick guard.
//!
//! Per tick, the action routine executes to completion before the next state
//! is computed; termination is checked after every tick, so a violation set
//! mid-instruction stops the machine before the following microstate runs.

use crate::common::constants::MCR;
use crate::common::error::SimError;
use crate::common::word::Word;
use crate::config::GeneralConfig;
use crate::core::arch::Datapath;
use crate::isa::{self, Opcode};
use crate::stats::SimStats;

use super::state::State;
use super::states;
use super::store::ControlStore;

/// The result of one macro-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction ran to completion.
    Retired {
        /// The instruction word that retired.
        ir: Word,
        /// The address the instruction was fetched from.
        pc: Word,
    },
    /// An interrupt entry sequence ran instead of an instruction.
    Interrupt,
    /// The run latch is clear; the machine has halted.
    Halted,
}

/// The microcoded control unit.
pub struct Sequencer {
    state: State,
    store: ControlStore,
    trace: bool,
    max_ticks: u64,
}

impl Sequencer {
    /// Creates a sequencer positioned at instruction fetch.
    pub fn new(general: &GeneralConfig) -> Self {
        Self {
            state: State::Fetch1,
            store: ControlStore::new(),
            trace: general.trace_instructions,
            max_ticks: general.max_ticks_per_instruction,
        }
    }

    /// Returns the sequencer to instruction fetch.
    pub fn reset(&mut self) {
        self.state = State::Fetch1;
    }

    /// The immutable microcode store.
    pub fn store(&self) -> &ControlStore {
        &self.store
    }

    /// Runs one macro-step: every microstate from FETCH1 until control
    /// returns to FETCH1.
    ///
    /// # Arguments
    ///
    /// * `dp` - The architectural state to drive.
    /// * `stats` - Counters updated as work retires.
    ///
    /// # Returns
    ///
    /// The step outcome, or a fatal error. After an error the architectural
    /// state remains inspectable.
    pub fn step_instruction(
        &mut self,
        dp: &mut Datapath,
        stats: &mut SimStats,
    ) -> Result<StepOutcome, SimError> {
        if !running(dp) {
            return Ok(StepOutcome::Halted);
        }

        let fetch_pc = dp.pc;
        let mut took_interrupt = false;
        let mut ticks: u64 = 0;

        loop {
            ticks += 1;
            stats.microcycles += 1;

            let micro = self.store.word(self.state);
            if micro.mem_en() {
                dp.mem_ready = false;
            }
            states::execute(self.state, dp);
            // A memory state finishes its handshake unless an access
            // violation aborted it first.
            debug_assert!(!micro.mem_en() || dp.mem_ready || dp.acv);

            if self.trace {
                eprintln!(
                    "[micro] {:<8} #{:<2} {}",
                    self.state.name(),
                    self.state.index(),
                    micro.describe()
                );
            }

            if self.state == State::Interrupt {
                took_interrupt = true;
            }

            let next = self.next_state(dp)?;

            if dp.acv {
                return Err(SimError::AccessViolation { addr: dp.mar });
            }
            if !running(dp) {
                self.state = State::Fetch1;
                return Ok(StepOutcome::Halted);
            }

            self.state = next;
            if next == State::Fetch1 {
                break;
            }
            if ticks >= self.max_ticks {
                return Err(SimError::Timeout { steps: ticks });
            }
        }

        if took_interrupt {
            stats.interrupts += 1;
            if self.trace {
                eprintln!("[trace] interrupt taken, PC={:#06x}", dp.pc);
            }
            return Ok(StepOutcome::Interrupt);
        }

        let opcode = Opcode::from_word(dp.ir);
        stats.record_instruction(opcode, dp.ben);
        if self.trace {
            eprintln!(
                "[trace] {:#06x}  {:#06x}  {:<18} {}",
                fetch_pc,
                dp.ir,
                isa::disasm::disassemble(dp.ir),
                dp.flags.letter()
            );
        }

        Ok(StepOutcome::Retired {
            ir: dp.ir,
            pc: fetch_pc,
        })
    }

    /// The next-state function: pure in the current state and the signals
    /// (opcode field, BEN, INT, privilege, ACV, IR[11]).
    ///
    /// Total over the populated state space; the only failure is the
    /// unknown-opcode dispatch (reserved encoding, or RTI in user mode).
    fn next_state(&self, dp: &Datapath) -> Result<State, SimError> {
        let next = match self.state {
            State::Fetch1 => {
                if dp.int_pending && !dp.supervisor {
                    State::Interrupt
                } else {
                    State::Fetch2
                }
            }
            State::Fetch2 => State::Fetch3,
            State::Fetch3 => State::LoadIr,
            State::LoadIr => State::Decode,
            State::Decode => {
                return State::dispatch(dp.ir, dp.supervisor).ok_or(SimError::UnknownOpcode {
                    // The PC has advanced past the offending word.
                    pc: dp.pc.wrapping_sub(1),
                    ir: dp.ir,
                });
            }

            State::Br => {
                if dp.ben {
                    State::BrTaken
                } else {
                    State::Fetch1
                }
            }

            State::Ld1 => State::Ld2,
            State::Ld2 => State::Ld3,
            State::Ldr1 => State::Ldr2,
            State::Ldr2 => State::Ldr3,
            State::Ldi1 => State::Ldi2,
            State::Ldi2 => State::Ldi3,
            State::Ldi3 => State::Ldi4,
            State::St1 => State::St2,
            State::Str1 => State::Str2,
            State::Sti1 => State::Sti2,
            State::Trap1 => State::Trap2,
            State::Trap2 => State::Trap3,
            State::Trap3 => State::Trap4,

            State::Add
            | State::And
            | State::Not
            | State::Lea
            | State::BrTaken
            | State::Jmp
            | State::Jsr
            | State::Jsrr
            | State::Ld3
            | State::Ldr3
            | State::Ldi4
            | State::St2
            | State::Str2
            | State::Sti2
            | State::Trap4
            | State::Rti
            | State::Interrupt => State::Fetch1,
        };
        Ok(next)
    }
}

/// True while the MCR run latch (bit 15) is set.
fn running(dp: &Datapath) -> bool {
    dp.memory.peek(MCR) & 0x8000 != 0
}
