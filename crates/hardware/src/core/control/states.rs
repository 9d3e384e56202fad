//! Per-State Action Routines.
//!
//! One routine per populated microsequencer state, acting on the
//! architectural state. Routines implement the register-transfer effects
//! only; next-state selection and halt checking belong to the sequencer.

use crate::common::constants::INTERRUPT_VECTOR_TABLE;
use crate::core::arch::{Datapath, RegFile};
use crate::isa;

use super::state::State;

/// Executes the action routine for `state` against `dp`.
pub(crate) fn execute(state: State, dp: &mut Datapath) {
    match state {
        // BEN was computed at decode; the taken path is a separate state.
        State::Br => {}

        State::Add => {
            let dr = isa::dr(dp.ir);
            let lhs = dp.regs.read(isa::sr1(dp.ir));
            let rhs = if isa::imm_mode(dp.ir) {
                isa::imm5(dp.ir)
            } else {
                dp.regs.read(isa::sr2(dp.ir))
            };
            let result = lhs.wrapping_add(rhs);
            dp.regs.write(dr, result);
            dp.set_cc(result);
        }

        State::And => {
            let dr = isa::dr(dp.ir);
            let lhs = dp.regs.read(isa::sr1(dp.ir));
            let rhs = if isa::imm_mode(dp.ir) {
                isa::imm5(dp.ir)
            } else {
                dp.regs.read(isa::sr2(dp.ir))
            };
            let result = lhs & rhs;
            dp.regs.write(dr, result);
            dp.set_cc(result);
        }

        State::Not => {
            let dr = isa::dr(dp.ir);
            let result = !dp.regs.read(isa::sr1(dp.ir));
            dp.regs.write(dr, result);
            dp.set_cc(result);
        }

        State::Lea => {
            let dr = isa::dr(dp.ir);
            let result = dp.pc.wrapping_add(isa::offset9(dp.ir));
            dp.regs.write(dr, result);
            dp.set_cc(result);
        }

        State::Ld1 | State::St1 | State::Ldi1 => {
            dp.mar = dp.pc.wrapping_add(isa::offset9(dp.ir));
            dp.set_acv();
        }

        State::Ldr1 | State::Str1 => {
            let base = dp.regs.read(isa::sr1(dp.ir));
            dp.mar = base.wrapping_add(isa::offset6(dp.ir));
            dp.set_acv();
        }

        State::Ld2 | State::Ldr2 | State::Ldi3 | State::Trap3 | State::Fetch3 => {
            dp.mdr = dp.read_mem(dp.mar);
        }

        State::Ld3 | State::Ldr3 | State::Ldi4 => {
            let dr = isa::dr(dp.ir);
            dp.regs.write(dr, dp.mdr);
            dp.set_cc(dp.mdr);
        }

        State::Ldi2 => {
            dp.mar = dp.read_mem(dp.mar);
            dp.set_acv();
        }

        // The store-source register shares the DR field position.
        State::St2 | State::Str2 | State::Sti2 => {
            dp.mdr = dp.regs.read(isa::dr(dp.ir));
            dp.write_mem(dp.mar, dp.mdr);
        }

        State::Sti1 => {
            dp.mar = dp.pc.wrapping_add(isa::offset9(dp.ir));
            dp.set_acv();
            if dp.acv {
                return;
            }
            dp.mar = dp.read_mem(dp.mar);
            dp.set_acv();
        }

        State::Jmp => {
            dp.pc = dp.regs.read(isa::sr1(dp.ir));
        }

        State::Jsr => {
            dp.regs.write(RegFile::RA, dp.pc);
            dp.pc = dp.pc.wrapping_add(isa::offset11(dp.ir));
        }

        State::Jsrr => {
            let target = dp.regs.read(isa::sr1(dp.ir));
            dp.regs.write(RegFile::RA, dp.pc);
            dp.pc = target;
        }

        State::BrTaken => {
            dp.pc = dp.pc.wrapping_add(isa::offset9(dp.ir));
        }

        State::Trap1 => {
            dp.regs.write(RegFile::RA, dp.pc);
        }

        State::Trap2 => {
            dp.mar = isa::trapvect8(dp.ir);
        }

        State::Trap4 => {
            dp.pc = dp.mdr;
        }

        // Dispatch guarantees supervisor mode here.
        State::Rti => {
            let mut sp = dp.regs.read(RegFile::SP);
            dp.pc = dp.read_mem(sp);
            sp = sp.wrapping_add(1);
            let psr = dp.read_mem(sp);
            sp = sp.wrapping_add(1);
            dp.regs.write(RegFile::SP, sp);
            dp.apply_psr(psr);
        }

        State::Interrupt => {
            let saved_psr = dp.psr_word();
            let mut sp = dp.regs.read(RegFile::SP);
            sp = sp.wrapping_sub(1);
            dp.write_mem(sp, saved_psr);
            sp = sp.wrapping_sub(1);
            dp.write_mem(sp, dp.pc);
            dp.regs.write(RegFile::SP, sp);
            dp.supervisor = true;
            dp.sync_psr();
            dp.int_pending = false;
            dp.pc = dp.read_mem(INTERRUPT_VECTOR_TABLE);
        }

        State::Fetch1 => {
            dp.mar = dp.pc;
            dp.pc = dp.pc.wrapping_add(1);
            dp.set_acv();
        }

        // ACV gate; the sequencer checks the flag after every tick.
        State::Fetch2 => {}

        State::LoadIr => {
            dp.ir = dp.mdr;
        }

        State::Decode => {
            dp.set_ben();
        }
    }
}
