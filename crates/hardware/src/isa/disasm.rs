//! Instruction Disassembler.
//!
//! Renders a single instruction word as a one-line assembler-style
//! string for debug tracing, logging, and test diagnostics.

use super::{dr, imm5, imm_mode, jsr_long, offset11, offset6, offset9, sr1, sr2, trapvect8, Opcode};
use crate::common::constants::{BIT_10, BIT_11, BIT_9};
use crate::common::word::Word;

/// Disassembles one instruction word.
///
/// Offsets are printed as signed decimal, trap vectors as hex. The output is
/// diagnostic text, not round-trippable assembler source.
///
/// # Arguments
///
/// * `ir` - The instruction word.
///
/// # Returns
///
/// A one-line rendering such as `ADD R1, R1, #1` or `BRnz #-3`.
pub fn disassemble(ir: Word) -> String {
    let signed = |w: Word| w as i16;
    match Opcode::from_word(ir) {
        Opcode::Br => {
            if ir & (BIT_11 | BIT_10 | BIT_9) == 0 {
                return "NOP".to_string();
            }
            let mut cond = String::new();
            if ir & BIT_11 != 0 {
                cond.push('n');
            }
            if ir & BIT_10 != 0 {
                cond.push('z');
            }
            if ir & BIT_9 != 0 {
                cond.push('p');
            }
            format!("BR{} #{}", cond, signed(offset9(ir)))
        }
        op @ (Opcode::Add | Opcode::And) => {
            if imm_mode(ir) {
                format!("{} R{}, R{}, #{}", op.name(), dr(ir), sr1(ir), signed(imm5(ir)))
            } else {
                format!("{} R{}, R{}, R{}", op.name(), dr(ir), sr1(ir), sr2(ir))
            }
        }
        op @ (Opcode::Ld | Opcode::Ldi | Opcode::Lea | Opcode::St | Opcode::Sti) => {
            format!("{} R{}, #{}", op.name(), dr(ir), signed(offset9(ir)))
        }
        op @ (Opcode::Ldr | Opcode::Str) => {
            format!("{} R{}, R{}, #{}", op.name(), dr(ir), sr1(ir), signed(offset6(ir)))
        }
        Opcode::Not => format!("NOT R{}, R{}", dr(ir), sr1(ir)),
        Opcode::Jsr => {
            if jsr_long(ir) {
                format!("JSR #{}", signed(offset11(ir)))
            } else {
                format!("JSRR R{}", sr1(ir))
            }
        }
        Opcode::Jmp => {
            if sr1(ir) == 7 {
                "RET".to_string()
            } else {
                format!("JMP R{}", sr1(ir))
            }
        }
        Opcode::Rti => "RTI".to_string(),
        Opcode::Trap => format!("TRAP x{:02X}", trapvect8(ir)),
        Opcode::Reserved => format!(".FILL x{:04X}", ir),
    }
}
