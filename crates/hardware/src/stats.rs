//! Simulation statistics collection and reporting.
//!
//! This module tracks execution counts for the control unit. It provides:
//! 1. **Progress:** Retired instructions and elapsed microcycles.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump, trap).
//! 3. **Control events:** Branches taken, interrupts taken, RTI executions.
//!
//! Pipeline timing metrics are tracked separately by the pipeline model; this
//! structure describes what the architectural machine actually did.

use std::time::Instant;

use crate::isa::Opcode;

/// Control-unit statistics: monotonic counters over a run.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Instructions retired (complete fetch-to-fetch sequences).
    pub instructions: u64,
    /// Microstates executed, including fetch and interrupt-entry states.
    pub microcycles: u64,

    /// ALU instructions retired (ADD, AND, NOT, LEA).
    pub inst_alu: u64,
    /// Load instructions retired (LD, LDI, LDR).
    pub inst_load: u64,
    /// Store instructions retired (ST, STI, STR).
    pub inst_store: u64,
    /// Conditional branches retired.
    pub inst_branch: u64,
    /// Unconditional transfers retired (JMP, JSR, JSRR).
    pub inst_jump: u64,
    /// TRAP instructions retired.
    pub inst_trap: u64,
    /// RTI instructions retired.
    pub inst_rti: u64,

    /// Conditional branches whose condition held.
    pub branches_taken: u64,
    /// Interrupt entry sequences taken.
    pub interrupts: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions: 0,
            microcycles: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_trap: 0,
            inst_rti: 0,
            branches_taken: 0,
            interrupts: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"control"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "control"];

impl SimStats {
    /// Records one retired instruction of the given opcode.
    ///
    /// # Arguments
    ///
    /// * `opcode` - The opcode of the retired instruction.
    /// * `branch_taken` - For BR, whether the branch condition held.
    pub fn record_instruction(&mut self, opcode: Opcode, branch_taken: bool) {
        self.instructions += 1;
        match opcode {
            Opcode::Add | Opcode::And | Opcode::Not | Opcode::Lea => self.inst_alu += 1,
            Opcode::Ld | Opcode::Ldi | Opcode::Ldr => self.inst_load += 1,
            Opcode::St | Opcode::Sti | Opcode::Str => self.inst_store += 1,
            Opcode::Br => {
                self.inst_branch += 1;
                if branch_taken {
                    self.branches_taken += 1;
                }
            }
            Opcode::Jmp | Opcode::Jsr => self.inst_jump += 1,
            Opcode::Trap => self.inst_trap += 1,
            Opcode::Rti => self.inst_rti += 1,
            Opcode::Reserved => {}
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`,
    /// `"instruction_mix"`, or `"control"`. Pass an empty slice to print all
    /// sections (same as `print()`). Division by zero is prevented by
    /// clamping the instruction count to at least one.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = if self.instructions == 0 {
            1
        } else {
            self.instructions
        };

        if want("summary") {
            let ticks_per_inst = self.microcycles as f64 / instr as f64;
            println!("\n==========================================================");
            println!("LC-3 SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_insts                {}", self.instructions);
            println!("sim_microcycles          {}", self.microcycles);
            println!("sim_ticks_per_inst       {:.3}", ticks_per_inst);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let total = instr as f64;
            let line = |label: &str, count: u64| {
                println!(
                    "  op.{:<20} {} ({:.2}%)",
                    label,
                    count,
                    (count as f64 / total) * 100.0
                );
            };
            println!("INSTRUCTION MIX");
            line("alu", self.inst_alu);
            line("load", self.inst_load);
            line("store", self.inst_store);
            line("branch", self.inst_branch);
            line("jump", self.inst_jump);
            line("trap", self.inst_trap);
            line("rti", self.inst_rti);
            println!("----------------------------------------------------------");
        }
        if want("control") {
            let taken_pct = if self.inst_branch > 0 {
                100.0 * self.branches_taken as f64 / self.inst_branch as f64
            } else {
                0.0
            };
            println!("CONTROL FLOW");
            println!("  branches.retired       {}", self.inst_branch);
            println!(
                "  branches.taken         {} ({:.2}%)",
                self.branches_taken, taken_pct
            );
            println!("  interrupts.taken       {}", self.interrupts);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
