//! Simulator: owns the architectural state and the control unit, with the
//! pipeline model attached side-by-side.
//!
//! This is the API surface for every external collaborator (CLI, bindings,
//! test harnesses). Callers may inspect or mutate state freely between
//! steps; nothing here may be touched while a step is in flight, which the
//! borrow checker enforces for free.

use std::path::Path;

use crate::common::constants::{DSR, MCR, RESET_MCR, STATUS_BIT};
use crate::common::error::SimError;
use crate::common::word::Word;
use crate::config::{Config, PipelineConfig};
use crate::core::arch::Datapath;
use crate::core::control::{Sequencer, StepOutcome};
use crate::core::pipeline::{PipelineMetrics, PipelineModel};
use crate::sim::loader;
use crate::stats::SimStats;

/// Retry bound when the pipeline refuses an issue; an in-order pipe of
/// maximum depth frees its front slot well within this many cycles.
const ISSUE_RETRY_LIMIT: u32 = 64;

/// Top-level simulator: datapath + sequencer + optional pipeline model.
pub struct Simulator {
    config: Config,
    datapath: Datapath,
    sequencer: Sequencer,
    pipeline: Option<PipelineModel>,
    stats: SimStats,
    halted: bool,
}

impl Simulator {
    /// Creates a simulator in the reset state described by `config`.
    pub fn new(config: Config) -> Self {
        let mut sim = Self {
            datapath: Datapath::new(&config.machine),
            sequencer: Sequencer::new(&config.general),
            pipeline: None,
            stats: SimStats::default(),
            halted: false,
            config,
        };
        sim.reset();
        sim
    }

    /// Restores the normative reset state.
    ///
    /// Registers clear, PC returns to the configured start, Z is the only
    /// flag set, the machine enters supervisor mode, and the device
    /// registers take their reset values (MCR running, display ready). The
    /// pipeline keeps its configuration but empties.
    pub fn reset(&mut self) {
        self.datapath = Datapath::new(&self.config.machine);
        self.datapath.pc = self.config.general.start_pc;
        self.datapath.memory.poke(MCR, RESET_MCR);
        if self.config.machine.display_ready_at_reset {
            self.datapath.memory.poke(DSR, STATUS_BIT);
        }
        self.sequencer.reset();
        self.stats = SimStats::default();
        self.halted = false;
        if let Some(pipeline) = &mut self.pipeline {
            pipeline.reset();
        }
    }

    /// Loads a program image and points the PC at its origin.
    ///
    /// # Arguments
    ///
    /// * `words` - The image body.
    /// * `origin` - The load address and entry point.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or a load error with machine state unchanged.
    pub fn load_program(&mut self, words: &[Word], origin: Word) -> Result<(), SimError> {
        loader::install(&mut self.datapath.memory, words, origin)?;
        self.datapath.pc = origin;
        Ok(())
    }

    /// Loads a big-endian `.obj` file and points the PC at its origin.
    pub fn load_object_file(&mut self, path: &Path) -> Result<(), SimError> {
        let image = loader::read_object_file(path)?;
        self.load_program(&image.words, image.origin)
    }

    /// Executes one instruction (or one interrupt entry).
    ///
    /// When the pipeline model is attached, the retired instruction is
    /// issued to it and the model advances one cycle per macro-step; a
    /// refused issue is retried across extra cycles, each refusal already
    /// counted by the model as a structural hazard.
    ///
    /// # Returns
    ///
    /// `Ok(())` on progress or normal halt (observable through
    /// [`is_halted`](Self::is_halted)); a fatal error otherwise.
    pub fn step(&mut self) -> Result<(), SimError> {
        if self.halted {
            return Ok(());
        }
        let outcome = self
            .sequencer
            .step_instruction(&mut self.datapath, &mut self.stats)
            .map_err(|e| {
                self.halted = true;
                e
            })?;

        match outcome {
            StepOutcome::Retired { ir, pc } => {
                if let Some(pipeline) = &mut self.pipeline {
                    let mut attempts = 0;
                    while !pipeline.issue(ir, pc) && attempts < ISSUE_RETRY_LIMIT {
                        pipeline.cycle();
                        attempts += 1;
                    }
                    pipeline.cycle();
                }
            }
            StepOutcome::Interrupt => {}
            StepOutcome::Halted => {
                self.halted = true;
            }
        }
        Ok(())
    }

    /// Runs up to `max_cycles` macro-steps.
    ///
    /// # Arguments
    ///
    /// * `max_cycles` - The step budget.
    ///
    /// # Returns
    ///
    /// `Ok(())` when the machine halts within the budget; `Timeout` when the
    /// budget runs out first; any fatal error from stepping. State remains
    /// inspectable in every case.
    pub fn run(&mut self, max_cycles: u64) -> Result<(), SimError> {
        for _ in 0..max_cycles {
            self.step()?;
            if self.halted {
                return Ok(());
            }
        }
        if self.halted {
            Ok(())
        } else {
            Err(SimError::Timeout { steps: max_cycles })
        }
    }

    /// Reads general-purpose register `idx`.
    pub fn get_register(&self, idx: usize) -> Word {
        self.datapath.regs.read(idx)
    }

    /// Writes general-purpose register `idx`.
    pub fn set_register(&mut self, idx: usize, val: Word) {
        self.datapath.regs.write(idx, val);
    }

    /// Reads memory without device side effects.
    pub fn get_memory(&self, addr: Word) -> Word {
        self.datapath.memory.peek(addr)
    }

    /// Writes memory without device side effects.
    pub fn set_memory(&mut self, addr: Word, val: Word) {
        self.datapath.memory.poke(addr, val);
    }

    /// The condition codes as `(N, Z, P)`.
    pub fn get_condition_codes(&self) -> (bool, bool, bool) {
        let flags = &self.datapath.flags;
        (flags.n(), flags.z(), flags.p())
    }

    /// The program counter.
    pub fn get_pc(&self) -> Word {
        self.datapath.pc
    }

    /// Overrides the program counter.
    pub fn set_pc(&mut self, pc: Word) {
        self.datapath.pc = pc;
    }

    /// True once the machine has stopped, normally or fatally.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Drops to user mode or returns to supervisor mode.
    ///
    /// Test and embedding hook; programs change privilege through RTI and
    /// interrupt entry.
    pub fn set_supervisor(&mut self, on: bool) {
        self.datapath.supervisor = on;
        self.datapath.sync_psr();
    }

    /// Latches a pending interrupt, taken at the next fetch from user mode.
    pub fn raise_interrupt(&mut self) {
        self.datapath.int_pending = true;
    }

    /// Queues a key for the program to read through KBDR.
    pub fn push_key(&mut self, key: u8) {
        self.datapath.memory.console_mut().push_key(key);
    }

    /// Takes everything the program has written through DDR.
    pub fn take_output(&mut self) -> Vec<u8> {
        self.datapath.memory.console_mut().take_output()
    }

    /// Attaches or detaches the pipeline model.
    ///
    /// Attaching builds a fresh model from the configured pipeline shape.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or the validation failure for an invalid configuration.
    pub fn enable_pipeline(&mut self, enable: bool) -> Result<(), SimError> {
        if enable {
            self.pipeline = Some(PipelineModel::new(self.config.pipeline.clone())?);
        } else {
            self.pipeline = None;
        }
        Ok(())
    }

    /// Replaces the pipeline configuration.
    ///
    /// When a model is attached it is rebuilt empty under the new shape.
    pub fn configure_pipeline(&mut self, config: PipelineConfig) -> Result<(), SimError> {
        config.validate()?;
        self.config.pipeline = config;
        if self.pipeline.is_some() {
            self.pipeline = Some(PipelineModel::new(self.config.pipeline.clone())?);
        }
        Ok(())
    }

    /// Empties the attached pipeline and zeroes its metrics.
    pub fn reset_pipeline(&mut self) {
        if let Some(pipeline) = &mut self.pipeline {
            pipeline.reset();
        }
    }

    /// The attached pipeline's metrics, if a model is attached.
    pub fn get_pipeline_metrics(&self) -> Option<&PipelineMetrics> {
        self.pipeline.as_ref().map(PipelineModel::metrics)
    }

    /// The attached pipeline model.
    pub fn pipeline(&self) -> Option<&PipelineModel> {
        self.pipeline.as_ref()
    }

    /// Mutable access to the attached pipeline model (for draining).
    pub fn pipeline_mut(&mut self) -> Option<&mut PipelineModel> {
        self.pipeline.as_mut()
    }

    /// Control-unit statistics.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dumps registers, PC, IR, and flags to stderr.
    pub fn dump_state(&self) {
        eprintln!(
            "PC={:#06x} IR={:#06x} CC={} {}",
            self.datapath.pc,
            self.datapath.ir,
            self.datapath.flags.letter(),
            if self.datapath.supervisor {
                "supervisor"
            } else {
                "user"
            }
        );
        self.datapath.regs.dump();
    }
}
