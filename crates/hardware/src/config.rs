//! Configuration system for the LC-3 simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline machine constants (start PC, tick guard, reset image).
//! 2. **Structures:** Hierarchical config for general, machine, and pipeline settings.
//! 3. **Validation:** Pipeline shape checking with distinguishable failure reasons.
//!
//! Configuration is supplied as JSON by embedding callers, or use
//! `Config::default()` for the CLI.

use serde::Deserialize;

use crate::common::constants;
use crate::common::error::SimError;
use crate::common::word::Word;

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden.
mod defaults {
    /// Initial program counter: the start of user space.
    pub const START_PC: u16 = super::constants::RESET_PC;

    /// Microstates allowed per instruction before a runaway microloop is
    /// reported as a timeout. The longest legal sequence (fetch plus LDI)
    /// is nine states, so this leaves ample slack.
    pub const MAX_TICKS_PER_INSTRUCTION: u64 = 64;

    /// Word written to every memory cell at reset.
    pub const FILL_WORD: u16 = 0x0000;

    /// Display name of the default pipeline shape.
    pub const PIPELINE_NAME: &str = "classic 5-stage";

    /// Stage count of the default pipeline.
    pub const PIPELINE_DEPTH: usize = 5;

    /// Modeled clock frequency in MHz (reporting only).
    pub const CLOCK_FREQUENCY_MHZ: u32 = 100;

    /// Cycles charged to the memory stage per memory-touching packet.
    pub const MEMORY_LATENCY: u64 = 1;

    /// Stall cycles charged per unpredicted branch.
    pub const BRANCH_PENALTY: u64 = 2;
}

/// Upper bound on the number of pipeline stages.
pub const MAX_PIPELINE_DEPTH: usize = 8;

/// Pipeline stage identities.
///
/// A configuration names its stages in order; the model attaches hazard
/// detection, memory accounting, and retirement behavior to these identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StageKind {
    /// Instruction fetch.
    Fetch,
    /// Decode and hazard detection.
    Decode,
    /// Execute; branches resolve here.
    Execute,
    /// Memory access.
    Memory,
    /// Register writeback; packets retire here.
    Writeback,
    /// User-defined stage with no modeled behavior.
    Custom,
}

impl StageKind {
    /// Returns the display name of the stage.
    pub fn name(self) -> &'static str {
        match self {
            StageKind::Fetch => "FETCH",
            StageKind::Decode => "DECODE",
            StageKind::Execute => "EXECUTE",
            StageKind::Memory => "MEMORY",
            StageKind::Writeback => "WRITEBACK",
            StageKind::Custom => "CUSTOM",
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use lc3_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.start_pc, 0x3000);
/// assert_eq!(config.pipeline.depth, 5);
/// ```
///
/// Deserializing from JSON (typical embedding usage):
///
/// ```
/// use lc3_core::config::{Config, StageKind};
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "pipeline": {
///         "name": "shallow",
///         "stages": ["FETCH", "DECODE", "WRITEBACK"],
///         "depth": 3,
///         "forwarding_enabled": false,
///         "branch_penalty": 1
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.pipeline.stages[2], StageKind::Writeback);
/// assert!(config.pipeline.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Reset-image settings.
    #[serde(default)]
    pub machine: MachineConfig,
    /// Pipeline model configuration.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Enable per-instruction trace output to stderr.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial PC value (defaults to the start of user space).
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: Word,

    /// Microstates allowed per instruction before a timeout is raised.
    #[serde(default = "GeneralConfig::default_max_ticks")]
    pub max_ticks_per_instruction: u64,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    fn default_start_pc() -> Word {
        defaults::START_PC
    }

    /// Returns the default per-instruction microstate budget.
    fn default_max_ticks() -> u64 {
        defaults::MAX_TICKS_PER_INSTRUCTION
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
            max_ticks_per_instruction: defaults::MAX_TICKS_PER_INSTRUCTION,
        }
    }
}

/// Reset-image settings.
///
/// Controls what `reset` writes into memory before device registers and any
/// program image are installed.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineConfig {
    /// Word stored in every memory cell at reset.
    #[serde(default = "MachineConfig::default_fill_word")]
    pub fill_word: Word,

    /// Whether the display starts ready (DSR bit 15) at reset.
    #[serde(default = "MachineConfig::default_display_ready")]
    pub display_ready_at_reset: bool,
}

impl MachineConfig {
    /// Returns the default memory fill word.
    fn default_fill_word() -> Word {
        defaults::FILL_WORD
    }

    /// Display defaults to ready so stores to DDR never wedge a program.
    fn default_display_ready() -> bool {
        true
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            fill_word: defaults::FILL_WORD,
            display_ready_at_reset: true,
        }
    }
}

/// Pipeline model configuration.
///
/// The timing model observes the instruction stream; none of these settings
/// affect architectural results, only the reported metrics.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Display name for reports.
    #[serde(default = "PipelineConfig::default_name")]
    pub name: String,

    /// Ordered stage list; must be at least `depth` long.
    #[serde(default = "PipelineConfig::default_stages")]
    pub stages: Vec<StageKind>,

    /// Number of active stages (at most [`MAX_PIPELINE_DEPTH`]).
    #[serde(default = "PipelineConfig::default_depth")]
    pub depth: usize,

    /// Resolve read-after-write hazards by forwarding instead of stalling.
    #[serde(default = "PipelineConfig::default_forwarding")]
    pub forwarding_enabled: bool,

    /// Waive the branch penalty, as if prediction were perfect.
    #[serde(default)]
    pub branch_prediction_enabled: bool,

    /// Declared but unimplemented; rejected by [`validate`](Self::validate).
    #[serde(default)]
    pub out_of_order_execution: bool,

    /// Modeled clock frequency in MHz (reporting only).
    #[serde(default = "PipelineConfig::default_clock")]
    pub clock_frequency_mhz: u32,

    /// Cycles charged per memory-touching packet in the memory stage.
    #[serde(default = "PipelineConfig::default_memory_latency")]
    pub memory_latency: u64,

    /// Stall cycles charged per unpredicted branch.
    #[serde(default = "PipelineConfig::default_branch_penalty")]
    pub branch_penalty: u64,
}

impl PipelineConfig {
    /// Returns the default pipeline display name.
    fn default_name() -> String {
        defaults::PIPELINE_NAME.to_string()
    }

    /// Returns the classic fetch/decode/execute/memory/writeback stage list.
    fn default_stages() -> Vec<StageKind> {
        vec![
            StageKind::Fetch,
            StageKind::Decode,
            StageKind::Execute,
            StageKind::Memory,
            StageKind::Writeback,
        ]
    }

    /// Returns the default pipeline depth.
    fn default_depth() -> usize {
        defaults::PIPELINE_DEPTH
    }

    /// Forwarding defaults to on, matching common teaching configurations.
    fn default_forwarding() -> bool {
        true
    }

    /// Returns the default modeled clock frequency.
    fn default_clock() -> u32 {
        defaults::CLOCK_FREQUENCY_MHZ
    }

    /// Returns the default memory latency in cycles.
    fn default_memory_latency() -> u64 {
        defaults::MEMORY_LATENCY
    }

    /// Returns the default branch penalty in cycles.
    fn default_branch_penalty() -> u64 {
        defaults::BRANCH_PENALTY
    }

    /// Checks that this configuration describes a pipeline the model can run.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or [`SimError::PipelineConfigInvalid`] when the depth is zero
    /// or beyond [`MAX_PIPELINE_DEPTH`], the stage list is shorter than the
    /// depth, or out-of-order execution is requested.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.depth == 0 {
            return Err(SimError::PipelineConfigInvalid {
                reason: "depth must be at least 1".to_string(),
            });
        }
        if self.depth > MAX_PIPELINE_DEPTH {
            return Err(SimError::PipelineConfigInvalid {
                reason: format!("depth {} exceeds maximum {}", self.depth, MAX_PIPELINE_DEPTH),
            });
        }
        if self.stages.len() < self.depth {
            return Err(SimError::PipelineConfigInvalid {
                reason: format!(
                    "{} stages listed for depth {}",
                    self.stages.len(),
                    self.depth
                ),
            });
        }
        if self.out_of_order_execution {
            return Err(SimError::PipelineConfigInvalid {
                reason: "out-of-order execution is not implemented".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Creates the classic in-order five-stage configuration with forwarding.
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            stages: Self::default_stages(),
            depth: defaults::PIPELINE_DEPTH,
            forwarding_enabled: true,
            branch_prediction_enabled: false,
            out_of_order_execution: false,
            clock_frequency_mhz: defaults::CLOCK_FREQUENCY_MHZ,
            memory_latency: defaults::MEMORY_LATENCY,
            branch_penalty: defaults::BRANCH_PENALTY,
        }
    }
}
