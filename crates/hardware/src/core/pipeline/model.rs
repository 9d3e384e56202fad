//! Pipeline Model.
//!
//! This module implements the in-order pipeline timing model. It provides:
//! 1. **Issue:** Decoding instructions into packets at stage 0.
//! 2. **Cycling:** Advancing packets deepest-stage-first with hazard detection.
//! 3. **Metrics:** Stall, hazard, and throughput accounting.
//!
//! The model observes the instruction stream; it never executes anything.
//! Architectural results are the control unit's business entirely.

use crate::common::error::SimError;
use crate::common::word::Word;
use crate::config::{PipelineConfig, StageKind};

use super::hazard::{self, HazardKind};
use super::metrics::PipelineMetrics;
use super::packet::InstructionPacket;

/// The configurable in-order pipeline.
pub struct PipelineModel {
    config: PipelineConfig,
    slots: Vec<Option<InstructionPacket>>,
    current_cycle: u64,
    metrics: PipelineMetrics,
    last_retired: Option<InstructionPacket>,
}

impl PipelineModel {
    /// Creates a pipeline from a validated configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The pipeline shape and timing parameters.
    ///
    /// # Returns
    ///
    /// The empty pipeline, or [`SimError::PipelineConfigInvalid`].
    pub fn new(config: PipelineConfig) -> Result<Self, SimError> {
        config.validate()?;
        let depth = config.depth;
        Ok(Self {
            config,
            slots: vec![None; depth],
            current_cycle: 0,
            metrics: PipelineMetrics::default(),
            last_retired: None,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The accumulated metrics.
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// The most recently retired packet, for post-hoc timing inspection.
    pub fn last_retired(&self) -> Option<&InstructionPacket> {
        self.last_retired.as_ref()
    }

    /// True when no packet is in flight.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Empties every stage and zeroes the metrics; configuration is kept.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.current_cycle = 0;
        self.metrics.reset();
        self.last_retired = None;
    }

    /// Issues an instruction into stage 0.
    ///
    /// When stage 0 is still occupied the issue fails as a structural
    /// hazard and the caller retries after the next cycle.
    ///
    /// # Arguments
    ///
    /// * `instruction` - The instruction word.
    /// * `pc` - The address it was fetched from.
    ///
    /// # Returns
    ///
    /// Whether the instruction was accepted.
    pub fn issue(&mut self, instruction: Word, pc: Word) -> bool {
        if self.slots[0].is_some() {
            self.metrics.structural_hazards += 1;
            self.metrics.stall_cycles += 1;
            return false;
        }
        let mut packet = InstructionPacket::decode(instruction, pc);
        packet.issue_cycle = self.current_cycle;
        self.slots[0] = Some(packet);
        true
    }

    /// Advances the pipeline one cycle.
    ///
    /// Stages are walked deepest-first so a packet moves at most one stage
    /// per cycle. Per stage: fetch completes trivially, decode detects
    /// hazards against deeper packets, execute charges branch penalties,
    /// memory charges access latency, and writeback retires the packet.
    /// An unstalled packet then advances when the next slot is free.
    pub fn cycle(&mut self) {
        self.current_cycle += 1;
        self.metrics.total_cycles += 1;

        for stage in (0..self.config.depth).rev() {
            let Some(mut packet) = self.slots[stage].take() else {
                continue;
            };
            packet.current_stage = stage;
            packet.stalled = false;

            match self.config.stages[stage] {
                StageKind::Fetch | StageKind::Custom => {
                    packet.stage_completed[stage] = true;
                }

                StageKind::Decode => {
                    self.detect_hazards(&mut packet, stage);
                    if !packet.stalled {
                        packet.stage_completed[stage] = true;
                    }
                }

                StageKind::Execute => {
                    if packet.is_branch {
                        packet.record_hazard(HazardKind::Control);
                        self.metrics.control_hazards += 1;
                        if !self.config.branch_prediction_enabled {
                            self.metrics.stall_cycles += self.config.branch_penalty;
                        }
                    }
                    packet.stage_completed[stage] = true;
                }

                StageKind::Memory => {
                    if packet.needs_memory {
                        self.metrics.memory_stall_cycles += self.config.memory_latency;
                        if packet.is_load {
                            self.metrics.memory_reads += 1;
                        } else if packet.is_store {
                            self.metrics.memory_writes += 1;
                        }
                    }
                    packet.stage_completed[stage] = true;
                }

                StageKind::Writeback => {
                    packet.stage_completed[stage] = true;
                    self.retire(packet);
                    continue;
                }
            }

            // Retire off the end of the pipe when no writeback stage exists.
            if stage + 1 == self.config.depth {
                if packet.stage_completed[stage] {
                    self.retire(packet);
                } else {
                    self.slots[stage] = Some(packet);
                }
                continue;
            }

            if !packet.stalled && self.slots[stage + 1].is_none() {
                self.slots[stage + 1] = Some(packet);
            } else {
                self.slots[stage] = Some(packet);
            }
        }
    }

    /// Cycles until the pipeline empties, bounded by `limit`.
    ///
    /// # Returns
    ///
    /// The number of cycles spent draining.
    pub fn drain(&mut self, limit: u64) -> u64 {
        let mut spent = 0;
        while !self.is_empty() && spent < limit {
            self.cycle();
            spent += 1;
        }
        spent
    }

    /// Decode-stage hazard detection against every deeper packet.
    ///
    /// Each detected data hazard is recorded on the packet and counted as
    /// an event. Only a read-after-write with forwarding disabled stalls;
    /// with forwarding the value is bypassed and no stall is charged.
    fn detect_hazards(&mut self, packet: &mut InstructionPacket, stage: usize) {
        for deeper in stage + 1..self.config.depth {
            let Some(prior) = self.slots[deeper].as_ref() else {
                continue;
            };
            let Some(kind) = hazard::data_hazard(packet, prior) else {
                continue;
            };
            packet.record_hazard(kind);
            self.metrics.data_hazards += 1;
            if kind == HazardKind::RawData && !self.config.forwarding_enabled {
                packet.stalled = true;
                packet.stall_cycles += 1;
                self.metrics.stall_cycles += 1;
            }
        }
    }

    fn retire(&mut self, mut packet: InstructionPacket) {
        packet.completion_cycle = self.current_cycle;
        self.metrics.total_instructions += 1;
        self.last_retired = Some(packet);
    }
}
