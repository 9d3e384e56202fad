//! Hazard Detection Tests.
//!
//! Pairwise detection rules and the end-to-end RAW behavior with and
//! without forwarding.

use lc3_core::config::PipelineConfig;
use lc3_core::core::pipeline::hazard::data_hazard;
use lc3_core::core::pipeline::{HazardKind, InstructionPacket, PipelineModel};

use crate::common::encode;

fn packet(word: u16) -> InstructionPacket {
    InstructionPacket::decode(word, 0x3000)
}

fn no_forwarding() -> PipelineModel {
    PipelineModel::new(PipelineConfig {
        forwarding_enabled: false,
        ..PipelineConfig::default()
    })
    .unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Pairwise detection
// ══════════════════════════════════════════════════════════

#[test]
fn raw_when_prior_writes_a_source() {
    let prior = packet(encode::add_imm(1, 0, 0)); // writes R1
    let current = packet(encode::add_reg(2, 1, 3)); // reads R1
    assert_eq!(data_hazard(&current, &prior), Some(HazardKind::RawData));
}

#[test]
fn waw_when_both_write_the_same_register() {
    let prior = packet(encode::add_imm(2, 3, 0));
    let current = packet(encode::add_imm(2, 4, 0));
    // current's sources (R4) miss prior's dest, so this is pure WAW.
    assert_eq!(data_hazard(&current, &prior), Some(HazardKind::WawData));
}

#[test]
fn war_when_current_writes_a_prior_source() {
    let prior = packet(encode::add_reg(1, 2, 3)); // reads R2
    let current = packet(encode::add_imm(2, 4, 0)); // writes R2
    assert_eq!(data_hazard(&current, &prior), Some(HazardKind::WarData));
}

#[test]
fn no_hazard_without_register_overlap() {
    let prior = packet(encode::add_imm(1, 2, 0));
    let current = packet(encode::add_imm(3, 4, 0));
    assert_eq!(data_hazard(&current, &prior), None);
}

#[test]
fn register_zero_is_not_tracked() {
    // R0 doubles as the no-operand marker, so writes to it never hazard.
    let prior = packet(encode::add_imm(0, 1, 0)); // "writes" R0
    let current = packet(encode::add_reg(2, 0, 1)); // "reads" R0
    assert_eq!(data_hazard(&current, &prior), None);
}

// ══════════════════════════════════════════════════════════
// 2. RAW through the model
// ══════════════════════════════════════════════════════════

#[test]
fn raw_without_forwarding_stalls() {
    let mut pipe = no_forwarding();

    assert!(pipe.issue(0x1220, 0x3000)); // ADD R1,R0,#0
    pipe.cycle();
    assert!(pipe.issue(0x1441, 0x3001)); // ADD R2,R1,R1 -- uses R1
    pipe.cycle();
    pipe.drain(32);

    let m = pipe.metrics();
    assert_eq!(m.total_instructions, 2);
    assert!(m.data_hazards >= 1, "data_hazards = {}", m.data_hazards);
    assert!(m.stall_cycles >= 1, "stall_cycles = {}", m.stall_cycles);
    assert!(m.cpi() > 1.0, "cpi = {}", m.cpi());
}

#[test]
fn raw_with_forwarding_counts_but_does_not_stall() {
    let mut pipe = PipelineModel::new(PipelineConfig::default()).unwrap();

    assert!(pipe.issue(0x1220, 0x3000));
    pipe.cycle();
    assert!(pipe.issue(0x1441, 0x3001));
    pipe.cycle();
    pipe.drain(32);

    let m = pipe.metrics();
    assert_eq!(m.total_instructions, 2);
    assert!(m.data_hazards >= 1, "hazard still observed");
    assert_eq!(m.stall_cycles, 0, "forwarding resolves the dependency");
}

#[test]
fn war_never_stalls_even_without_forwarding() {
    let mut pipe = no_forwarding();

    assert!(pipe.issue(encode::add_reg(1, 2, 2), 0x3000)); // reads R2
    pipe.cycle();
    assert!(pipe.issue(encode::add_imm(2, 3, 0), 0x3001)); // writes R2
    pipe.cycle();
    pipe.drain(32);

    let m = pipe.metrics();
    assert_eq!(m.total_instructions, 2);
    assert!(m.data_hazards >= 1, "WAR observed as an event");
    assert_eq!(m.stall_cycles, 0, "only RAW stalls an in-order pipe");
}

#[test]
fn stalled_packet_records_its_stall_cycles() {
    let mut pipe = no_forwarding();

    assert!(pipe.issue(0x1220, 0x3000));
    pipe.cycle();
    assert!(pipe.issue(0x1441, 0x3001));
    pipe.cycle();
    pipe.drain(32);

    let last = pipe.last_retired().expect("dependent packet retired last");
    assert_eq!(last.pc, 0x3001);
    assert!(last.stall_cycles >= 1);
    assert!(!last.hazards.is_empty());
    assert!(last.hazards.contains(&HazardKind::RawData));
}

// ══════════════════════════════════════════════════════════
// 3. Structural hazards
// ══════════════════════════════════════════════════════════

#[test]
fn issue_into_occupied_slot_is_structural() {
    let mut pipe = PipelineModel::new(PipelineConfig::default()).unwrap();

    assert!(pipe.issue(0x1220, 0x3000));
    assert!(!pipe.issue(0x1441, 0x3001), "stage 0 still occupied");

    let m = pipe.metrics();
    assert_eq!(m.structural_hazards, 1);
    assert_eq!(m.stall_cycles, 1);

    pipe.cycle();
    assert!(pipe.issue(0x1441, 0x3001), "slot freed after a cycle");
}
