//! Metrics Accounting Tests.
//!
//! Memory and branch charging, monotonicity of every counter, and reset
//! semantics.

use lc3_core::config::{Config, PipelineConfig};
use lc3_core::core::pipeline::{PipelineMetrics, PipelineModel};
use lc3_core::Simulator;

use crate::common::encode;
use crate::common::harness::TestContext;

fn snapshot(m: &PipelineMetrics) -> [u64; 9] {
    [
        m.total_cycles,
        m.total_instructions,
        m.stall_cycles,
        m.data_hazards,
        m.control_hazards,
        m.structural_hazards,
        m.memory_reads,
        m.memory_writes,
        m.memory_stall_cycles,
    ]
}

// ══════════════════════════════════════════════════════════
// 1. Charging rules
// ══════════════════════════════════════════════════════════

#[test]
fn loads_charge_reads_and_latency() {
    let config = PipelineConfig {
        memory_latency: 3,
        ..PipelineConfig::default()
    };
    let mut pipe = PipelineModel::new(config).unwrap();
    assert!(pipe.issue(encode::ld(1, 4), 0x3000));
    pipe.cycle();
    pipe.drain(16);

    let m = pipe.metrics();
    assert_eq!(m.memory_reads, 1);
    assert_eq!(m.memory_writes, 0);
    assert_eq!(m.memory_stall_cycles, 3);
}

#[test]
fn stores_charge_writes() {
    let mut pipe = PipelineModel::new(PipelineConfig::default()).unwrap();
    assert!(pipe.issue(encode::st(1, 4), 0x3000));
    pipe.cycle();
    pipe.drain(16);

    let m = pipe.metrics();
    assert_eq!(m.memory_writes, 1);
    assert_eq!(m.memory_reads, 0);
    assert_eq!(m.memory_stall_cycles, 1);
}

#[test]
fn lea_is_free_of_memory_charges() {
    let mut pipe = PipelineModel::new(PipelineConfig::default()).unwrap();
    assert!(pipe.issue(encode::lea(1, 4), 0x3000));
    pipe.cycle();
    pipe.drain(16);

    let m = pipe.metrics();
    assert_eq!(m.memory_reads + m.memory_writes + m.memory_stall_cycles, 0);
}

#[test]
fn unpredicted_branch_pays_the_penalty() {
    let config = PipelineConfig {
        branch_penalty: 2,
        ..PipelineConfig::default()
    };
    let mut pipe = PipelineModel::new(config).unwrap();
    assert!(pipe.issue(encode::br_nzp(-2), 0x3000));
    pipe.cycle();
    pipe.drain(16);

    let m = pipe.metrics();
    assert_eq!(m.control_hazards, 1);
    assert_eq!(m.stall_cycles, 2);
}

#[test]
fn predicted_branch_is_free() {
    let config = PipelineConfig {
        branch_prediction_enabled: true,
        ..PipelineConfig::default()
    };
    let mut pipe = PipelineModel::new(config).unwrap();
    assert!(pipe.issue(encode::br_nzp(-2), 0x3000));
    pipe.cycle();
    pipe.drain(16);

    let m = pipe.metrics();
    assert_eq!(m.control_hazards, 1, "still a control-hazard event");
    assert_eq!(m.stall_cycles, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Monotonicity and derived ratios
// ══════════════════════════════════════════════════════════

#[test]
fn counters_never_decrease_across_a_coupled_run() {
    let mut ctx = TestContext::new().install_halt_handler().load(
        0x3000,
        &[
            encode::add_imm(1, 0, 5),
            encode::ld(2, 4),
            encode::add_reg(3, 1, 2),
            encode::st(3, 2),
            encode::br(false, false, true, 0),
            encode::trap(0x25),
        ],
    );
    ctx.sim.enable_pipeline(true).unwrap();

    let mut prev = snapshot(ctx.sim.get_pipeline_metrics().unwrap());
    while !ctx.sim.is_halted() {
        ctx.sim.step().expect("step");
        let next = snapshot(ctx.sim.get_pipeline_metrics().unwrap());
        for (i, (&p, &n)) in prev.iter().zip(next.iter()).enumerate() {
            assert!(n >= p, "counter {} decreased: {} -> {}", i, p, n);
        }
        prev = next;
    }
}

#[test]
fn cpi_is_at_least_one_for_in_order() {
    let mut ctx = TestContext::new()
        .install_halt_handler()
        .load(0x3000, &[encode::add_imm(1, 0, 1), encode::trap(0x25)]);
    ctx.sim.enable_pipeline(true).unwrap();
    ctx.run_to_halt(100);
    ctx.sim.pipeline_mut().unwrap().drain(32);

    let m = ctx.sim.get_pipeline_metrics().unwrap();
    assert!(m.total_instructions > 0);
    assert!(m.cpi() >= 1.0, "cpi = {}", m.cpi());
    assert!(m.ipc() <= 1.0);
}

// ══════════════════════════════════════════════════════════
// 3. Reset
// ══════════════════════════════════════════════════════════

#[test]
fn reset_zeroes_metrics_and_keeps_configuration() {
    let config = PipelineConfig {
        name: "bespoke".to_string(),
        memory_latency: 7,
        ..PipelineConfig::default()
    };
    let mut pipe = PipelineModel::new(config).unwrap();
    assert!(pipe.issue(encode::ld(1, 0), 0x3000));
    pipe.cycle();
    pipe.drain(16);
    assert_ne!(pipe.metrics().total_cycles, 0);

    pipe.reset();
    assert_eq!(*pipe.metrics(), PipelineMetrics::default());
    assert!(pipe.is_empty());
    assert_eq!(pipe.config().name, "bespoke");
    assert_eq!(pipe.config().memory_latency, 7);
}

#[test]
fn simulator_reset_pipeline_is_exposed() {
    let mut sim = Simulator::new(Config::default());
    sim.enable_pipeline(true).unwrap();
    sim.load_program(&[encode::add_imm(1, 0, 1), 0xD000], 0x3000)
        .unwrap();
    let _ = sim.step();
    assert!(sim.get_pipeline_metrics().unwrap().total_cycles > 0);

    sim.reset_pipeline();
    assert_eq!(sim.get_pipeline_metrics().unwrap().total_cycles, 0);
}
