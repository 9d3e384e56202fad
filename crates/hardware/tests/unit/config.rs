//! Configuration Tests.
//!
//! Covers defaults, JSON deserialization with omitted fields, and pipeline
//! validation failures.

use lc3_core::config::{Config, PipelineConfig, StageKind, MAX_PIPELINE_DEPTH};
use lc3_core::SimError;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn default_config_is_classic_five_stage() {
    let config = Config::default();
    assert_eq!(config.general.start_pc, 0x3000);
    assert!(!config.general.trace_instructions);
    assert_eq!(config.pipeline.depth, 5);
    assert_eq!(
        config.pipeline.stages,
        vec![
            StageKind::Fetch,
            StageKind::Decode,
            StageKind::Execute,
            StageKind::Memory,
            StageKind::Writeback,
        ]
    );
    assert!(config.pipeline.forwarding_enabled);
    assert!(!config.pipeline.branch_prediction_enabled);
    assert!(!config.pipeline.out_of_order_execution);
    assert_eq!(config.pipeline.memory_latency, 1);
    assert_eq!(config.pipeline.branch_penalty, 2);
    assert!(config.pipeline.validate().is_ok());
}

// ══════════════════════════════════════════════════════════
// 2. Deserialization
// ══════════════════════════════════════════════════════════

#[test]
fn deserializes_with_all_fields_omitted() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.pipeline.depth, 5);
    assert_eq!(config.general.start_pc, 0x3000);
}

#[test]
fn deserializes_partial_pipeline() {
    let json = r#"{
        "pipeline": {
            "stages": ["FETCH", "DECODE", "EXECUTE", "WRITEBACK"],
            "depth": 4,
            "forwarding_enabled": false
        }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.pipeline.depth, 4);
    assert!(!config.pipeline.forwarding_enabled);
    assert_eq!(config.pipeline.stages[3], StageKind::Writeback);
    // Unspecified fields keep their defaults.
    assert_eq!(config.pipeline.branch_penalty, 2);
    assert!(config.pipeline.validate().is_ok());
}

#[test]
fn stage_names_are_uppercase() {
    assert!(serde_json::from_str::<StageKind>("\"CUSTOM\"").is_ok());
    assert!(serde_json::from_str::<StageKind>("\"fetch\"").is_err());
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

fn expect_invalid(config: &PipelineConfig) {
    match config.validate() {
        Err(SimError::PipelineConfigInvalid { .. }) => {}
        other => panic!("expected PipelineConfigInvalid, got {:?}", other),
    }
}

#[test]
fn rejects_excessive_depth() {
    let config = PipelineConfig {
        depth: MAX_PIPELINE_DEPTH + 1,
        stages: vec![StageKind::Custom; MAX_PIPELINE_DEPTH + 1],
        ..PipelineConfig::default()
    };
    expect_invalid(&config);
}

#[test]
fn rejects_zero_depth() {
    let config = PipelineConfig {
        depth: 0,
        ..PipelineConfig::default()
    };
    expect_invalid(&config);
}

#[test]
fn rejects_stage_list_shorter_than_depth() {
    let config = PipelineConfig {
        depth: 5,
        stages: vec![StageKind::Fetch, StageKind::Decode],
        ..PipelineConfig::default()
    };
    expect_invalid(&config);
}

#[test]
fn rejects_out_of_order() {
    let config = PipelineConfig {
        out_of_order_execution: true,
        ..PipelineConfig::default()
    };
    expect_invalid(&config);
}

#[test]
fn accepts_maximum_depth() {
    let config = PipelineConfig {
        depth: MAX_PIPELINE_DEPTH,
        stages: vec![StageKind::Custom; MAX_PIPELINE_DEPTH],
        ..PipelineConfig::default()
    };
    assert!(config.validate().is_ok());
}
