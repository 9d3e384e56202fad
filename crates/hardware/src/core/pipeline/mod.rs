//! Pipeline Timing Model.
//!
//! This module implements the optional in-order pipeline observer:
//! 1. **Packets:** Per-instruction bookkeeping records and their decode.
//! 2. **Hazards:** RAW/WAW/WAR detection between in-flight packets.
//! 3. **Metrics:** Cycle, stall, and hazard counters with derived CPI/IPC.
//! 4. **Model:** The staged structure that issues, advances, and retires packets.

/// Pairwise data-hazard detection.
pub mod hazard;

/// Counters and derived throughput ratios.
pub mod metrics;

/// The staged pipeline structure.
pub mod model;

/// Per-instruction bookkeeping records.
pub mod packet;

pub use hazard::HazardKind;
pub use metrics::PipelineMetrics;
pub use model::PipelineModel;
pub use packet::InstructionPacket;
