//! LC-3 educational processor simulator library.
//!
//! This crate implements a microcoded LC-3 core with the following:
//! 1. **Architecture:** The 16-bit register file, PC/IR/MAR/MDR, condition flags,
//!    control signals, and a 64K-word memory with memory-mapped devices.
//! 2. **Control:** A 64-state microsequencer driving one microinstruction per tick.
//! 3. **Pipeline:** A configurable in-order timing model with hazard detection
//!    and CPI/IPC metrics, observing the instruction stream.
//! 4. **ISA:** Opcode decoding, field extraction, and disassembly.
//! 5. **Simulation:** Loader, configuration, and statistics collection.

/// Common types and constants (words, memory map, errors).
pub mod common;
/// Simulator configuration (defaults, enums, validation).
pub mod config;
/// Processor core (architectural state, control unit, pipeline model).
pub mod core;
/// Instruction set (opcodes, fields, disassembly).
pub mod isa;
/// Simulator instance and object-image loader.
pub mod sim;
/// Control-unit statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Fatal-condition taxonomy returned by stepping and loading.
pub use crate::common::error::SimError;
/// Top-level simulator; owns all machine state.
pub use crate::sim::simulator::Simulator;
