//! Microcoded Control Unit.
//!
//! This module implements the 64-state control unit. It contains:
//! 1. **States:** The populated state space with fixed state numbers.
//! 2. **Store:** The immutable 64-entry microcode table.
//! 3. **Actions:** The per-state register-transfer routines.
//! 4. **Sequencer:** The per-tick driver with next-state and halt logic.

/// The per-tick driver and next-state function.
pub mod sequencer;

/// Microsequencer state definitions and decode dispatch.
pub mod state;

/// Per-state action routines.
mod states;

/// The 64-entry microcode store.
pub mod store;

pub use sequencer::{Sequencer, StepOutcome};
pub use state::State;
pub use store::{ControlStore, Microinstruction};
