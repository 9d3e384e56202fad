//! Common utilities and types used throughout the LC-3 simulator.
//!
//! This module provides fundamental building blocks shared across all components
//! of the simulator. It includes:
//! 1. **Word Arithmetic:** The 16-bit machine word with sign/zero extension.
//! 2. **Constants:** The memory map, device registers, trap vectors, and field masks.
//! 3. **Error Handling:** The fatal-condition and loader-failure taxonomies.

/// Machine constants used throughout the simulator.
pub mod constants;

/// Error types for fatal conditions and loader failures.
pub mod error;

/// The 16-bit machine word and extension helpers.
pub mod word;

pub use error::{LoadError, SimError};
pub use word::{sext, zext, Word};
