//! Simulator Error Definitions.
//!
//! This module defines the error handling surface of the core. It provides:
//! 1. **Fatal Conditions:** Everything that stops a run with a distinguishable cause.
//! 2. **Loader Failures:** Object-image problems reported without touching machine state.
//! 3. **Error Traits:** Integration with standard Rust error traits for system-level reporting.
//!
//! A normal halt (the program clearing the MCR run latch) is not an error;
//! `run` returns `Ok` and the halt is observable through `Simulator::is_halted`.

use std::fmt;

use super::word::Word;

/// Fatal simulation conditions, each distinguishable to callers.
///
/// Architectural state remains inspectable after any of these; the machine
/// simply refuses to tick further until reset.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// The reserved encoding `0xD` reached decode, or RTI was executed in
    /// user mode. The payload carries the address and word of the offender.
    UnknownOpcode { pc: Word, ir: Word },

    /// User-mode code touched memory outside user space. The payload is the
    /// violating address (the MAR at the time of the check).
    AccessViolation { addr: Word },

    /// The step budget ran out before the machine halted.
    Timeout { steps: u64 },

    /// An object image could not be loaded; machine state is unchanged.
    Load(LoadError),

    /// A pipeline configuration failed validation.
    PipelineConfigInvalid { reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownOpcode { pc, ir } => {
                write!(f, "unknown opcode {:#06x} at {:#06x}", ir, pc)
            }
            SimError::AccessViolation { addr } => {
                write!(f, "access control violation at {:#06x}", addr)
            }
            SimError::Timeout { steps } => {
                write!(f, "no halt after {} steps", steps)
            }
            SimError::Load(e) => write!(f, "load failed: {}", e),
            SimError::PipelineConfigInvalid { reason } => {
                write!(f, "invalid pipeline configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for SimError {}

impl From<LoadError> for SimError {
    fn from(e: LoadError) -> Self {
        SimError::Load(e)
    }
}

/// Object-image load failures.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadError {
    /// The file could not be read from disk.
    Read { path: String, message: String },

    /// The file is too short to contain an origin word.
    MissingOrigin,

    /// The file does not contain a whole number of 16-bit words.
    OddLength,

    /// The image body does not fit between its origin and the top of memory.
    ImageTooLarge { origin: Word, words: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read { path, message } => {
                write!(f, "cannot read '{}': {}", path, message)
            }
            LoadError::MissingOrigin => write!(f, "image has no origin word"),
            LoadError::OddLength => write!(f, "image has a trailing odd byte"),
            LoadError::ImageTooLarge { origin, words } => {
                write!(
                    f,
                    "{} words at origin {:#06x} overflow the address space",
                    words, origin
                )
            }
        }
    }
}

impl std::error::Error for LoadError {}
