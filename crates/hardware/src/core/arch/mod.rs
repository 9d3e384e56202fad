//! Architectural State Components.
//!
//! This module groups everything the running program can observe:
//! 1. **Registers:** The general-purpose register file and condition flags.
//! 2. **Memory:** The word-addressed store with its console device.
//! 3. **Datapath:** The owning structure tying registers, memory, and signals together.

/// Architectural state container and signal logic.
pub mod datapath;

/// Memory-mapped console device.
pub mod device;

/// N/Z/P condition flags.
pub mod flags;

/// Word-addressed memory with the device region.
pub mod memory;

/// General-purpose register file.
pub mod regfile;

pub use datapath::Datapath;
pub use flags::CondFlags;
pub use memory::Memory;
pub use regfile::RegFile;
