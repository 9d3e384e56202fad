//! Simulation Layer.
//!
//! Ties the core together for callers:
//! 1. **Simulator:** The owning instance with the public stepping and inspection API.
//! 2. **Loader:** Object-image parsing and installation.

/// Object-image loader.
pub mod loader;

/// The top-level simulator.
pub mod simulator;

pub use loader::ObjectImage;
pub use simulator::Simulator;
