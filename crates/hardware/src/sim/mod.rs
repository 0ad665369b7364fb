//! Simulation harness around the engine.
//!
//! Provides the pieces that stand in for the surrounding processor:
//! 1. **Simulator:** Fetch loop, commit log and differential checking.
//! 2. **Reference Model:** Architectural interpreter used as the golden model.
//! 3. **Loader:** Hex program parsing and file loading.
//! 4. **Programs:** Built-in self-checking demonstration programs.

/// Hex program loading.
pub mod loader;

/// Built-in demonstration programs.
pub mod programs;

/// Golden architectural model.
pub mod reference;

/// The fetch loop driving the engine.
pub mod simulator;

pub use simulator::{Mismatch, Simulator};
