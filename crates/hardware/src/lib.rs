//! Out-of-order RV32 execution engine library.
//!
//! This crate implements a cycle-level model of an out-of-order integer core with the following:
//! 1. **Core:** Register renaming (RAT, free list), PRF, readiness table, issue queue, ROB,
//!    and the per-cycle orchestrator binding rename, dispatch, issue, completion and commit.
//! 2. **ISA:** Decoding of the RV32I ALU subset (OP, OP-IMM, LUI) and disassembly.
//! 3. **Simulation:** Fetch loop, golden reference model, hex program loader, demo programs.
//! 4. **Configuration and statistics:** JSON configuration and run statistics.

/// Common types and constants (registers, instruction fields, errors).
pub mod common;
/// Engine configuration (defaults, select policy, sizing validation).
pub mod config;
/// Out-of-order core (pipeline structures, stages, engine, functional unit).
pub mod core;
/// Instruction set (decode, instruction fields, disassembly, RV32I tables).
pub mod isa;
/// Simulator, reference model and program loading.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// The out-of-order engine; construct with `O3Engine::new`.
pub use crate::core::O3Engine;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
