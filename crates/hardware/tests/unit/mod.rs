//! Unit and scenario tests, grouped by component.

/// Integer ALU operations.
pub mod alu;


/// Engine structures and whole-engine scenarios.
pub mod core;


/// Simulator, loader and built-in programs.
pub mod sim;
