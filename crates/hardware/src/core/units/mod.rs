//! Execution units.
//!
//! The out-of-order engine drives a single functional unit: the integer ALU.

/// Integer arithmetic logic unit.
pub mod alu;
