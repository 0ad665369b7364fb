//! Core processor implementation.
//!
//! This module contains the out-of-order engine: the instruction pipeline
//! with its renaming and scheduling structures, and the functional unit it
//! issues into.

/// Instruction pipeline implementation (structures, stages, engine).
pub mod pipeline;

/// Execution units (integer ALU).
pub mod units;

pub use self::pipeline::{CycleReport, O3Engine};
