//! Out-of-order instruction pipeline.
//!
//! This module contains the renaming, scheduling and retirement machinery
//! and the engine that drives it. It includes the following components:
//! 1. **Structures:** RAT, free list, PRF, readiness table, issue queue and ROB.
//! 2. **Stages:** Rename (front end) and issue, writeback, commit (back end).
//! 3. **Latches:** The rename latch and the functional-unit pipeline.
//! 4. **Engine:** The per-cycle orchestrator and its observability snapshot.
//! 5. **Traits:** Seams for the functional unit and the buffering structures.

/// Issue, writeback and commit stages.
pub mod backend;

/// The per-cycle orchestrator.
pub mod engine;

/// Physical register free list.
pub mod free_list;

/// Rename stage.
pub mod frontend;

/// Issue queue with wakeup/select.
pub mod issue_queue;

/// Inter-stage latches.
pub mod latches;

/// Physical register file.
pub mod prf;

/// Register alias table.
pub mod rat;

/// Reorder buffer.
pub mod rob;

/// Physical register readiness table.
pub mod scoreboard;

/// Control signals and operation types.
pub mod signals;

/// Observable state capture.
pub mod snapshot;

/// Traits for pipeline components.
pub mod traits;

pub use engine::{CycleReport, O3Engine};
