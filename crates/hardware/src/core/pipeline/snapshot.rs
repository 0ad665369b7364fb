//! Per-cycle observability snapshot.
//!
//! A [`CoreSnapshot`] captures everything an external observer may inspect
//! about the engine after a cycle: both RAT copies, ROB and issue queue
//! occupancy with per-slot status, the PRF contents and the free list depth.
//! It serializes to JSON for the CLI's `--snapshots` stream.

use serde::Serialize;

use crate::common::reg::{PhysReg, Word};
use crate::core::pipeline::issue_queue::IqSlotView;
use crate::core::pipeline::rob::RobSlotView;

/// Reorder buffer state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RobSnapshot {
    /// Number of valid entries.
    pub occupancy: usize,
    /// Oldest entry.
    pub head: usize,
    /// Next allocation slot.
    pub tail: usize,
    /// Per-slot valid/done bits.
    pub slots: Vec<RobSlotView>,
}

/// Issue queue state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IqSnapshot {
    /// Number of valid entries.
    pub occupancy: usize,
    /// Per-slot valid/ready bits.
    pub slots: Vec<IqSlotView>,
}

/// Observable engine state at the end of a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CoreSnapshot {
    /// Cycles stepped so far.
    pub cycle: u64,
    /// Speculative RAT, indexed by architectural register.
    pub speculative_rat: Vec<PhysReg>,
    /// Committed RAT, indexed by architectural register.
    pub committed_rat: Vec<PhysReg>,
    /// Reorder buffer.
    pub rob: RobSnapshot,
    /// Issue queue.
    pub iq: IqSnapshot,
    /// Physical register file contents.
    pub prf: Vec<Word>,
    /// Readiness bits.
    pub ready: Vec<bool>,
    /// Free list occupancy.
    pub free_list: usize,
    /// PC of the instruction waiting in the rename latch.
    pub rename_latch: Option<Word>,
    /// Operations inside the functional unit.
    pub in_flight: usize,
}

impl CoreSnapshot {
    /// Serializes the snapshot as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
