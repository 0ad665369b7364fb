//! Inter-stage pipeline latches.
//!
//! This module defines the records that carry an instruction between the
//! engine's stages. It provides:
//! 1. **Rename Latch:** A decoded instruction whose sources have already been
//!    looked up in the RAT, waiting for rename/dispatch admission.
//! 2. **Execute Latch:** An issued operation travelling through the
//!    fixed-latency functional-unit pipeline.
//! 3. **Completion Broadcast:** The result delivered on the writeback port.

use std::collections::VecDeque;

use crate::common::reg::{PhysReg, Word};
use crate::core::pipeline::rob::RobTag;
use crate::isa::instruction::DecodedInst;

/// Rename-stage latch entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenameEntry {
    /// The upstream instruction.
    pub inst: DecodedInst,
    /// Physical register of `inst.src1`, resolved when the entry was latched.
    pub phys_src1: PhysReg,
    /// Physical register of `inst.src2`, resolved when the entry was latched.
    pub phys_src2: PhysReg,
}

/// An operation inside the functional-unit pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecEntry {
    /// Owning reorder buffer slot.
    pub rob_tag: RobTag,
    /// Destination physical register.
    pub dst: Option<PhysReg>,
    /// Computed result.
    pub result: Word,
    /// Program counter (debug).
    pub pc: Word,
}

/// A completion presented on the writeback port this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Completing reorder buffer slot.
    pub rob_tag: RobTag,
    /// Register written and broadcast, if any.
    pub dst: Option<PhysReg>,
    /// Result value.
    pub result: Word,
}

impl From<ExecEntry> for Completion {
    fn from(e: ExecEntry) -> Self {
        Self {
            rob_tag: e.rob_tag,
            dst: e.dst,
            result: e.result,
        }
    }
}

/// Fixed-depth pipeline of the functional unit.
///
/// Each cycle one stage enters at the back (the op issued this cycle, or a
/// bubble) and one leaves at the front (the op completing this cycle), so an
/// operation issued in cycle `t` completes in cycle `t + latency`.
#[derive(Clone, Debug)]
pub struct ExecPipe {
    stages: VecDeque<Option<ExecEntry>>,
}

impl ExecPipe {
    /// Creates an empty pipeline `latency` stages deep.
    pub fn new(latency: usize) -> Self {
        Self {
            stages: std::iter::repeat_n(None, latency).collect(),
        }
    }

    /// The operation that completes this cycle.
    pub fn front(&self) -> Option<&ExecEntry> {
        self.stages.front().and_then(Option::as_ref)
    }

    /// Advances one cycle: drops the completing stage and enters `issued`.
    pub fn advance(&mut self, issued: Option<ExecEntry>) {
        let _ = self.stages.pop_front();
        self.stages.push_back(issued);
    }

    /// Number of operations in flight.
    pub fn in_flight(&self) -> usize {
        self.stages.iter().flatten().count()
    }

    /// Squashes every operation in flight.
    pub fn flush(&mut self) {
        self.stages.iter_mut().for_each(|s| *s = None);
    }
}
