//! Rename Stage: source lookup, admission, destination renaming, dispatch.
//!
//! Lookup resolves an upstream instruction's source registers to physical
//! registers, forwarding the destination being renamed in the same cycle so
//! that a consumer immediately behind its producer sees the new mapping.
//!
//! Admission is all-or-nothing. The latched instruction is renamed only if
//! the issue queue has a free slot, the ROB has a free slot and, when it
//! writes a non-zero register, the free list can supply a physical id. A
//! shortfall is reported as a [`StallReason`] and touches no structure.

use tracing::trace;

use crate::common::error::InvariantViolation;
use crate::common::reg::{ArchReg, PhysReg};
use crate::core::pipeline::free_list::FreeList;
use crate::core::pipeline::issue_queue::{DispatchRequest, IssueQueue};
use crate::core::pipeline::latches::RenameEntry;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::rob::{Rob, RobTag};
use crate::core::pipeline::scoreboard::ReadyTable;
use crate::core::pipeline::signals::StallReason;
use crate::core::pipeline::traits::OccupancyTracked;
use crate::isa::instruction::DecodedInst;

/// Outcome of the admission check for the rename latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// The latch is empty.
    Idle,
    /// A structure is out of space; nothing is renamed.
    Stalled(StallReason),
    /// The latched instruction will be renamed this cycle.
    Granted {
        /// Physical destination the free list will hand out, if any.
        new_phys: Option<PhysReg>,
    },
}

impl Admission {
    /// The same-cycle rename other stages should see, as `(arch, phys)`.
    pub fn bypass(&self, latch: Option<&RenameEntry>) -> Option<(ArchReg, PhysReg)> {
        match (self, latch) {
            (Self::Granted { new_phys: Some(p) }, Some(entry)) => Some((entry.inst.dst, *p)),
            _ => None,
        }
    }

    /// Returns true if the latch is vacated this cycle.
    pub const fn frees_latch(&self) -> bool {
        matches!(self, Self::Idle | Self::Granted { .. })
    }
}

/// Decides whether the latched instruction can be renamed this cycle.
///
/// Uses only start-of-cycle occupancy: a slot freed by this cycle's issue
/// or commit is not available until the next cycle.
pub fn admit(
    latch: Option<&RenameEntry>,
    iq: &IssueQueue,
    rob: &Rob,
    free_list: &FreeList,
) -> Admission {
    let Some(entry) = latch else {
        return Admission::Idle;
    };
    if iq.is_full() {
        return Admission::Stalled(StallReason::IssueQueueFull);
    }
    if rob.is_full() {
        return Admission::Stalled(StallReason::RobFull);
    }
    if entry.inst.needs_phys_dst() {
        match free_list.peek() {
            Some(p) => Admission::Granted { new_phys: Some(p) },
            None => Admission::Stalled(StallReason::FreeListEmpty),
        }
    } else {
        Admission::Granted { new_phys: None }
    }
}

/// Resolves the sources of an upstream instruction.
pub fn lookup(
    rat: &Rat,
    inst: &DecodedInst,
    bypass: Option<(ArchReg, PhysReg)>,
) -> Result<RenameEntry, InvariantViolation> {
    for reg in [inst.src1, inst.src2, inst.dst] {
        if reg.index() >= rat.speculative_table().len() {
            return Err(InvariantViolation::ArchRegOutOfRange(reg.index()));
        }
    }
    let src2 = if inst.reads_src2() {
        inst.src2
    } else {
        ArchReg::ZERO
    };
    let (phys_src1, phys_src2) = rat.lookup(inst.src1, src2, bypass);
    Ok(RenameEntry {
        inst: *inst,
        phys_src1,
        phys_src2,
    })
}

/// The renaming structures a granted admission mutates.
#[derive(Debug)]
pub struct RenameTargets<'a> {
    /// Speculative RAT.
    pub rat: &'a mut Rat,
    /// Physical register pool.
    pub free_list: &'a mut FreeList,
    /// Readiness table.
    pub ready: &'a mut ReadyTable,
    /// Reorder buffer.
    pub rob: &'a mut Rob,
    /// Issue queue.
    pub iq: &'a mut IssueQueue,
}

/// Renames and dispatches a granted instruction.
///
/// `broadcast` is the register completing this cycle, which counts as ready
/// for the dispatched entry. Any structure refusing an admitted update is an
/// invariant violation.
pub fn rename_stage(
    entry: &RenameEntry,
    expected: Option<PhysReg>,
    broadcast: Option<PhysReg>,
    targets: RenameTargets<'_>,
) -> Result<RobTag, InvariantViolation> {
    let inst = &entry.inst;

    let (arch_dst, phys_dst, old_phys) = if inst.needs_phys_dst() {
        let new_phys = targets
            .free_list
            .allocate()
            .ok_or(InvariantViolation::AdmissionMismatch("free list"))?;
        if Some(new_phys) != expected {
            return Err(InvariantViolation::AdmissionMismatch("free list"));
        }
        targets.ready.clear(new_phys)?;
        let old = targets.rat.rename(inst.dst, new_phys);
        (Some(inst.dst), Some(new_phys), Some(old))
    } else {
        (None, None, None)
    };

    let rob_tag = targets
        .rob
        .allocate(arch_dst, phys_dst, old_phys, inst.pc)
        .ok_or(InvariantViolation::AdmissionMismatch("reorder buffer"))?;

    let request = DispatchRequest {
        op: inst.op,
        use_imm: inst.use_imm,
        imm: inst.imm,
        src1: entry.phys_src1,
        src2: entry.phys_src2,
        dst: phys_dst,
        rob_tag,
        pc: inst.pc,
    };
    let slot = targets
        .iq
        .dispatch(request, targets.ready, broadcast)
        .ok_or(InvariantViolation::AdmissionMismatch("issue queue"))?;

    trace!(
        pc = inst.pc,
        inst = %inst,
        src1 = %entry.phys_src1,
        src2 = %entry.phys_src2,
        dst = ?phys_dst,
        old = ?old_phys,
        rob = rob_tag.0,
        slot,
        "rename"
    );
    Ok(rob_tag)
}
