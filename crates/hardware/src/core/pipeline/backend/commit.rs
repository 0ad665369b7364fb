//! Commit Stage: retire the ROB head.
//!
//! Retirement is in strict program order and only of a completed head. The
//! retiring instruction's new mapping becomes architectural in the committed
//! RAT and the mapping it superseded returns to the free list.

use tracing::trace;

use crate::common::error::InvariantViolation;
use crate::core::pipeline::free_list::FreeList;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::rob::{CommitRecord, Rob};

/// Retires the head if it is done.
pub fn commit_stage(
    rob: &mut Rob,
    free_list: &mut FreeList,
    rat: &mut Rat,
) -> Result<Option<CommitRecord>, InvariantViolation> {
    let Some(record) = rob.commit_head() else {
        return Ok(None);
    };

    if let Some(old) = record.old_phys.filter(|p| !p.is_zero()) {
        free_list.free(old)?;
    }
    if let (Some(arch), Some(phys)) = (record.arch_dst, record.phys_dst) {
        rat.commit(arch, phys);
    }

    trace!(
        pc = record.pc,
        rob = record.tag.0,
        arch = ?record.arch_dst,
        phys = ?record.phys_dst,
        freed = ?record.old_phys,
        result = record.result,
        "commit"
    );
    Ok(Some(record))
}
