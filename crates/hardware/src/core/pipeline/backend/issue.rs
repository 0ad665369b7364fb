//! Issue Stage: select one ready entry and start it executing.
//!
//! Selection is computed from the issue queue as it stands at the start of
//! the cycle. Operands are read from the PRF with the cycle's completion
//! write visible, and the result is computed immediately by the functional
//! unit; the pipeline models only its latency.

use tracing::trace;

use crate::common::error::InvariantViolation;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::ExecEntry;
use crate::core::pipeline::prf::{PhysRegFile, PrfWrite};
use crate::core::pipeline::traits::FunctionalUnit;

/// An issue decision: the slot to acknowledge and the operation it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssueGrant {
    /// Issue queue slot to free.
    pub slot: usize,
    /// Operation entering the functional unit.
    pub exec: ExecEntry,
}

/// Picks this cycle's issue and evaluates it.
pub fn select<F: FunctionalUnit>(
    iq: &IssueQueue,
    prf: &PhysRegFile,
    pending: Option<PrfWrite>,
    unit: &F,
) -> Result<Option<IssueGrant>, InvariantViolation> {
    let Some(slot) = iq.select() else {
        return Ok(None);
    };
    let entry = iq.get(slot).ok_or(InvariantViolation::IssueSlotEmpty(slot))?;

    let a = prf.read(entry.src1, pending)?;
    let b = if entry.use_imm {
        entry.imm
    } else {
        prf.read(entry.src2, pending)?
    };
    let result = unit.execute(entry.op, a, b);

    trace!(
        pc = entry.pc,
        op = %entry.op,
        slot,
        rob = entry.rob_tag.0,
        a,
        b,
        result,
        "issue"
    );
    Ok(Some(IssueGrant {
        slot,
        exec: ExecEntry {
            rob_tag: entry.rob_tag,
            dst: entry.dst,
            result,
            pc: entry.pc,
        },
    }))
}
