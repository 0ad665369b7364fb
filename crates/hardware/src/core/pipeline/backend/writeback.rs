//! Writeback Stage: the completion broadcast.
//!
//! A completing operation, in one cycle, writes its result to the PRF, marks
//! its destination ready, marks its ROB entry done and wakes every issue
//! queue source waiting on the destination.

use tracing::trace;

use crate::common::error::InvariantViolation;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::Completion;
use crate::core::pipeline::prf::{PhysRegFile, PrfWrite};
use crate::core::pipeline::rob::Rob;
use crate::core::pipeline::scoreboard::ReadyTable;

impl Completion {
    /// The PRF write this completion drives, if it has a destination.
    pub fn prf_write(&self) -> Option<PrfWrite> {
        self.dst.map(|reg| PrfWrite {
            reg,
            value: self.result,
        })
    }
}

/// Applies a completion to every structure it updates.
pub fn writeback_stage(
    completion: &Completion,
    prf: &mut PhysRegFile,
    ready: &mut ReadyTable,
    rob: &mut Rob,
    iq: &mut IssueQueue,
) -> Result<(), InvariantViolation> {
    if let Some(write) = completion.prf_write() {
        prf.write(write)?;
        ready.set(write.reg)?;
        let woken = iq.wakeup(write.reg);
        trace!(
            rob = completion.rob_tag.0,
            dst = %write.reg,
            value = write.value,
            woken,
            "complete"
        );
    } else {
        trace!(rob = completion.rob_tag.0, "complete (no destination)");
    }
    rob.complete(completion.rob_tag, completion.result)
}
