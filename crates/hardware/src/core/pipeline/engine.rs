//! Out-of-order execution engine.
//!
//! [`O3Engine`] owns every renaming, scheduling and retirement structure and
//! advances them one clock at a time through [`O3Engine::step`]. A cycle is
//! evaluated in two phases:
//! 1. **Evaluate:** Commit eligibility, the completing operation, the issue
//!    selection, rename admission and the source lookup of the incoming
//!    instruction are all decided from start-of-cycle state.
//! 2. **Apply:** Commit, writeback, rename/dispatch and issue are applied in
//!    that order, then the functional-unit pipeline and the rename latch advance.
//!
//! The only same-cycle bypasses are the RAT lookup forwarding the rename
//! performed in the same cycle, the PRF write-through read, and the issue
//! queue treating the cycle's completion broadcast as ready at dispatch.
//! A stalled rename mutates nothing and the incoming instruction is refused.

use serde::Serialize;
use tracing::{debug, trace};

use crate::common::constants::ARCH_REGS;
use crate::common::error::{ConfigError, InvariantViolation};
use crate::common::reg::{ArchReg, Word};
use crate::config::CoreConfig;
use crate::core::pipeline::backend::{commit, issue, writeback};
use crate::core::pipeline::free_list::FreeList;
use crate::core::pipeline::frontend::rename::{self, Admission, RenameTargets};
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::{Completion, ExecPipe, RenameEntry};
use crate::core::pipeline::prf::PhysRegFile;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::rob::{CommitRecord, Rob, RobTag};
use crate::core::pipeline::scoreboard::ReadyTable;
use crate::core::pipeline::signals::StallReason;
use crate::core::pipeline::snapshot::{CoreSnapshot, IqSnapshot, RobSnapshot};
use crate::core::pipeline::traits::{FunctionalUnit, OccupancyTracked};
use crate::core::units::alu::Alu;
use crate::isa::instruction::DecodedInst;

/// What happened in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Cycle number (0 for the first call to `step`).
    pub cycle: u64,
    /// The offered instruction was taken; the caller may advance its PC.
    pub accepted: bool,
    /// ROB slot of the instruction renamed and dispatched.
    pub renamed: Option<RobTag>,
    /// ROB slot of the instruction issued to the functional unit.
    pub issued: Option<RobTag>,
    /// ROB slot of the instruction that completed.
    pub completed: Option<RobTag>,
    /// The instruction that retired.
    pub committed: Option<CommitRecord>,
    /// Why rename could not proceed.
    pub stall: Option<StallReason>,
}

/// The out-of-order core: RAT, free list, PRF, readiness table, issue
/// queue, ROB and the single pipelined functional unit.
#[derive(Clone, Debug)]
pub struct O3Engine<F = Alu> {
    rat: Rat,
    free_list: FreeList,
    prf: PhysRegFile,
    ready: ReadyTable,
    iq: IssueQueue,
    rob: Rob,
    latch: Option<RenameEntry>,
    pipe: ExecPipe,
    unit: F,
    reclaim_on_flush: bool,
    cycle: u64,
}

impl O3Engine<Alu> {
    /// Builds an engine with the integer ALU as its functional unit.
    pub fn new(config: &CoreConfig) -> Result<Self, ConfigError> {
        Self::with_unit(config, Alu)
    }
}

impl Default for O3Engine<Alu> {
    fn default() -> Self {
        Self::build(&CoreConfig::default(), Alu)
    }
}

impl<F: FunctionalUnit> O3Engine<F> {
    /// Builds an engine around an arbitrary functional unit.
    pub fn with_unit(config: &CoreConfig, unit: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, unit))
    }

    fn build(config: &CoreConfig, unit: F) -> Self {
        Self {
            rat: Rat::new(),
            free_list: FreeList::new(config.phys_regs),
            prf: PhysRegFile::new(config.phys_regs),
            ready: ReadyTable::new(config.phys_regs),
            iq: IssueQueue::new(config.iq_size, config.select_policy),
            rob: Rob::new(config.rob_size),
            latch: None,
            pipe: ExecPipe::new(config.fu_latency),
            unit,
            reclaim_on_flush: config.reclaim_on_flush,
            cycle: 0,
        }
    }

    /// Returns every structure to its reset state.
    pub fn reset(&mut self) {
        self.rat.reset();
        self.free_list.reset();
        self.prf.reset();
        self.ready.reset();
        self.iq.flush();
        self.rob.flush();
        self.latch = None;
        self.pipe.flush();
        self.cycle = 0;
    }

    /// Advances one clock cycle, offering `input` to the front end.
    ///
    /// When the report says the input was not accepted, the caller must offer
    /// the same instruction again next cycle.
    ///
    /// # Errors
    ///
    /// Any [`InvariantViolation`] means the engine's state can no longer be
    /// trusted; the caller must not keep stepping it.
    pub fn step(&mut self, input: Option<&DecodedInst>) -> Result<CycleReport, InvariantViolation> {
        let cycle = self.cycle;

        // Evaluate.
        let completion = self.pipe.front().copied().map(Completion::from);
        let pending = completion.as_ref().and_then(Completion::prf_write);
        let broadcast = pending.map(|w| w.reg);
        let grant = issue::select(&self.iq, &self.prf, pending, &self.unit)?;
        let admission = rename::admit(self.latch.as_ref(), &self.iq, &self.rob, &self.free_list);
        let next_latch = match input {
            Some(inst) if admission.frees_latch() => Some(rename::lookup(
                &self.rat,
                inst,
                admission.bypass(self.latch.as_ref()),
            )?),
            _ => None,
        };

        // Apply.
        let committed = commit::commit_stage(&mut self.rob, &mut self.free_list, &mut self.rat)?;

        if let Some(c) = &completion {
            writeback::writeback_stage(
                c,
                &mut self.prf,
                &mut self.ready,
                &mut self.rob,
                &mut self.iq,
            )?;
        }

        let mut renamed = None;
        let mut stall = None;
        match admission {
            Admission::Granted { new_phys } => {
                let entry = self
                    .latch
                    .take()
                    .ok_or(InvariantViolation::AdmissionMismatch("rename latch"))?;
                let targets = RenameTargets {
                    rat: &mut self.rat,
                    free_list: &mut self.free_list,
                    ready: &mut self.ready,
                    rob: &mut self.rob,
                    iq: &mut self.iq,
                };
                renamed = Some(rename::rename_stage(&entry, new_phys, broadcast, targets)?);
            }
            Admission::Stalled(reason) => {
                debug!(cycle, %reason, "rename stall");
                stall = Some(reason);
            }
            Admission::Idle => {}
        }

        let issued = match grant {
            Some(g) => {
                let _ = self.iq.issue(g.slot)?;
                Some(g.exec)
            }
            None => None,
        };
        self.pipe.advance(issued);

        let accepted = next_latch.is_some();
        if admission.frees_latch() {
            self.latch = next_latch;
        }
        self.cycle += 1;

        trace!(
            cycle,
            accepted,
            rob = self.rob.len(),
            iq = self.iq.len(),
            free = self.free_list.len(),
            "cycle"
        );
        Ok(CycleReport {
            cycle,
            accepted,
            renamed,
            issued: issued.map(|e| e.rob_tag),
            completed: completion.map(|c| c.rob_tag),
            committed,
            stall,
        })
    }

    /// Squashes all in-flight work and restores the committed mapping.
    ///
    /// With `reclaim_on_flush` set, the physical destination of every
    /// squashed ROB entry goes back to the free list. Returns the number of
    /// registers reclaimed.
    pub fn flush(&mut self) -> Result<usize, InvariantViolation> {
        let mut reclaimed = 0;
        if self.reclaim_on_flush {
            for (_, entry) in self.rob.iter() {
                if let Some(phys) = entry.phys_dst {
                    self.free_list.free(phys)?;
                    reclaimed += 1;
                }
            }
        }
        self.latch = None;
        self.pipe.flush();
        self.iq.flush();
        self.rob.flush();
        self.rat.flush();
        debug!(cycle = self.cycle, reclaimed, "flush");
        Ok(reclaimed)
    }

    /// Returns true when nothing is in flight anywhere in the engine.
    pub fn is_drained(&self) -> bool {
        self.latch.is_none() && self.pipe.in_flight() == 0 && self.iq.is_empty() && self.rob.is_empty()
    }

    /// Number of cycles stepped since construction or reset.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Committed architectural value of `reg`.
    pub fn arch_value(&self, reg: ArchReg) -> Word {
        self.rat
            .committed_table()
            .get(reg.index())
            .and_then(|p| self.prf.as_slice().get(p.index()))
            .copied()
            .unwrap_or(0)
    }

    /// Committed architectural register file, `x0..x31`.
    pub fn arch_state(&self) -> [Word; ARCH_REGS] {
        std::array::from_fn(|i| self.arch_value(ArchReg(i)))
    }

    /// Register alias tables.
    pub const fn rat(&self) -> &Rat {
        &self.rat
    }

    /// Physical register free list.
    pub const fn free_list(&self) -> &FreeList {
        &self.free_list
    }

    /// Physical register file.
    pub const fn prf(&self) -> &PhysRegFile {
        &self.prf
    }

    /// Readiness table.
    pub const fn ready_table(&self) -> &ReadyTable {
        &self.ready
    }

    /// Issue queue.
    pub const fn issue_queue(&self) -> &IssueQueue {
        &self.iq
    }

    /// Reorder buffer.
    pub const fn rob(&self) -> &Rob {
        &self.rob
    }

    /// Instruction waiting in the rename latch.
    pub const fn rename_latch(&self) -> Option<&RenameEntry> {
        self.latch.as_ref()
    }

    /// Operations inside the functional unit.
    pub fn in_flight(&self) -> usize {
        self.pipe.in_flight()
    }

    /// Captures every externally observable piece of state.
    pub fn snapshot(&self) -> CoreSnapshot {
        CoreSnapshot {
            cycle: self.cycle,
            speculative_rat: self.rat.speculative_table().to_vec(),
            committed_rat: self.rat.committed_table().to_vec(),
            rob: RobSnapshot {
                occupancy: self.rob.len(),
                head: self.rob.head(),
                tail: self.rob.tail(),
                slots: self.rob.view(),
            },
            iq: IqSnapshot {
                occupancy: self.iq.len(),
                slots: self.iq.view(),
            },
            prf: self.prf.as_slice().to_vec(),
            ready: self.ready.as_slice().to_vec(),
            free_list: self.free_list.len(),
            rename_latch: self.latch.map(|e| e.inst.pc),
            in_flight: self.pipe.in_flight(),
        }
    }
}
