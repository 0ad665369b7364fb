//! Issue Queue (reservation-station style scheduler).
//!
//! Holds renamed instructions until both of their source operands are
//! available, then hands them to the functional unit. It provides:
//! 1. **Dispatch:** Inserts an entry into a free slot, seeding source-ready bits
//!    from the readiness table and from the same cycle's completion broadcast.
//! 2. **Wakeup:** Marks every waiting source that names a just-completed register.
//! 3. **Select:** Picks one ready entry per cycle, by slot position or by age.
//! 4. **Issue:** Acknowledges the selection and frees the slot.

use serde::Serialize;

use crate::common::error::InvariantViolation;
use crate::common::reg::{PhysReg, Word};
use crate::config::SelectPolicy;
use crate::core::pipeline::rob::RobTag;
use crate::core::pipeline::scoreboard::ReadyTable;
use crate::core::pipeline::signals::AluOp;
use crate::core::pipeline::traits::OccupancyTracked;

/// A renamed instruction presented to the issue queue at dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Operation to perform.
    pub op: AluOp,
    /// Second operand is `imm` rather than `src2`.
    pub use_imm: bool,
    /// Immediate value (ignored unless `use_imm`).
    pub imm: Word,
    /// First source physical register.
    pub src1: PhysReg,
    /// Second source physical register (ignored when `use_imm`).
    pub src2: PhysReg,
    /// Destination physical register, if the instruction writes one.
    pub dst: Option<PhysReg>,
    /// Owning reorder buffer slot.
    pub rob_tag: RobTag,
    /// Program counter (debug).
    pub pc: Word,
}

/// An occupied issue queue slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IqEntry {
    /// Operation to perform.
    pub op: AluOp,
    /// Second operand is `imm` rather than `src2`.
    pub use_imm: bool,
    /// Immediate value.
    pub imm: Word,
    /// First source physical register.
    pub src1: PhysReg,
    /// Second source physical register.
    pub src2: PhysReg,
    /// `src1` holds a valid value.
    pub ready1: bool,
    /// `src2` holds a valid value (always true for immediates).
    pub ready2: bool,
    /// Destination physical register.
    pub dst: Option<PhysReg>,
    /// Owning reorder buffer slot.
    pub rob_tag: RobTag,
    /// Dispatch sequence number; smaller is older.
    pub seq: u64,
    /// Program counter (debug).
    pub pc: Word,
}

impl IqEntry {
    /// Both operands are available.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.ready1 && (self.use_imm || self.ready2)
    }
}

/// Observable state of one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IqSlotView {
    /// Slot is occupied.
    pub valid: bool,
    /// First source ready.
    pub ready1: bool,
    /// Second source ready.
    pub ready2: bool,
}

/// Fixed-capacity issue queue.
#[derive(Clone, Debug)]
pub struct IssueQueue {
    slots: Vec<Option<IqEntry>>,
    count: usize,
    next_seq: u64,
    policy: SelectPolicy,
}

impl IssueQueue {
    /// Creates an empty queue with `capacity` slots.
    pub fn new(capacity: usize, policy: SelectPolicy) -> Self {
        Self {
            slots: vec![None; capacity],
            count: 0,
            next_seq: 0,
            policy,
        }
    }

    /// Selection policy in force.
    pub const fn policy(&self) -> SelectPolicy {
        self.policy
    }

    /// Index of the first free slot, if any.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Inserts an entry into the first free slot.
    ///
    /// Each source is ready if the readiness table says so now, or if
    /// `broadcast` (this cycle's completion) names it. Returns the slot, or
    /// `None` when the queue is full.
    pub fn dispatch(
        &mut self,
        req: DispatchRequest,
        ready: &ReadyTable,
        broadcast: Option<PhysReg>,
    ) -> Option<usize> {
        let slot = self.first_free()?;
        let woken = |reg: PhysReg| ready.is_ready(reg) || broadcast == Some(reg);
        let entry = IqEntry {
            op: req.op,
            use_imm: req.use_imm,
            imm: req.imm,
            src1: req.src1,
            src2: req.src2,
            ready1: woken(req.src1),
            ready2: req.use_imm || woken(req.src2),
            dst: req.dst,
            rob_tag: req.rob_tag,
            seq: self.next_seq,
            pc: req.pc,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.slots[slot] = Some(entry);
        self.count += 1;
        Some(slot)
    }

    /// Broadcasts a completed register to every waiting source.
    ///
    /// Returns the number of entries that became fully ready.
    pub fn wakeup(&mut self, reg: PhysReg) -> usize {
        let mut woken = 0;
        for entry in self.slots.iter_mut().flatten() {
            let was_ready = entry.is_ready();
            if entry.src1 == reg {
                entry.ready1 = true;
            }
            if !entry.use_imm && entry.src2 == reg {
                entry.ready2 = true;
            }
            if !was_ready && entry.is_ready() {
                woken += 1;
            }
        }
        woken
    }

    /// Chooses the entry to issue this cycle without modifying the queue.
    pub fn select(&self) -> Option<usize> {
        let ready = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().filter(|e| e.is_ready()).map(|e| (i, e)));
        match self.policy {
            SelectPolicy::SlotOrder => ready.map(|(i, _)| i).next(),
            SelectPolicy::OldestFirst => ready.min_by_key(|(_, e)| e.seq).map(|(i, _)| i),
        }
    }

    /// Acknowledges issue of `slot`, freeing it and returning its entry.
    pub fn issue(&mut self, slot: usize) -> Result<IqEntry, InvariantViolation> {
        let capacity = self.slots.len();
        let cell = self
            .slots
            .get_mut(slot)
            .ok_or(InvariantViolation::IssueSlotOutOfRange { slot, capacity })?;
        let entry = (*cell).ok_or(InvariantViolation::IssueSlotEmpty(slot))?;
        if !entry.is_ready() {
            return Err(InvariantViolation::IssueNotReady(slot));
        }
        *cell = None;
        self.count -= 1;
        Ok(entry)
    }

    /// Selects and issues in one step.
    pub fn select_and_issue(&mut self) -> Result<Option<IqEntry>, InvariantViolation> {
        self.select().map(|slot| self.issue(slot)).transpose()
    }

    /// The entry in `slot`, if occupied.
    pub fn get(&self, slot: usize) -> Option<&IqEntry> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied entries with their slot index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &IqEntry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, e)))
    }

    /// Per-slot observable state.
    pub fn view(&self) -> Vec<IqSlotView> {
        self.slots
            .iter()
            .map(|s| match s {
                Some(e) => IqSlotView {
                    valid: true,
                    ready1: e.ready1,
                    ready2: e.ready2,
                },
                None => IqSlotView {
                    valid: false,
                    ready1: false,
                    ready2: false,
                },
            })
            .collect()
    }
}

impl OccupancyTracked for IssueQueue {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn len(&self) -> usize {
        self.count
    }

    fn flush(&mut self) {
        self.slots.fill(None);
        self.count = 0;
    }
}
