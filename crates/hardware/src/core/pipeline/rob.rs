//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from rename
//! through commit. It provides:
//! 1. **Allocation:** Claims the tail slot; the slot index is the instruction's completion tag.
//! 2. **Completion:** Marks an entry done with its result, in any order.
//! 3. **In-order Commit:** Retires the head only when it is done, in program order.
//! 4. **Flush:** Squashes every entry and resets the pointers.

use serde::Serialize;

use crate::common::error::InvariantViolation;
use crate::common::reg::{ArchReg, PhysReg, Word};
use crate::core::pipeline::traits::OccupancyTracked;

/// ROB slot index, doubling as the completion tag of the instruction in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RobTag(pub usize);

/// A single entry in the Reorder Buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RobEntry {
    /// Whether this entry is valid (occupied).
    pub valid: bool,
    /// Execution complete, result available.
    pub done: bool,
    /// Architectural destination, if the instruction writes a register.
    pub arch_dst: Option<ArchReg>,
    /// Physical register allocated for the destination.
    pub phys_dst: Option<PhysReg>,
    /// Previous mapping of `arch_dst`, freed when this entry commits.
    pub old_phys: Option<PhysReg>,
    /// Computed result value.
    pub result: Word,
    /// Program counter of the instruction.
    pub pc: Word,
}

/// What a retiring instruction hands back to the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Slot the instruction retired from.
    pub tag: RobTag,
    /// Program counter of the instruction.
    pub pc: Word,
    /// Architectural destination.
    pub arch_dst: Option<ArchReg>,
    /// New physical mapping, to install in the committed RAT.
    pub phys_dst: Option<PhysReg>,
    /// Superseded physical mapping, to return to the free list.
    pub old_phys: Option<PhysReg>,
    /// Result value.
    pub result: Word,
}

/// Observable state of one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RobSlotView {
    /// Slot is occupied.
    pub valid: bool,
    /// Entry has completed.
    pub done: bool,
}

/// Reorder buffer: a circular buffer retiring in program order.
#[derive(Clone, Debug)]
pub struct Rob {
    /// Fixed-size entry array.
    entries: Vec<RobEntry>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of valid entries.
    count: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![RobEntry::default(); capacity],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Index of the oldest entry.
    #[inline]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Index the next allocation will use.
    #[inline]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    /// Allocates the tail entry. Returns `None` if the ROB is full.
    pub fn allocate(
        &mut self,
        arch_dst: Option<ArchReg>,
        phys_dst: Option<PhysReg>,
        old_phys: Option<PhysReg>,
        pc: Word,
    ) -> Option<RobTag> {
        if self.is_full() {
            return None;
        }

        let tag = RobTag(self.tail);
        self.entries[self.tail] = RobEntry {
            valid: true,
            done: false,
            arch_dst,
            phys_dst,
            old_phys,
            result: 0,
            pc,
        };

        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        Some(tag)
    }

    fn entry_mut(&mut self, tag: RobTag) -> Result<&mut RobEntry, InvariantViolation> {
        let capacity = self.entries.len();
        let entry = self
            .entries
            .get_mut(tag.0)
            .ok_or(InvariantViolation::RobTagOutOfRange { tag: tag.0, capacity })?;
        if entry.valid {
            Ok(entry)
        } else {
            Err(InvariantViolation::RobEntryNotValid(tag.0))
        }
    }

    /// Marks an entry done with its result value.
    pub fn complete(&mut self, tag: RobTag, result: Word) -> Result<(), InvariantViolation> {
        let entry = self.entry_mut(tag)?;
        if entry.done {
            return Err(InvariantViolation::RobDoubleComplete(tag.0));
        }
        entry.done = true;
        entry.result = result;
        Ok(())
    }

    /// Returns a reference to the head entry (oldest), if the ROB is non-empty.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.count == 0 {
            None
        } else {
            Some(&self.entries[self.head])
        }
    }

    /// Returns true if the head entry is done and may retire this cycle.
    pub fn head_ready(&self) -> bool {
        self.peek_head().is_some_and(|e| e.valid && e.done)
    }

    /// Commits (retires) the head entry.
    ///
    /// Returns `None` if the ROB is empty or the head has not completed.
    pub fn commit_head(&mut self) -> Option<CommitRecord> {
        if !self.head_ready() {
            return None;
        }

        let tag = RobTag(self.head);
        let entry = std::mem::take(&mut self.entries[self.head]);
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        Some(CommitRecord {
            tag,
            pc: entry.pc,
            arch_dst: entry.arch_dst,
            phys_dst: entry.phys_dst,
            old_phys: entry.old_phys,
            result: entry.result,
        })
    }

    /// Finds a reference to the entry with the given tag.
    pub fn get(&self, tag: RobTag) -> Option<&RobEntry> {
        self.entries.get(tag.0).filter(|e| e.valid)
    }

    /// Iterate over all valid entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (RobTag, &RobEntry)> + '_ {
        let cap = self.entries.len();
        (0..self.count).map(move |i| {
            let idx = (self.head + i) % cap;
            (RobTag(idx), &self.entries[idx])
        })
    }

    /// Per-slot observable state, in slot order.
    pub fn view(&self) -> Vec<RobSlotView> {
        self.entries
            .iter()
            .map(|e| RobSlotView {
                valid: e.valid,
                done: e.done,
            })
            .collect()
    }
}

impl OccupancyTracked for Rob {
    fn capacity(&self) -> usize {
        self.entries.len()
    }

    fn len(&self) -> usize {
        self.count
    }

    fn flush(&mut self) {
        self.entries.fill(RobEntry::default());
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }
}
