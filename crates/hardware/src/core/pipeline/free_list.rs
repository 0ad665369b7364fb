//! Physical register free list.
//!
//! A circular FIFO of physical register ids that are neither mapped by the
//! RAT nor held by an in-flight ROB entry as a pending old mapping. It provides:
//! 1. **Allocation:** Pops the oldest free id at rename.
//! 2. **Release:** Pushes an id back at commit (or when a flush reclaims it).
//! 3. **Membership Tracking:** A per-id bitmap that turns double frees into errors.
//!
//! `p0` is never in the pool; `p1..p31` start out mapped to `x1..x31`.

use std::collections::VecDeque;

use crate::common::constants::ARCH_REGS;
use crate::common::error::InvariantViolation;
use crate::common::reg::PhysReg;

/// FIFO pool of free physical registers.
#[derive(Clone, Debug)]
pub struct FreeList {
    queue: VecDeque<PhysReg>,
    in_pool: Vec<bool>,
}

impl FreeList {
    /// Creates a free list for a file of `phys_regs` registers, holding
    /// `p32..p{phys_regs-1}` in ascending order.
    pub fn new(phys_regs: usize) -> Self {
        let mut list = Self {
            queue: VecDeque::with_capacity(phys_regs),
            in_pool: vec![false; phys_regs],
        };
        list.reset();
        list
    }

    /// Restores the reset pool.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.in_pool.fill(false);
        for id in ARCH_REGS..self.in_pool.len() {
            self.queue.push_back(PhysReg(id));
            self.in_pool[id] = true;
        }
    }

    /// Pops the oldest free id, or `None` when the pool is empty.
    pub fn allocate(&mut self) -> Option<PhysReg> {
        let id = self.queue.pop_front()?;
        self.in_pool[id.index()] = false;
        Some(id)
    }

    /// Returns `id` to the tail of the pool.
    pub fn free(&mut self, id: PhysReg) -> Result<(), InvariantViolation> {
        if id.is_zero() {
            return Err(InvariantViolation::FreeZeroRegister);
        }
        let size = self.in_pool.len();
        let slot = self
            .in_pool
            .get_mut(id.index())
            .ok_or(InvariantViolation::PhysRegOutOfRange {
                index: id.index(),
                size,
            })?;
        if *slot {
            return Err(InvariantViolation::DoubleFree(id.index()));
        }
        *slot = true;
        self.queue.push_back(id);
        Ok(())
    }

    /// The id the next `allocate` would return.
    pub fn peek(&self) -> Option<PhysReg> {
        self.queue.front().copied()
    }

    /// Returns true if `id` is currently free.
    pub fn contains(&self, id: PhysReg) -> bool {
        self.in_pool.get(id.index()).copied().unwrap_or(false)
    }

    /// Number of free ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if no id can be allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Free ids, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = PhysReg> + '_ {
        self.queue.iter().copied()
    }
}
