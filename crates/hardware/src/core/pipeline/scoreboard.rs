//! Readiness table for physical registers.
//!
//! One bit per physical register: set means the PRF holds a valid,
//! consumable value for that id. Dispatch seeds issue queue source-ready
//! bits from this table; completion sets the bit; rename clears it when the
//! register is reallocated to a new destination. Nothing else clears it.

use crate::common::constants::ARCH_REGS;
use crate::common::error::InvariantViolation;
use crate::common::reg::PhysReg;

/// Per-physical-register "value is valid" bitmap.
#[derive(Clone, Debug)]
pub struct ReadyTable {
    ready: Vec<bool>,
}

impl ReadyTable {
    /// Creates a table with `p0..p31` ready and every other register not ready.
    pub fn new(phys_regs: usize) -> Self {
        let mut table = Self {
            ready: vec![false; phys_regs],
        };
        table.reset();
        table
    }

    /// Restores the reset state.
    pub fn reset(&mut self) {
        for (id, bit) in self.ready.iter_mut().enumerate() {
            *bit = id < ARCH_REGS;
        }
    }

    /// Returns whether `reg` holds a consumable value. `p0` is always ready.
    #[inline]
    pub fn is_ready(&self, reg: PhysReg) -> bool {
        reg.is_zero() || self.ready.get(reg.index()).copied().unwrap_or(false)
    }

    fn slot(&mut self, reg: PhysReg) -> Result<&mut bool, InvariantViolation> {
        let size = self.ready.len();
        self.ready
            .get_mut(reg.index())
            .ok_or(InvariantViolation::PhysRegOutOfRange {
                index: reg.index(),
                size,
            })
    }

    /// Marks `reg` as holding a valid value (completion).
    pub fn set(&mut self, reg: PhysReg) -> Result<(), InvariantViolation> {
        *self.slot(reg)? = true;
        Ok(())
    }

    /// Marks `reg` as awaiting its producer (reallocation at rename).
    pub fn clear(&mut self, reg: PhysReg) -> Result<(), InvariantViolation> {
        if !reg.is_zero() {
            *self.slot(reg)? = false;
        }
        Ok(())
    }

    /// Raw bitmap, indexed by physical id.
    pub fn as_slice(&self) -> &[bool] {
        &self.ready
    }
}
