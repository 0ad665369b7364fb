//! Physical Register File (PRF).
//!
//! A flat array of words addressed by physical register id, with two read
//! ports and one write port. `p0` always reads as zero. A write driven in the
//! same cycle as a read of the same id is visible to that read
//! (write-through), so a consumer can pick up a result on its broadcast cycle.

use crate::common::error::InvariantViolation;
use crate::common::reg::{PhysReg, Word};

/// A write presented on the PRF write port during the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrfWrite {
    /// Destination physical register.
    pub reg: PhysReg,
    /// Value being written.
    pub value: Word,
}

/// Physical register file.
#[derive(Clone, Debug)]
pub struct PhysRegFile {
    regs: Vec<Word>,
}

impl PhysRegFile {
    /// Creates a zeroed register file of `size` entries.
    pub fn new(size: usize) -> Self {
        Self {
            regs: vec![0; size],
        }
    }

    /// Number of physical registers.
    #[inline]
    pub fn size(&self) -> usize {
        self.regs.len()
    }

    fn check(&self, reg: PhysReg) -> Result<usize, InvariantViolation> {
        if reg.index() < self.regs.len() {
            Ok(reg.index())
        } else {
            Err(InvariantViolation::PhysRegOutOfRange {
                index: reg.index(),
                size: self.regs.len(),
            })
        }
    }

    /// Reads one port, observing `pending` if it targets the same register.
    pub fn read(&self, reg: PhysReg, pending: Option<PrfWrite>) -> Result<Word, InvariantViolation> {
        let idx = self.check(reg)?;
        if reg.is_zero() {
            return Ok(0);
        }
        match pending {
            Some(w) if w.reg == reg => Ok(w.value),
            _ => Ok(self.regs[idx]),
        }
    }

    /// Reads both ports in one cycle.
    pub fn read_pair(
        &self,
        a: PhysReg,
        b: PhysReg,
        pending: Option<PrfWrite>,
    ) -> Result<(Word, Word), InvariantViolation> {
        Ok((self.read(a, pending)?, self.read(b, pending)?))
    }

    /// Commits a write. Writes to `p0` are discarded.
    pub fn write(&mut self, write: PrfWrite) -> Result<(), InvariantViolation> {
        let idx = self.check(write.reg)?;
        if !write.reg.is_zero() {
            self.regs[idx] = write.value;
        }
        Ok(())
    }

    /// Clears every register.
    pub fn reset(&mut self) {
        self.regs.fill(0);
    }

    /// Raw contents, indexed by physical id.
    pub fn as_slice(&self) -> &[Word] {
        &self.regs
    }
}
