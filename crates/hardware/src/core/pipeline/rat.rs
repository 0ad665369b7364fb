//! Register Alias Table (RAT).
//!
//! Maps each architectural register to the physical register currently
//! holding its value. Two copies are kept:
//! 1. **Speculative:** Updated at rename; what newly decoded instructions read.
//! 2. **Committed:** Updated at retirement; the precise architectural state.
//!
//! `x0` always maps to `p0` in both tables and is never renamed.

use crate::common::constants::ARCH_REGS;
use crate::common::reg::{ArchReg, PhysReg};

/// Speculative and committed architectural-to-physical mapping.
#[derive(Clone, Debug)]
pub struct Rat {
    speculative: [PhysReg; ARCH_REGS],
    committed: [PhysReg; ARCH_REGS],
}

impl Default for Rat {
    fn default() -> Self {
        Self::new()
    }
}

impl Rat {
    /// Creates a RAT with both tables identity-mapped.
    pub fn new() -> Self {
        let identity = std::array::from_fn(PhysReg);
        Self {
            speculative: identity,
            committed: identity,
        }
    }

    /// Resets both tables to the identity mapping (`xi -> pi`).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Resolves a single source through the speculative table.
    ///
    /// `bypass` is a rename being performed in the same cycle; when its
    /// destination matches, the new physical id wins over the stale entry.
    #[inline]
    fn resolve(&self, src: ArchReg, bypass: Option<(ArchReg, PhysReg)>) -> PhysReg {
        if src.is_zero() {
            return PhysReg::ZERO;
        }
        match bypass {
            Some((dst, phys)) if dst == src => phys,
            _ => self.speculative[src.index()],
        }
    }

    /// Looks up both sources of an instruction in the speculative table.
    pub fn lookup(
        &self,
        src1: ArchReg,
        src2: ArchReg,
        bypass: Option<(ArchReg, PhysReg)>,
    ) -> (PhysReg, PhysReg) {
        (self.resolve(src1, bypass), self.resolve(src2, bypass))
    }

    /// Points `dst` at `new_phys` in the speculative table.
    ///
    /// Returns the previous mapping, which the caller frees once this
    /// instruction commits. Renaming `x0` changes nothing and returns `p0`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is not an architectural register. The rename stage
    /// rejects such instructions with `ArchRegOutOfRange` before calling this.
    pub fn rename(&mut self, dst: ArchReg, new_phys: PhysReg) -> PhysReg {
        if dst.is_zero() {
            return PhysReg::ZERO;
        }
        std::mem::replace(&mut self.speculative[dst.index()], new_phys)
    }

    /// Records a retired mapping in the committed table.
    pub fn commit(&mut self, dst: ArchReg, phys: PhysReg) {
        if !dst.is_zero() {
            self.committed[dst.index()] = phys;
        }
    }

    /// Discards all speculative mappings, restoring the committed table.
    pub fn flush(&mut self) {
        self.speculative = self.committed;
    }

    /// Current speculative mapping of `reg`.
    ///
    /// # Panics
    ///
    /// Panics if `reg` is not an architectural register (`x0..x31`).
    #[inline]
    pub fn speculative(&self, reg: ArchReg) -> PhysReg {
        self.speculative[reg.index()]
    }

    /// Committed mapping of `reg`.
    ///
    /// # Panics
    ///
    /// Panics if `reg` is not an architectural register (`x0..x31`).
    #[inline]
    pub fn committed(&self, reg: ArchReg) -> PhysReg {
        self.committed[reg.index()]
    }

    /// The whole speculative table.
    pub const fn speculative_table(&self) -> &[PhysReg; ARCH_REGS] {
        &self.speculative
    }

    /// The whole committed table.
    pub const fn committed_table(&self) -> &[PhysReg; ARCH_REGS] {
        &self.committed
    }
}
