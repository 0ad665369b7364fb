//! Register identifiers.
//!
//! This module provides strong types for the two register namespaces of the
//! out-of-order engine. It provides:
//! 1. **Architectural Registers:** The 32 programmer-visible integer registers.
//! 2. **Physical Registers:** Renaming targets, indices into the physical register file.
//! 3. **Data Word:** The 32-bit value type carried through the datapath.

use std::fmt;

use serde::Serialize;

use super::constants::{ARCH_REGS, ZERO_REG};

/// A 32-bit machine word.
pub type Word = u32;

/// An architectural register index (`x0`..`x31`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct ArchReg(pub usize);

impl ArchReg {
    /// The hardwired zero register.
    pub const ZERO: Self = Self(ZERO_REG);

    /// Builds an architectural register from a 5-bit instruction field.
    #[inline]
    pub const fn from_field(field: u32) -> Self {
        Self((field as usize) % ARCH_REGS)
    }

    /// Returns true for `x0`.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == ZERO_REG
    }

    /// Returns the register index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A physical register index. `p0` is the permanent zero register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct PhysReg(pub usize);

impl PhysReg {
    /// The permanent zero register; never allocated or freed.
    pub const ZERO: Self = Self(ZERO_REG);

    /// Returns true for `p0`.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == ZERO_REG
    }

    /// Returns the register index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}
