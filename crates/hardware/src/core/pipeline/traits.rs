//! Pipeline component interfaces.
//!
//! This module defines the seams between the engine and its collaborators.
//! It provides:
//! 1. **Functional Unit Interface:** The black-box datapath the engine issues into.
//! 2. **Structure Interface:** Flush and occupancy queries shared by the buffering structures.

use crate::common::reg::Word;
use crate::core::pipeline::signals::AluOp;

/// A pure functional unit: `(operandA, operandB, op) -> result`.
///
/// Implementations must be free of side effects; the engine may evaluate an
/// operation at issue time and deliver the result a fixed number of cycles
/// later.
pub trait FunctionalUnit {
    /// Computes the result of `op` on the two operands.
    fn execute(&self, op: AluOp, a: Word, b: Word) -> Word;
}

impl<F: Fn(AluOp, Word, Word) -> Word> FunctionalUnit for F {
    fn execute(&self, op: AluOp, a: Word, b: Word) -> Word {
        self(op, a, b)
    }
}

/// A fixed-capacity buffering structure (issue queue, reorder buffer).
pub trait OccupancyTracked {
    /// Total number of slots.
    fn capacity(&self) -> usize;

    /// Number of occupied slots.
    fn len(&self) -> usize;

    /// Returns true if no slot is occupied.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if every slot is occupied.
    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Number of free slots.
    fn free_slots(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Invalidates every entry.
    fn flush(&mut self);
}
