//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU that serves as the out-of-order
//! engine's functional unit. It is a pure function of its operands: no
//! state, no side effects.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::common::reg::Word;
use crate::core::pipeline::signals::AluOp;
use crate::core::pipeline::traits::FunctionalUnit;

/// Arithmetic Logic Unit (ALU) for RV32I integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvooo_core::core::units::alu::Alu;
    /// use rvooo_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Sub, 0, 1), u32::MAX);
    /// assert_eq!(Alu::execute(AluOp::Sll, 0x1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Sltu, -5_i32 as u32, 10), 0);
    /// ```
    pub const fn execute(op: AluOp, a: Word, b: Word) -> Word {
        match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        }
    }
}

impl FunctionalUnit for Alu {
    fn execute(&self, op: AluOp, a: Word, b: Word) -> Word {
        Self::execute(op, a, b)
    }
}
