//! Instruction encoding utilities and the decoded instruction record.
//!
//! Provides bit extraction for RISC-V instruction fields and the record the
//! decoder hands to the out-of-order engine's front end.

use std::fmt;

use serde::Serialize;

use crate::common::constants::{
    FUNCT3_MASK, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_SHIFT, OPCODE_MASK, RD_MASK, RD_SHIFT,
    RS1_MASK, RS1_SHIFT, RS2_MASK, RS2_SHIFT,
};
use crate::common::reg::{ArchReg, Word};
use crate::core::pipeline::signals::AluOp;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> ArchReg;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> ArchReg;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> ArchReg;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> ArchReg {
        ArchReg::from_field((self >> RD_SHIFT) & RD_MASK)
    }

    #[inline(always)]
    fn rs1(&self) -> ArchReg {
        ArchReg::from_field((self >> RS1_SHIFT) & RS1_MASK)
    }

    #[inline(always)]
    fn rs2(&self) -> ArchReg {
        ArchReg::from_field((self >> RS2_SHIFT) & RS2_MASK)
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }
}

/// One decoded instruction, as the front end presents it to rename.
///
/// At most one of these enters the engine per cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub struct DecodedInst {
    /// Functional-unit operation.
    pub op: AluOp,
    /// Second operand is `imm` rather than `src2`.
    pub use_imm: bool,
    /// Sign-extended (or upper) immediate.
    pub imm: Word,
    /// First source register.
    pub src1: ArchReg,
    /// Second source register (ignored when `use_imm`).
    pub src2: ArchReg,
    /// Destination register.
    pub dst: ArchReg,
    /// Instruction writes `dst`.
    pub writes_register: bool,
    /// Program counter.
    pub pc: Word,
}

impl DecodedInst {
    /// Register-register operation `dst = src1 op src2`.
    pub const fn reg(op: AluOp, dst: usize, src1: usize, src2: usize) -> Self {
        Self {
            op,
            use_imm: false,
            imm: 0,
            src1: ArchReg(src1),
            src2: ArchReg(src2),
            dst: ArchReg(dst),
            writes_register: dst != 0,
            pc: 0,
        }
    }

    /// Register-immediate operation `dst = src1 op imm`.
    pub const fn imm(op: AluOp, dst: usize, src1: usize, imm: i32) -> Self {
        Self {
            op,
            use_imm: true,
            imm: imm as Word,
            src1: ArchReg(src1),
            src2: ArchReg::ZERO,
            dst: ArchReg(dst),
            writes_register: dst != 0,
            pc: 0,
        }
    }

    /// Returns the same instruction placed at `pc`.
    #[must_use]
    pub const fn at(mut self, pc: Word) -> Self {
        self.pc = pc;
        self
    }

    /// Returns true if the instruction needs a fresh physical destination.
    #[inline]
    pub const fn needs_phys_dst(&self) -> bool {
        self.writes_register && !self.dst.is_zero()
    }

    /// Returns true if `src2` is a real register operand.
    #[inline]
    pub const fn reads_src2(&self) -> bool {
        !self.use_imm
    }
}

impl fmt::Display for DecodedInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.needs_phys_dst() && self.src1.is_zero() && self.use_imm && self.imm == 0 {
            return f.write_str("nop");
        }
        if self.use_imm {
            write!(
                f,
                "{} {}, {}, {}",
                self.op.imm_mnemonic(),
                self.dst,
                self.src1,
                self.imm as i32
            )
        } else {
            write!(f, "{} {}, {}, {}", self.op, self.dst, self.src1, self.src2)
        }
    }
}
