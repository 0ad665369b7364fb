//! Golden reference model.
//!
//! An architectural interpreter for the supported RV32I subset: one
//! instruction per step, no timing, no renaming. The simulator compares the
//! engine's committed state against it after a run.

use crate::common::constants::{ARCH_REGS, INSTRUCTION_SIZE};
use crate::common::reg::{ArchReg, Word};
use crate::core::units::alu::Alu;
use crate::isa::instruction::DecodedInst;

/// Architectural state of the reference machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceModel {
    pc: Word,
    regs: [Word; ARCH_REGS],
    retired: u64,
}

impl ReferenceModel {
    /// Creates a machine with every register zero and the PC at `start_pc`.
    pub const fn new(start_pc: Word) -> Self {
        Self {
            pc: start_pc,
            regs: [0; ARCH_REGS],
            retired: 0,
        }
    }

    /// Executes one instruction and advances the PC.
    pub fn step(&mut self, inst: &DecodedInst) {
        let a = self.reg(inst.src1);
        let b = if inst.use_imm {
            inst.imm
        } else {
            self.reg(inst.src2)
        };
        let result = Alu::execute(inst.op, a, b);
        if inst.needs_phys_dst() {
            if let Some(slot) = self.regs.get_mut(inst.dst.index()) {
                *slot = result;
            }
        }
        self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
        self.retired += 1;
    }

    /// Executes every instruction of `program` in order.
    pub fn run<'a>(&mut self, program: impl IntoIterator<Item = &'a DecodedInst>) {
        for inst in program {
            self.step(inst);
        }
    }

    /// Value of `reg`; `x0` reads as zero.
    pub fn reg(&self, reg: ArchReg) -> Word {
        if reg.is_zero() {
            0
        } else {
            self.regs.get(reg.index()).copied().unwrap_or(0)
        }
    }

    /// The whole register file.
    pub const fn regs(&self) -> &[Word; ARCH_REGS] {
        &self.regs
    }

    /// Program counter of the next instruction.
    pub const fn pc(&self) -> Word {
        self.pc
    }

    /// Instructions executed so far.
    pub const fn retired(&self) -> u64 {
        self.retired
    }
}
