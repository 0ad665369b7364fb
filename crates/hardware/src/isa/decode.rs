//! RISC-V Instruction Decoder.
//!
//! Turns 32-bit RV32I encodings into the [`DecodedInst`] record consumed by
//! the out-of-order engine. Only the ALU subset is accepted: register-register
//! operations (OP), register-immediate operations (OP-IMM) and `lui`, which
//! is expressed as an addition to `x0`.

use crate::common::constants::SHAMT_MASK;
use crate::common::error::DecodeError;
use crate::common::reg::{ArchReg, Word};
use crate::core::pipeline::signals::AluOp;
use crate::isa::instruction::{DecodedInst, InstructionBits};
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Bit shift for extracting the I-Type immediate field (bits 20-31).
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
/// The immediate occupies the upper 12 bits and is sign-extended.
const I_IMM_SHIFT: u32 = 20;

/// Mask selecting the U-Type immediate (bits 12-31), already in position.
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Extracts the sign-extended I-Type immediate.
#[inline]
const fn i_imm(inst: u32) -> Word {
    ((inst as i32) >> I_IMM_SHIFT) as Word
}

/// Decodes one instruction word fetched from `pc`.
///
/// # Errors
///
/// Returns [`DecodeError::Unsupported`] for any major opcode outside
/// OP, OP-IMM and LUI, and [`DecodeError::IllegalFunction`] when the funct
/// fields do not name an operation.
///
/// # Examples
///
/// ```
/// use rvooo_core::isa::decode::decode;
/// use rvooo_core::core::pipeline::signals::AluOp;
///
/// let inst = decode(0x00500093, 0).unwrap(); // addi x1, x0, 5
/// assert_eq!(inst.op, AluOp::Add);
/// assert!(inst.use_imm);
/// assert_eq!(inst.imm, 5);
/// assert_eq!(inst.dst.index(), 1);
/// ```
pub fn decode(inst: u32, pc: Word) -> Result<DecodedInst, DecodeError> {
    let rd = inst.rd();
    let (op, use_imm, imm, src1, src2) = match inst.opcode() {
        opcodes::OP_REG => (
            decode_reg_op(inst)?,
            false,
            0,
            inst.rs1(),
            inst.rs2(),
        ),
        opcodes::OP_IMM => {
            let (op, imm) = decode_imm_op(inst)?;
            (op, true, imm, inst.rs1(), ArchReg::ZERO)
        }
        opcodes::OP_LUI => (
            AluOp::Add,
            true,
            inst & U_IMM_MASK,
            ArchReg::ZERO,
            ArchReg::ZERO,
        ),
        opcode => return Err(DecodeError::Unsupported { inst, opcode }),
    };

    Ok(DecodedInst {
        op,
        use_imm,
        imm,
        src1,
        src2,
        dst: rd,
        writes_register: !rd.is_zero(),
        pc,
    })
}

fn decode_reg_op(inst: u32) -> Result<AluOp, DecodeError> {
    let op = match (inst.funct3(), inst.funct7()) {
        (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
        (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
        (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
        (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
        (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
        (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
        (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
        (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
        (funct3::OR, funct7::DEFAULT) => AluOp::Or,
        (funct3::AND, funct7::DEFAULT) => AluOp::And,
        _ => return Err(DecodeError::IllegalFunction(inst)),
    };
    Ok(op)
}

fn decode_imm_op(inst: u32) -> Result<(AluOp, Word), DecodeError> {
    let imm = i_imm(inst);
    let shamt = (inst >> I_IMM_SHIFT) & SHAMT_MASK;
    let decoded = match inst.funct3() {
        funct3::ADD_SUB => (AluOp::Add, imm),
        funct3::SLT => (AluOp::Slt, imm),
        funct3::SLTU => (AluOp::Sltu, imm),
        funct3::XOR => (AluOp::Xor, imm),
        funct3::OR => (AluOp::Or, imm),
        funct3::AND => (AluOp::And, imm),
        funct3::SLL if inst.funct7() == funct7::DEFAULT => (AluOp::Sll, shamt),
        funct3::SRL_SRA if inst.funct7() == funct7::DEFAULT => (AluOp::Srl, shamt),
        funct3::SRL_SRA if inst.funct7() == funct7::SRA => (AluOp::Sra, shamt),
        _ => return Err(DecodeError::IllegalFunction(inst)),
    };
    Ok(decoded)
}
