//! Instruction Disassembler for the RV32I ALU subset.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for commit logs, tracing, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rvooo_core::isa::disasm::disassemble;
//! let text = disassemble(0x00A00513); // ADDI x10, x0, 10
//! assert_eq!(text, "addi a0, zero, 10");
//! ```

use crate::isa::decode::decode;
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;

/// ABI register names for x0–x31.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn xreg(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

/// Disassembles a 32-bit RISC-V instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"` or `"unknown"` for
/// encodings outside the supported subset.
pub fn disassemble(inst: u32) -> String {
    let Ok(d) = decode(inst, 0) else {
        return "unknown".to_string();
    };
    let rd = xreg(d.dst.index());
    let rs1 = xreg(d.src1.index());

    if inst.opcode() == opcodes::OP_LUI {
        return format!("lui {rd}, {:#x}", d.imm >> 12);
    }
    if d.use_imm {
        if d.dst.is_zero() && d.src1.is_zero() && d.imm == 0 {
            return "nop".to_string();
        }
        let imm = d.imm as i32;
        format!("{} {rd}, {rs1}, {imm}", d.op.imm_mnemonic())
    } else {
        let rs2 = xreg(d.src2.index());
        format!("{} {rd}, {rs1}, {rs2}", d.op.mnemonic())
    }
}
