//! ALU shift operations.
//!
//! Implements shift-left logical (SLL), shift-right logical (SRL), and
//! shift-right arithmetic (SRA). Shift amounts are masked to 5 bits (0-31),
//! as RV32I defines them; the upper bits of `b` are ignored.

use crate::common::constants::SHAMT_MASK;
use crate::common::reg::Word;
use crate::core::pipeline::signals::AluOp;

/// Executes a shift operation.
///
/// Returns `0` for non-shift opcodes.
pub const fn execute(op: AluOp, a: Word, b: Word) -> Word {
    let shamt = b & SHAMT_MASK;
    match op {
        AluOp::Sll => a << shamt,
        AluOp::Srl => a >> shamt,
        AluOp::Sra => ((a as i32) >> shamt) as Word,
        _ => 0,
    }
}
