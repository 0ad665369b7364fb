//! RISC-V Base Integer Instruction Set (RV32I), ALU subset.
//!
//! # Structure
//!
//! - `opcodes`: Major opcodes handled by the out-of-order engine (OP, OP-IMM, LUI).
//! - `funct3`: Minor opcodes distinguishing operations within a major opcode.
//! - `funct7`: Additional opcode bits for R-type instructions and shifts.

/// Function code 3 definitions for base integer operations.
pub mod funct3;

/// Function code 7 definitions for base integer operations.
pub mod funct7;

/// Base integer instruction set opcodes.
pub mod opcodes;
