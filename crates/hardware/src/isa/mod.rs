//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic for
//! the RV32I subset the out-of-order engine executes.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit), ALU operations only.

/// Instruction decoding into the engine's upstream record.
pub mod decode;

/// Instruction disassembler for commit logs and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;
