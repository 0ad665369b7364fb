//! Pipeline control signals and operation types.
//!
//! This module defines the small enums that flow between the engine's stages.
//! It provides:
//! 1. **Operation Classification:** The integer ALU operations the functional unit implements.
//! 2. **Backpressure:** The reasons the front end can stall.

use std::fmt;

use serde::Serialize;

/// ALU operation types executed by the functional unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AluOp {
    /// Integer addition.
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,
}

impl AluOp {
    /// Every operation, in encoding order.
    pub const ALL: [Self; 10] = [
        Self::Add,
        Self::Sub,
        Self::Sll,
        Self::Slt,
        Self::Sltu,
        Self::Xor,
        Self::Srl,
        Self::Sra,
        Self::Or,
        Self::And,
    ];

    /// Assembly mnemonic of the register-register form.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Xor => "xor",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::And => "and",
        }
    }

    /// Assembly mnemonic of the register-immediate form.
    ///
    /// `sub` has no immediate encoding; it is shown as `subi` in traces.
    pub const fn imm_mnemonic(self) -> &'static str {
        match self {
            Self::Add => "addi",
            Self::Sub => "subi",
            Self::Sll => "slli",
            Self::Slt => "slti",
            Self::Sltu => "sltiu",
            Self::Xor => "xori",
            Self::Srl => "srli",
            Self::Sra => "srai",
            Self::Or => "ori",
            Self::And => "andi",
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Why the front end could not rename this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StallReason {
    /// No free issue queue slot.
    IssueQueueFull,
    /// No free reorder buffer slot.
    RobFull,
    /// No free physical register for a register-writing instruction.
    FreeListEmpty,
}

impl fmt::Display for StallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IssueQueueFull => "issue queue full",
            Self::RobFull => "ROB full",
            Self::FreeListEmpty => "free list empty",
        })
    }
}
