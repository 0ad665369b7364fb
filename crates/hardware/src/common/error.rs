//! Error definitions.
//!
//! This module defines the failure taxonomy of the engine and the harness
//! around it. It provides:
//! 1. **Invariant Violations:** Programming-contract breaches inside the core (never recoverable).
//! 2. **Configuration Errors:** Rejected sizing or malformed configuration input.
//! 3. **Decode Errors:** Instruction words outside the supported subset.
//! 4. **Simulation Errors:** Everything the simulator loop can fail with.
//!
//! Resource exhaustion (a full issue queue, a full ROB, an empty free list)
//! is deliberately absent: it is backpressure, reported as a
//! [`StallReason`](crate::core::pipeline::signals::StallReason), not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A breach of one of the engine's structural invariants.
///
/// These can only arise from defective control logic. Component operations
/// report them instead of continuing with corrupted state; callers above the
/// engine treat them as fatal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// An attempt to return the permanent zero register to the free list.
    #[error("attempted to free the zero physical register")]
    FreeZeroRegister,

    /// An attempt to free a physical register already in the free pool.
    #[error("double free of physical register p{0}")]
    DoubleFree(usize),

    /// An architectural register index outside `x0..x31`.
    #[error("architectural register x{0} out of range")]
    ArchRegOutOfRange(usize),

    /// A physical register index outside the register file.
    #[error("physical register p{index} out of range (file holds {size})")]
    PhysRegOutOfRange {
        /// Offending index.
        index: usize,
        /// Register file size.
        size: usize,
    },

    /// A ROB tag outside the buffer.
    #[error("ROB tag {tag} out of range (capacity {capacity})")]
    RobTagOutOfRange {
        /// Offending tag.
        tag: usize,
        /// ROB capacity.
        capacity: usize,
    },

    /// A completion or lookup aimed at an unoccupied ROB slot.
    #[error("ROB slot {0} is not valid")]
    RobEntryNotValid(usize),

    /// A second completion for the same ROB entry.
    #[error("ROB slot {0} completed twice")]
    RobDoubleComplete(usize),

    /// An issue queue slot index outside the queue.
    #[error("issue slot {slot} out of range (capacity {capacity})")]
    IssueSlotOutOfRange {
        /// Offending slot.
        slot: usize,
        /// Queue capacity.
        capacity: usize,
    },

    /// An issue acknowledgement for an empty slot.
    #[error("issue slot {0} is empty")]
    IssueSlotEmpty(usize),

    /// An issue acknowledgement for an entry whose operands are not ready.
    #[error("issue slot {0} selected with unready operands")]
    IssueNotReady(usize),

    /// A structure refused an update that admission had already granted.
    #[error("admitted rename could not be applied: {0}")]
    AdmissionMismatch(&'static str),
}

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for [`Config`](crate::config::Config).
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A sizing parameter is outside its legal range.
    #[error("invalid value for {field}: {value} ({reason})")]
    Invalid {
        /// Configuration field name.
        field: &'static str,
        /// Offending value.
        value: usize,
        /// Human-readable constraint.
        reason: &'static str,
    },
}

/// An instruction word the decoder cannot turn into an upstream record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The major opcode is not part of the out-of-order ALU subset.
    #[error("unsupported opcode {opcode:#04x} in instruction {inst:#010x}")]
    Unsupported {
        /// Raw instruction word.
        inst: u32,
        /// Major opcode field.
        opcode: u32,
    },

    /// The opcode is supported but the funct fields do not name an operation.
    #[error("illegal function encoding in instruction {0:#010x}")]
    IllegalFunction(u32),
}

/// Errors produced while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line is not a valid 32-bit hexadecimal word.
    #[error("line {line}: invalid instruction word {text:?}")]
    BadWord {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },
}

/// Errors surfaced by the simulator loop.
#[derive(Debug, Error)]
pub enum SimError {
    /// The engine detected a broken invariant.
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    /// The fetched word could not be decoded.
    #[error("decode failed at pc {pc:#x}: {source}")]
    Decode {
        /// Program counter of the offending word.
        pc: u32,
        /// Decoder error.
        #[source]
        source: DecodeError,
    },

    /// The run did not drain within the configured cycle budget.
    #[error("cycle limit of {0} exceeded before the pipeline drained")]
    CycleLimitExceeded(u64),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The program image could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}
