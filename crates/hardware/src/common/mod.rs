//! Common utilities and types used throughout the engine.
//!
//! This module provides fundamental building blocks shared by every
//! component. It includes:
//! 1. **Constants:** Instruction field layout and reference structure sizing.
//! 2. **Error Handling:** Invariant violations and harness-level error types.
//! 3. **Register Types:** Strong types for architectural and physical registers.

/// Common constants used throughout the engine.
pub mod constants;

/// Error types.
pub mod error;

/// Register identifier types.
pub mod reg;

pub use error::{ConfigError, DecodeError, InvariantViolation, LoadError, SimError};
pub use reg::{ArchReg, PhysReg, Word};
