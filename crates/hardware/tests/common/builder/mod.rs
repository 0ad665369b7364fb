//! Builders for test inputs.

/// RV32I instruction word encoder.
pub mod instruction;
