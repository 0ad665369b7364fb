//! Back end of the out-of-order engine.
//!
//! The back end contains the following stages:
//! 1. **Issue:** Selects one ready issue queue entry, reads its operands and
//!    starts it down the functional-unit pipeline.
//! 2. **Writeback:** Delivers the completing result to the PRF, the readiness
//!    table, the ROB and every waiting issue queue entry.
//! 3. **Commit:** Retires the ROB head in program order.

/// In-order retirement from the ROB head.
pub mod commit;

/// Wakeup/select and operand read.
pub mod issue;

/// Completion broadcast.
pub mod writeback;
