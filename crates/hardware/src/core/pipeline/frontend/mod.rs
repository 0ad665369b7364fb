//! Front end of the out-of-order engine.
//!
//! The front end is two stages deep. In the lookup stage the upstream
//! instruction's sources are resolved through the speculative RAT; the
//! result waits in the rename latch until rename can admit it into the
//! reorder buffer and the issue queue.

/// Source lookup, rename admission and dispatch.
pub mod rename;
