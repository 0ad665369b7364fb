//! Configuration system for the out-of-order engine.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the engine and the simulator around it. It provides:
//! 1. **Defaults:** The reference sizing (64 physical registers, 16 ROB entries, 8 issue slots).
//! 2. **Structures:** General simulation settings and core structure sizing.
//! 3. **Enums:** Issue-select policy.
//! 4. **Validation:** Range checks applied before an engine is built.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or via `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{
    ARCH_REGS, DEFAULT_FU_LATENCY, DEFAULT_IQ_SIZE, DEFAULT_PHYS_REGS, DEFAULT_ROB_SIZE,
    MAX_FU_LATENCY, MAX_IQ_SIZE, MAX_PHYS_REGS, MAX_ROB_SIZE,
};
use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Initial fetch PC.
    pub const START_PC: u32 = 0;

    /// Cycle budget for a single run before the simulator gives up.
    pub const MAX_CYCLES: u64 = 1_000_000;
}

/// Issue-select policy used when several issue queue entries are ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SelectPolicy {
    /// First ready entry in fixed slot-scan order.
    #[default]
    #[serde(alias = "slot_order")]
    SlotOrder,
    /// Ready entry with the oldest dispatch sequence number.
    #[serde(alias = "oldest_first")]
    OldestFirst,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvooo_core::config::{Config, SelectPolicy};
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "core": { "rob_size": 32, "select_policy": "OldestFirst" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.core.rob_size, 32);
/// assert_eq!(config.core.iq_size, 8);
/// assert_eq!(config.core.select_policy, SelectPolicy::OldestFirst);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Renaming and scheduling structure sizing
    #[serde(default)]
    pub core: CoreConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every sizing parameter against its legal range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.core.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-cycle structural events at trace level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial fetch PC.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Cycle budget; the simulator fails the run when it is exhausted.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    fn default_start_pc() -> u32 {
        defaults::START_PC
    }

    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Sizing and policy of the renaming, scheduling and retirement structures.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Number of physical registers (ids `32..phys_regs` start in the free list).
    #[serde(default = "CoreConfig::default_phys_regs")]
    pub phys_regs: usize,

    /// Reorder buffer capacity.
    #[serde(default = "CoreConfig::default_rob_size")]
    pub rob_size: usize,

    /// Issue queue capacity.
    #[serde(default = "CoreConfig::default_iq_size")]
    pub iq_size: usize,

    /// Fixed functional-unit latency in cycles (issue to completion).
    #[serde(default = "CoreConfig::default_fu_latency")]
    pub fu_latency: usize,

    /// Tie-break among ready issue queue entries.
    #[serde(default)]
    pub select_policy: SelectPolicy,

    /// Return the destinations of squashed ROB entries to the free list on flush.
    #[serde(default = "CoreConfig::default_reclaim_on_flush")]
    pub reclaim_on_flush: bool,
}

impl CoreConfig {
    fn default_phys_regs() -> usize {
        DEFAULT_PHYS_REGS
    }

    fn default_rob_size() -> usize {
        DEFAULT_ROB_SIZE
    }

    fn default_iq_size() -> usize {
        DEFAULT_IQ_SIZE
    }

    fn default_fu_latency() -> usize {
        DEFAULT_FU_LATENCY
    }

    fn default_reclaim_on_flush() -> bool {
        true
    }

    /// Number of physical registers initially in the free list.
    pub const fn free_regs(&self) -> usize {
        self.phys_regs.saturating_sub(ARCH_REGS)
    }

    /// Checks every sizing parameter against its legal range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phys_regs <= ARCH_REGS || self.phys_regs > MAX_PHYS_REGS {
            return Err(ConfigError::Invalid {
                field: "core.phys_regs",
                value: self.phys_regs,
                reason: "must be in 33..=256",
            });
        }
        for (field, value, max, reason) in [
            ("core.rob_size", self.rob_size, MAX_ROB_SIZE, "must be in 1..=1024"),
            ("core.iq_size", self.iq_size, MAX_IQ_SIZE, "must be in 1..=256"),
            ("core.fu_latency", self.fu_latency, MAX_FU_LATENCY, "must be in 1..=1024"),
        ] {
            if value == 0 || value > max {
                return Err(ConfigError::Invalid {
                    field,
                    value,
                    reason,
                });
            }
        }
        Ok(())
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            phys_regs: DEFAULT_PHYS_REGS,
            rob_size: DEFAULT_ROB_SIZE,
            iq_size: DEFAULT_IQ_SIZE,
            fu_latency: DEFAULT_FU_LATENCY,
            select_policy: SelectPolicy::SlotOrder,
            reclaim_on_flush: true,
        }
    }
}
