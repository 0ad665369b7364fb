use std::collections::HashSet;

use rvooo_core::common::constants::ARCH_REGS;
use rvooo_core::common::reg::{ArchReg, PhysReg};
use rvooo_core::config::{Config, SelectPolicy};
use rvooo_core::core::pipeline::traits::{FunctionalUnit, OccupancyTracked};
use rvooo_core::core::units::alu::Alu;
use rvooo_core::core::CycleReport;
use rvooo_core::isa::instruction::DecodedInst;
use rvooo_core::{O3Engine, Simulator};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once per process.
///
/// Honors `RUST_LOG`, so `RUST_LOG=rvooo_core=trace cargo test` shows every cycle.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Builder for simulators with non-default core sizing.
pub struct TestContext {
    pub config: Config,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        Self {
            config: Config::default(),
        }
    }

    pub fn iq_size(mut self, n: usize) -> Self {
        self.config.core.iq_size = n;
        self
    }

    pub fn rob_size(mut self, n: usize) -> Self {
        self.config.core.rob_size = n;
        self
    }

    pub fn phys_regs(mut self, n: usize) -> Self {
        self.config.core.phys_regs = n;
        self
    }

    pub fn fu_latency(mut self, n: usize) -> Self {
        self.config.core.fu_latency = n;
        self
    }

    pub fn policy(mut self, policy: SelectPolicy) -> Self {
        self.config.core.select_policy = policy;
        self
    }

    pub fn reclaim(mut self, reclaim: bool) -> Self {
        self.config.core.reclaim_on_flush = reclaim;
        self
    }

    pub fn max_cycles(mut self, n: u64) -> Self {
        self.config.general.max_cycles = n;
        self
    }

    pub fn engine(&self) -> O3Engine {
        O3Engine::new(&self.config.core).expect("valid core config")
    }

    pub fn simulator(&self, words: &[u32]) -> Simulator {
        Simulator::new(&self.config, words).expect("program decodes")
    }

    /// Runs `words` to completion, checking the structural invariants after
    /// every cycle.
    pub fn run(&self, words: &[u32]) -> Simulator {
        let mut sim = self.simulator(words);
        let _ = sim
            .run_with(|_, engine| check_invariants(engine))
            .expect("program drains");
        sim
    }
}

/// Asserts the register-accounting invariants that must hold between cycles.
///
/// * Every physical register except `p0` is in exactly one place: the free
///   list, the speculative RAT, or a ROB entry's pending old mapping.
/// * Speculative mappings of `x1..x31` are pairwise distinct.
/// * Committed mappings always point at ready registers.
/// * Occupancies never exceed capacities.
pub fn check_invariants<F: FunctionalUnit>(engine: &O3Engine<F>) {
    let phys_regs = engine.prf().size();
    let spec = engine.rat().speculative_table();

    assert_eq!(spec[0], PhysReg::ZERO, "x0 must map to p0");
    assert_eq!(engine.rat().committed_table()[0], PhysReg::ZERO);

    let mapped: HashSet<PhysReg> = spec[1..].iter().copied().collect();
    assert_eq!(mapped.len(), ARCH_REGS - 1, "speculative RAT aliases a register");

    let mut seen = HashSet::new();
    let mut claim = |reg: PhysReg, owner: &str| {
        assert!(!reg.is_zero(), "p0 held by {owner}");
        assert!(reg.index() < phys_regs, "{reg} out of range ({owner})");
        assert!(seen.insert(reg), "{reg} claimed twice (second by {owner})");
    };
    for reg in engine.free_list().iter() {
        claim(reg, "free list");
    }
    for &reg in &spec[1..] {
        claim(reg, "speculative RAT");
    }
    for (tag, entry) in engine.rob().iter() {
        if let Some(old) = entry.old_phys.filter(|p| !p.is_zero()) {
            claim(old, &format!("ROB {}", tag.0));
        }
    }
    assert_eq!(seen.len(), phys_regs - 1, "physical registers leaked");

    for i in 1..ARCH_REGS {
        let reg = engine.rat().committed(ArchReg(i));
        assert!(engine.ready_table().is_ready(reg), "committed {reg} not ready");
    }

    assert!(engine.rob().len() <= engine.rob().capacity());
    assert!(engine.issue_queue().len() <= engine.issue_queue().capacity());
}

/// Runs `program` through a bare engine with the ALU, returning the per-cycle
/// reports.
pub fn drive(engine: &mut O3Engine<Alu>, program: &[DecodedInst], limit: usize) -> Vec<CycleReport> {
    let mut reports = Vec::new();
    let mut next = 0;
    for _ in 0..limit {
        let report = engine.step(program.get(next)).expect("no invariant violation");
        if report.accepted {
            next += 1;
        }
        reports.push(report);
        check_invariants(engine);
        if next == program.len() && engine.is_drained() {
            break;
        }
    }
    reports
}
