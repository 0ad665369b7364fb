//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the out-of-order engine. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (IPC, CPI).
//! 2. **Pipeline activity:** Instructions renamed, issued and completed.
//! 3. **Stalls:** Rename stall cycles broken down by exhausted resource.
//! 4. **Recovery:** Flushes and registers reclaimed by them.

use std::time::Instant;

use serde::Serialize;

use crate::core::pipeline::CycleReport;
use crate::core::pipeline::signals::StallReason;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions accepted from upstream.
    pub instructions_fetched: u64,
    /// Number of instructions renamed and dispatched.
    pub instructions_dispatched: u64,
    /// Number of instructions issued to the functional unit.
    pub instructions_issued: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Rename stall cycles due to a full issue queue.
    pub stalls_iq_full: u64,
    /// Rename stall cycles due to a full reorder buffer.
    pub stalls_rob_full: u64,
    /// Rename stall cycles due to an empty free list.
    pub stalls_free_list: u64,

    /// Number of pipeline flushes.
    pub flushes: u64,
    /// Physical registers returned to the free list by flushes.
    pub regs_reclaimed: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_fetched: 0,
            instructions_dispatched: 0,
            instructions_issued: 0,
            instructions_retired: 0,
            stalls_iq_full: 0,
            stalls_rob_full: 0,
            stalls_free_list: 0,
            flushes: 0,
            regs_reclaimed: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"stalls"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "stalls"];

impl SimStats {
    /// Accumulates one cycle's events.
    pub fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.instructions_fetched += u64::from(report.accepted);
        self.instructions_dispatched += u64::from(report.renamed.is_some());
        self.instructions_issued += u64::from(report.issued.is_some());
        self.instructions_retired += u64::from(report.committed.is_some());
        match report.stall {
            Some(StallReason::IssueQueueFull) => self.stalls_iq_full += 1,
            Some(StallReason::RobFull) => self.stalls_rob_full += 1,
            Some(StallReason::FreeListEmpty) => self.stalls_free_list += 1,
            None => {}
        }
    }

    /// Accumulates a flush that reclaimed `reclaimed` registers.
    pub fn record_flush(&mut self, reclaimed: usize) {
        self.flushes += 1;
        self.regs_reclaimed += reclaimed as u64;
    }

    /// Stall cycles of every kind.
    pub const fn total_stalls(&self) -> u64 {
        self.stalls_iq_full + self.stalls_rob_full + self.stalls_free_list
    }

    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Cycles per retired instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"core"` or
    /// `"stalls"`. Pass an empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;

        if want("summary") {
            println!("\n==========================================================");
            println!("OUT-OF-ORDER ENGINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("core") {
            println!("CORE ACTIVITY");
            println!("  inst.fetched           {}", self.instructions_fetched);
            println!("  inst.dispatched        {}", self.instructions_dispatched);
            println!("  inst.issued            {}", self.instructions_issued);
            println!("  inst.retired           {}", self.instructions_retired);
            println!("  flushes                {}", self.flushes);
            println!("  flush.reclaimed        {}", self.regs_reclaimed);
            println!("----------------------------------------------------------");
        }
        if want("stalls") {
            let pct = |n: u64| (n as f64 / cyc) * 100.0;
            println!("RENAME STALLS");
            println!(
                "  stalls.iq_full         {} ({:.2}%)",
                self.stalls_iq_full,
                pct(self.stalls_iq_full)
            );
            println!(
                "  stalls.rob_full        {} ({:.2}%)",
                self.stalls_rob_full,
                pct(self.stalls_rob_full)
            );
            println!(
                "  stalls.free_list       {} ({:.2}%)",
                self.stalls_free_list,
                pct(self.stalls_free_list)
            );
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
