//! Simulator: drives the out-of-order engine with a program.
//!
//! The simulator plays the role of the fetch/decode front end. Each cycle
//! it offers the instruction at its PC to the engine and advances the PC only
//! when the engine accepts it. It records every retirement and can check the
//! committed register state against the reference model.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::common::constants::{ARCH_REGS, INSTRUCTION_SIZE};
use crate::common::error::SimError;
use crate::common::reg::{ArchReg, Word};
use crate::config::Config;
use crate::core::pipeline::rob::CommitRecord;
use crate::core::pipeline::traits::FunctionalUnit;
use crate::core::pipeline::{CycleReport, O3Engine};
use crate::core::units::alu::Alu;
use crate::isa::decode::decode;
use crate::isa::instruction::DecodedInst;
use crate::sim::reference::ReferenceModel;
use crate::stats::SimStats;

/// A register whose committed value disagrees with the reference model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Architectural register.
    pub reg: ArchReg,
    /// Reference model value.
    pub expected: Word,
    /// Engine value.
    pub actual: Word,
}

/// Top-level simulator: program, fetch PC and engine.
#[derive(Debug)]
pub struct Simulator<F = Alu> {
    engine: O3Engine<F>,
    program: Vec<DecodedInst>,
    start_pc: Word,
    pc: Word,
    max_cycles: u64,
    trace: bool,
    commit_log: Vec<CommitRecord>,
    /// Statistics accumulated over the run.
    pub stats: SimStats,
}

impl Simulator<Alu> {
    /// Creates a simulator for `words`, decoding the whole program up front.
    pub fn new(config: &Config, words: &[u32]) -> Result<Self, SimError> {
        Self::with_unit(config, words, Alu)
    }
}

impl<F: FunctionalUnit> Simulator<F> {
    /// Creates a simulator whose engine issues into `unit`.
    pub fn with_unit(config: &Config, words: &[u32], unit: F) -> Result<Self, SimError> {
        config.validate()?;
        let start_pc = config.general.start_pc;
        let program = words
            .iter()
            .zip((0..).map(|i: u32| start_pc.wrapping_add(i * INSTRUCTION_SIZE)))
            .map(|(&word, pc)| decode(word, pc).map_err(|source| SimError::Decode { pc, source }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_decoded(config, program, O3Engine::with_unit(&config.core, unit)?))
    }

    fn from_decoded(config: &Config, program: Vec<DecodedInst>, engine: O3Engine<F>) -> Self {
        let start_pc = config.general.start_pc;
        Self {
            engine,
            program,
            start_pc,
            pc: start_pc,
            max_cycles: config.general.max_cycles,
            trace: config.general.trace_instructions,
            commit_log: Vec::new(),
            stats: SimStats::default(),
        }
    }

    /// Creates a simulator over already-decoded instructions.
    ///
    /// The instructions are placed at consecutive PCs from `start_pc`; their
    /// own `pc` fields are overwritten.
    pub fn from_program(
        config: &Config,
        program: &[DecodedInst],
        unit: F,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let start_pc = config.general.start_pc;
        let program = program
            .iter()
            .zip(0..)
            .map(|(inst, i): (&DecodedInst, u32)| inst.at(start_pc.wrapping_add(i * INSTRUCTION_SIZE)))
            .collect();
        Ok(Self::from_decoded(
            config,
            program,
            O3Engine::with_unit(&config.core, unit)?,
        ))
    }

    fn fetch(&self) -> Option<&DecodedInst> {
        let offset = self.pc.wrapping_sub(self.start_pc) / INSTRUCTION_SIZE;
        self.program.get(offset as usize)
    }

    /// Returns true once every instruction has been fetched and retired.
    pub fn is_finished(&self) -> bool {
        self.fetch().is_none() && self.engine.is_drained()
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) -> Result<CycleReport, SimError> {
        let input = self.fetch().copied();
        let report = self.engine.step(input.as_ref()).inspect_err(|e| {
            error!(cycle = self.engine.cycle(), error = %e, "invariant violation");
        })?;
        if report.accepted {
            self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
        }
        if let Some(record) = report.committed {
            if self.trace || cfg!(feature = "commit-log") {
                eprintln!(
                    "CM  cycle={} pc={:#x} rob={} {:?} <- {:?} = {:#x} (free {:?})",
                    report.cycle,
                    record.pc,
                    record.tag.0,
                    record.arch_dst,
                    record.phys_dst,
                    record.result,
                    record.old_phys
                );
            }
            self.commit_log.push(record);
        }
        self.stats.record(&report);
        Ok(report)
    }

    /// Runs until the program retires completely.
    pub fn run(&mut self) -> Result<&SimStats, SimError> {
        self.run_with(|_, _| {})
    }

    /// Runs to completion, calling `observe` after every cycle.
    pub fn run_with(
        &mut self,
        mut observe: impl FnMut(&CycleReport, &O3Engine<F>),
    ) -> Result<&SimStats, SimError> {
        while !self.is_finished() {
            if self.stats.cycles >= self.max_cycles {
                warn!(max_cycles = self.max_cycles, "cycle limit reached");
                return Err(SimError::CycleLimitExceeded(self.max_cycles));
            }
            let report = self.tick()?;
            observe(&report, &self.engine);
        }
        info!(
            cycles = self.stats.cycles,
            retired = self.stats.instructions_retired,
            "program drained"
        );
        Ok(&self.stats)
    }

    /// Squashes everything in flight and refetches from the oldest
    /// unretired instruction.
    pub fn flush(&mut self) -> Result<usize, SimError> {
        let reclaimed = self.engine.flush()?;
        self.pc = self
            .commit_log
            .last()
            .map_or(self.start_pc, |r| r.pc.wrapping_add(INSTRUCTION_SIZE));
        self.stats.record_flush(reclaimed);
        Ok(reclaimed)
    }

    /// Runs the reference model over the program and lists every register
    /// whose committed value differs.
    pub fn differential_check(&self) -> Vec<Mismatch> {
        let mut model = ReferenceModel::new(self.start_pc);
        model.run(&self.program);
        let actual = self.engine.arch_state();
        let mismatches: Vec<Mismatch> = (1..ARCH_REGS)
            .map(ArchReg)
            .filter_map(|reg| {
                let expected = model.reg(reg);
                let actual = actual[reg.index()];
                (expected != actual).then_some(Mismatch {
                    reg,
                    expected,
                    actual,
                })
            })
            .collect();
        for m in &mismatches {
            warn!(reg = %m.reg, expected = m.expected, actual = m.actual, "register mismatch");
        }
        mismatches
    }

    /// Returns true if retirements so far follow program order exactly.
    pub fn commit_order_ok(&self) -> bool {
        self.commit_log
            .iter()
            .zip(&self.program)
            .all(|(record, inst)| record.pc == inst.pc)
    }

    /// Every retirement so far, oldest first.
    pub fn commit_log(&self) -> &[CommitRecord] {
        &self.commit_log
    }

    /// The decoded program.
    pub fn program(&self) -> &[DecodedInst] {
        &self.program
    }

    /// Current fetch PC.
    pub const fn pc(&self) -> Word {
        self.pc
    }

    /// The engine.
    pub const fn engine(&self) -> &O3Engine<F> {
        &self.engine
    }

    /// Committed value of `reg`.
    pub fn reg(&self, reg: usize) -> Word {
        self.engine.arch_value(ArchReg(reg))
    }
}
