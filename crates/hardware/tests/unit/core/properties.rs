use std::collections::VecDeque;

use proptest::prelude::*;
use rvooo_core::common::reg::PhysReg;
use rvooo_core::config::{Config, SelectPolicy};
use rvooo_core::core::pipeline::free_list::FreeList;
use rvooo_core::core::pipeline::signals::AluOp;
use rvooo_core::core::units::alu::Alu;
use rvooo_core::isa::instruction::DecodedInst;
use rvooo_core::Simulator;

use crate::common::harness::check_invariants;

/// Registers are drawn from a small window so dependences are frequent.
fn inst() -> impl Strategy<Value = DecodedInst> {
    let op = prop::sample::select(AluOp::ALL.to_vec());
    let reg = 0_usize..6;
    prop_oneof![
        (op.clone(), reg.clone(), reg.clone(), reg.clone())
            .prop_map(|(op, d, a, b)| DecodedInst::reg(op, d, a, b)),
        (op, reg.clone(), reg, -2048_i32..2048)
            .prop_map(|(op, d, a, imm)| DecodedInst::imm(op, d, a, imm)),
    ]
}

fn config() -> impl Strategy<Value = Config> {
    (
        33_usize..48,
        1_usize..12,
        1_usize..6,
        1_usize..5,
        prop::bool::ANY,
    )
        .prop_map(|(phys_regs, rob_size, iq_size, fu_latency, oldest)| {
            let mut config = Config::default();
            config.core.phys_regs = phys_regs;
            config.core.rob_size = rob_size;
            config.core.iq_size = iq_size;
            config.core.fu_latency = fu_latency;
            config.core.select_policy = if oldest {
                SelectPolicy::OldestFirst
            } else {
                SelectPolicy::SlotOrder
            };
            config.general.max_cycles = 20_000;
            config
        })
}

fn simulator(config: &Config, program: &[DecodedInst]) -> Simulator<Alu> {
    Simulator::from_program(config, program, Alu).expect("valid configuration")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn prop_committed_state_matches_reference(
        config in config(),
        program in prop::collection::vec(inst(), 1..40),
    ) {
        let mut sim = simulator(&config, &program);
        let _ = sim.run_with(|_, engine| check_invariants(engine)).expect("drains");

        prop_assert!(sim.differential_check().is_empty());
        prop_assert!(sim.commit_order_ok());
        prop_assert_eq!(sim.commit_log().len(), program.len());
        prop_assert_eq!(sim.engine().free_list().len(), config.core.free_regs());
        prop_assert!(sim.engine().is_drained());
    }

    #[test]
    fn prop_flush_mid_run_preserves_results(
        config in config(),
        program in prop::collection::vec(inst(), 1..30),
        flush_at in 0_usize..40,
    ) {
        let mut sim = simulator(&config, &program);
        for _ in 0..flush_at {
            if sim.is_finished() {
                break;
            }
            let _ = sim.tick().expect("no invariant violation");
        }
        let _ = sim.flush().expect("flush succeeds");
        check_invariants(sim.engine());
        let _ = sim.run_with(|_, engine| check_invariants(engine)).expect("drains");

        prop_assert!(sim.differential_check().is_empty());
        prop_assert!(sim.commit_order_ok());
        prop_assert_eq!(sim.commit_log().len(), program.len());
        prop_assert_eq!(sim.engine().free_list().len(), config.core.free_regs());
    }

    #[test]
    fn prop_free_list_matches_fifo_model(
        phys_regs in 33_usize..64,
        ops in prop::collection::vec((prop::bool::ANY, 0_usize..64), 0..200),
    ) {
        let mut fl = FreeList::new(phys_regs);
        let mut model: VecDeque<PhysReg> = (32..phys_regs).map(PhysReg).collect();
        let mut held: Vec<PhysReg> = Vec::new();

        for (allocate, pick) in ops {
            if allocate || held.is_empty() {
                let got = fl.allocate();
                prop_assert_eq!(got, model.pop_front());
                held.extend(got);
            } else {
                let reg = held.swap_remove(pick % held.len());
                prop_assert!(fl.free(reg).is_ok());
                prop_assert!(fl.free(reg).is_err());
                model.push_back(reg);
            }
            prop_assert_eq!(fl.len(), model.len());
            prop_assert_eq!(fl.peek(), model.front().copied());
        }
        for reg in &held {
            prop_assert!(!fl.contains(*reg));
        }
    }
}
