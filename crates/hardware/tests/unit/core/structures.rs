use pretty_assertions::assert_eq;
use rstest::rstest;
use rvooo_core::common::InvariantViolation;
use rvooo_core::common::reg::{ArchReg, PhysReg};
use rvooo_core::config::SelectPolicy;
use rvooo_core::core::pipeline::free_list::FreeList;
use rvooo_core::core::pipeline::issue_queue::{DispatchRequest, IssueQueue};
use rvooo_core::core::pipeline::prf::{PhysRegFile, PrfWrite};
use rvooo_core::core::pipeline::rat::Rat;
use rvooo_core::core::pipeline::rob::{Rob, RobTag};
use rvooo_core::core::pipeline::scoreboard::ReadyTable;
use rvooo_core::core::pipeline::signals::AluOp;
use rvooo_core::core::pipeline::traits::OccupancyTracked;

fn request(src1: usize, src2: usize, tag: usize) -> DispatchRequest {
    DispatchRequest {
        op: AluOp::Add,
        use_imm: false,
        imm: 0,
        src1: PhysReg(src1),
        src2: PhysReg(src2),
        dst: Some(PhysReg(40 + tag)),
        rob_tag: RobTag(tag),
        pc: (tag * 4) as u32,
    }
}

// --- Free list ---

#[rstest]
#[case::default_file(64, 32)]
#[case::one_spare(33, 1)]
#[case::large_file(256, 224)]
fn test_free_list_initial_size(#[case] phys_regs: usize, #[case] free: usize) {
    let fl = FreeList::new(phys_regs);
    assert_eq!(fl.len(), free);
    assert_eq!(fl.peek(), Some(PhysReg(32)));
    assert!(!fl.contains(PhysReg(0)));
    assert!(!fl.contains(PhysReg(31)));
}

#[test]
fn test_free_list_is_fifo() {
    let mut fl = FreeList::new(36);
    assert_eq!(fl.allocate(), Some(PhysReg(32)));
    assert_eq!(fl.allocate(), Some(PhysReg(33)));
    fl.free(PhysReg(5)).unwrap();
    let order: Vec<_> = std::iter::from_fn(|| fl.allocate()).collect();
    assert_eq!(order, vec![PhysReg(34), PhysReg(35), PhysReg(5)]);
    assert!(fl.is_empty());
    assert_eq!(fl.peek(), None);
}

#[rstest]
#[case::zero(0, InvariantViolation::FreeZeroRegister)]
#[case::already_free(40, InvariantViolation::DoubleFree(40))]
#[case::out_of_range(64, InvariantViolation::PhysRegOutOfRange { index: 64, size: 64 })]
fn test_free_list_rejects(#[case] id: usize, #[case] expected: InvariantViolation) {
    let mut fl = FreeList::new(64);
    assert_eq!(fl.free(PhysReg(id)), Err(expected));
    assert_eq!(fl.len(), 32);
}

#[test]
fn test_free_list_reset() {
    let mut fl = FreeList::new(40);
    while fl.allocate().is_some() {}
    fl.free(PhysReg(7)).unwrap();
    fl.reset();
    assert_eq!(fl.iter().collect::<Vec<_>>(), (32..40).map(PhysReg).collect::<Vec<_>>());
}

// --- RAT ---

#[test]
fn test_rat_rename_returns_previous_mapping() {
    let mut rat = Rat::new();
    assert_eq!(rat.rename(ArchReg(5), PhysReg(40)), PhysReg(5));
    assert_eq!(rat.rename(ArchReg(5), PhysReg(41)), PhysReg(40));
    assert_eq!(rat.speculative(ArchReg(5)), PhysReg(41));
    assert_eq!(rat.committed(ArchReg(5)), PhysReg(5));
}

#[test]
fn test_rat_x0_is_pinned() {
    let mut rat = Rat::new();
    assert_eq!(rat.rename(ArchReg::ZERO, PhysReg(40)), PhysReg::ZERO);
    rat.commit(ArchReg::ZERO, PhysReg(40));
    assert_eq!(rat.speculative(ArchReg::ZERO), PhysReg::ZERO);
    assert_eq!(rat.committed(ArchReg::ZERO), PhysReg::ZERO);
    assert_eq!(
        rat.lookup(ArchReg::ZERO, ArchReg(3), Some((ArchReg::ZERO, PhysReg(40)))),
        (PhysReg::ZERO, PhysReg(3))
    );
}

#[test]
fn test_rat_lookup_bypass() {
    let rat = Rat::new();
    let bypass = Some((ArchReg(1), PhysReg(50)));
    assert_eq!(rat.lookup(ArchReg(1), ArchReg(1), bypass), (PhysReg(50), PhysReg(50)));
    assert_eq!(rat.lookup(ArchReg(2), ArchReg(3), bypass), (PhysReg(2), PhysReg(3)));
}

#[test]
fn test_rat_flush_restores_committed() {
    let mut rat = Rat::new();
    let _ = rat.rename(ArchReg(1), PhysReg(40));
    rat.commit(ArchReg(1), PhysReg(40));
    let _ = rat.rename(ArchReg(1), PhysReg(41));
    let _ = rat.rename(ArchReg(2), PhysReg(42));
    rat.flush();
    assert_eq!(rat.speculative_table(), rat.committed_table());
    assert_eq!(rat.speculative(ArchReg(1)), PhysReg(40));
    assert_eq!(rat.speculative(ArchReg(2)), PhysReg(2));
}

// --- Readiness table and register file ---

#[test]
fn test_ready_table_reset_state() {
    let mut ready = ReadyTable::new(64);
    assert!(ready.is_ready(PhysReg(0)));
    assert!(ready.is_ready(PhysReg(31)));
    assert!(!ready.is_ready(PhysReg(32)));
    ready.set(PhysReg(32)).unwrap();
    assert!(ready.is_ready(PhysReg(32)));
    ready.clear(PhysReg(32)).unwrap();
    assert!(!ready.is_ready(PhysReg(32)));
    assert!(ready.set(PhysReg(64)).is_err());
}

#[test]
fn test_prf_write_through_read() {
    let mut prf = PhysRegFile::new(64);
    let pending = Some(PrfWrite {
        reg: PhysReg(40),
        value: 99,
    });
    assert_eq!(prf.read(PhysReg(40), None).unwrap(), 0);
    assert_eq!(prf.read(PhysReg(40), pending).unwrap(), 99);
    assert_eq!(prf.read(PhysReg(41), pending).unwrap(), 0);
    prf.write(PrfWrite {
        reg: PhysReg(40),
        value: 7,
    })
    .unwrap();
    assert_eq!(prf.read_pair(PhysReg(40), PhysReg(0), None).unwrap(), (7, 0));
    assert!(prf.read(PhysReg(64), None).is_err());
}

// --- ROB ---

#[test]
fn test_rob_commits_in_order() {
    let mut rob = Rob::new(4);
    let tags: Vec<RobTag> = (0..4)
        .map(|i| {
            rob.allocate(Some(ArchReg(i + 1)), Some(PhysReg(32 + i)), Some(PhysReg(i + 1)), (i * 4) as u32)
                .unwrap()
        })
        .collect();
    assert!(rob.is_full());
    assert_eq!(rob.allocate(None, None, None, 16), None);

    rob.complete(tags[2], 30).unwrap();
    rob.complete(tags[1], 20).unwrap();
    assert!(!rob.head_ready());
    assert_eq!(rob.commit_head(), None);

    rob.complete(tags[0], 10).unwrap();
    let results: Vec<u32> = std::iter::from_fn(|| rob.commit_head()).map(|r| r.result).collect();
    assert_eq!(results, vec![10, 20, 30]);
    assert_eq!(rob.len(), 1);
    assert_eq!(rob.head(), 3);
}

#[test]
fn test_rob_wraps_around() {
    let mut rob = Rob::new(2);
    for round in 0..5_u32 {
        let tag = rob.allocate(None, None, None, round * 4).unwrap();
        assert_eq!(tag, RobTag(round as usize % 2));
        rob.complete(tag, round).unwrap();
        assert_eq!(rob.commit_head().map(|r| r.pc), Some(round * 4));
    }
    assert!(rob.is_empty());
}

// --- Issue queue ---

#[test]
fn test_iq_dispatch_tracks_readiness() {
    let ready = ReadyTable::new(64);
    let mut iq = IssueQueue::new(4, SelectPolicy::SlotOrder);
    assert_eq!(iq.dispatch(request(1, 40, 0), &ready, None), Some(0));
    assert_eq!(iq.dispatch(request(1, 40, 1), &ready, Some(PhysReg(40))), Some(1));

    let waiting = iq.get(0).unwrap();
    assert!(waiting.ready1 && !waiting.ready2);
    assert!(iq.get(1).unwrap().is_ready());
    assert_eq!(iq.select(), Some(1));

    assert_eq!(iq.wakeup(PhysReg(40)), 1);
    assert_eq!(iq.select(), Some(0));
}

#[test]
fn test_iq_immediate_source_is_ready() {
    let ready = ReadyTable::new(64);
    let mut iq = IssueQueue::new(1, SelectPolicy::SlotOrder);
    let req = DispatchRequest {
        use_imm: true,
        src2: PhysReg(50),
        ..request(1, 0, 0)
    };
    let _ = iq.dispatch(req, &ready, None).unwrap();
    assert!(iq.get(0).unwrap().is_ready());
    assert!(iq.is_full());
    assert_eq!(iq.dispatch(request(1, 2, 1), &ready, None), None);
}

#[rstest]
#[case::slot_order(SelectPolicy::SlotOrder, 1)]
#[case::oldest_first(SelectPolicy::OldestFirst, 2)]
fn test_iq_select_policy(#[case] policy: SelectPolicy, #[case] expected_slot: usize) {
    let ready = ReadyTable::new(64);
    let mut iq = IssueQueue::new(3, policy);
    let _ = iq.dispatch(request(40, 1, 0), &ready, None);
    let _ = iq.dispatch(request(1, 2, 1), &ready, None);
    let _ = iq.dispatch(request(1, 2, 2), &ready, None);
    let _ = iq.issue(1).unwrap();
    // The newest entry reuses the freed slot ahead of the older one.
    assert_eq!(iq.dispatch(request(1, 2, 3), &ready, None), Some(1));
    assert_eq!(iq.select(), Some(expected_slot));
}

#[rstest]
#[case::out_of_range(9, InvariantViolation::IssueSlotOutOfRange { slot: 9, capacity: 2 })]
#[case::empty(1, InvariantViolation::IssueSlotEmpty(1))]
#[case::not_ready(0, InvariantViolation::IssueNotReady(0))]
fn test_iq_issue_rejects(#[case] slot: usize, #[case] expected: InvariantViolation) {
    let ready = ReadyTable::new(64);
    let mut iq = IssueQueue::new(2, SelectPolicy::SlotOrder);
    let _ = iq.dispatch(request(40, 1, 0), &ready, None);
    assert_eq!(iq.issue(slot), Err(expected));
    assert_eq!(iq.len(), 1);
}
