use pretty_assertions::assert_eq;
use rstest::rstest;
use rvooo_core::core::pipeline::signals::AluOp;
use rvooo_core::core::pipeline::traits::FunctionalUnit;
use rvooo_core::core::units::alu::Alu;

#[rstest]
#[case::add(AluOp::Add, 10, 20, 30)]
#[case::add_wraps(AluOp::Add, u32::MAX, 1, 0)]
#[case::sub(AluOp::Sub, 10, 3, 7)]
#[case::sub_wraps(AluOp::Sub, 0, 1, u32::MAX)]
#[case::sll(AluOp::Sll, 0x1, 31, 0x8000_0000)]
#[case::sll_masks_amount(AluOp::Sll, 0x1, 33, 0x2)]
#[case::srl(AluOp::Srl, 0x8000_0000, 31, 1)]
#[case::sra(AluOp::Sra, 0x8000_0000, 31, u32::MAX)]
#[case::sra_positive(AluOp::Sra, 0x40, 2, 0x10)]
#[case::slt_signed(AluOp::Slt, -1_i32 as u32, 0, 1)]
#[case::slt_false(AluOp::Slt, 5, 5, 0)]
#[case::sltu_unsigned(AluOp::Sltu, -1_i32 as u32, 0, 0)]
#[case::sltu_true(AluOp::Sltu, 3, 4, 1)]
#[case::xor(AluOp::Xor, 0xF0F0, 0x0FF0, 0xFF00)]
#[case::or(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case::and(AluOp::And, 0b1100, 0b1010, 0b1000)]
fn test_alu_ops(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

#[test]
fn test_closure_is_a_functional_unit() {
    let always_seven = |_: AluOp, _: u32, _: u32| -> u32 { 7 };
    assert_eq!(always_seven.execute(AluOp::Add, 1, 2), 7);
}

#[test]
fn test_every_op_has_distinct_mnemonics() {
    let mut seen: Vec<&str> = AluOp::ALL.iter().map(|op| op.mnemonic()).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), AluOp::ALL.len());
}
