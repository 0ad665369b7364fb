//! Built-in demonstration programs.
//!
//! The first five are the classic ALU smoke tests (add, subtract, logical,
//! immediate and shift operations). The remaining ones stress the engine:
//! dependency chains with and without forwarding, an issue queue flood and
//! free list exhaustion under a long functional-unit latency.

use crate::config::{CoreConfig, SelectPolicy};
use crate::common::reg::Word;

/// A self-checking program.
#[derive(Clone, Debug)]
pub struct DemoProgram {
    /// Display name.
    pub name: &'static str,
    /// Instruction words, placed at consecutive addresses from 0.
    pub words: &'static [u32],
    /// Expected committed values as `(register, value)`.
    pub expected: &'static [(usize, Word)],
    /// Core sizing the program is meant to run with.
    pub core: CoreConfig,
}

const fn reference_core() -> CoreConfig {
    CoreConfig {
        phys_regs: 64,
        rob_size: 16,
        iq_size: 8,
        fu_latency: 1,
        select_policy: SelectPolicy::SlotOrder,
        reclaim_on_flush: true,
    }
}

/// `addi x1, x1, 1`
const INC_X1: u32 = 0x0010_8093;

const INC_CHAIN_16: [u32; 16] = [INC_X1; 16];
const INC_CHAIN_40: [u32; 40] = [INC_X1; 40];

/// Every built-in program, in presentation order.
pub fn demo_programs() -> Vec<DemoProgram> {
    vec![
        DemoProgram {
            name: "Simple Add",
            words: &[
                0x00500093, // addi x1, x0, 5
                0x00300113, // addi x2, x0, 3
                0x002081b3, // add  x3, x1, x2
                0x00000013, // nop
            ],
            expected: &[(1, 5), (2, 3), (3, 8)],
            core: reference_core(),
        },
        DemoProgram {
            name: "Subtraction",
            words: &[
                0x00A00093, // addi x1, x0, 10
                0x00300113, // addi x2, x0, 3
                0x402081b3, // sub  x3, x1, x2
                0x00000013, // nop
            ],
            expected: &[(1, 10), (2, 3), (3, 7)],
            core: reference_core(),
        },
        DemoProgram {
            name: "Logical Ops",
            words: &[
                0x0FF00093, // addi x1, x0, 255
                0x0F000113, // addi x2, x0, 240
                0x0020F1B3, // and  x3, x1, x2
                0x0020E233, // or   x4, x1, x2
                0x0020C2B3, // xor  x5, x1, x2
                0x00000013, // nop
            ],
            expected: &[(1, 255), (2, 240), (3, 240), (4, 255), (5, 15)],
            core: reference_core(),
        },
        DemoProgram {
            name: "Immediate Ops",
            words: &[
                0x01400093, // addi x1, x0, 20
                0x00A0F113, // andi x2, x1, 10
                0x00F0E193, // ori  x3, x1, 15
                0x00000013, // nop
            ],
            expected: &[(1, 20), (2, 0), (3, 31)],
            core: reference_core(),
        },
        DemoProgram {
            name: "Shifts",
            words: &[
                0x00800093, // addi x1, x0, 8
                0x00209113, // slli x2, x1, 2
                0x0020D193, // srli x3, x1, 2
                0x00000013, // nop
            ],
            expected: &[(1, 8), (2, 32), (3, 2)],
            core: reference_core(),
        },
        DemoProgram {
            name: "Independent Chain",
            words: &[
                0x00500093, // addi x1, x0, 5
                0x00300113, // addi x2, x0, 3
                0x002081b3, // add  x3, x1, x2
                0x00a00213, // addi x4, x0, 10
                0x004182b3, // add  x5, x3, x4
            ],
            expected: &[(1, 5), (2, 3), (3, 8), (4, 10), (5, 18)],
            core: reference_core(),
        },
        DemoProgram {
            name: "Forwarding Chain",
            words: &[
                0x00500093, // addi x1, x0, 5
                0x00308113, // addi x2, x1, 3
                0x002081b3, // add  x3, x1, x2
                0x00118233, // add  x4, x3, x1
            ],
            expected: &[(1, 5), (2, 8), (3, 13), (4, 18)],
            core: reference_core(),
        },
        DemoProgram {
            name: "Issue Queue Flood",
            words: &INC_CHAIN_16,
            expected: &[(1, 16)],
            core: reference_core(),
        },
        DemoProgram {
            name: "Free List Exhaustion",
            words: &INC_CHAIN_40,
            expected: &[(1, 40)],
            core: CoreConfig {
                rob_size: 64,
                iq_size: 64,
                fu_latency: 8,
                ..reference_core()
            },
        },
    ]
}

/// Looks up a built-in program by case-insensitive name.
pub fn find_demo(name: &str) -> Option<DemoProgram> {
    demo_programs()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
