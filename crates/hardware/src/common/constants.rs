//! Global Constants.
//!
//! This module defines constants shared by the decoder, the execution engine
//! and the simulator. It includes:
//! 1. **Register Constants:** Architectural register count and the zero register.
//! 2. **Instruction Constants:** Opcode masks and field shifts for instruction decoding.
//! 3. **Reference Sizing:** Default capacities of the renaming and scheduling structures.

/// Number of architectural integer registers.
pub const ARCH_REGS: usize = 32;

/// Index of the hardwired zero register (`x0`), and of the physical register
/// permanently reserved for it.
pub const ZERO_REG: usize = 0;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// The canonical NOP encoding (`addi x0, x0, 0`).
pub const NOP_INSTRUCTION: u32 = 0x0000_0013;

/// Bit mask for extracting the opcode field from a RISC-V instruction.
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit mask for extracting the destination register (rd) field.
pub const RD_MASK: u32 = 0x1F;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit mask for extracting the funct3 field.
pub const FUNCT3_MASK: u32 = 0x7;

/// Bit position shift for the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;

/// Bit mask for extracting the first source register (rs1) field.
pub const RS1_MASK: u32 = 0x1F;

/// Bit position shift for the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit mask for extracting the second source register (rs2) field.
pub const RS2_MASK: u32 = 0x1F;

/// Bit position shift for the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Bit mask for extracting the funct7 field.
pub const FUNCT7_MASK: u32 = 0x7F;

/// Bit position shift for the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

/// Mask for the 5-bit shift amount of RV32 shifts.
pub const SHAMT_MASK: u32 = 0x1F;

/// Default number of physical registers.
pub const DEFAULT_PHYS_REGS: usize = 64;

/// Default reorder buffer capacity.
pub const DEFAULT_ROB_SIZE: usize = 16;

/// Default issue queue capacity.
pub const DEFAULT_IQ_SIZE: usize = 8;

/// Default functional-unit latency in cycles.
pub const DEFAULT_FU_LATENCY: usize = 1;

/// Largest physical register file the engine accepts.
pub const MAX_PHYS_REGS: usize = 256;

/// Largest reorder buffer the engine accepts.
pub const MAX_ROB_SIZE: usize = 1024;

/// Largest issue queue the engine accepts.
pub const MAX_IQ_SIZE: usize = 256;

/// Longest functional-unit latency the engine accepts.
pub const MAX_FU_LATENCY: usize = 1024;
