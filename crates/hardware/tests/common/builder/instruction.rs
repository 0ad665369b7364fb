use rvooo_core::isa::rv32i::funct3;
use rvooo_core::isa::rv32i::funct7;
use rvooo_core::isa::rv32i::opcodes::*;

/// Fluent encoder for 32-bit RV32I instruction words.
pub struct InstructionBuilder {
    opcode: u32,
    rd: u32,
    funct3: u32,
    rs1: u32,
    rs2: u32,
    funct7: u32,
    imm: i32,
}

impl Default for InstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self {
            opcode: 0,
            rd: 0,
            funct3: 0,
            rs1: 0,
            rs2: 0,
            funct7: 0,
            imm: 0,
        }
    }

    pub fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn rs1(mut self, rs1: u32) -> Self {
        self.rs1 = rs1;
        self
    }

    pub fn rs2(mut self, rs2: u32) -> Self {
        self.rs2 = rs2;
        self
    }

    pub fn funct3(mut self, funct3: u32) -> Self {
        self.funct3 = funct3;
        self
    }

    pub fn funct7(mut self, funct7: u32) -> Self {
        self.funct7 = funct7;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    // --- Helpers for Common Instructions ---

    fn reg_op(mut self, f3: u32, f7: u32, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = OP_REG;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = f3;
        self.funct7 = f7;
        self
    }

    fn imm_op(mut self, f3: u32, rd: u32, rs1: u32, imm: i32) -> Self {
        self.opcode = OP_IMM;
        self.rd = rd;
        self.rs1 = rs1;
        self.funct3 = f3;
        self.imm = imm;
        self
    }

    pub fn add(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::ADD_SUB, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sub(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::ADD_SUB, funct7::SUB, rd, rs1, rs2)
    }

    pub fn sll(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::SLL, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn slt(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::SLT, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sltu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::SLTU, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn xor(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::XOR, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn srl(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::SRL_SRA, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sra(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::SRL_SRA, funct7::SRA, rd, rs1, rs2)
    }

    pub fn or(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::OR, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn and(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg_op(funct3::AND, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn addi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.imm_op(funct3::ADD_SUB, rd, rs1, imm)
    }

    pub fn slti(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.imm_op(funct3::SLT, rd, rs1, imm)
    }

    pub fn sltiu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.imm_op(funct3::SLTU, rd, rs1, imm)
    }

    pub fn xori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.imm_op(funct3::XOR, rd, rs1, imm)
    }

    pub fn ori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.imm_op(funct3::OR, rd, rs1, imm)
    }

    pub fn andi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.imm_op(funct3::AND, rd, rs1, imm)
    }

    pub fn slli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.imm_op(funct3::SLL, rd, rs1, (shamt & 0x1F) as i32)
    }

    pub fn srli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.imm_op(funct3::SRL_SRA, rd, rs1, (shamt & 0x1F) as i32)
    }

    pub fn srai(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.imm_op(funct3::SRL_SRA, rd, rs1, 0x400 | (shamt & 0x1F) as i32)
    }

    pub fn lui(mut self, rd: u32, upper: u32) -> Self {
        self.opcode = OP_LUI;
        self.rd = rd;
        self.imm = (upper & 0xF_FFFF) as i32;
        self
    }

    pub fn nop(self) -> Self {
        self.addi(0, 0, 0)
    }

    pub fn build(self) -> u32 {
        let fields = ((self.rd & 0x1F) << 7) | (self.opcode & 0x7F);
        match self.opcode {
            OP_REG => {
                (self.funct7 << 25)
                    | ((self.rs2 & 0x1F) << 20)
                    | ((self.rs1 & 0x1F) << 15)
                    | (self.funct3 << 12)
                    | fields
            }
            OP_LUI => ((self.imm as u32) << 12) | fields,
            _ => {
                (((self.imm as u32) & 0xFFF) << 20)
                    | ((self.rs1 & 0x1F) << 15)
                    | (self.funct3 << 12)
                    | fields
            }
        }
    }
}

#[test]
fn test_builder_matches_known_encodings() {
    assert_eq!(InstructionBuilder::new().addi(1, 0, 5).build(), 0x00500093);
    assert_eq!(InstructionBuilder::new().add(3, 1, 2).build(), 0x002081b3);
    assert_eq!(InstructionBuilder::new().sub(3, 1, 2).build(), 0x402081b3);
    assert_eq!(InstructionBuilder::new().slli(2, 1, 2).build(), 0x00209113);
    assert_eq!(InstructionBuilder::new().nop().build(), 0x00000013);
    assert_eq!(InstructionBuilder::new().lui(5, 0x12345).build(), 0x123452b7);
}
