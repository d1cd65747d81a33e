/*
Copyright 2026 The rv32i_asm Authors

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! The closed RV32I instruction catalog: a `match` over `&str`, fixed at
//! build time, rather than a `HashMap` populated at startup.

/// One of the six RISC-V instruction formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    R,
    I,
    S,
    B,
    U,
    J,
}

/// The operand shape a mnemonic expects, which is finer-grained than
/// `Format` alone: I-type covers loads, `jalr`, shift-immediates, and
/// regular arithmetic, each with a distinct operand list.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperandShape {
    R,
    IArith,
    IShift,
    ILoad,
    IJalr,
    S,
    B,
    U,
    J,
    System,
    Fence,
}

/// A catalog entry: everything the encoder needs to place a mnemonic's
/// fixed bit fields, plus the operand shape the driver needs to resolve
/// its operands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub format: Format,
    pub shape: OperandShape,
    pub opcode: u8,
    pub funct3: u8,
    pub funct7: u8,
    /// Only meaningful when `shape == System`: the fixed immediate for
    /// `ecall` (0x000) / `ebreak` (0x001).
    pub system_imm: u16,
}

const fn d(format: Format, shape: OperandShape, opcode: u8, funct3: u8, funct7: u8) -> Descriptor {
    Descriptor {
        format,
        shape,
        opcode,
        funct3,
        funct7,
        system_imm: 0,
    }
}

/// Looks up the catalog entry for a real (non-pseudo) mnemonic.
pub fn lookup(mnemonic: &str) -> Option<Descriptor> {
    use Format::*;
    use OperandShape::*;

    Some(match mnemonic {
        // R-type, opcode 0x33
        "add" => d(R, OperandShape::R, 0x33, 0x0, 0x00),
        "sub" => d(R, OperandShape::R, 0x33, 0x0, 0x20),
        "sll" => d(R, OperandShape::R, 0x33, 0x1, 0x00),
        "slt" => d(R, OperandShape::R, 0x33, 0x2, 0x00),
        "sltu" => d(R, OperandShape::R, 0x33, 0x3, 0x00),
        "xor" => d(R, OperandShape::R, 0x33, 0x4, 0x00),
        "srl" => d(R, OperandShape::R, 0x33, 0x5, 0x00),
        "sra" => d(R, OperandShape::R, 0x33, 0x5, 0x20),
        "or" => d(R, OperandShape::R, 0x33, 0x6, 0x00),
        "and" => d(R, OperandShape::R, 0x33, 0x7, 0x00),

        // I-type arithmetic, opcode 0x13
        "addi" => d(I, IArith, 0x13, 0x0, 0x00),
        "slti" => d(I, IArith, 0x13, 0x2, 0x00),
        "sltiu" => d(I, IArith, 0x13, 0x3, 0x00),
        "xori" => d(I, IArith, 0x13, 0x4, 0x00),
        "ori" => d(I, IArith, 0x13, 0x6, 0x00),
        "andi" => d(I, IArith, 0x13, 0x7, 0x00),

        // I-type shift-immediate, opcode 0x13 (funct7 embedded in the immediate field)
        "slli" => d(I, IShift, 0x13, 0x1, 0x00),
        "srli" => d(I, IShift, 0x13, 0x5, 0x00),
        "srai" => d(I, IShift, 0x13, 0x5, 0x20),

        // Loads, opcode 0x03
        "lb" => d(I, ILoad, 0x03, 0x0, 0x00),
        "lh" => d(I, ILoad, 0x03, 0x1, 0x00),
        "lw" => d(I, ILoad, 0x03, 0x2, 0x00),
        "lbu" => d(I, ILoad, 0x03, 0x4, 0x00),
        "lhu" => d(I, ILoad, 0x03, 0x5, 0x00),

        // Stores, opcode 0x23
        "sb" => d(S, OperandShape::S, 0x23, 0x0, 0x00),
        "sh" => d(S, OperandShape::S, 0x23, 0x1, 0x00),
        "sw" => d(S, OperandShape::S, 0x23, 0x2, 0x00),

        // Branches, opcode 0x63
        "beq" => d(B, OperandShape::B, 0x63, 0x0, 0x00),
        "bne" => d(B, OperandShape::B, 0x63, 0x1, 0x00),
        "blt" => d(B, OperandShape::B, 0x63, 0x4, 0x00),
        "bge" => d(B, OperandShape::B, 0x63, 0x5, 0x00),
        "bltu" => d(B, OperandShape::B, 0x63, 0x6, 0x00),
        "bgeu" => d(B, OperandShape::B, 0x63, 0x7, 0x00),

        // Jumps
        "jal" => d(J, OperandShape::J, 0x6F, 0x0, 0x00),
        "jalr" => d(I, IJalr, 0x67, 0x0, 0x00),

        // Upper-immediate
        "lui" => d(U, OperandShape::U, 0x37, 0x0, 0x00),
        "auipc" => d(U, OperandShape::U, 0x17, 0x0, 0x00),

        // System, opcode 0x73
        "ecall" => Descriptor {
            system_imm: 0x000,
            ..d(I, System, 0x73, 0x0, 0x00)
        },
        "ebreak" => Descriptor {
            system_imm: 0x001,
            ..d(I, System, 0x73, 0x0, 0x00)
        },

        // fence, opcode 0x0F: collapses to an all-zero-field word, a
        // deliberately non-conformant simplification kept from the reference
        // behavior this assembler preserves.
        "fence" => d(I, Fence, 0x0F, 0x0, 0x00),

        _ => return None,
    })
}
