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

//! Bit-exact encoding of a resolved instruction into its 32-bit word.
//! Every format here is laid out exactly as the ISA defines it; the only
//! intentional deviation from the reference encoding is `fence`, which
//! collapses to an all-zero-field word regardless of its (ignored)
//! operands, matching the reference behavior this assembler preserves.

use crate::catalog::{Descriptor, OperandShape};
use crate::errors::AssemblyError;

/// The four operand slots every format draws from; a format only uses
/// the subset it needs and leaves the rest zero.
#[derive(Debug, Default, Copy, Clone)]
pub struct Operands {
    pub rd: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub imm: i64,
}

fn check_range(
    value: i64,
    bits: u32,
    signed: bool,
    name: &str,
    line: usize,
    original: &str,
) -> Result<(), AssemblyError> {
    let (min, max) = if signed {
        (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
    } else {
        (0, (1i64 << bits) - 1)
    };
    if value < min || value > max {
        return Err(AssemblyError::encoding(
            line,
            original,
            format!("{name} value {value} out of range [{min}, {max}] for {bits}-bit field"),
        ));
    }
    Ok(())
}

/// Encodes a fully-resolved instruction into its 32-bit word. The
/// descriptor alone determines the layout: per-mnemonic differences
/// (e.g. `ecall` vs. `ebreak`) are already baked into its fields by the
/// catalog lookup.
pub fn encode(
    descriptor: &Descriptor,
    operands: Operands,
    line: usize,
    original: &str,
) -> Result<u32, AssemblyError> {
    match descriptor.shape {
        OperandShape::R => Ok(encode_r(descriptor, operands.rd, operands.rs1, operands.rs2)),
        OperandShape::IArith | OperandShape::ILoad | OperandShape::IJalr => {
            check_range(operands.imm, 12, true, "I-type immediate", line, original)?;
            Ok(encode_i(descriptor, operands.rd, operands.rs1, operands.imm))
        }
        OperandShape::IShift => {
            check_range(operands.imm, 5, false, "shift amount", line, original)?;
            let imm = ((descriptor.funct7 as i64) << 5) | (operands.imm & 0x1F);
            Ok(encode_i(descriptor, operands.rd, operands.rs1, imm))
        }
        OperandShape::System => Ok(encode_i(
            descriptor,
            0,
            0,
            descriptor.system_imm as i64,
        )),
        OperandShape::Fence => Ok(descriptor.opcode as u32),
        OperandShape::S => {
            check_range(operands.imm, 12, true, "S-type immediate", line, original)?;
            Ok(encode_s(descriptor, operands.rs1, operands.rs2, operands.imm))
        }
        OperandShape::B => {
            if operands.imm & 1 != 0 {
                return Err(AssemblyError::encoding(
                    line,
                    original,
                    format!("B-type branch offset must be even, got {}", operands.imm),
                ));
            }
            check_range(operands.imm, 13, true, "B-type offset", line, original)?;
            Ok(encode_b(descriptor, operands.rs1, operands.rs2, operands.imm))
        }
        OperandShape::U => {
            if operands.imm < 0 {
                check_range(operands.imm, 20, true, "U-type immediate", line, original)?;
            } else {
                check_range(operands.imm, 20, false, "U-type immediate", line, original)?;
            }
            Ok(encode_u(descriptor, operands.rd, operands.imm))
        }
        OperandShape::J => {
            if operands.imm & 1 != 0 {
                return Err(AssemblyError::encoding(
                    line,
                    original,
                    format!("J-type jump offset must be even, got {}", operands.imm),
                ));
            }
            check_range(operands.imm, 21, true, "J-type offset", line, original)?;
            Ok(encode_j(descriptor, operands.rd, operands.imm))
        }
    }
}

fn encode_r(d: &Descriptor, rd: u8, rs1: u8, rs2: u8) -> u32 {
    let mut word = d.opcode as u32 & 0x7F;
    word |= ((rd & 0x1F) as u32) << 7;
    word |= ((d.funct3 & 0x7) as u32) << 12;
    word |= ((rs1 & 0x1F) as u32) << 15;
    word |= ((rs2 & 0x1F) as u32) << 20;
    word |= ((d.funct7 & 0x7F) as u32) << 25;
    word
}

fn encode_i(d: &Descriptor, rd: u8, rs1: u8, imm: i64) -> u32 {
    let imm = (imm as u32) & 0xFFF;
    let mut word = d.opcode as u32 & 0x7F;
    word |= ((rd & 0x1F) as u32) << 7;
    word |= ((d.funct3 & 0x7) as u32) << 12;
    word |= ((rs1 & 0x1F) as u32) << 15;
    word |= imm << 20;
    word
}

fn encode_s(d: &Descriptor, rs1: u8, rs2: u8, imm: i64) -> u32 {
    let imm = (imm as u32) & 0xFFF;
    let mut word = d.opcode as u32 & 0x7F;
    word |= (imm & 0x1F) << 7;
    word |= ((d.funct3 & 0x7) as u32) << 12;
    word |= ((rs1 & 0x1F) as u32) << 15;
    word |= ((rs2 & 0x1F) as u32) << 20;
    word |= ((imm >> 5) & 0x7F) << 25;
    word
}

fn encode_b(d: &Descriptor, rs1: u8, rs2: u8, imm: i64) -> u32 {
    let imm = (imm as u32) & 0x1FFE;
    let mut word = d.opcode as u32 & 0x7F;
    word |= ((imm >> 11) & 0x1) << 7;
    word |= ((imm >> 1) & 0xF) << 8;
    word |= ((d.funct3 & 0x7) as u32) << 12;
    word |= ((rs1 & 0x1F) as u32) << 15;
    word |= ((rs2 & 0x1F) as u32) << 20;
    word |= ((imm >> 5) & 0x3F) << 25;
    word |= ((imm >> 12) & 0x1) << 31;
    word
}

fn encode_u(d: &Descriptor, rd: u8, imm: i64) -> u32 {
    let imm = (imm as u32) & 0xFFFFF;
    let mut word = d.opcode as u32 & 0x7F;
    word |= ((rd & 0x1F) as u32) << 7;
    word |= imm << 12;
    word
}

fn encode_j(d: &Descriptor, rd: u8, imm: i64) -> u32 {
    let imm = (imm as u32) & 0x1FFFFF;
    let mut word = d.opcode as u32 & 0x7F;
    word |= ((rd & 0x1F) as u32) << 7;
    word |= ((imm >> 12) & 0xFF) << 12;
    word |= ((imm >> 11) & 0x1) << 20;
    word |= ((imm >> 1) & 0x3FF) << 21;
    word |= ((imm >> 20) & 0x1) << 31;
    word
}
