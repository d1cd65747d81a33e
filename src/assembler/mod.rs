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

//! The two-pass assembly driver: Pass 1 builds the symbol table and lays
//! out addresses (accounting for pseudo-instruction expansion length);
//! Pass 2 resolves operands against that table and encodes every real
//! instruction to its 32-bit word.

pub mod symbol_table;

use crate::ast::AssemblyLine;
use crate::catalog::{self, Descriptor, OperandShape};
use crate::encoder::{self, Operands};
use crate::errors::AssemblyError;
use crate::numbers::parse_immediate;
use crate::pseudo;
use crate::registers::parse_register;
use symbol_table::SymbolTable;

/// One entry in the address -> source-line mapping produced alongside the
/// encoded words, so a listing or external tool can relate a word back to
/// the line that produced it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SourceMapEntry {
    pub address: u32,
    pub line_number: usize,
    pub source_text: String,
}

/// Runs both passes over an already-parsed program and returns the
/// encoded words with their source map.
pub fn assemble(lines: &[AssemblyLine]) -> Result<(Vec<u32>, Vec<SourceMapEntry>), AssemblyError> {
    let symbols = pass1(lines)?;
    pass2(lines, &symbols)
}

fn pass1(lines: &[AssemblyLine]) -> Result<SymbolTable, AssemblyError> {
    let mut symbols = SymbolTable::new();
    let mut address: u32 = 0;

    for line in lines {
        if let Some(label) = &line.label {
            symbols.define(label, address, line.line_number, &line.original_text)?;
        }

        if !line.emits_instruction() {
            continue;
        }

        let mnemonic = line.mnemonic.as_deref().unwrap();
        let count = pseudo::count(mnemonic, &line.operands).unwrap_or(1);
        address += (count as u32) * 4;
    }

    Ok(symbols)
}

fn pass2(
    lines: &[AssemblyLine],
    symbols: &SymbolTable,
) -> Result<(Vec<u32>, Vec<SourceMapEntry>), AssemblyError> {
    let mut words = Vec::new();
    let mut source_map = Vec::new();
    let mut address: u32 = 0;

    for line in lines {
        if !line.emits_instruction() {
            continue;
        }
        let mnemonic = line.mnemonic.as_deref().unwrap();

        let real_instructions = match pseudo::expand(mnemonic, &line.operands, line.line_number, &line.original_text) {
            Some(expanded) => expanded?,
            None => vec![(mnemonic.to_string(), line.operands.clone())],
        };

        for (real_mnemonic, real_operands) in real_instructions {
            let word = encode_one(
                &real_mnemonic,
                &real_operands,
                symbols,
                address,
                line.line_number,
                &line.original_text,
            )?;
            words.push(word);
            source_map.push(SourceMapEntry {
                address,
                line_number: line.line_number,
                source_text: line.original_text.clone(),
            });
            address += 4;
        }
    }

    Ok((words, source_map))
}

fn encode_one(
    mnemonic: &str,
    operands: &[String],
    symbols: &SymbolTable,
    address: u32,
    line_number: usize,
    original: &str,
) -> Result<u32, AssemblyError> {
    let descriptor = catalog::lookup(mnemonic).ok_or_else(|| {
        AssemblyError::parse(line_number, original, format!("unknown instruction: {mnemonic}"))
    })?;

    let resolved = resolve_operands(&descriptor, mnemonic, operands, symbols, address, line_number, original)?;
    encoder::encode(&descriptor, resolved, line_number, original)
}

fn arity_error(mnemonic: &str, expected: &str, got: usize, line: usize, original: &str) -> AssemblyError {
    AssemblyError::parse(
        line,
        original,
        format!("{mnemonic} requires {expected}, got {got} operand(s)"),
    )
}

/// Resolves a bare immediate or PC-absolute label reference to a value.
fn resolve_value(text: &str, symbols: &SymbolTable, line: usize, original: &str) -> Result<i64, AssemblyError> {
    let trimmed = text.trim();
    if let Some(addr) = symbols.get(trimmed) {
        return Ok(addr as i64);
    }
    parse_immediate(trimmed, line, original)
}

/// Resolves a branch/jump target to a PC-relative byte offset: a known
/// label resolves against the *current* instruction's address, anything
/// else is read as a literal (already PC-relative) offset.
fn resolve_pc_relative(
    text: &str,
    symbols: &SymbolTable,
    address: u32,
    line: usize,
    original: &str,
) -> Result<i64, AssemblyError> {
    let trimmed = text.trim();
    if let Some(target) = symbols.get(trimmed) {
        return Ok(target as i64 - address as i64);
    }
    parse_immediate(trimmed, line, original)
}

/// Parses a memory operand in `offset(register)` form. The offset may be
/// omitted (`(sp)` means offset 0).
fn parse_memory_operand(text: &str, line: usize, original: &str) -> Result<(i64, String), AssemblyError> {
    let trimmed = text.trim();
    let open = trimmed.find('(').ok_or_else(|| {
        AssemblyError::parse(line, original, format!("invalid memory operand syntax: {text}"))
    })?;
    if !trimmed.ends_with(')') {
        return Err(AssemblyError::parse(
            line,
            original,
            format!("invalid memory operand syntax: {text}"),
        ));
    }

    let offset_str = trimmed[..open].trim();
    let reg_str = trimmed[open + 1..trimmed.len() - 1].trim();

    let offset = if offset_str.is_empty() || offset_str == "-" {
        0
    } else {
        parse_immediate(offset_str, line, original)?
    };

    Ok((offset, reg_str.to_string()))
}

fn resolve_operands(
    descriptor: &Descriptor,
    mnemonic: &str,
    operands: &[String],
    symbols: &SymbolTable,
    address: u32,
    line: usize,
    original: &str,
) -> Result<Operands, AssemblyError> {
    let mut result = Operands::default();

    match descriptor.shape {
        OperandShape::R => {
            if operands.len() != 3 {
                return Err(arity_error(mnemonic, "3 operands (rd, rs1, rs2)", operands.len(), line, original));
            }
            result.rd = parse_register(&operands[0], line, original)?.number();
            result.rs1 = parse_register(&operands[1], line, original)?.number();
            result.rs2 = parse_register(&operands[2], line, original)?.number();
        }
        OperandShape::IArith => {
            if operands.len() != 3 {
                return Err(arity_error(mnemonic, "3 operands (rd, rs1, imm)", operands.len(), line, original));
            }
            result.rd = parse_register(&operands[0], line, original)?.number();
            result.rs1 = parse_register(&operands[1], line, original)?.number();
            result.imm = resolve_value(&operands[2], symbols, line, original)?;
        }
        OperandShape::IShift => {
            if operands.len() != 3 {
                return Err(arity_error(mnemonic, "3 operands (rd, rs1, shamt)", operands.len(), line, original));
            }
            result.rd = parse_register(&operands[0], line, original)?.number();
            result.rs1 = parse_register(&operands[1], line, original)?.number();
            result.imm = resolve_value(&operands[2], symbols, line, original)?;
        }
        OperandShape::ILoad => {
            if operands.len() != 2 {
                return Err(arity_error(mnemonic, "2 operands (rd, offset(rs1))", operands.len(), line, original));
            }
            result.rd = parse_register(&operands[0], line, original)?.number();
            let (offset, reg) = parse_memory_operand(&operands[1], line, original)?;
            result.rs1 = parse_register(&reg, line, original)?.number();
            result.imm = offset;
        }
        OperandShape::IJalr => match operands.len() {
            3 => {
                result.rd = parse_register(&operands[0], line, original)?.number();
                result.rs1 = parse_register(&operands[1], line, original)?.number();
                result.imm = resolve_value(&operands[2], symbols, line, original)?;
            }
            2 => {
                result.rd = parse_register(&operands[0], line, original)?.number();
                let (offset, reg) = parse_memory_operand(&operands[1], line, original)?;
                result.rs1 = parse_register(&reg, line, original)?.number();
                result.imm = offset;
            }
            n => return Err(arity_error(mnemonic, "2 or 3 operands", n, line, original)),
        },
        OperandShape::S => {
            if operands.len() != 2 {
                return Err(arity_error(mnemonic, "2 operands (rs2, offset(rs1))", operands.len(), line, original));
            }
            result.rs2 = parse_register(&operands[0], line, original)?.number();
            let (offset, reg) = parse_memory_operand(&operands[1], line, original)?;
            result.rs1 = parse_register(&reg, line, original)?.number();
            result.imm = offset;
        }
        OperandShape::B => {
            if operands.len() != 3 {
                return Err(arity_error(mnemonic, "3 operands (rs1, rs2, offset)", operands.len(), line, original));
            }
            result.rs1 = parse_register(&operands[0], line, original)?.number();
            result.rs2 = parse_register(&operands[1], line, original)?.number();
            result.imm = resolve_pc_relative(&operands[2], symbols, address, line, original)?;
        }
        OperandShape::U => {
            if operands.len() != 2 {
                return Err(arity_error(mnemonic, "2 operands (rd, imm)", operands.len(), line, original));
            }
            result.rd = parse_register(&operands[0], line, original)?.number();
            result.imm = resolve_value(&operands[1], symbols, line, original)?;
        }
        OperandShape::J => {
            if operands.len() != 2 {
                return Err(arity_error(mnemonic, "2 operands (rd, offset)", operands.len(), line, original));
            }
            result.rd = parse_register(&operands[0], line, original)?.number();
            result.imm = resolve_pc_relative(&operands[1], symbols, address, line, original)?;
        }
        OperandShape::System | OperandShape::Fence => {}
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn assemble_source(source: &str) -> Vec<u32> {
        let lines = parse_source(source).unwrap();
        assemble(&lines).unwrap().0
    }

    #[test]
    fn assembles_addi_literal() {
        let words = assemble_source("addi x1, x0, 10\n");
        assert_eq!(words, vec![0x00A00093]);
    }

    #[test]
    fn resolves_forward_branch_label() {
        let words = assemble_source("beq x1, x2, target\nnop\ntarget:\nnop\n");
        // beq at address 0, target at address 8 -> offset +8
        assert_eq!(words[0], 0x00208463);
    }

    #[test]
    fn resolves_self_referencing_branch_loop() {
        let words = assemble_source("loop: beq x1, x2, loop\n");
        assert_eq!(words[0], 0x00208063);
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let lines = parse_source("a: nop\na: nop\n").unwrap();
        assert!(assemble(&lines).is_err());
    }

    #[test]
    fn undefined_label_falls_back_to_parse_error() {
        let lines = parse_source("beq x1, x2, nowhere\n").unwrap();
        assert!(assemble(&lines).is_err());
    }

    #[test]
    fn li_expands_and_advances_address_by_two_words() {
        let words = assemble_source("li x5, 0x12345678\nnop\n");
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn load_with_offset_resolves_memory_operand() {
        let words = assemble_source("lw x5, 8(x2)\n");
        assert_eq!(words, vec![0x00812283]);
    }

    #[test]
    fn jalr_accepts_both_operand_forms() {
        let a = assemble_source("jalr x1, x2, 4\n");
        let b = assemble_source("jalr x1, 4(x2)\n");
        assert_eq!(a, b);
    }
}
