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

//! Pseudo-instruction expansion: each mnemonic below expands to one or more
//! real RV32I instructions before encoding.
//!
//! `count` and `expand` both dispatch through the same `PSEUDO` set so they
//! can never disagree on which mnemonics are pseudo-instructions. They
//! deliberately do *not* share a single expansion routine for `li`: Pass 1
//! only needs the instruction count to lay out addresses and must not fail
//! on a label-shaped immediate it can't resolve yet, while Pass 2 expands
//! for real and is free to raise. See `count`'s `li` arm.

use crate::errors::AssemblyError;
use crate::numbers::parse_immediate;

/// One real instruction produced by expanding a pseudo-instruction: its
/// mnemonic and operand list, ready to feed back through the catalog.
pub type Expanded = (String, Vec<String>);

const PSEUDO: &[&str] = &[
    "li", "mv", "not", "neg", "nop", "j", "jr", "ret", "call", "beqz", "bnez", "blez", "bgez",
    "bltz", "bgtz", "seqz", "snez", "sltz", "sgtz",
];

pub fn is_pseudo(mnemonic: &str) -> bool {
    PSEUDO.contains(&mnemonic)
}

/// Number of real instructions `mnemonic` will expand to, for Pass 1
/// address layout. `None` if `mnemonic` isn't a pseudo-instruction.
///
/// `li`'s immediate may reference a value Pass 1 can't evaluate (e.g. when
/// pseudo-instructions ever grow a label-valued immediate), so an
/// unparsable operand is treated as the 2-instruction worst case rather
/// than failing the pass; `expand` will raise on the same input in Pass 2
/// if it's truly malformed.
pub fn count(mnemonic: &str, operands: &[String]) -> Option<usize> {
    if !is_pseudo(mnemonic) {
        return None;
    }
    if mnemonic != "li" {
        return Some(1);
    }
    let fits_one = operands
        .get(1)
        .and_then(|text| parse_immediate(text, 0, "").ok())
        .map(|imm| (-2048..=2047).contains(&imm));
    Some(if fits_one == Some(true) { 1 } else { 2 })
}

/// Expands `mnemonic` into its real instructions. `None` if `mnemonic`
/// isn't a pseudo-instruction; `Some(Err(_))` if the operand list is
/// malformed for it.
pub fn expand(
    mnemonic: &str,
    operands: &[String],
    line: usize,
    original: &str,
) -> Option<Result<Vec<Expanded>, AssemblyError>> {
    if !is_pseudo(mnemonic) {
        return None;
    }
    Some(expand_checked(mnemonic, operands, line, original))
}

fn expand_checked(
    mnemonic: &str,
    operands: &[String],
    line: usize,
    original: &str,
) -> Result<Vec<Expanded>, AssemblyError> {
    let arity = |want: usize| -> Result<(), AssemblyError> {
        if operands.len() == want {
            Ok(())
        } else {
            Err(AssemblyError::parse(
                line,
                original,
                format!(
                    "{} requires {} operand(s), got {}",
                    mnemonic,
                    want,
                    operands.len()
                ),
            ))
        }
    };
    let two = |m: &str, ops: [&str; 2]| vec![(m.to_string(), ops.map(String::from).to_vec())];
    let three = |m: &str, ops: [&str; 3]| vec![(m.to_string(), ops.map(String::from).to_vec())];

    match mnemonic {
        "li" => {
            arity(2)?;
            let rd = operands[0].as_str();
            let imm = parse_immediate(&operands[1], line, original)?;
            if (-2048..=2047).contains(&imm) {
                return Ok(three("addi", [rd, "x0", &imm.to_string()]));
            }
            let upper = (imm.wrapping_add(0x800)) >> 12;
            let lower = imm - (upper << 12);
            let upper = (upper as u32) & 0xFFFFF;

            let mut result = vec![("lui".to_string(), vec![rd.to_string(), upper.to_string()])];
            if lower != 0 {
                result.push(("addi".to_string(), vec![rd.to_string(), rd.to_string(), lower.to_string()]));
            }
            Ok(result)
        }
        "mv" => {
            arity(2)?;
            Ok(three("addi", [&operands[0], &operands[1], "0"]))
        }
        "not" => {
            arity(2)?;
            Ok(three("xori", [&operands[0], &operands[1], "-1"]))
        }
        "neg" => {
            arity(2)?;
            Ok(three("sub", [&operands[0], "x0", &operands[1]]))
        }
        "nop" => {
            arity(0)?;
            Ok(three("addi", ["x0", "x0", "0"]))
        }
        "j" => {
            arity(1)?;
            Ok(two("jal", ["x0", &operands[0]]))
        }
        "jr" => {
            arity(1)?;
            Ok(three("jalr", ["x0", &operands[0], "0"]))
        }
        "ret" => {
            arity(0)?;
            Ok(three("jalr", ["x0", "ra", "0"]))
        }
        "call" => {
            arity(1)?;
            Ok(two("jal", ["ra", &operands[0]]))
        }
        "beqz" => {
            arity(2)?;
            Ok(three("beq", [&operands[0], "x0", &operands[1]]))
        }
        "bnez" => {
            arity(2)?;
            Ok(three("bne", [&operands[0], "x0", &operands[1]]))
        }
        "blez" => {
            arity(2)?;
            Ok(three("bge", ["x0", &operands[0], &operands[1]]))
        }
        "bgez" => {
            arity(2)?;
            Ok(three("bge", [&operands[0], "x0", &operands[1]]))
        }
        "bltz" => {
            arity(2)?;
            Ok(three("blt", [&operands[0], "x0", &operands[1]]))
        }
        "bgtz" => {
            arity(2)?;
            Ok(three("blt", ["x0", &operands[0], &operands[1]]))
        }
        "seqz" => {
            arity(2)?;
            Ok(three("sltiu", [&operands[0], &operands[1], "1"]))
        }
        "snez" => {
            arity(2)?;
            Ok(three("sltu", [&operands[0], "x0", &operands[1]]))
        }
        "sltz" => {
            arity(2)?;
            Ok(three("slt", [&operands[0], &operands[1], "x0"]))
        }
        "sgtz" => {
            arity(2)?;
            Ok(three("slt", [&operands[0], "x0", &operands[1]]))
        }
        _ => unreachable!("is_pseudo guards the dispatch"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn li_small_immediate_expands_to_one_instruction() {
        let ops = vec!["x5".to_string(), "10".to_string()];
        assert_eq!(count("li", &ops), Some(1));
        let expanded = expand("li", &ops, 1, "").unwrap().unwrap();
        assert_eq!(expanded, vec![("addi".to_string(), vec!["x5".into(), "x0".into(), "10".into()])]);
    }

    #[test]
    fn li_large_immediate_expands_to_two_instructions() {
        let ops = vec!["x5".to_string(), "0x12345678".to_string()];
        assert_eq!(count("li", &ops), Some(2));
        let expanded = expand("li", &ops, 1, "").unwrap().unwrap();
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].0, "lui");
        assert_eq!(expanded[1].0, "addi");
    }

    #[test]
    fn li_boundary_values_round_trip() {
        // 0x800 exactly overflows the 12-bit signed range on the positive side.
        let ops = vec!["x1".to_string(), "2047".to_string()];
        assert_eq!(count("li", &ops), Some(1));
        let ops = vec!["x1".to_string(), "2048".to_string()];
        assert_eq!(count("li", &ops), Some(2));
        let ops = vec!["x1".to_string(), "-2048".to_string()];
        assert_eq!(count("li", &ops), Some(1));
        let ops = vec!["x1".to_string(), "-2049".to_string()];
        assert_eq!(count("li", &ops), Some(2));
    }

    #[test]
    fn li_exact_upper_immediate_skips_addi() {
        // 0x7FFFF000 % 0x1000 == 0 after the rounding adjustment, so the
        // lower half is zero and expand should emit lui only.
        let ops = vec!["x1".to_string(), "0x7FFFF000".to_string()];
        let expanded = expand("li", &ops, 1, "").unwrap().unwrap();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].0, "lui");
    }

    #[test]
    fn li_rejects_wrong_arity() {
        let ops = vec!["x1".to_string()];
        assert!(expand("li", &ops, 1, "").unwrap().is_err());
    }

    #[test]
    fn count_falls_back_to_two_on_unparsable_immediate() {
        let ops = vec!["x5".to_string(), "not_a_number".to_string()];
        assert_eq!(count("li", &ops), Some(2));
    }

    #[test]
    fn mv_expands_to_addi_with_zero_immediate() {
        let ops = vec!["x1".to_string(), "x2".to_string()];
        let expanded = expand("mv", &ops, 1, "").unwrap().unwrap();
        assert_eq!(expanded, vec![("addi".to_string(), vec!["x1".into(), "x2".into(), "0".into()])]);
    }

    #[test]
    fn nop_and_ret_take_no_operands() {
        assert_eq!(count("nop", &[]), Some(1));
        let expanded = expand("nop", &[], 1, "").unwrap().unwrap();
        assert_eq!(expanded[0].0, "addi");
        let expanded = expand("ret", &[], 1, "").unwrap().unwrap();
        assert_eq!(expanded, vec![("jalr".to_string(), vec!["x0".into(), "ra".into(), "0".into()])]);
    }

    #[test]
    fn blez_and_bgtz_swap_operand_order() {
        let ops = vec!["x3".to_string(), "target".to_string()];
        let blez = expand("blez", &ops, 1, "").unwrap().unwrap();
        assert_eq!(blez[0].1, vec!["x0".to_string(), "x3".to_string(), "target".to_string()]);
        let bgtz = expand("bgtz", &ops, 1, "").unwrap().unwrap();
        assert_eq!(bgtz[0].1, vec!["x0".to_string(), "x3".to_string(), "target".to_string()]);
    }

    #[test]
    fn unknown_mnemonic_is_not_pseudo() {
        assert_eq!(count("addi", &[]), None);
        assert!(expand("addi", &[], 1, "").is_none());
    }
}
