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

mod line_builder;

use crate::ast::AssemblyLine;
use crate::errors::AssemblyError;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "./grammar.pest"]
pub struct RvParser;

/// Parses an entire source text into one `AssemblyLine` per source line.
/// Order-preserving and order-independent of any later pass: duplicate
/// labels are a Pass 1 concern, not a parser concern.
pub fn parse_source(source: &str) -> Result<Vec<AssemblyLine>, AssemblyError> {
    let mut pairs = RvParser::parse(Rule::program, source)?;
    let program = pairs.next().expect("program rule always produces one pair");

    let mut lines = Vec::new();
    for line_pair in program.into_inner() {
        if line_pair.as_rule() != Rule::line {
            continue;
        }
        let line_number = line_pair.as_span().start_pos().line_col().0;
        let original_text = source
            .lines()
            .nth(line_number - 1)
            .unwrap_or("")
            .to_string();
        if let Some(assembly_line) =
            line_builder::build_line(line_pair, line_number, original_text)?
        {
            lines.push(assembly_line);
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_instruction() {
        let lines = parse_source("addi x1, x0, 10\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].mnemonic.as_deref(), Some("addi"));
        assert_eq!(lines[0].operands, vec!["x1", "x0", "10"]);
        assert!(lines[0].label.is_none());
        assert!(!lines[0].is_directive);
    }

    #[test]
    fn parses_label_and_instruction_on_same_line() {
        let lines = parse_source("loop: beq x1, x2, loop\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label.as_deref(), Some("loop"));
        assert_eq!(lines[0].mnemonic.as_deref(), Some("beq"));
        assert_eq!(lines[0].operands, vec!["x1", "x2", "loop"]);
    }

    #[test]
    fn parses_bare_label_line() {
        let lines = parse_source("start:\nnop\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label.as_deref(), Some("start"));
        assert!(lines[0].mnemonic.is_none());
        assert_eq!(lines[1].mnemonic.as_deref(), Some("nop"));
    }

    #[test]
    fn strips_hash_and_slash_comments() {
        let lines = parse_source("addi x1, x0, 1 # one\nnop // also a comment\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].operands, vec!["x1", "x0", "1"]);
        assert_eq!(lines[1].mnemonic.as_deref(), Some("nop"));
    }

    #[test]
    fn keeps_memory_operand_as_one_token() {
        let lines = parse_source("lw x5, 8(x2)\n").unwrap();
        assert_eq!(lines[0].operands, vec!["x5", "8(x2)"]);
    }

    #[test]
    fn flags_directives_and_records_operands() {
        let lines = parse_source(".align 2\n").unwrap();
        assert!(lines[0].is_directive);
        assert_eq!(lines[0].mnemonic.as_deref(), Some(".align"));
        assert_eq!(lines[0].operands, vec!["2"]);
    }

    #[test]
    fn skips_blank_and_comment_only_lines() {
        let lines = parse_source("\n# just a comment\nnop\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].mnemonic.as_deref(), Some("nop"));
    }

    #[test]
    fn rejects_malformed_memory_operand() {
        // Unmatched paren: grammar still tokenizes it as a single operand;
        // the shape is only validated at resolution time during operand
        // resolution.
        let lines = parse_source("lw x5, x2)\n").unwrap();
        assert_eq!(lines[0].operands, vec!["x5", "x2)"]);
    }

    #[test]
    fn line_numbers_track_source_line_past_the_first_line() {
        let lines = parse_source("addi x1, x0, 1\nnop\nsub x2, x1, x0\n").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[1].line_number, 2);
        assert_eq!(lines[2].line_number, 3);
        assert_eq!(lines[1].original_text, "nop");
        assert_eq!(lines[2].original_text, "sub x2, x1, x0");
    }

    #[test]
    fn line_numbers_skip_over_blank_lines_correctly() {
        let lines = parse_source("nop\n\nnop\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[1].line_number, 3);
    }

    #[test]
    fn accepts_whitespace_before_the_label_colon() {
        let lines = parse_source("loop : beq x1, x2, loop\n").unwrap();
        assert_eq!(lines[0].label.as_deref(), Some("loop"));
        assert_eq!(lines[0].mnemonic.as_deref(), Some("beq"));
    }
}
