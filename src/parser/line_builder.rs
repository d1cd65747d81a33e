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

use super::Rule;
use crate::ast::AssemblyLine;
use crate::errors::AssemblyError;
use pest::iterators::Pair;

/// Converts one `Rule::line` pair into an `AssemblyLine`, or `None` for a
/// blank/comment-only line (which the parser drops rather than emitting an
/// empty record for).
pub fn build_line(
    line_pair: Pair<Rule>,
    line_number: usize,
    original_text: String,
) -> Result<Option<AssemblyLine>, AssemblyError> {
    let mut line = AssemblyLine {
        line_number,
        original_text,
        ..Default::default()
    };

    for part in line_pair.into_inner() {
        match part.as_rule() {
            Rule::line_content => build_line_content(part, &mut line)?,
            Rule::comment => {}
            _ => {}
        }
    }

    if line.label.is_none() && line.mnemonic.is_none() {
        return Ok(None);
    }
    Ok(Some(line))
}

fn build_line_content(content: Pair<Rule>, line: &mut AssemblyLine) -> Result<(), AssemblyError> {
    let mut parts = content.into_inner().peekable();

    if let Some(first) = parts.peek() {
        if first.as_rule() == Rule::label {
            let label_pair = parts.next().unwrap();
            line.label = Some(extract_label_name(&label_pair));
        }
    }

    if let Some(body_pair) = parts.next() {
        build_body(body_pair, line)?;
    }

    Ok(())
}

fn build_body(body_pair: Pair<Rule>, line: &mut AssemblyLine) -> Result<(), AssemblyError> {
    let inner = body_pair
        .into_inner()
        .next()
        .expect("body always wraps a directive or instruction");

    line.is_directive = inner.as_rule() == Rule::directive;

    let mut parts = inner.into_inner();
    let mnemonic_pair = parts
        .next()
        .expect("directive/instruction always starts with a mnemonic");
    line.mnemonic = Some(mnemonic_pair.as_str().to_ascii_lowercase());

    if let Some(operand_list_pair) = parts.next() {
        line.operands = extract_operands(operand_list_pair);
    }

    Ok(())
}

fn extract_operands(operand_list: Pair<Rule>) -> Vec<String> {
    operand_list
        .into_inner()
        .map(|operand| operand.as_str().trim().to_string())
        .collect()
}

fn extract_label_name(label: &Pair<Rule>) -> String {
    label.as_str().trim_end_matches(':').trim().to_string()
}
