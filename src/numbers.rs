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

//! Immediate literal parsing: decimal (optionally negative), `0x` hex,
//! `0b` binary, `0o` octal, case-insensitive prefixes.

use crate::errors::AssemblyError;

pub fn parse_immediate(text: &str, line: usize, original: &str) -> Result<i64, AssemblyError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AssemblyError::parse(line, original, "empty immediate value"));
    }

    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(r) => (true, r.trim()),
        None => (false, trimmed),
    };

    let lower = rest.to_ascii_lowercase();
    let parsed = if let Some(digits) = lower.strip_prefix("0x") {
        i64::from_str_radix(digits, 16)
    } else if let Some(digits) = lower.strip_prefix("0b") {
        i64::from_str_radix(digits, 2)
    } else if let Some(digits) = lower.strip_prefix("0o") {
        i64::from_str_radix(digits, 8)
    } else {
        rest.parse::<i64>()
    };

    let value = parsed.map_err(|_| {
        AssemblyError::parse(line, original, format!("invalid immediate value: {}", text))
    })?;

    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal() {
        assert_eq!(parse_immediate("10", 1, "").unwrap(), 10);
        assert_eq!(parse_immediate("-45", 1, "").unwrap(), -45);
    }

    #[test]
    fn parses_hex_binary_octal_case_insensitively() {
        assert_eq!(parse_immediate("0x1A", 1, "").unwrap(), 0x1A);
        assert_eq!(parse_immediate("0X1a", 1, "").unwrap(), 0x1a);
        assert_eq!(parse_immediate("0b1010", 1, "").unwrap(), 0b1010);
        assert_eq!(parse_immediate("0o17", 1, "").unwrap(), 0o17);
    }

    #[test]
    fn parses_negative_hex() {
        assert_eq!(parse_immediate("-0x10", 1, "").unwrap(), -16);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_immediate("0xZZ", 1, "").is_err());
        assert!(parse_immediate("", 1, "").is_err());
    }
}
