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

//! RISC-V integer register names: `x0`..`x31`, their ABI aliases, and the
//! `fp` = `s0` = `x8` alias. Matching is case-insensitive.

use crate::errors::AssemblyError;

/// An integer register number in `[0, 31]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(pub u8);

impl Register {
    pub const ZERO: Register = Register(0);
    pub const RA: Register = Register(1);

    pub fn number(self) -> u8 {
        self.0
    }
}

const ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Parses a register name in any of its accepted forms (`x0`..`x31`, ABI
/// name, or the `fp` alias for `s0`). Matching is case-insensitive.
pub fn parse_register(name: &str, line: usize, original: &str) -> Result<Register, AssemblyError> {
    let lower = name.trim().to_ascii_lowercase();

    if lower == "fp" {
        return Ok(Register(8));
    }

    if let Some(rest) = lower.strip_prefix('x') {
        if let Ok(n) = rest.parse::<u8>() {
            if n <= 31 {
                return Ok(Register(n));
            }
        }
    }

    if let Some(n) = ABI_NAMES.iter().position(|abi| *abi == lower) {
        return Ok(Register(n as u8));
    }

    Err(AssemblyError::parse(
        line,
        original,
        format!("invalid register name: {}", name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_names() {
        assert_eq!(parse_register("x0", 1, "").unwrap(), Register(0));
        assert_eq!(parse_register("X31", 1, "").unwrap(), Register(31));
    }

    #[test]
    fn parses_abi_names_case_insensitively() {
        assert_eq!(parse_register("ZERO", 1, "").unwrap(), Register(0));
        assert_eq!(parse_register("ra", 1, "").unwrap(), Register(1));
        assert_eq!(parse_register("sp", 1, "").unwrap(), Register(2));
        assert_eq!(parse_register("a0", 1, "").unwrap(), Register(10));
        assert_eq!(parse_register("t6", 1, "").unwrap(), Register(31));
    }

    #[test]
    fn fp_aliases_s0() {
        assert_eq!(parse_register("fp", 1, "").unwrap(), Register(8));
        assert_eq!(parse_register("s0", 1, "").unwrap(), Register(8));
    }

    #[test]
    fn rejects_out_of_range_numeric_register() {
        assert!(parse_register("x32", 1, "").is_err());
    }

    #[test]
    fn rejects_unknown_name() {
        assert!(parse_register("banana", 1, "").is_err());
    }
}
