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

//! Label -> byte address map built in Pass 1 and consulted in Pass 2.

use std::collections::HashMap;

use crate::errors::AssemblyError;

#[derive(Debug, Default)]
pub struct SymbolTable {
    addresses: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a label at the given byte address. Errors on redefinition:
    /// every label must be unique across the whole program.
    pub fn define(
        &mut self,
        label: &str,
        address: u32,
        line: usize,
        original: &str,
    ) -> Result<(), AssemblyError> {
        if self.addresses.contains_key(label) {
            return Err(AssemblyError::symbol(
                line,
                original,
                format!("duplicate label: {label}"),
            ));
        }
        self.addresses.insert(label.to_string(), address);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.addresses.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.addresses.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_looks_up_labels() {
        let mut table = SymbolTable::new();
        table.define("start", 0, 1, "start:").unwrap();
        table.define("loop", 8, 2, "loop:").unwrap();
        assert_eq!(table.get("start"), Some(0));
        assert_eq!(table.get("loop"), Some(8));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn rejects_duplicate_label() {
        let mut table = SymbolTable::new();
        table.define("start", 0, 1, "start:").unwrap();
        assert!(table.define("start", 4, 2, "start:").is_err());
    }
}
