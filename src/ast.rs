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

//! The intermediate representation the parser produces: one `AssemblyLine`
//! per source line, carrying enough to drive both assembly passes without
//! re-parsing.

/// A single parsed source line. Immutable once produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyLine {
    pub line_number: usize,
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operands: Vec<String>,
    pub original_text: String,
    pub is_directive: bool,
}

impl AssemblyLine {
    /// Directives and label-only lines carry no mnemonic and never advance
    /// the program counter.
    pub fn emits_instruction(&self) -> bool {
        self.mnemonic.is_some() && !self.is_directive
    }
}
