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

pub mod assembler;
pub mod ast;
pub mod catalog;
pub mod encoder;
pub mod errors;
pub mod file_reader;
pub mod numbers;
pub mod parser;
pub mod pseudo;
pub mod registers;

use std::path::Path;

use anyhow::{Context, Result};
use assembler::SourceMapEntry;
use file_reader::FileReader;

extern crate pest;
extern crate pest_derive;

/// The result of a successful assembly run: one 32-bit word per encoded
/// instruction, plus the source map relating each word back to its line.
#[derive(Debug, Clone)]
pub struct AssembledProgram {
    pub words: Vec<u32>,
    pub source_map: Vec<SourceMapEntry>,
}

impl AssembledProgram {
    /// One lowercase 8-digit hex string per word, newline-separated —
    /// the flat image format this assembler produces.
    pub fn hex_lines(&self) -> String {
        self.words
            .iter()
            .map(|word| format!("{word:08x}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A human-readable `Address   Code       Source` listing, one row
    /// per encoded word.
    pub fn listing(&self) -> String {
        let mut out = String::from("Address   Code       Source\n");
        out.push_str(&"-".repeat(60));
        for (entry, word) in self.source_map.iter().zip(self.words.iter()) {
            out.push('\n');
            out.push_str(&format!(
                "0x{:04X}:   {:08X}   {}",
                entry.address,
                word,
                entry.source_text.trim()
            ));
        }
        out
    }
}

/// Assembles already-in-memory source text.
pub fn assemble_source(source: &str) -> Result<AssembledProgram> {
    let lines = parser::parse_source(source).context("failed during parsing stage")?;
    let (words, source_map) = assembler::assemble(&lines).context("failed during assembly")?;
    Ok(AssembledProgram { words, source_map })
}

/// Assembles a source file through the given reader, so tests can supply
/// a `MockFileReader` instead of touching the filesystem.
pub fn assemble_file<F: FileReader>(path: &Path, reader: &F) -> Result<AssembledProgram> {
    let source = reader
        .read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    assemble_source(&source)
}
