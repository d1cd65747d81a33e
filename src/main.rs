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

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use rv32i_asm::file_reader::FsFileReader;

/// Two-pass RV32I assembler: turns a `.S` source file into a flat image
/// of lowercase hex instruction words.
#[derive(ClapParser)]
#[command(version, author)]
struct Opts {
    /// Input assembly file (.S)
    input: PathBuf,

    /// Output hex file. If omitted, the hex image is printed to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose progress output
    #[arg(short, long)]
    verbose: bool,

    /// Print an address/code/source listing after assembling
    #[arg(short, long)]
    listing: bool,

    /// Write the source map as JSON to the given path
    #[arg(long, value_name = "PATH")]
    emit_source_map: Option<PathBuf>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    if opts.verbose {
        eprintln!("assembling {}", opts.input.display());
    }

    let reader = FsFileReader;
    let program = rv32i_asm::assemble_file(&opts.input, &reader)?;

    if let Some(path) = &opts.emit_source_map {
        let json = serde_json::to_string_pretty(&program.source_map)
            .context("failed to serialize source map")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write source map to {}", path.display()))?;
    }

    if let Some(output) = &opts.output {
        let mut hex = program.hex_lines();
        hex.push('\n');
        fs::write(output, hex)
            .with_context(|| format!("failed to write output file {}", output.display()))?;
        if opts.verbose {
            eprintln!("wrote {} to {}", opts.input.display(), output.display());
        }
    } else if !opts.listing {
        println!("{}", program.hex_lines());
    }

    if opts.listing {
        println!("\n{}", program.listing());
    }

    if opts.verbose || opts.output.is_some() {
        eprintln!("assembly successful: {} instructions", program.words.len());
    }

    Ok(())
}
