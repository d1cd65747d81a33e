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

use thiserror::Error;

/// The three fatal error classes from the assembler's error taxonomy, plus
/// raw grammar failures from the line parser.
#[derive(Error, Debug, PartialEq)]
pub enum AssemblyError {
    #[error("Syntax Error: {0}")]
    Syntax(#[from] pest::error::Error<crate::parser::Rule>),

    #[error("Parse Error on line {line}: {message}\n  {text}")]
    ParseError {
        line: usize,
        text: String,
        message: String,
    },

    #[error("Encoding Error on line {line}: {message}\n  {text}")]
    EncodingError {
        line: usize,
        text: String,
        message: String,
    },

    #[error("Symbol Error on line {line}: {message}\n  {text}")]
    SymbolError {
        line: usize,
        text: String,
        message: String,
    },
}

impl AssemblyError {
    pub fn parse(line: usize, text: impl Into<String>, message: impl Into<String>) -> Self {
        AssemblyError::ParseError {
            line,
            text: text.into(),
            message: message.into(),
        }
    }

    pub fn encoding(line: usize, text: impl Into<String>, message: impl Into<String>) -> Self {
        AssemblyError::EncodingError {
            line,
            text: text.into(),
            message: message.into(),
        }
    }

    pub fn symbol(line: usize, text: impl Into<String>, message: impl Into<String>) -> Self {
        AssemblyError::SymbolError {
            line,
            text: text.into(),
            message: message.into(),
        }
    }
}
