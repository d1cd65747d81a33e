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

//! Source-reading abstraction: a trait so tests can feed in-memory source
//! instead of touching the filesystem.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait FileReader {
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Production reader: reads straight from disk.
pub struct FsFileReader;

impl FileReader for FsFileReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }
}

/// In-memory reader for tests.
#[derive(Default)]
pub struct MockFileReader {
    files: HashMap<PathBuf, String>,
}

impl MockFileReader {
    pub fn add_file(&mut self, path: &str, content: &str) {
        self.files.insert(PathBuf::from(path), content.to_string());
    }
}

impl FileReader for MockFileReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("mock file not found: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_reader_returns_added_file() {
        let mut reader = MockFileReader::default();
        reader.add_file("prog.s", "nop\n");
        assert_eq!(reader.read_to_string(Path::new("prog.s")).unwrap(), "nop\n");
    }

    #[test]
    fn mock_reader_errors_on_missing_file() {
        let reader = MockFileReader::default();
        assert!(reader.read_to_string(Path::new("missing.s")).is_err());
    }
}
