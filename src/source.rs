use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// One source file's original, immutable text.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    content: Vec<u8>,
    /// Byte offsets where each line starts (0-indexed into content)
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::from_vec(path.to_path_buf(), content))
    }

    /// Create a SourceFile from a string, using the given path for display
    /// purposes (e.g. the stdin sentinel).
    pub fn from_string(path: PathBuf, content: String) -> Self {
        Self::from_vec(path, content.into_bytes())
    }

    pub fn from_vec(path: PathBuf, content: Vec<u8>) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            path,
            content,
            line_starts,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Convert a byte offset into a (1-indexed line, 0-indexed column) pair.
    /// Column is a character offset (UTF-8 codepoint count) within the line.
    pub fn offset_to_line_col(&self, byte_offset: usize) -> (usize, usize) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let end = byte_offset.min(self.content.len());
        let line_bytes = &self.content[self.line_starts[line_idx]..end];
        // Count bytes that are NOT UTF-8 continuation bytes (0x80..0xBF),
        // which equals the number of character starts even for invalid UTF-8.
        let col = line_bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count();
        (line_idx + 1, col)
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}

/// Compute byte offsets where each line starts. Always contains 0 for the
/// first line; a trailing newline does not open a new line.
fn compute_line_starts(content: &[u8]) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, &b) in content.iter().enumerate() {
        if b == b'\n' && i + 1 < content.len() {
            starts.push(i + 1);
        }
    }
    starts
}

/// Identifies a file registered in a [`SourceMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);

/// Registry of all files a run may touch. The first file registered is the
/// main file, the only one ultimately materialized.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file: SourceFile) -> FileId {
        self.files.push(file);
        FileId(self.files.len() - 1)
    }

    /// FileIds are only handed out by `add_file`, so lookup cannot miss.
    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0]
    }

    pub fn main_file(&self) -> Option<FileId> {
        if self.files.is_empty() {
            None
        } else {
            Some(FileId(0))
        }
    }
}
