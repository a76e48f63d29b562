//! Rewrite buffers: accumulate edits against an immutable original text.
//!
//! Edit positions arrive in *original* coordinates, computed by the front
//! end before any edit existed. Each buffer keeps an ordered log of applied
//! splices and resolves the cumulative shift at render time, so a later
//! edit never needs its position rewritten in place. An edit that lands
//! inside an already-spliced region fails with a conflict; the first
//! applied edit wins.

use std::collections::HashMap;

use thiserror::Error;

use crate::diagnostic::{Hint, Location, Range};
use crate::source::{FileId, SourceMap};

/// Failure applying a single edit operation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RewriteError {
    /// The edit's target overlaps a previously applied splice.
    #[error("edit at byte {0} conflicts with a previously applied edit")]
    Conflict(usize),
    /// The edit's target lies outside the original text.
    #[error("byte {offset} is outside the source text ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },
}

/// One applied edit, recorded in original-text coordinates.
/// Insertions are zero-width (`start == end`).
#[derive(Debug, Clone)]
struct Splice {
    start: usize,
    end: usize,
    text: Vec<u8>,
}

impl Splice {
    /// Strict overlap with `[start, end)`; touching at a boundary is fine.
    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

/// Mutable text representation derived from one file's original content.
pub struct RewriteBuffer {
    original: Vec<u8>,
    splices: Vec<Splice>,
}

impl RewriteBuffer {
    pub fn new(original: &[u8]) -> Self {
        Self {
            original: original.to_vec(),
            splices: Vec::new(),
        }
    }

    /// Size of `[start, end)` in the original text, or `None` when the
    /// range cannot be materialized contiguously. Prior edits never
    /// affect the answer.
    pub fn range_size(&self, start: usize, end: usize) -> Option<usize> {
        if start <= end && end <= self.original.len() {
            Some(end - start)
        } else {
            None
        }
    }

    /// True iff inserting at `offset` is structurally legal: within the
    /// original text and not strictly inside an excised region.
    pub fn is_rewritable(&self, offset: usize) -> bool {
        offset <= self.original.len()
            && !self
                .splices
                .iter()
                .any(|s| s.start < offset && offset < s.end)
    }

    fn try_splice(&mut self, start: usize, end: usize, text: Vec<u8>) -> Result<(), RewriteError> {
        let len = self.original.len();
        if start > end || end > len {
            return Err(RewriteError::OutOfBounds { offset: end, len });
        }
        if self.splices.iter().any(|s| s.overlaps(start, end)) {
            return Err(RewriteError::Conflict(start));
        }
        self.splices.push(Splice { start, end, text });
        Ok(())
    }

    /// Splices `text` immediately before the original position `offset`.
    pub fn insert_before(&mut self, offset: usize, text: &[u8]) -> Result<(), RewriteError> {
        self.try_splice(offset, offset, text.to_vec())
    }

    /// Excises `size` bytes of original text starting at `start`.
    pub fn remove_text(&mut self, start: usize, size: usize) -> Result<(), RewriteError> {
        let end = start.checked_add(size).ok_or(RewriteError::OutOfBounds {
            offset: usize::MAX,
            len: self.original.len(),
        })?;
        self.try_splice(start, end, Vec::new())
    }

    /// Removes `size` bytes at `start` and inserts `text` in their place,
    /// as one operation.
    pub fn replace_text(
        &mut self,
        start: usize,
        size: usize,
        text: &[u8],
    ) -> Result<(), RewriteError> {
        let end = start.checked_add(size).ok_or(RewriteError::OutOfBounds {
            offset: usize::MAX,
            len: self.original.len(),
        })?;
        self.try_splice(start, end, text.to_vec())
    }

    /// Materializes the current text: a single scan over the original
    /// bytes with every applied splice composed in.
    ///
    /// Splices are ordered by start offset; at equal offsets, insertions
    /// land before a removal starting there, and insertions among
    /// themselves keep application order.
    pub fn render(&self) -> Vec<u8> {
        let mut ordered: Vec<&Splice> = self.splices.iter().collect();
        ordered.sort_by_key(|s| (s.start, s.start != s.end));

        let mut result = Vec::with_capacity(self.original.len());
        let mut cursor = 0;
        for s in ordered {
            if s.start > cursor {
                result.extend_from_slice(&self.original[cursor..s.start]);
            }
            result.extend_from_slice(&s.text);
            cursor = s.end;
        }
        if cursor < self.original.len() {
            result.extend_from_slice(&self.original[cursor..]);
        }
        result
    }

    /// True iff at least one splice was successfully applied.
    pub fn has_edits(&self) -> bool {
        !self.splices.is_empty()
    }
}

/// Routes edit operations to per-file rewrite buffers, creating each
/// buffer the first time its file is touched.
pub struct Rewriter<'src> {
    sources: &'src SourceMap,
    buffers: HashMap<FileId, RewriteBuffer>,
}

impl<'src> Rewriter<'src> {
    pub fn new(sources: &'src SourceMap) -> Self {
        Self {
            sources,
            buffers: HashMap::new(),
        }
    }

    pub fn sources(&self) -> &'src SourceMap {
        self.sources
    }

    /// Size of `range` in the original text, or `None` when undefined:
    /// the ends belong to different files, the range is inverted, or it
    /// runs past the end of the file.
    pub fn range_size(&self, range: Range) -> Option<usize> {
        if range.begin.file != range.end.file {
            return None;
        }
        let len = self.sources.file(range.begin.file).len();
        let (start, end) = (range.begin.offset, range.end.offset);
        if start <= end && end <= len { Some(end - start) } else { None }
    }

    /// True iff inserting at `loc` is structurally legal in the current
    /// buffer state.
    pub fn is_rewritable(&self, loc: Location) -> bool {
        match self.buffers.get(&loc.file) {
            Some(buf) => buf.is_rewritable(loc.offset),
            None => loc.offset <= self.sources.file(loc.file).len(),
        }
    }

    fn buffer_mut(&mut self, file: FileId) -> &mut RewriteBuffer {
        let sources = self.sources;
        self.buffers
            .entry(file)
            .or_insert_with(|| RewriteBuffer::new(sources.file(file).as_bytes()))
    }

    pub fn insert_before(&mut self, loc: Location, text: &str) -> Result<(), RewriteError> {
        self.buffer_mut(loc.file).insert_before(loc.offset, text.as_bytes())
    }

    pub fn remove_text(&mut self, begin: Location, size: usize) -> Result<(), RewriteError> {
        self.buffer_mut(begin.file).remove_text(begin.offset, size)
    }

    pub fn replace_text(
        &mut self,
        begin: Location,
        size: usize,
        text: &str,
    ) -> Result<(), RewriteError> {
        self.buffer_mut(begin.file)
            .replace_text(begin.offset, size, text.as_bytes())
    }

    /// The rewrite buffer for `file`, if any edit has touched it.
    pub fn buffer_for(&self, file: FileId) -> Option<&RewriteBuffer> {
        self.buffers.get(&file)
    }

    /// Structural well-formedness of a hint against the current state.
    ///
    /// A pass does not guarantee application succeeds: an edit applied
    /// after this check (from an earlier hint of the same diagnostic, or
    /// an earlier diagnostic) can still fail the splice with a conflict.
    pub fn can_apply(&self, hint: &Hint) -> bool {
        if let Some(range) = hint.range {
            if self.range_size(range).is_none() {
                return false;
            }
        }
        if let Some(at) = hint.at {
            if !self.is_rewritable(at) {
                return false;
            }
        }
        hint.range.is_some() || hint.at.is_some()
    }
}
