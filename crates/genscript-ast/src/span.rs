// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

/// A span in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-length span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inclusive on both ends, so a cursor sitting right after a name still hits it.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Smallest span covering both.
    pub fn to(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Precomputed line-start offsets for O(log n) byte-offset → line:col lookup.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. line_starts[0] is always 0.
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map by scanning source for newlines. O(n).
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        LineMap { line_starts }
    }

    /// Convert byte offset to (line, col), both 1-based. O(log n).
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset as u32;
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line = (line_idx + 1) as u32;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Get the source text of a 1-based line number. O(1).
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| (s as usize).saturating_sub(1)) // exclude the \n
            .unwrap_or(source.len());
        source.get(start..end)
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}
