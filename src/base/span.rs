//! Source text positions and ranges.

use std::fmt;

// Re-export from text-size; the syntax layer measures everything in bytes.
pub use text_size::TextRange;
pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
/// Columns count UTF-8 bytes, not characters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// Get 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// A start/end pair of [`LineCol`] positions.
///
/// This is the position form stored on symbols and handed to the editor
/// layer; the syntax layer itself works in [`TextRange`] byte offsets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourceRange {
    pub start: LineCol,
    pub end: LineCol,
}

impl SourceRange {
    /// Create a new range from start and end positions.
    #[inline]
    pub const fn new(start: LineCol, end: LineCol) -> Self {
        Self { start, end }
    }

    /// Check whether a position falls inside this range (inclusive ends).
    pub fn contains(&self, pos: LineCol) -> bool {
        let after_start = pos.line > self.start.line
            || (pos.line == self.start.line && pos.col >= self.start.col);
        let before_end =
            pos.line < self.end.line || (pos.line == self.end.line && pos.col <= self.end.col);
        after_start && before_end
    }
}

impl fmt::Debug for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

/// Index for converting between byte offsets and line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    /// Total length of the indexed text
    len: TextSize,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end of the text are clamped to it.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let line_start = self.line_starts[line];
        let col = offset - line_start;

        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a byte range to a [`SourceRange`].
    pub fn source_range(&self, range: TextRange) -> SourceRange {
        SourceRange::new(self.line_col(range.start()), self.line_col(range.end()))
    }

    /// Convert a line/column position to a byte offset.
    ///
    /// Returns `None` for a line past the end of the text. A column past
    /// the end of its line is clamped to the line end, matching how
    /// editors report a cursor at the end of a line.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line = line_col.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.len);
        Some((line_start + TextSize::from(line_col.col)).min(line_end))
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
