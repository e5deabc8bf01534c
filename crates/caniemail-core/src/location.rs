//! Source locations.
//!
//! [`LocationIndex`] converts byte offsets of one source string into 1-based
//! line/column points. [`Position::adjust`] remaps positions computed inside a
//! re-parsed fragment (a `<style>` body, a `style` attribute) into the
//! coordinate space of the enclosing document.

use std::cmp::Ordering;

use serde::Serialize;

/// A 1-based line/column point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    pub line: u32,
    pub column: u32,
}

impl Point {
    /// Create a new point.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Remap a fragment point into the enclosing document.
    ///
    /// Only a point on the fragment's first line shares its line with the
    /// fragment start, so only that line inherits the column offset.
    pub fn adjust(self, offset: Point) -> Self {
        Self {
            line: self.line + offset.line - 1,
            column: if self.line == 1 {
                self.column + offset.column - 1
            } else {
                self.column
            },
        }
    }
}

/// A span in some document's text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub start: Point,
    pub end: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Position {
    /// Create a position without a source name.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            source: None,
        }
    }

    /// Remap this position by a fragment offset.
    ///
    /// Start and end are adjusted independently; `source` is preserved.
    pub fn adjust(&self, offset: Option<Point>) -> Self {
        match offset {
            None => self.clone(),
            Some(offset) => Self {
                start: self.start.adjust(offset),
                end: self.end.adjust(offset),
                source: self.source.clone(),
            },
        }
    }
}

/// Adjust an optional position by an optional offset.
pub fn adjust_position(position: Option<&Position>, offset: Option<Point>) -> Option<Position> {
    position.map(|position| position.adjust(offset))
}

/// Offset to line/column lookup table for one source string.
#[derive(Debug, Clone)]
pub struct LocationIndex {
    /// `[start, end)` byte range of each line, line terminator included.
    lines: Vec<(usize, usize)>,
    /// Source length, counting the logically appended terminator.
    length: usize,
}

impl LocationIndex {
    /// Build the index for a source string.
    ///
    /// Lines end at `\n`; a `\r` before it stays part of the line, and a
    /// lone `\r` is ordinary text.
    pub fn new(source: &str) -> Self {
        let mut lines = vec![];
        let mut start = 0;

        for (i, _) in source.match_indices('\n') {
            lines.push((start, i + 1));
            start = i + 1;
        }

        // A source not ending in '\n' gets one logically appended.
        let length = if source.ends_with('\n') {
            source.len()
        } else {
            lines.push((start, source.len() + 1));
            source.len() + 1
        };

        Self { lines, length }
    }

    /// Convert a byte offset into a point.
    ///
    /// Returns `None` for offsets outside `[0, length)`.
    pub fn locate(&self, offset: usize) -> Option<Point> {
        if offset >= self.length {
            return None;
        }

        let line = self
            .lines
            .binary_search_by(|&(start, end)| {
                if offset < start {
                    Ordering::Greater
                } else if offset >= end {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .ok()?;

        let (start, _) = self.lines[line];
        Some(Point {
            line: u32::try_from(line + 1).ok()?,
            column: u32::try_from(offset - start + 1).ok()?,
        })
    }

    /// Convert a pair of byte offsets into a position.
    ///
    /// Returns `None` if either endpoint fails to resolve.
    pub fn span(&self, start: usize, end: usize) -> Option<Position> {
        Some(Position::new(self.locate(start)?, self.locate(end)?))
    }

    /// Convert a point back into a byte offset.
    pub fn offset_of(&self, point: Point) -> Option<usize> {
        let line = usize::try_from(point.line).ok()?.checked_sub(1)?;
        let column = usize::try_from(point.column).ok()?.checked_sub(1)?;
        let &(start, end) = self.lines.get(line)?;

        let offset = start + column;
        (offset < end).then_some(offset)
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the indexed length, including an appended terminator.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check whether the index covers no text at all.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
