//! Source positions, locations and byte ranges.
//!
//! These are the values the external parser attaches to every node
//! (`loc` and `range`) and that diagnostics point back to.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A byte offset into the source text.
pub type TextPos = u32;

/// A line/column position. Lines are 1-based, columns 0-based, matching
/// what ESTree parsers emit with `loc: true`.
///
/// Positions order by line first, then column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The span of a node in its source file.
///
/// `source` is shared between every location of a translation unit, so
/// cloning a location never copies the file name.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    pub source: Option<Arc<str>>,
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn new(source: Option<Arc<str>>, start: Position, end: Position) -> Self {
        Self { source, start, end }
    }

    /// The file name, if the location has one.
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl PartialOrd for SourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source
            .cmp(&other.source)
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Some(ref source) => write!(f, "{} [{}-{}]", source, self.start, self.end),
            None => write!(f, "[{}-{}]", self.start, self.end),
        }
    }
}

/// A byte range with start and end offsets, as in ESTree's `range: [start, end]`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextRange {
    /// The byte offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The byte offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    /// Create a new text range.
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let a = Position::new(1, 10);
        let b = Position::new(2, 0);
        let c = Position::new(2, 3);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.max(c), c);
    }

    #[test]
    fn test_location_display() {
        let loc = SourceLocation::new(
            Some(Arc::from("main.js")),
            Position::new(3, 4),
            Position::new(3, 9),
        );
        assert_eq!(loc.to_string(), "main.js [3:4-3:9]");
        assert_eq!(loc.source_name(), Some("main.js"));

        let anonymous = SourceLocation::new(None, Position::new(1, 0), Position::new(1, 1));
        assert_eq!(anonymous.to_string(), "[1:0-1:1]");
    }

    #[test]
    fn test_location_ordering() {
        let file = |name: &str, line| SourceLocation::new(Some(Arc::from(name)), Position::new(line, 0), Position::new(line, 5));
        assert!(file("a.js", 9) < file("b.js", 1));
        assert!(file("a.js", 1) < file("a.js", 2));
        assert_eq!(format!("{:?}", TextRange::new(5, 15)), "5..15");
    }
}
