/// Position tracking for syntax nodes
///
/// Stores the source location (line/column) of syntax nodes for IDE features
/// like completion, hover and go-to-definition.
/// A span representing a range in source code (0-indexed for LSP compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (0-indexed)
///
/// Ordering is by line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span.
    ///
    /// Both ends are inclusive: a cursor placed right after the last
    /// character of a name is still "on" that name.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// True when this span ends strictly before `position`.
    pub fn ends_before(&self, position: Position) -> bool {
        self.end < position
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position `columns` characters further along the same line.
    pub fn offset(self, columns: u32) -> Self {
        Self {
            line: self.line,
            column: self.column + columns,
        }
    }
}
