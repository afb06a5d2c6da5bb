//! # Source Position
//!
//! Line/column locations attached to tokens and errors for diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::Position;
//!
//! let pos = Position::new(3, 7);
//! assert_eq!(pos.to_string(), "3:7");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the source text.
///
/// Lines are 1-based. Columns are the 1-based column of a character on its
/// line; the column counter resets at each newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
}

impl Position {
    /// Create a position from a line and column.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(1, 0).to_string(), "1:0");
        assert_eq!(Position::new(12, 34).to_string(), "12:34");
    }

    #[test]
    fn test_position_default() {
        let pos = Position::default();
        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);
    }
}
