//! # Character Cursor
//!
//! Forward-only view over the remaining material text, with line/column
//! bookkeeping and the two-character lookahead the lexer needs for comments
//! and doubled quotes.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("// note\nx");
//! assert!(cursor.eat_pair('/', '/'));
//! cursor.skip_line();
//! assert_eq!(cursor.advance(), Some('\n'));
//! assert_eq!(cursor.peek(), Some('x'));
//! assert_eq!(cursor.position().line, 2);
//! ```

use crate::span::Position;

/// Cursor over material text.
///
/// Columns count consumed characters, so the position reported for the
/// next character is 1-based.
pub struct Cursor<'a> {
    /// Text not yet consumed.
    rest: &'a str,
    line: usize,
    /// Characters consumed on the current line.
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            rest: source,
            line: 1,
            column: 0,
        }
    }

    /// Position of the character [`peek`](Self::peek) would return.
    ///
    /// ```rust
    /// use rvmat::lexer::Cursor;
    ///
    /// let mut cursor = Cursor::new("ab");
    /// cursor.advance();
    /// assert_eq!((cursor.position().line, cursor.position().column), (1, 2));
    /// ```
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column + 1)
    }

    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// The character after [`peek`](Self::peek).
    pub fn peek_next(&self) -> Option<char> {
        self.rest.chars().nth(1)
    }

    /// Consume one character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `first` followed by `second`, or nothing.
    pub fn eat_pair(&mut self, first: char, second: char) -> bool {
        if self.peek() != Some(first) || self.peek_next() != Some(second) {
            return false;
        }
        self.advance();
        self.advance();
        true
    }

    /// Consume characters while `predicate` holds and return them.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.rest;
        while self.peek().map_or(false, &predicate) {
            self.advance();
        }
        &start[..start.len() - self.rest.len()]
    }

    /// Consume up to, not including, the next newline.
    pub fn skip_line(&mut self) {
        self.advance_while(|c| c != '\n');
    }

    /// Consume through the next `*/`, or to end of input when there is none.
    pub fn skip_block_comment(&mut self) {
        while !self.is_eof() && !self.eat_pair('*', '/') {
            self.advance();
        }
    }
}
