//! # Errors
//!
//! Error types for reading and writing RVMAT materials.
//!
//! Every failure is terminal for the call that produced it: there is no
//! partially recovered document. Lexer and parser errors carry the
//! [`Position`] of the offending character or token.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::{parse, Error};
//!
//! match parse(b"class Stage1 {") {
//!     Err(Error::Parse(e)) => println!("{} at line {}", e.kind, e.position.line),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use crate::span::Position;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// =============================================================================
// ERROR
// =============================================================================

/// Errors returned by the parse and format entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// The input contains a zero byte in its leading window and is treated
    /// as a binary (rapified) material.
    #[error("binary rvmat: input is not a text material")]
    BinaryInput,

    /// The lexer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The token stream does not match the material grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading or writing at the I/O boundary failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Position of the failure, for lexer and parser errors.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Lex(e) => Some(e.position),
            Self::Parse(e) => Some(e.position),
            Self::BinaryInput | Self::Io(_) => None,
        }
    }
}

// =============================================================================
// LEX ERROR
// =============================================================================

/// A lexer failure with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lex error at {position}: {kind}")]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Where the lexer was when it failed.
    pub position: Position,
}

impl LexError {
    /// Create a new lex error.
    pub const fn new(kind: LexErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// Kinds of lexer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// End of input reached inside a string literal.
    #[error("unterminated string")]
    UnterminatedString,
}

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parser failure with location information.
///
/// ## Example
///
/// ```rust
/// use rvmat::{ParseError, ParseErrorKind, Position};
///
/// let error = ParseError::unexpected_token("}", ";", Position::new(4, 2));
/// assert_eq!(error.to_string(), "parse error at 4:2: expected ;, found '}'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at {position}: {kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Position of the offending token.
    pub position: Position,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Create an unexpected token error.
    ///
    /// ## Parameters
    ///
    /// - `found`: Text of the token that was found
    /// - `expected`: Description of the expected construct
    /// - `position`: Position of the found token
    pub fn unexpected_token(found: &str, expected: &str, position: Position) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            },
            position,
        )
    }

    /// Create an invalid number error.
    pub fn invalid_number(text: &str, position: Position) -> Self {
        Self::new(
            ParseErrorKind::InvalidNumber {
                text: text.to_string(),
            },
            position,
        )
    }
}

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Found a token where a different construct was required.
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken {
        /// Token that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
    },

    /// A numeric context received something that is not a number.
    #[error("invalid number '{text}'")]
    InvalidNumber {
        /// The offending text.
        text: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_display() {
        let error = ParseError::unexpected_token(")", "identifier", Position::new(2, 5));
        let msg = error.to_string();
        assert!(msg.starts_with("parse error at 2:5"));
        assert!(msg.contains("expected identifier"));
        assert!(msg.contains("found ')'"));
    }

    #[test]
    fn test_lex_error_display() {
        let error = LexError::new(LexErrorKind::UnexpectedCharacter('@'), Position::new(1, 9));
        assert_eq!(error.to_string(), "lex error at 1:9: unexpected character '@'");
    }

    #[test]
    fn test_error_position() {
        let error: Error = ParseError::invalid_number("abc", Position::new(7, 3)).into();
        assert_eq!(error.position(), Some(Position::new(7, 3)));
        assert_eq!(Error::BinaryInput.position(), None);
    }

    #[test]
    fn test_lex_error_is_transparent() {
        let error: Error = LexError::new(LexErrorKind::UnterminatedString, Position::new(3, 1)).into();
        assert_eq!(error.to_string(), "lex error at 3:1: unterminated string");
    }
}
