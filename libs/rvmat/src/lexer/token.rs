//! # Tokens
//!
//! Token types for the RVMAT lexer.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::lexer::{Token, TokenKind};
//! use rvmat::Position;
//!
//! let token = Token::new(TokenKind::Number, Position::new(1, 1), "10".to_string());
//! assert_eq!(token.kind, TokenKind::Number);
//! ```

use crate::span::Position;

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
///
/// For strings, `text` holds the unquoted, unescaped contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Position of the token's first character.
    pub position: Position,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Token type
    /// - `position`: Source location of the first character
    /// - `text`: Token text
    pub fn new(kind: TokenKind, position: Position, text: String) -> Self {
        Self {
            kind,
            position,
            text,
        }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Text used to describe this token in error messages.
    pub fn describe(&self) -> &str {
        if self.text.is_empty() {
            self.kind.display()
        } else {
            &self.text
        }
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Identifier like `texture` or `$STR_x`; also digit-led words like `1specular`
    Identifier,
    /// Number literal like `10`, `-0.5` or `1e+06`
    Number,
    /// Double-quoted string literal
    String,

    // Keywords
    /// `class` keyword (matched case-insensitively unless disabled)
    Class,

    // Delimiters
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `=`
    Eq,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `,`
    Comma,

    // Meta
    /// End of file
    Eof,
}

impl TokenKind {
    /// Get display string for error messages.
    pub const fn display(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::Class => "class",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Eq => "=",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Eof => "end of file",
        }
    }

    /// Check if this token can carry a scalar value.
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Identifier | Self::Number | Self::String)
    }
}

// =============================================================================
// TESTS
// =============================================================================
