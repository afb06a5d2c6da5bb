//! # RVMAT Lexer
//!
//! Tokenizes RVMAT material text.
//! Single forward pass: tokens are produced on demand and the lexer cannot
//! be rewound.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::lexer::{Lexer, TokenKind};
//! use rvmat::ParseOptions;
//!
//! let tokens = Lexer::new("diffuse[]={1,1,1,1};", &ParseOptions::default())
//!     .tokenize()
//!     .unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::error::{LexError, LexErrorKind};
use crate::options::ParseOptions;
use crate::span::Position;
use config::constants::BYTE_ORDER_MARK;

// =============================================================================
// LEXER
// =============================================================================

/// RVMAT lexer.
///
/// Converts source text into a stream of tokens. Also usable as an
/// [`Iterator`] that ends after yielding the EOF token or the first error.
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Skip `//` and `/* */` comments.
    allow_comments: bool,
    /// Match the `class` keyword regardless of case.
    case_insensitive: bool,
    /// Set once EOF or an error has been yielded by the iterator.
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    ///
    /// A leading byte-order mark is skipped.
    ///
    /// ## Parameters
    ///
    /// - `source`: Material text
    /// - `options`: Parse options controlling comment and keyword tolerance
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);
        Self {
            cursor: Cursor::new(source),
            allow_comments: options.allow_comments,
            case_insensitive: options.case_insensitive,
            done: false,
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens ending with the EOF token, or the first lex error.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let eof = token.is_eof();
            tokens.push(token);
            if eof {
                return Ok(tokens);
            }
        }
    }

    /// Produce the next token.
    ///
    /// Repeated calls at end of input keep returning EOF tokens.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        let start = self.cursor.position();
        let c = match self.cursor.peek() {
            Some(c) => c,
            None => return Ok(Token::new(TokenKind::Eof, start, String::new())),
        };

        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '=' => TokenKind::Eq,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '"' => return self.scan_string(start),
            c if is_ident_start(c) => return Ok(self.scan_identifier(start)),
            c if is_number_start(c) => return Ok(self.scan_word(start)),
            c => {
                return Err(LexError::new(LexErrorKind::UnexpectedCharacter(c), start));
            }
        };

        self.cursor.advance();
        Ok(Token::new(kind, start, c.to_string()))
    }

    /// Skip whitespace and, unless disabled, comments.
    ///
    /// An unterminated block comment runs to end of input.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor.advance_while(char::is_whitespace);

            if !self.allow_comments {
                return;
            }
            if self.cursor.eat_pair('/', '/') {
                self.cursor.skip_line();
            } else if self.cursor.eat_pair('/', '*') {
                self.cursor.skip_block_comment();
            } else {
                return;
            }
        }
    }

    /// Scan a string literal.
    ///
    /// `""` is an escaped quote, and `\\` and `\"` are escapes; every other
    /// character (newlines included) is copied verbatim.
    fn scan_string(&mut self, start: Position) -> Result<Token, LexError> {
        self.cursor.advance(); // Opening quote
        let mut text = String::new();

        loop {
            let c = match self.cursor.peek() {
                Some(c) => c,
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedString,
                        self.cursor.position(),
                    ));
                }
            };

            if self.cursor.eat_pair('"', '"') {
                text.push('"');
                continue;
            }

            match c {
                '"' => {
                    self.cursor.advance(); // Closing quote
                    break;
                }
                '\\' if matches!(self.cursor.peek_next(), Some('\\' | '"')) => {
                    self.cursor.advance();
                    if let Some(escaped) = self.cursor.advance() {
                        text.push(escaped);
                    }
                }
                c => {
                    self.cursor.advance();
                    text.push(c);
                }
            }
        }

        Ok(Token::new(TokenKind::String, start, text))
    }

    /// Scan an identifier or the `class` keyword.
    fn scan_identifier(&mut self, start: Position) -> Token {
        let text = self.cursor.advance_while(is_ident_part);
        let is_class = if self.case_insensitive {
            text.eq_ignore_ascii_case("class")
        } else {
            text == "class"
        };
        let kind = if is_class {
            TokenKind::Class
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, start, text.to_string())
    }

    /// Scan a word starting with a digit or `-`.
    ///
    /// Real files contain digit-led identifiers such as `1specular`, so the
    /// whole word is read first and only becomes a number if it parses as one.
    fn scan_word(&mut self, start: Position) -> Token {
        let text = self.cursor.advance_while(is_word_part);
        let kind = if is_valid_number(text) {
            TokenKind::Number
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, start, text.to_string())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_token();
        self.done = match &item {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(item)
    }
}

// =============================================================================
// CHARACTER CLASSES
// =============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

fn is_word_part(c: char) -> bool {
    is_ident_part(c) || matches!(c, '.' | '+' | '-')
}

/// Check that every character is a numeric-literal character and the whole
/// text parses as a float.
pub(crate) fn is_valid_number(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        && text.parse::<f64>().is_ok()
}

// =============================================================================
// TESTS
// =============================================================================
