//! Generic grammar: class and assignment nodes, literal values and the
//! scalar/array readers used by known fields.

use super::{unexpected, Parser};
use crate::ast::{AssignNode, ClassNode, Node, Value};
use crate::error::{ParseError, Result};
use crate::lexer::{Token, TokenKind};

impl Parser<'_> {
    // =========================================================================
    // HEADERS
    // =========================================================================

    /// Parse `'class' IDENT (':' IDENT)?`.
    ///
    /// ## Returns
    ///
    /// The class name and base name (empty when absent).
    pub(super) fn parse_class_header(&mut self) -> Result<(String, String)> {
        self.expect(TokenKind::Class)?;
        let name = self.expect(TokenKind::Identifier)?.text;
        let base = if self.eat(TokenKind::Colon)? {
            self.expect(TokenKind::Identifier)?.text
        } else {
            String::new()
        };
        Ok((name, base))
    }

    /// Parse `IDENT ('[' ']')? '='`.
    ///
    /// ## Returns
    ///
    /// The field name and whether the array suffix was present.
    pub(super) fn parse_assign_head(&mut self) -> Result<(String, bool)> {
        let name = self.expect(TokenKind::Identifier)?.text;
        let is_array = self.eat(TokenKind::LBracket)?;
        if is_array {
            self.expect(TokenKind::RBracket)?;
        }
        self.expect(TokenKind::Eq)?;
        Ok((name, is_array))
    }

    // =========================================================================
    // GENERIC NODES
    // =========================================================================

    /// Parse `'{' node* '}' ';'` into a class node.
    pub(super) fn parse_class_body(&mut self, name: String, base: String) -> Result<ClassNode> {
        self.expect(TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.eat(TokenKind::RBrace)? {
            body.push(self.parse_node()?);
        }
        self.expect_semicolon()?;
        Ok(ClassNode::new(name, base, body))
    }

    /// Parse a class or assignment without any field recognition.
    fn parse_node(&mut self) -> Result<Node> {
        if self.peek_kind()? == TokenKind::Class {
            let (name, base) = self.parse_class_header()?;
            return Ok(Node::Class(self.parse_class_body(name, base)?));
        }

        let (name, is_array) = self.parse_assign_head()?;
        let value = self.parse_value()?;
        self.expect_semicolon()?;
        Ok(Node::Assign(AssignNode::new(name, is_array, value)))
    }

    // =========================================================================
    // VALUES
    // =========================================================================

    /// Parse `NUMBER | STRING | IDENT | '{' values '}'`.
    pub(super) fn parse_value(&mut self) -> Result<Value> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Number => match token.text.parse() {
                Ok(n) => Ok(Value::Number(n)),
                Err(_) => Err(ParseError::invalid_number(&token.text, token.position).into()),
            },
            TokenKind::String => Ok(Value::String(token.text)),
            TokenKind::Identifier => Ok(Value::Ident(token.text)),
            TokenKind::LBrace => self.parse_array().map(Value::Array),
            _ => Err(unexpected(&token, "value")),
        }
    }

    /// Parse array elements after the opening brace. A trailing comma is
    /// accepted.
    fn parse_array(&mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        while !self.eat(TokenKind::RBrace)? {
            items.push(self.parse_value()?);
            self.array_separator()?;
        }
        Ok(items)
    }

    /// Parse `'{' (number (',' number)*)? '}'` with numeric coercion.
    ///
    /// Strings and identifiers holding a number (optionally with trailing
    /// dots) are accepted. Anything else becomes `0` when numbers are
    /// relaxed, and is an error otherwise.
    pub(super) fn parse_number_array(&mut self) -> Result<Vec<f64>> {
        self.expect(TokenKind::LBrace)?;
        let mut values = Vec::new();
        while !self.eat(TokenKind::RBrace)? {
            let token = self.next()?;
            let value = match number_from_token(&token) {
                Some(v) => v,
                None if self.options.relaxed_numbers => 0.0,
                None => return Err(ParseError::invalid_number(token.describe(), token.position).into()),
            };
            values.push(value);
            self.array_separator()?;
        }
        Ok(values)
    }

    /// After an array element: consume a comma, or leave a closing brace for
    /// the loop condition.
    fn array_separator(&mut self) -> Result<()> {
        if self.eat(TokenKind::Comma)? {
            return Ok(());
        }
        let token = self.peek()?;
        if token.kind == TokenKind::RBrace {
            return Ok(());
        }
        Err(unexpected(token, "',' or '}'"))
    }

    /// Parse a scalar number token.
    pub(super) fn parse_number_value(&mut self) -> Result<f64> {
        let token = self.expect(TokenKind::Number)?;
        number_from_token(&token)
            .ok_or_else(|| ParseError::invalid_number(&token.text, token.position).into())
    }

    /// Parse a string or bare identifier.
    pub(super) fn parse_string_value(&mut self) -> Result<String> {
        let token = self.next()?;
        match token.kind {
            TokenKind::String | TokenKind::Identifier => Ok(token.text),
            _ => Err(unexpected(&token, "string")),
        }
    }

    /// Parse a string, identifier or number as text.
    ///
    /// With relaxed numbers any token is accepted.
    pub(super) fn parse_string_or_number_value(&mut self) -> Result<String> {
        let token = self.next()?;
        if token.kind.is_scalar() || self.options.relaxed_numbers {
            return Ok(token.text);
        }
        Err(unexpected(&token, "string"))
    }
}

/// Numeric value of a token in a numeric context.
fn number_from_token(token: &Token) -> Option<f64> {
    match token.kind {
        TokenKind::Number => token.text.parse().ok(),
        TokenKind::String | TokenKind::Identifier => {
            let text = token.text.trim().trim_end_matches('.');
            if text.is_empty() {
                return None;
            }
            text.parse().ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, Position::new(1, 1), text.to_string())
    }

    #[test]
    fn test_number_from_token() {
        assert_eq!(number_from_token(&token(TokenKind::Number, "1e+06")), Some(1e6));
        assert_eq!(number_from_token(&token(TokenKind::String, "2.")), Some(2.0));
        assert_eq!(number_from_token(&token(TokenKind::Identifier, "3..")), Some(3.0));
        assert_eq!(number_from_token(&token(TokenKind::String, "1.25.1")), None);
        assert_eq!(number_from_token(&token(TokenKind::String, "...")), None);
        assert_eq!(number_from_token(&token(TokenKind::Comma, ",")), None);
    }
}
