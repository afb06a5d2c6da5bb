//! # RVMAT Parser
//!
//! Recursive descent parser with one token of lookahead.
//! Produces a typed [`Material`]; anything without a specialized shape is
//! kept as generic [`Node`](crate::ast::Node)s in the owning scope's extras.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::parser::Parser;
//! use rvmat::ParseOptions;
//!
//! let material = Parser::new("specularPower=70;", &ParseOptions::default())
//!     .parse()
//!     .unwrap();
//! assert_eq!(material.specular_power, Some(70.0));
//! ```

mod material;
mod values;

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::material::Material;
use crate::options::ParseOptions;
use config::constants::BINARY_SNIFF_LEN;

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for material text.
///
/// Tokens are pulled from the lexer on demand; the first lex or parse error
/// aborts the whole parse.
pub struct Parser<'a> {
    /// Token source.
    lexer: Lexer<'a>,
    /// One-token lookahead buffer.
    peeked: Option<Token>,
    /// Tolerance switches.
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    ///
    /// ## Parameters
    ///
    /// - `source`: Material text
    /// - `options`: Parse options
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(source, options),
            peeked: None,
            options: options.clone(),
        }
    }

    /// Parse the entire source into a material.
    ///
    /// ## Returns
    ///
    /// The material, or the first lex or parse error.
    pub fn parse(mut self) -> Result<Material> {
        self.parse_material()
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Look at the next token without consuming it.
    fn peek(&mut self) -> Result<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Kind of the next token.
    fn peek_kind(&mut self) -> Result<TokenKind> {
        Ok(self.peek()?.kind)
    }

    /// Consume the next token.
    fn next(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => Ok(self.lexer.next_token()?),
        }
    }

    /// Consume a token of the expected kind.
    ///
    /// ## Returns
    ///
    /// The consumed token, or an unexpected-token error at its position.
    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        let token = self.next()?;
        if token.kind != kind {
            return Err(unexpected(&token, kind.display()));
        }
        Ok(token)
    }

    fn expect_semicolon(&mut self) -> Result<()> {
        self.expect(TokenKind::Semicolon).map(|_| ())
    }

    /// Consume the next token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Result<bool> {
        if self.peek_kind()? == kind {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    // =========================================================================
    // NAME MATCHING
    // =========================================================================

    /// Compare a field or class name against its canonical spelling.
    fn key_is(&self, name: &str, key: &str) -> bool {
        if self.options.case_insensitive {
            name.eq_ignore_ascii_case(key)
        } else {
            name == key
        }
    }

    /// Check a class name against a canonical prefix such as `Stage`.
    fn has_prefix(&self, name: &str, prefix: &str) -> bool {
        if self.options.case_insensitive {
            name.get(..prefix.len())
                .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
        } else {
            name.starts_with(prefix)
        }
    }
}

/// Build an unexpected-token error for `token`.
fn unexpected(token: &Token, expected: &str) -> crate::error::Error {
    ParseError::unexpected_token(token.describe(), expected, token.position).into()
}

/// Whether the leading window of `data` contains a zero byte.
///
/// Rapified (binary) materials always do; text materials never should.
pub fn is_binary(data: &[u8]) -> bool {
    data.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, Value};
    use crate::error::{Error, ParseErrorKind};
    use crate::span::Position;

    fn parse(source: &str) -> Material {
        Parser::new(source, &ParseOptions::default())
            .parse()
            .expect("parse")
    }

    fn parse_strict(source: &str) -> Result<Material> {
        let options = ParseOptions {
            relaxed_numbers: false,
            ..ParseOptions::default()
        };
        Parser::new(source, &options).parse()
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(parse(""), Material::default());
        assert_eq!(parse("  // nothing\n"), Material::default());
    }

    #[test]
    fn test_top_level_fields() {
        let m = parse(
            "ambient[]={1,1,1,1};\n\
             specularPower=70;\n\
             PixelShaderID=\"Super\";\n\
             vertexShaderId=Super;",
        );
        assert_eq!(m.ambient, vec![1.0; 4]);
        assert_eq!(m.specular_power, Some(70.0));
        assert_eq!(m.pixel_shader_id, "Super");
        assert_eq!(m.vertex_shader_id, "Super");
        assert!(m.extras.is_empty());
    }

    #[test]
    fn test_color_without_array_suffix_is_extra() {
        let m = parse("diffuse={1,1,1,1};");
        assert!(m.diffuse.is_empty());
        assert_eq!(m.extras.len(), 1);
    }

    #[test]
    fn test_stage_dispatch() {
        let m = parse(
            "class Stage1 { texture=\"a_nohq.paa\"; uvSource=\"tex\"; };\n\
             class TexGen0 : Base { uvSource=\"tex\"; };\n\
             class Stage2 : Base { texture=\"b.paa\"; };",
        );
        assert_eq!(m.stages.len(), 1);
        assert_eq!(m.stages[0].texture.raw, "a_nohq.paa");
        assert_eq!(m.texgens.len(), 1);
        assert_eq!(m.texgens[0].base, "Base");
        assert_eq!(m.extras.len(), 1);
        assert!(matches!(&m.extras[0], Node::Class(c) if c.name == "Stage2" && c.base == "Base"));
    }

    #[test]
    fn test_stage_texgen_accepts_number() {
        let m = parse("class Stage3 { texGen=0; };");
        assert_eq!(m.stages[0].texgen, "0");
    }

    #[test]
    fn test_uv_transform() {
        let m = parse(
            "class Stage1 { class uvTransform { aside[]={1,0,0}; up={0,1,0}; extra[]={5}; }; };",
        );
        let uv = m.stages[0].uv_transform.as_ref().expect("uvTransform");
        assert_eq!(uv.aside, vec![1.0, 0.0, 0.0]);
        assert_eq!(uv.up, vec![0.0, 1.0, 0.0]);
        assert!(uv.dir.is_empty());
        assert!(m.stages[0].extras.is_empty());
    }

    #[test]
    fn test_generic_array_keeps_kinds() {
        let m = parse("list[]={1, \"two\", three, {4}};");
        match &m.extras[0] {
            Node::Assign(a) => {
                assert!(a.is_array);
                assert_eq!(
                    a.value,
                    Value::Array(vec![
                        Value::Number(1.0),
                        Value::String("two".into()),
                        Value::Ident("three".into()),
                        Value::Array(vec![Value::Number(4.0)]),
                    ])
                );
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_relaxed_number_array() {
        let m = parse("diffuse[] = {0.75, 1.5, \"1.25.1\", 0.0};");
        assert_eq!(m.diffuse, vec![0.75, 1.5, 0.0, 0.0]);
    }

    #[test]
    fn test_trailing_dot_string_is_number() {
        let m = parse("diffuse[] = {\"1.\", \" 2 \", 3};");
        assert_eq!(m.diffuse, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_strict_number_array_fails() {
        let err = parse_strict("diffuse[] = {0.75, 1.5, \"1.25.1\", 0.0};").unwrap_err();
        match err {
            Error::Parse(e) => {
                assert!(matches!(e.kind, ParseErrorKind::InvalidNumber { .. }));
                assert_eq!(e.position, Position::new(1, 25));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_strict("class Stage1 {\n};\nambient[]={1,1,1,1}").unwrap_err();
        match err {
            Error::Parse(e) => {
                assert_eq!(
                    e.kind,
                    ParseErrorKind::UnexpectedToken {
                        found: "end of file".into(),
                        expected: ";".into(),
                    }
                );
                assert_eq!(e.position.line, 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_bad_array_separator() {
        assert!(parse_strict("x[]={1 2};").is_err());
        assert!(parse_strict("diffuse[]={1 2};").is_err());
    }

    #[test]
    fn test_lex_error_propagates() {
        let err = Parser::new("x=@;", &ParseOptions::default()).parse().unwrap_err();
        assert!(matches!(err, Error::Lex(_)));
    }

    #[test]
    fn test_is_binary() {
        assert!(is_binary(b"\0raP"));
        assert!(!is_binary(b"ambient[]={1,1,1,1};"));
        let mut late = vec![b' '; BINARY_SNIFF_LEN];
        late.push(0);
        assert!(!is_binary(&late));
    }
}
