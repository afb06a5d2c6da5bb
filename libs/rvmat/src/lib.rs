//! # RVMAT
//!
//! Parser, canonical writer and validator for RVMAT material files.
//!
//! ## Architecture
//!
//! ```text
//! Bytes → Lexer → Tokens → Parser → Material → Writer → Bytes
//!                                      ↓
//!                                  Validator → Issues
//! ```
//!
//! Known fields are normalized into the typed [`Material`] model; anything
//! else is kept as generic nodes so that it survives a parse/format round
//! trip unchanged.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::{format, parse};
//!
//! let material = parse(b"Specular[] = {0,0,0,1}; class Stage1 { texture = \"a_nohq.paa\"; };").unwrap();
//! assert_eq!(material.specular, vec![0.0, 0.0, 0.0, 1.0]);
//!
//! let text = String::from_utf8(format(&material).unwrap()).unwrap();
//! assert!(text.starts_with("specular[]={0, 0, 0, 1};\n"));
//! ```

pub mod ast;
pub mod color;
pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod material;
pub mod options;
pub mod parser;
pub mod span;
pub mod texture;
pub mod validate;
pub mod writer;

// Re-export public API
pub use color::{clamp01, Color};
pub use diagnostic::{Issue, Severity};
pub use error::{Error, LexError, LexErrorKind, ParseError, ParseErrorKind, Result};
pub use material::{Material, Stage, TexGen, UVTransform};
pub use options::{FormatOptions, ParseOptions, TextureValidateOptions, ValidateOptions};
pub use span::Position;
pub use texture::{normalize_texture_raw, parse_texture_ref, PathResolver, TextureKind, TextureRef};
pub use validate::{
    validate, validate_texture, validate_with_probe, validate_with_textures, FsProbe, ResourceProbe,
};

use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

// =============================================================================
// PARSING
// =============================================================================

/// Parse material text with default options.
///
/// ## Parameters
///
/// - `data`: Raw file contents
///
/// ## Returns
///
/// The material, [`Error::BinaryInput`] for rapified files, or the first
/// lex or parse error.
///
/// ## Example
///
/// ```rust
/// use rvmat::{parse, Error};
///
/// assert!(matches!(parse(b"\0raP"), Err(Error::BinaryInput)));
/// ```
pub fn parse(data: &[u8]) -> Result<Material> {
    parse_with(data, &ParseOptions::default())
}

/// Parse material text with explicit options.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn parse_with(data: &[u8], options: &ParseOptions) -> Result<Material> {
    if parser::is_binary(data) {
        debug!("rejecting binary input ({} bytes)", data.len());
        return Err(Error::BinaryInput);
    }

    let source = String::from_utf8_lossy(data);
    let material = parser::Parser::new(&source, options).parse()?;
    debug!(
        "parsed material: {} stages, {} texgens, {} extras",
        material.stages.len(),
        material.texgens.len(),
        material.extras.len()
    );
    Ok(material)
}

/// Read everything from `reader` and parse it.
pub fn decode<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Material> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_with(&data, options)
}

/// Parse the material file at `path`.
pub fn decode_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Material> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file), options)
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Format a material canonically with default options.
pub fn format(material: &Material) -> Result<Vec<u8>> {
    format_with(material, &FormatOptions::default())
}

/// Format a material canonically.
///
/// ## Example
///
/// ```rust
/// use rvmat::{format_with, FormatOptions, Material, Stage, TextureRef};
///
/// let mut material = Material::default();
/// material.stages.push(Stage::new("Stage1", TextureRef::parse("a.paa")));
/// let options = FormatOptions { indent: "\t".to_string() };
/// let text = String::from_utf8(format_with(&material, &options).unwrap()).unwrap();
/// assert_eq!(text, "class Stage1\n{\n\ttexture=\"a.paa\";\n};\n");
/// ```
pub fn format_with(material: &Material, options: &FormatOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(&mut out, material, options)?;
    Ok(out)
}

/// Write a material canonically to `writer`.
pub fn encode<W: Write>(writer: W, material: &Material, options: &FormatOptions) -> Result<()> {
    let mut out = writer::Writer::new(BufWriter::new(writer), options);
    out.write_material(material)?;
    out.into_inner().flush()?;
    debug!("formatted material with {} stages", material.stages.len());
    Ok(())
}

/// Write a material canonically to the file at `path`, replacing it.
pub fn encode_file(path: impl AsRef<Path>, material: &Material, options: &FormatOptions) -> Result<()> {
    let file = File::create(path.as_ref())?;
    encode(file, material, options)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let material = parse(b"ambient[]={1,1,1,1};\nPixelShaderID=\"Super\";").unwrap();
        let text = String::from_utf8(format(&material).unwrap()).unwrap();
        assert_eq!(text, "ambient[]={1, 1, 1, 1};\nPixelShaderID=\"Super\";\n");
    }

    #[test]
    fn test_binary_rejected_before_lexing() {
        let mut data = b"ambient[]={1,1,1,1};".to_vec();
        data.push(0);
        assert!(matches!(parse(&data), Err(Error::BinaryInput)));
    }

    #[test]
    fn test_decode_reader() {
        let material = decode(&b"specularPower=42;"[..], &ParseOptions::default()).unwrap();
        assert_eq!(material.specular_power, Some(42.0));
    }

    #[test]
    fn test_decode_missing_file() {
        let err = decode_file("/nonexistent/dir/x.rvmat", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let material = parse(b"class Stage1 { texture=\"a\xff.paa\"; };").unwrap();
        assert_eq!(material.stages[0].texture.raw, "a\u{fffd}.paa");
    }
}
