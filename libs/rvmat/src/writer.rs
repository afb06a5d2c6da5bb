//! # Canonical Writer
//!
//! Serializes a [`Material`] deterministically. Known fields are written in a
//! fixed order regardless of where they appeared in the source; extras
//! follow in their stored order.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::{format, Material};
//!
//! let mut material = Material::default();
//! material.diffuse = vec![1.0, 0.5, 0.0, 1.0];
//! material.specular_power = Some(70.0);
//! let text = String::from_utf8(format(&material).unwrap()).unwrap();
//! assert_eq!(text, "diffuse[]={1, 0.5, 0, 1};\nspecularPower=70;\n");
//! ```

use crate::ast::{AssignNode, ClassNode, Node, Value};
use crate::material::{Material, Stage, TexGen, UVTransform};
use crate::options::FormatOptions;
use config::constants::{DEFAULT_STAGE_NAME, DEFAULT_TEXGEN_NAME};
use std::io::{self, Write};

// =============================================================================
// WRITER
// =============================================================================

/// Writes materials to an [`io::Write`] sink.
///
/// Indentation strings are cached per nesting depth for the lifetime of the
/// writer; create one writer per output.
pub struct Writer<W: Write> {
    /// Output sink.
    out: W,
    /// Indentation unit.
    indent: String,
    /// `indent` repeated `i` times at index `i`.
    cache: Vec<String>,
    /// Current nesting level.
    level: usize,
}

impl<W: Write> Writer<W> {
    /// Create a writer.
    ///
    /// ## Parameters
    ///
    /// - `out`: Output sink
    /// - `options`: Format options (an empty indent means four spaces)
    pub fn new(out: W, options: &FormatOptions) -> Self {
        Self {
            out,
            indent: options.indent().to_string(),
            cache: vec![String::new()],
            level: 0,
        }
    }

    /// Return the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a whole material.
    pub fn write_material(&mut self, material: &Material) -> io::Result<()> {
        for (name, values) in material.color_fields() {
            self.write_number_array(name, values)?;
        }
        if let Some(power) = material.specular_power {
            writeln!(self.out, "specularPower={};", format_number(power))?;
        }
        if !material.pixel_shader_id.is_empty() {
            self.write_string_field("PixelShaderID", &material.pixel_shader_id)?;
        }
        if !material.vertex_shader_id.is_empty() {
            self.write_string_field("VertexShaderID", &material.vertex_shader_id)?;
        }

        for texgen in &material.texgens {
            self.write_texgen(texgen)?;
        }
        for stage in &material.stages {
            self.write_stage(stage)?;
        }
        self.write_nodes(&material.extras)
    }

    // =========================================================================
    // KNOWN SHAPES
    // =========================================================================

    /// Write a stage. `uvSource` and `uvTransform` are omitted when the stage
    /// uses a texture generator.
    fn write_stage(&mut self, stage: &Stage) -> io::Result<()> {
        let name = non_empty_or(&stage.name, DEFAULT_STAGE_NAME);
        self.open_class(name, "")?;

        if !stage.texture.raw.is_empty() {
            self.write_string_field("texture", &stage.texture.raw)?;
        }
        if !stage.uses_texgen() && !stage.uv_source.is_empty() {
            self.write_string_field("uvSource", &stage.uv_source)?;
        }
        if stage.uses_texgen() {
            self.write_string_field("texGen", &stage.texgen)?;
        }
        if let Some(uv) = stage.uv_transform.as_ref().filter(|_| !stage.uses_texgen()) {
            self.write_uv_transform(uv)?;
        }
        self.write_nodes(&stage.extras)?;

        self.close_class()
    }

    fn write_texgen(&mut self, texgen: &TexGen) -> io::Result<()> {
        let name = non_empty_or(&texgen.name, DEFAULT_TEXGEN_NAME);
        self.open_class(name, &texgen.base)?;

        if !texgen.uv_source.is_empty() {
            self.write_string_field("uvSource", &texgen.uv_source)?;
        }
        if let Some(uv) = &texgen.uv_transform {
            self.write_uv_transform(uv)?;
        }
        self.write_nodes(&texgen.extras)?;

        self.close_class()
    }

    fn write_uv_transform(&mut self, uv: &UVTransform) -> io::Result<()> {
        self.open_class("uvTransform", "")?;
        for (name, values) in uv.fields() {
            self.write_number_array(name, values)?;
        }
        self.close_class()
    }

    // =========================================================================
    // GENERIC NODES
    // =========================================================================

    fn write_nodes(&mut self, nodes: &[Node]) -> io::Result<()> {
        for node in nodes {
            match node {
                Node::Assign(assign) => self.write_assign(assign)?,
                Node::Class(class) => self.write_class(class)?,
            }
        }
        Ok(())
    }

    fn write_assign(&mut self, assign: &AssignNode) -> io::Result<()> {
        self.write_indent()?;
        let suffix = if assign.is_array { "[]" } else { "" };
        write!(self.out, "{}{}=", assign.name, suffix)?;
        self.write_value(&assign.value)?;
        self.out.write_all(b";\n")
    }

    fn write_class(&mut self, class: &ClassNode) -> io::Result<()> {
        self.open_class(&class.name, &class.base)?;
        self.write_nodes(&class.body)?;
        self.close_class()
    }

    fn write_value(&mut self, value: &Value) -> io::Result<()> {
        match value {
            Value::Number(n) => self.out.write_all(format_number(*n).as_bytes()),
            Value::String(s) => self.out.write_all(quote(s).as_bytes()),
            Value::Ident(s) => self.out.write_all(s.as_bytes()),
            Value::Array(items) => {
                self.out.write_all(b"{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.write_all(b", ")?;
                    }
                    self.write_value(item)?;
                }
                self.out.write_all(b"}")
            }
        }
    }

    // =========================================================================
    // PRIMITIVES
    // =========================================================================

    /// Write `name[]={v0, v1, ...};` unless `values` is empty.
    fn write_number_array(&mut self, name: &str, values: &[f64]) -> io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.write_indent()?;
        let joined: Vec<String> = values.iter().map(|v| format_number(*v)).collect();
        writeln!(self.out, "{}[]={{{}}};", name, joined.join(", "))
    }

    fn write_string_field(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.write_indent()?;
        writeln!(self.out, "{}={};", name, quote(value))
    }

    /// Write `class Name[ : Base]` and the opening brace, then indent.
    fn open_class(&mut self, name: &str, base: &str) -> io::Result<()> {
        self.write_indent()?;
        if base.is_empty() {
            writeln!(self.out, "class {}", name)?;
        } else {
            writeln!(self.out, "class {} : {}", name, base)?;
        }
        self.write_indent()?;
        self.out.write_all(b"{\n")?;
        self.level += 1;
        Ok(())
    }

    /// Dedent and write the closing `};`.
    fn close_class(&mut self) -> io::Result<()> {
        self.level = self.level.saturating_sub(1);
        self.write_indent()?;
        self.out.write_all(b"};\n")
    }

    fn write_indent(&mut self) -> io::Result<()> {
        while self.cache.len() <= self.level {
            let next = self.indent.repeat(self.cache.len());
            self.cache.push(next);
        }
        self.out.write_all(self.cache[self.level].as_bytes())
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Format a number with the shortest representation that parses back to the
/// same value.
///
/// Exponent form (`1e+06`, `1.5e-05`) is used when the decimal exponent is
/// below -4 or at least 6; integral values have no fractional part.
///
/// ## Example
///
/// ```rust
/// use rvmat::writer::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(0.0001), "0.0001");
/// assert_eq!(format_number(1_000_000.0), "1e+06");
/// assert_eq!(format_number(-0.000015), "-1.5e-05");
/// ```
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", v);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if (-4..6).contains(&exponent) {
        return v.to_string();
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

/// Wrap `s` in double quotes so the lexer reads it back unchanged.
///
/// Quotes are doubled; a backslash that would otherwise form an escape
/// (before `\`, `"` or the closing quote) is doubled as well.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\"\""),
            '\\' if matches!(chars.peek(), None | Some('\\' | '"')) => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// =============================================================================
// TESTS
// =============================================================================
