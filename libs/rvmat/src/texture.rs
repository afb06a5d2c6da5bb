//! # Texture References
//!
//! A stage texture is either a file path or a procedural expression of the
//! form `#(format,width,height,mip)function(arg,arg,...)`.
//!
//! Procedural parsing never fails hard: when the expression is malformed the
//! reference keeps its raw text and `parsed_ok` is false. For the functions
//! `color`, `fresnel`, `fresnelglass` and `irradiance` the arguments are
//! additionally decoded into a typed [`ProceduralPayload`].
//!
//! ## Example
//!
//! ```rust
//! use rvmat::texture::{parse_texture_ref, ProceduralPayload};
//!
//! let tex = parse_texture_ref("#(argb,8,8,3)color(0.5,0.5,0.5,1.0,co)");
//! assert!(tex.is_procedural() && tex.parsed_ok);
//! let procedural = tex.procedural.unwrap();
//! assert_eq!((procedural.width, procedural.height, procedural.mip), (8, 8, 3));
//! assert!(matches!(procedural.payload, Some(ProceduralPayload::Color(_))));
//! ```

use crate::color::Color;
use crate::diagnostic::Issue;
use crate::options::TextureValidateOptions;
use crate::validate::validate_texture;
use crate::writer::format_number;
use config::constants::PROCEDURAL_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

// =============================================================================
// TEXTURE REF
// =============================================================================

/// Kind of texture reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureKind {
    /// A file path, kept opaque.
    #[default]
    Path,
    /// A `#(...)` procedural expression.
    Procedural,
}

/// A texture reference as found in a stage's `texture` field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextureRef {
    /// Normalized raw text.
    pub raw: String,
    pub kind: TextureKind,
    /// Whether a procedural expression was parsed successfully.
    pub parsed_ok: bool,
    /// Parsed procedural expression, when `parsed_ok`.
    pub procedural: Option<ProceduralTexture>,
}

impl TextureRef {
    /// Parse a raw texture string. Equivalent to [`parse_texture_ref`].
    pub fn parse(raw: &str) -> Self {
        parse_texture_ref(raw)
    }

    /// A path reference with the given raw text, without normalization.
    pub fn path(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }

    pub fn is_path(&self) -> bool {
        self.kind == TextureKind::Path
    }

    pub fn is_procedural(&self) -> bool {
        self.kind == TextureKind::Procedural
    }

    /// Run the procedural texture checks on this reference.
    ///
    /// Path references and empty references produce no issues.
    pub fn validate(&self, options: &TextureValidateOptions) -> Vec<Issue> {
        validate_texture(self, options)
    }
}

/// Parse a raw texture string into a [`TextureRef`].
///
/// The raw text is normalized first (see [`normalize_texture_raw`]).
pub fn parse_texture_ref(raw: &str) -> TextureRef {
    let raw = normalize_texture_raw(raw);

    if !raw.starts_with(PROCEDURAL_PREFIX) {
        return TextureRef::path(raw);
    }

    let procedural = parse_procedural(&raw);
    TextureRef {
        raw,
        kind: TextureKind::Procedural,
        parsed_ok: procedural.is_some(),
        procedural,
    }
}

/// Clean up malformed texture strings seen in real files.
///
/// Trims whitespace, unwraps a stray `texture="...";` wrapper and drops a
/// trailing `";` artifact.
///
/// ## Example
///
/// ```rust
/// use rvmat::texture::normalize_texture_raw;
///
/// assert_eq!(normalize_texture_raw(" texture=\"a\\b.paa\"; "), "a\\b.paa");
/// assert_eq!(normalize_texture_raw("a\\b.paa\";"), "a\\b.paa");
/// ```
pub fn normalize_texture_raw(raw: &str) -> String {
    const WRAPPER: &str = "texture=\"";

    let s = raw.trim();
    let wrapped = s
        .get(..WRAPPER.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(WRAPPER));

    if wrapped {
        let inner = &s[WRAPPER.len()..];
        let inner = inner.strip_suffix("\";").unwrap_or(inner);
        let inner = inner.strip_suffix('"').unwrap_or(inner);
        return inner.trim().to_string();
    }

    s.strip_suffix("\";").unwrap_or(s).trim().to_string()
}

// =============================================================================
// PROCEDURAL TEXTURE
// =============================================================================

/// A parsed `#(format,width,height,mip)function(args)` expression.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProceduralTexture {
    /// Pixel format tag such as `argb` or `ai`.
    pub format: String,
    pub width: i64,
    pub height: i64,
    pub mip: i64,
    /// Function name as written.
    pub func: String,
    /// Trimmed argument strings.
    pub args: Vec<String>,
    /// Typed arguments for recognized functions.
    pub payload: Option<ProceduralPayload>,
}

impl ProceduralTexture {
    /// Decoded `color(...)` arguments, if any.
    pub fn color(&self) -> Option<&ProceduralColor> {
        match &self.payload {
            Some(ProceduralPayload::Color(c)) => Some(c),
            _ => None,
        }
    }

    /// Decoded `fresnel(...)` or `fresnelGlass(...)` arguments, if any.
    pub fn fresnel(&self) -> Option<&ProceduralFresnel> {
        match &self.payload {
            Some(ProceduralPayload::Fresnel(f)) => Some(f),
            _ => None,
        }
    }

    /// Decoded `irradiance(...)` argument, if any.
    pub fn irradiance(&self) -> Option<&ProceduralIrradiance> {
        match &self.payload {
            Some(ProceduralPayload::Irradiance(i)) => Some(i),
            _ => None,
        }
    }
}

/// Typed arguments of a recognized procedural function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProceduralPayload {
    Color(ProceduralColor),
    Fresnel(ProceduralFresnel),
    Irradiance(ProceduralIrradiance),
}

/// `color(r,g,b,a[,tag])`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProceduralColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
    /// Texture tag such as `co` or `nohq`, empty when absent.
    pub tag: String,
}

/// `fresnel(a,b)` and `fresnelGlass(a[,b])`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProceduralFresnel {
    pub a: f64,
    /// Zero when omitted.
    pub b: f64,
}

/// `irradiance(value)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProceduralIrradiance {
    pub value: f64,
}

fn parse_procedural(raw: &str) -> Option<ProceduralTexture> {
    let body = raw.strip_prefix(PROCEDURAL_PREFIX)?;
    let close = body.find(')')?;

    let head = split_args(&body[..close]);
    if head.len() < 4 {
        return None;
    }
    let width = head[1].parse::<i64>().ok()?;
    let height = head[2].parse::<i64>().ok()?;
    let mip = head[3].parse::<i64>().ok()?;

    let rest = body[close + 1..].trim();
    if rest.is_empty() {
        return None;
    }
    let (func, args) = parse_call(rest)?;

    let payload = decode_payload(&func, &args);
    Some(ProceduralTexture {
        format: head[0].clone(),
        width,
        height,
        mip,
        func,
        args,
        payload,
    })
}

/// Split `name(args)` at the first `(` and the last `)`.
fn parse_call(s: &str) -> Option<(String, Vec<String>)> {
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    if open == 0 || close <= open {
        return None;
    }
    Some((s[..open].trim().to_string(), split_args(&s[open + 1..close])))
}

fn split_args(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(',').map(|part| part.trim().to_string()).collect()
}

fn decode_payload(func: &str, args: &[String]) -> Option<ProceduralPayload> {
    match func.to_ascii_lowercase().as_str() {
        "color" => decode_color(args).map(ProceduralPayload::Color),
        "fresnel" | "fresnelglass" => decode_fresnel(args).map(ProceduralPayload::Fresnel),
        "irradiance" => decode_irradiance(args).map(ProceduralPayload::Irradiance),
        _ => None,
    }
}

fn decode_color(args: &[String]) -> Option<ProceduralColor> {
    if args.len() != 4 && args.len() != 5 {
        return None;
    }
    Some(ProceduralColor {
        r: parse_float_arg(&args[0])?,
        g: parse_float_arg(&args[1])?,
        b: parse_float_arg(&args[2])?,
        a: parse_float_arg(&args[3])?,
        tag: args.get(4).cloned().unwrap_or_default(),
    })
}

fn decode_fresnel(args: &[String]) -> Option<ProceduralFresnel> {
    match args {
        [a] => Some(ProceduralFresnel {
            a: parse_float_arg(a)?,
            b: 0.0,
        }),
        [a, b] => Some(ProceduralFresnel {
            a: parse_float_arg(a)?,
            b: parse_float_arg(b)?,
        }),
        _ => None,
    }
}

fn decode_irradiance(args: &[String]) -> Option<ProceduralIrradiance> {
    match args {
        [value] => Some(ProceduralIrradiance {
            value: parse_float_arg(value)?,
        }),
        _ => None,
    }
}

fn parse_float_arg(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse().ok()
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

/// A positional argument for the procedural constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum ProceduralArg {
    /// Copied verbatim.
    Text(String),
    /// Shortest round-trip representation.
    Float(f64),
    /// Decimal integer.
    Int(i64),
}

impl ProceduralArg {
    fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Float(v) => format_number(*v),
            Self::Int(v) => v.to_string(),
        }
    }
}

impl From<&str> for ProceduralArg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ProceduralArg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for ProceduralArg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for ProceduralArg {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<i64> for ProceduralArg {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ProceduralArg {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

/// Build a procedural reference from its parts.
///
/// The raw text is assembled canonically and then parsed, so the result is
/// decorated exactly like a parsed file value.
///
/// ## Example
///
/// ```rust
/// use rvmat::texture::{new_procedural, ProceduralArg};
///
/// let tex = new_procedural("ai", 64, 64, 1, "perlinNoise", &[ProceduralArg::Int(256), ProceduralArg::Float(0.5)]);
/// assert_eq!(tex.raw, "#(ai,64,64,1)perlinNoise(256,0.5)");
/// assert!(tex.parsed_ok);
/// ```
pub fn new_procedural(
    format: &str,
    width: i64,
    height: i64,
    mip: i64,
    func: &str,
    args: &[ProceduralArg],
) -> TextureRef {
    let args: Vec<String> = args.iter().map(ProceduralArg::render).collect();
    let raw = format!(
        "{}{},{},{},{}){}({})",
        PROCEDURAL_PREFIX,
        format,
        width,
        height,
        mip,
        func,
        args.join(",")
    );
    parse_texture_ref(&raw)
}

/// Build a `color(r,g,b,a[,tag])` reference. An empty tag is omitted.
pub fn new_procedural_color(
    format: &str,
    width: i64,
    height: i64,
    mip: i64,
    color: Color,
    tag: &str,
) -> TextureRef {
    let mut args: Vec<ProceduralArg> = vec![
        color.r.into(),
        color.g.into(),
        color.b.into(),
        color.a.into(),
    ];
    if !tag.is_empty() {
        args.push(tag.into());
    }
    new_procedural(format, width, height, mip, "color", &args)
}

/// Build a `fresnel(a,b)` reference.
pub fn new_procedural_fresnel(
    format: &str,
    width: i64,
    height: i64,
    mip: i64,
    a: f64,
    b: f64,
) -> TextureRef {
    new_procedural(format, width, height, mip, "fresnel", &[a.into(), b.into()])
}

/// Build a `fresnelGlass(a[,b])` reference.
pub fn new_procedural_fresnel_glass(
    format: &str,
    width: i64,
    height: i64,
    mip: i64,
    a: f64,
    b: Option<f64>,
) -> TextureRef {
    let mut args = vec![ProceduralArg::from(a)];
    args.extend(b.map(ProceduralArg::from));
    new_procedural(format, width, height, mip, "fresnelGlass", &args)
}

/// Build an `irradiance(value)` reference.
pub fn new_procedural_irradiance(
    format: &str,
    width: i64,
    height: i64,
    mip: i64,
    value: f64,
) -> TextureRef {
    new_procedural(format, width, height, mip, "irradiance", &[value.into()])
}

// =============================================================================
// PATH RESOLVER
// =============================================================================

/// Resolves texture paths against a game root such as `P:\`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResolver {
    pub game_root: String,
}

impl PathResolver {
    pub fn new(game_root: impl Into<String>) -> Self {
        Self {
            game_root: game_root.into(),
        }
    }

    /// Resolve a path texture. Procedural references resolve to `None`.
    pub fn resolve_texture_path(&self, texture: &TextureRef) -> Option<PathBuf> {
        if texture.is_procedural() {
            return None;
        }
        self.resolve_path(&texture.raw)
    }

    /// Resolve a raw path.
    ///
    /// Backslashes become `/`. Absolute and drive-letter paths are only
    /// cleaned; relative paths are joined onto the game root.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use rvmat::texture::PathResolver;
    /// use std::path::PathBuf;
    ///
    /// let resolver = PathResolver::new("/games/dayz");
    /// assert_eq!(
    ///     resolver.resolve_path("dz\\data\\.\\x_co.paa"),
    ///     Some(PathBuf::from("/games/dayz/dz/data/x_co.paa"))
    /// );
    /// ```
    pub fn resolve_path(&self, raw: &str) -> Option<PathBuf> {
        if raw.is_empty() {
            return None;
        }

        let norm = PathBuf::from(raw.replace('\\', "/"));
        if norm.is_absolute() || has_drive_letter(raw) || self.game_root.is_empty() {
            return Some(clean_path(&norm));
        }

        Some(clean_path(&Path::new(&self.game_root).join(norm)))
    }
}

fn has_drive_letter(p: &str) -> bool {
    p.as_bytes().get(1) == Some(&b':')
}

/// Lexically normalize a path: drop `.` and fold `name/..` pairs.
fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

// =============================================================================
// TESTS
// =============================================================================
