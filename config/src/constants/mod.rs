//! Format constants shared across the RVMAT toolchain.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

// =============================================================================
// INPUT CONSTANTS
// =============================================================================

/// Number of leading bytes inspected when deciding whether an input is a
/// binary (rapified) material instead of text.
///
/// # Examples
/// ```
/// use config::constants::BINARY_SNIFF_LEN;
/// let data = b"ambient[]={1,1,1,1};";
/// let window = &data[..data.len().min(BINARY_SNIFF_LEN)];
/// assert!(!window.contains(&0));
/// ```
pub const BINARY_SNIFF_LEN: usize = 4096;

/// UTF-8 byte-order mark decoded as a character.
///
/// # Examples
/// ```
/// use config::constants::BYTE_ORDER_MARK;
/// assert_eq!("\u{feff}x".chars().next(), Some(BYTE_ORDER_MARK));
/// ```
pub const BYTE_ORDER_MARK: char = '\u{feff}';

// =============================================================================
// WRITER CONSTANTS
// =============================================================================

/// Default indentation string used for each nesting level.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_INDENT;
/// assert_eq!(DEFAULT_INDENT.len(), 4);
/// ```
pub const DEFAULT_INDENT: &str = "    ";

/// Class name written for a stage whose name is empty.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_STAGE_NAME;
/// assert_eq!(DEFAULT_STAGE_NAME, "Stage");
/// ```
pub const DEFAULT_STAGE_NAME: &str = "Stage";

/// Class name written for a texture generator whose name is empty.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_TEXGEN_NAME;
/// assert_eq!(DEFAULT_TEXGEN_NAME, "TexGen");
/// ```
pub const DEFAULT_TEXGEN_NAME: &str = "TexGen";

// =============================================================================
// TEXTURE CONSTANTS
// =============================================================================

/// Prefix that marks a texture value as a procedural expression.
///
/// # Examples
/// ```
/// use config::constants::PROCEDURAL_PREFIX;
/// assert!("#(argb,8,8,3)color(1,1,1,1)".starts_with(PROCEDURAL_PREFIX));
/// ```
pub const PROCEDURAL_PREFIX: &str = "#(";

/// Texture file extensions the engine loads, lowercase with leading dot.
///
/// # Examples
/// ```
/// use config::constants::TEXTURE_EXTENSIONS;
/// assert!(TEXTURE_EXTENSIONS.contains(&".paa"));
/// ```
pub const TEXTURE_EXTENSIONS: &[&str] = &[".paa", ".pax", ".tga"];

/// Issue code attached to warnings about texture files missing on disk.
///
/// # Examples
/// ```
/// use config::constants::MISSING_RESOURCE_CODE;
/// assert_eq!(MISSING_RESOURCE_CODE, "missing_resource");
/// ```
pub const MISSING_RESOURCE_CODE: &str = "missing_resource";

// =============================================================================
// STAGE CONVENTIONS
// =============================================================================

/// Stage names that the engine lets omit UV wiring entirely.
///
/// Observed in shipped game data rather than documented; kept as an exact
/// list so it can be re-checked against new corpora.
///
/// # Examples
/// ```
/// use config::constants::UV_EXEMPT_STAGES;
/// assert!(UV_EXEMPT_STAGES.contains(&"Stage0"));
/// ```
pub const UV_EXEMPT_STAGES: &[&str] = &["StageTI", "Stage0"];

/// `uvSource` values that mean the stage samples no UV channel.
///
/// # Examples
/// ```
/// use config::constants::UV_FREE_SOURCES;
/// assert!(UV_FREE_SOURCES.contains(&"none"));
/// ```
pub const UV_FREE_SOURCES: &[&str] = &["none", "WorldPos"];
