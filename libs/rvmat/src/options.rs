//! # Options
//!
//! Configuration for parsing, formatting and validation.
//! Every struct implements [`Default`] with the documented defaults, so
//! callers only spell out what they change:
//!
//! ```rust
//! use rvmat::ParseOptions;
//!
//! let strict = ParseOptions {
//!     relaxed_numbers: false,
//!     ..ParseOptions::default()
//! };
//! assert!(strict.case_insensitive);
//! ```

use config::constants::DEFAULT_INDENT;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// PARSE OPTIONS
// =============================================================================

/// Controls parser and lexer tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Match known keys, class-name prefixes and the `class` keyword
    /// regardless of case.
    pub case_insensitive: bool,
    /// Treat `//` and `/* */` comments as whitespace.
    pub allow_comments: bool,
    /// Substitute `0` for non-numeric entries in numeric arrays instead of
    /// failing the parse.
    pub relaxed_numbers: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            allow_comments: true,
            relaxed_numbers: true,
        }
    }
}

// =============================================================================
// FORMAT OPTIONS
// =============================================================================

/// Controls writer output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Indentation repeated once per nesting level. Empty means the default.
    pub indent: String,
}

impl FormatOptions {
    /// Indentation to use, falling back to four spaces when unset.
    pub fn indent(&self) -> &str {
        if self.indent.is_empty() {
            DEFAULT_INDENT
        } else {
            &self.indent
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

// =============================================================================
// VALIDATE OPTIONS
// =============================================================================

/// Controls which material checks run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// Root that relative texture paths are resolved against
    /// (for example `P:\`).
    pub game_root: String,
    /// Texture paths exempt from the existence check. Exact match, or prefix
    /// match when the pattern ends with `*`; separators and case are ignored.
    pub exclude_paths: Vec<String>,
    /// Check that referenced texture files exist. `None` turns the check on
    /// whenever `game_root` is set; `Some(false)` opts out. Never runs
    /// without a game root.
    pub file_check: Option<bool>,
    /// Check texture file extensions.
    pub extensions_check: bool,
    /// Check shader identifiers and stage names against the known tables.
    pub shader_name_check: bool,
}

impl ValidateOptions {
    /// Options resolving texture paths against `game_root`, which turns file
    /// checks on.
    pub fn with_game_root(game_root: impl Into<String>) -> Self {
        Self {
            game_root: game_root.into(),
            ..Self::default()
        }
    }

    /// Whether file existence checks actually run.
    ///
    /// ```rust
    /// use rvmat::ValidateOptions;
    ///
    /// let options = ValidateOptions {
    ///     game_root: "P:\\".to_string(),
    ///     ..ValidateOptions::default()
    /// };
    /// assert!(options.file_check_enabled());
    /// ```
    pub fn file_check_enabled(&self) -> bool {
        !self.game_root.trim().is_empty() && self.file_check.unwrap_or(true)
    }

    /// Reports whether the game root names an existing directory.
    pub fn game_root_exists(&self) -> bool {
        let root = self.game_root.trim();
        !root.is_empty() && Path::new(root).is_dir()
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            game_root: String::new(),
            exclude_paths: Vec::new(),
            file_check: None,
            extensions_check: true,
            shader_name_check: true,
        }
    }
}

// =============================================================================
// TEXTURE VALIDATE OPTIONS
// =============================================================================

/// Controls which procedural texture checks run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureValidateOptions {
    /// Check procedural function names against the known table.
    pub procedural_fn_check: bool,
    /// Check argument counts for known procedural functions.
    pub procedural_args_check: bool,
    /// Check `color(...)` tags against the known texture tags.
    pub texture_tag_check: bool,
}

impl TextureValidateOptions {
    /// Whether any procedural check is enabled.
    pub fn any_enabled(&self) -> bool {
        self.procedural_fn_check || self.procedural_args_check || self.texture_tag_check
    }
}

impl Default for TextureValidateOptions {
    fn default() -> Self {
        Self {
            procedural_fn_check: true,
            procedural_args_check: true,
            texture_tag_check: true,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_are_tolerant() {
        let options = ParseOptions::default();
        assert!(options.case_insensitive);
        assert!(options.allow_comments);
        assert!(options.relaxed_numbers);
    }

    #[test]
    fn test_empty_indent_falls_back() {
        let options = FormatOptions {
            indent: String::new(),
        };
        assert_eq!(options.indent(), "    ");
        let tabs = FormatOptions {
            indent: "\t".to_string(),
        };
        assert_eq!(tabs.indent(), "\t");
    }

    #[test]
    fn test_file_check_requires_game_root() {
        let mut options = ValidateOptions {
            file_check: Some(true),
            ..ValidateOptions::default()
        };
        assert!(!options.file_check_enabled());
        options.game_root = "P:\\".to_string();
        assert!(options.file_check_enabled());
    }

    #[test]
    fn test_game_root_alone_enables_file_check() {
        assert!(!ValidateOptions::default().file_check_enabled());

        let options = ValidateOptions {
            game_root: "P:\\".to_string(),
            ..ValidateOptions::default()
        };
        assert_eq!(options.file_check, None);
        assert!(options.file_check_enabled());

        let opted_out = ValidateOptions {
            file_check: Some(false),
            ..options
        };
        assert!(!opted_out.file_check_enabled());
    }

    #[test]
    fn test_with_game_root_enables_file_check() {
        let options = ValidateOptions::with_game_root("P:\\");
        assert!(options.file_check_enabled());
        assert!(options.extensions_check);
        assert!(options.shader_name_check);
    }

    #[test]
    fn test_game_root_exists() {
        assert!(!ValidateOptions::default().game_root_exists());
        let dir = std::env::temp_dir();
        let options = ValidateOptions::with_game_root(dir.to_string_lossy());
        assert!(options.game_root_exists());
    }

    #[test]
    fn test_texture_checks_default_on() {
        let options = TextureValidateOptions::default();
        assert!(options.any_enabled());
        let none = TextureValidateOptions {
            procedural_fn_check: false,
            procedural_args_check: false,
            texture_tag_check: false,
        };
        assert!(!none.any_enabled());
    }
}
