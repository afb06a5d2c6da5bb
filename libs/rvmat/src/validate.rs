//! # Validation
//!
//! Independent checks over a parsed [`Material`], producing a flat list of
//! [`Issue`]s in a stable order:
//!
//! 1. missing shader identifiers (when any stage exists)
//! 2. unknown shader identifiers
//! 3. color arrays without exactly four components
//! 4. texture file checks (extension, `..`, existence)
//! 5. unknown stage names
//! 6. UV wiring of stages without a texture generator
//! 7. duplicate stage names
//!
//! Procedural textures are checked separately through
//! [`validate_with_textures`] or [`TextureRef::validate`].
//!
//! ## Example
//!
//! ```rust
//! use rvmat::{parse, validate, Severity, ValidateOptions};
//!
//! let material = parse(b"class Stage1 { texture=\"a.paa\"; }; class Stage1 { };").unwrap();
//! let issues = validate(&material, &ValidateOptions::default());
//! assert_eq!(issues.iter().filter(|i| i.severity == Severity::Error).count(), 1);
//! ```

use crate::diagnostic::Issue;
use crate::material::Material;
use crate::options::{TextureValidateOptions, ValidateOptions};
use crate::texture::{PathResolver, TextureRef};
use config::constants::{MISSING_RESOURCE_CODE, TEXTURE_EXTENSIONS, UV_EXEMPT_STAGES, UV_FREE_SOURCES};
use config::tables;
use log::debug;
use std::collections::HashSet;
use std::path::Path;

// =============================================================================
// RESOURCE PROBE
// =============================================================================

/// Answers whether a resolved resource exists.
pub trait ResourceProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ResourceProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.metadata().is_ok()
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Validate a material, checking texture files on the local filesystem.
pub fn validate(material: &Material, options: &ValidateOptions) -> Vec<Issue> {
    validate_with_probe(material, options, &FsProbe)
}

/// Validate a material with a custom existence probe.
///
/// ## Parameters
///
/// - `material`: Material to check
/// - `options`: Which checks run
/// - `probe`: Used for texture file existence checks
pub fn validate_with_probe(
    material: &Material,
    options: &ValidateOptions,
    probe: &dyn ResourceProbe,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    check_shaders_present(material, &mut issues);
    if options.shader_name_check {
        check_shader_names(material, &mut issues);
    }
    for (name, values) in material.color_fields() {
        check_color(name, values, &mut issues);
    }
    check_texture_files(material, options, probe, &mut issues);
    check_stage_wiring(material, options, &mut issues);
    check_duplicate_stages(material, &mut issues);

    debug!(
        "validated material with {} stages: {} issues",
        material.stages.len(),
        issues.len()
    );
    issues
}

/// Validate a material and, when `texture_options` is given, each stage's
/// texture reference. Texture issues carry the stage name in their path.
pub fn validate_with_textures(
    material: &Material,
    options: &ValidateOptions,
    texture_options: Option<&TextureValidateOptions>,
) -> Vec<Issue> {
    let mut issues = validate(material, options);
    let texture_options = match texture_options {
        Some(o) => o,
        None => return issues,
    };

    for stage in &material.stages {
        issues.extend(
            validate_texture(&stage.texture, texture_options)
                .into_iter()
                .map(|issue| issue.in_stage(&stage.name)),
        );
    }
    issues
}

// =============================================================================
// MATERIAL CHECKS
// =============================================================================

fn check_shaders_present(material: &Material, issues: &mut Vec<Issue>) {
    if material.stages.is_empty() {
        return;
    }
    if material.pixel_shader_id.is_empty() {
        issues.push(Issue::warning("PixelShaderID missing"));
    }
    if material.vertex_shader_id.is_empty() {
        issues.push(Issue::warning("VertexShaderID missing"));
    }
}

fn check_shader_names(material: &Material, issues: &mut Vec<Issue>) {
    let ps = &material.pixel_shader_id;
    if !ps.is_empty() && !tables::is_known_pixel_shader(ps) {
        issues.push(Issue::warning("unknown PixelShaderID").with_path(ps));
    }
    let vs = &material.vertex_shader_id;
    if !vs.is_empty() && !tables::is_known_vertex_shader(vs) {
        issues.push(Issue::warning("unknown VertexShaderID").with_path(vs));
    }
}

fn check_color(name: &str, values: &[f64], issues: &mut Vec<Issue>) {
    if !values.is_empty() && values.len() != 4 {
        issues.push(Issue::error("color must have 4 components").with_path(name));
    }
}

fn check_texture_files(
    material: &Material,
    options: &ValidateOptions,
    probe: &dyn ResourceProbe,
    issues: &mut Vec<Issue>,
) {
    let file_check = options.file_check_enabled();
    if !file_check && !options.extensions_check {
        return;
    }

    let resolver = PathResolver::new(options.game_root.as_str());
    for stage in &material.stages {
        let texture = &stage.texture;
        if texture.raw.is_empty() || texture.is_procedural() {
            continue;
        }
        let raw = texture.raw.as_str();

        if options.extensions_check && !has_texture_extension(raw) {
            issues.push(Issue::warning("unexpected texture extension").with_path(raw));
        }
        if raw.contains("..") {
            issues.push(Issue::warning("texture path contains '..'").with_path(raw));
        }
        if !file_check || is_excluded(raw, &options.exclude_paths) {
            continue;
        }
        if let Some(path) = resolver.resolve_path(raw) {
            if !probe.exists(&path) {
                issues.push(
                    Issue::warning("texture file not found")
                        .with_code(MISSING_RESOURCE_CODE)
                        .with_path(path.display().to_string()),
                );
            }
        }
    }
}

fn check_stage_wiring(material: &Material, options: &ValidateOptions, issues: &mut Vec<Issue>) {
    for stage in &material.stages {
        let name = stage.name.as_str();
        if options.shader_name_check && !tables::is_known_stage_name(name) {
            issues.push(Issue::warning("unknown Stage name").with_path(name));
        }

        if UV_EXEMPT_STAGES.contains(&name)
            || UV_FREE_SOURCES.contains(&stage.uv_source.as_str())
            || stage.uses_texgen()
        {
            continue;
        }

        let missing_transform = stage.uv_transform.is_none();
        if stage.uv_source.is_empty() && missing_transform {
            issues.push(Issue::warning("stage without texGen missing uvSource").with_path(name));
        }
        if missing_transform {
            issues.push(Issue::warning("stage without texGen missing uvTransform").with_path(name));
        }
    }
}

fn check_duplicate_stages(material: &Material, issues: &mut Vec<Issue>) {
    let mut seen = HashSet::with_capacity(material.stages.len());
    for stage in &material.stages {
        if stage.name.is_empty() {
            continue;
        }
        if !seen.insert(stage.name.as_str()) {
            issues.push(Issue::error("duplicate Stage name").with_path(&stage.name));
        }
    }
}

/// Whether the file name of `raw` ends in an allowed texture extension.
fn has_texture_extension(raw: &str) -> bool {
    let file = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    match file.rfind('.') {
        Some(dot) => {
            let ext = file[dot..].to_ascii_lowercase();
            TEXTURE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Match `raw` against exclusion patterns: exact, or prefix when the
/// pattern ends with `*`. Separators and case are ignored.
fn is_excluded(raw: &str, patterns: &[String]) -> bool {
    let path = normalize_for_match(raw);
    patterns
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| normalize_for_match(p))
        .any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => path == pattern,
        })
}

fn normalize_for_match(p: &str) -> String {
    p.trim().replace('/', "\\").to_lowercase()
}

// =============================================================================
// TEXTURE CHECKS
// =============================================================================

/// Check a single texture reference.
///
/// Path and empty references produce nothing. A procedural reference that
/// failed to parse yields one warning when any check is enabled.
pub fn validate_texture(texture: &TextureRef, options: &TextureValidateOptions) -> Vec<Issue> {
    if texture.raw.is_empty() || texture.is_path() {
        return Vec::new();
    }

    let procedural = match (&texture.procedural, texture.parsed_ok) {
        (Some(p), true) => p,
        _ => {
            if options.any_enabled() {
                return vec![Issue::warning("procedural texture parse failed").with_path(&texture.raw)];
            }
            return Vec::new();
        }
    };

    let mut issues = Vec::new();
    let func = procedural.func.to_ascii_lowercase();

    if options.procedural_fn_check && !tables::is_known_procedural_fn(&func) {
        issues.push(Issue::warning("unknown procedural function").with_path(&procedural.func));
    }
    if options.procedural_args_check && !procedural_args_ok(&func, procedural.args.len()) {
        issues.push(Issue::warning("unexpected procedural argument count").with_path(&procedural.func));
    }
    if options.texture_tag_check && func == "color" {
        let tag = match procedural.color() {
            Some(color) => color.tag.as_str(),
            None if procedural.args.len() == 5 => procedural.args[4].as_str(),
            None => "",
        };
        if !tag.is_empty() && !tables::is_known_texture_tag(tag) {
            issues.push(Issue::warning("unknown texture tag").with_path(tag));
        }
    }
    issues
}

/// Allowed argument counts per lowercase function name.
fn procedural_args_ok(func: &str, count: usize) -> bool {
    match func {
        "color" => count == 4 || count == 5,
        "fresnel" => count == 2,
        "fresnelglass" => count <= 2,
        "irradiance" => count == 1,
        _ => true,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Stage, UVTransform};
    use crate::texture::parse_texture_ref;
    use std::path::PathBuf;

    struct Missing;

    impl ResourceProbe for Missing {
        fn exists(&self, _: &Path) -> bool {
            false
        }
    }

    fn wired_stage(name: &str, texture: &str) -> Stage {
        let mut stage = Stage::new(name, parse_texture_ref(texture));
        stage.uv_source = "tex".to_string();
        stage.uv_transform = Some(UVTransform::identity());
        stage
    }

    fn messages(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn test_clean_material() {
        let mut material = Material {
            pixel_shader_id: "Super".to_string(),
            vertex_shader_id: "Super".to_string(),
            diffuse: vec![1.0; 4],
            ..Material::default()
        };
        material.stages.push(wired_stage("Stage1", "dz\\data\\x_nohq.paa"));
        assert!(validate(&material, &ValidateOptions::default()).is_empty());
    }

    #[test]
    fn test_shader_presence_and_names() {
        let mut material = Material {
            pixel_shader_id: "NotAShader".to_string(),
            ..Material::default()
        };
        material.stages.push(wired_stage("Stage1", "x.paa"));
        let issues = validate(&material, &ValidateOptions::default());
        assert_eq!(messages(&issues), ["VertexShaderID missing", "unknown PixelShaderID"]);
        assert_eq!(issues[1].path.as_deref(), Some("NotAShader"));

        let relaxed = ValidateOptions {
            shader_name_check: false,
            ..ValidateOptions::default()
        };
        assert_eq!(messages(&validate(&material, &relaxed)), ["VertexShaderID missing"]);
    }

    #[test]
    fn test_color_length() {
        let material = Material {
            ambient: vec![1.0, 1.0, 1.0],
            specular: vec![0.0; 4],
            ..Material::default()
        };
        let issues = validate(&material, &ValidateOptions::default());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(issues[0].path.as_deref(), Some("ambient"));
    }

    #[test]
    fn test_texture_extension_and_parent_dir() {
        let mut material = Material {
            pixel_shader_id: "Super".to_string(),
            vertex_shader_id: "Super".to_string(),
            ..Material::default()
        };
        material.stages.push(wired_stage("Stage1", "..\\data\\x.png"));
        material.stages.push(wired_stage("Stage2", "data\\y.PAA"));
        let issues = validate(&material, &ValidateOptions::default());
        assert_eq!(
            messages(&issues),
            ["unexpected texture extension", "texture path contains '..'"]
        );
    }

    #[test]
    fn test_missing_file_with_exclusions() {
        let mut material = Material {
            pixel_shader_id: "Super".to_string(),
            vertex_shader_id: "Super".to_string(),
            ..Material::default()
        };
        material.stages.push(wired_stage("Stage1", "dz\\data\\a_co.paa"));
        material.stages.push(wired_stage("Stage2", "mod\\data\\b_co.paa"));

        let options = ValidateOptions {
            exclude_paths: vec!["DZ/Data/*".to_string()],
            ..ValidateOptions::with_game_root("/game")
        };
        let issues = validate_with_probe(&material, &options, &Missing);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code.as_deref(), Some("missing_resource"));
        assert_eq!(issues[0].message, "texture file not found");
        assert_eq!(
            issues[0].path.as_deref().map(PathBuf::from),
            Some(PathBuf::from("/game/mod/data/b_co.paa"))
        );
    }

    #[test]
    fn test_file_check_needs_game_root() {
        let mut material = Material::default();
        material.stages.push(wired_stage("Stage1", "a_co.paa"));
        let options = ValidateOptions {
            file_check: Some(true),
            ..ValidateOptions::default()
        };
        let issues = validate_with_probe(&material, &options, &Missing);
        assert!(!issues.iter().any(|i| i.code.is_some()));
    }

    #[test]
    fn test_uv_wiring() {
        let mut material = Material {
            pixel_shader_id: "Super".to_string(),
            vertex_shader_id: "Super".to_string(),
            ..Material::default()
        };
        material.stages.push(Stage::new("Stage1", parse_texture_ref("a.paa")));
        let mut source_only = Stage::new("Stage2", parse_texture_ref("b.paa"));
        source_only.uv_source = "tex".to_string();
        material.stages.push(source_only);
        let mut transform_only = Stage::new("Stage3", parse_texture_ref("c.paa"));
        transform_only.uv_transform = Some(UVTransform::identity());
        material.stages.push(transform_only);
        material.stages.push(Stage::new("Stage0", parse_texture_ref("d.paa")));
        let mut world = Stage::new("Stage4", parse_texture_ref("e.paa"));
        world.uv_source = "WorldPos".to_string();
        material.stages.push(world);
        let mut generated = Stage::new("Stage5", parse_texture_ref("f.paa"));
        generated.texgen = "0".to_string();
        material.stages.push(generated);

        let issues = validate(&material, &ValidateOptions::default());
        let found: Vec<_> = issues
            .iter()
            .map(|i| (i.message.as_str(), i.path.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            found,
            [
                ("stage without texGen missing uvSource", "Stage1"),
                ("stage without texGen missing uvTransform", "Stage1"),
                ("stage without texGen missing uvTransform", "Stage2"),
            ]
        );
    }

    #[test]
    fn test_unknown_and_duplicate_stage_names() {
        let mut material = Material {
            pixel_shader_id: "Super".to_string(),
            vertex_shader_id: "Super".to_string(),
            ..Material::default()
        };
        material.stages.push(wired_stage("Stage1", "a.paa"));
        material.stages.push(wired_stage("StageX", "b.paa"));
        material.stages.push(wired_stage("Stage1", "c.paa"));
        material.stages.push(wired_stage("Stage1", "d.paa"));

        let issues = validate(&material, &ValidateOptions::default());
        assert_eq!(
            messages(&issues),
            ["unknown Stage name", "duplicate Stage name", "duplicate Stage name"]
        );
        assert!(issues[1].is_error() && issues[2].is_error());
    }

    #[test]
    fn test_texture_checks() {
        let options = TextureValidateOptions::default();

        let ok = parse_texture_ref("#(argb,8,8,3)color(0.5,0.5,0.5,1,CO)");
        assert!(validate_texture(&ok, &options).is_empty());

        let bad_tag = parse_texture_ref("#(argb,8,8,3)color(0.5,0.5,0.5,1,zz)");
        assert_eq!(messages(&validate_texture(&bad_tag, &options)), ["unknown texture tag"]);

        let undecoded_tag = parse_texture_ref("#(argb,8,8,3)color(x,0.5,0.5,1,zz)");
        assert_eq!(messages(&validate_texture(&undecoded_tag, &options)), ["unknown texture tag"]);

        let unknown = parse_texture_ref("#(ai,8,8,1)sparkle(1)");
        assert_eq!(messages(&validate_texture(&unknown, &options)), ["unknown procedural function"]);

        let args = parse_texture_ref("#(ai,64,64,1)fresnel(1.3)");
        assert_eq!(
            messages(&validate_texture(&args, &options)),
            ["unexpected procedural argument count"]
        );

        let broken = parse_texture_ref("#(argb,8,8)color(1,1,1,1)");
        assert_eq!(
            messages(&validate_texture(&broken, &options)),
            ["procedural texture parse failed"]
        );
        let off = TextureValidateOptions {
            procedural_fn_check: false,
            procedural_args_check: false,
            texture_tag_check: false,
        };
        assert!(validate_texture(&broken, &off).is_empty());

        assert!(validate_texture(&parse_texture_ref("a.paa"), &options).is_empty());
    }

    #[test]
    fn test_texture_issues_carry_stage() {
        let mut material = Material {
            pixel_shader_id: "Super".to_string(),
            vertex_shader_id: "Super".to_string(),
            ..Material::default()
        };
        material
            .stages
            .push(wired_stage("Stage1", "#(argb,8,8,3)color(1,1,1,1,zz)"));

        let base = validate_with_textures(&material, &ValidateOptions::default(), None);
        assert!(base.is_empty());

        let options = TextureValidateOptions::default();
        let issues = validate_with_textures(&material, &ValidateOptions::default(), Some(&options));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path.as_deref(), Some("Stage1: zz"));
    }

    #[test]
    fn test_extension_helpers() {
        assert!(has_texture_extension("a\\b.c\\x.tga"));
        assert!(!has_texture_extension("a\\b.paa\\x"));
        assert!(!has_texture_extension("noext"));
        assert!(is_excluded("dz\\A.paa", &["dz/a.paa".to_string()]));
        assert!(!is_excluded("dz\\A.paa", &[String::new()]));
    }
}
