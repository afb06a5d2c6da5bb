//! # Knowledge Tables
//!
//! Static name tables the validator checks material contents against.
//! Shader and stage names are matched exactly (the engine is case-sensitive
//! for them); procedural function names and texture tags are stored
//! lowercase and looked up after lowercasing.

use phf::{phf_set, Set};

// =============================================================================
// SHADERS
// =============================================================================

/// Pixel shader identifiers accepted by the engine's material loader.
pub static KNOWN_PIXEL_SHADER_IDS: Set<&'static str> = phf_set! {
    "Normal",
    "NormalDXTA",
    "NormalMap",
    "NormalMapThrough",
    "NormalMapGrass",
    "NormalMapDiffuse",
    "Detail",
    "Interpolation",
    "Water",
    "WaterSimple",
    "White",
    "WhiteAlpha",
    "AlphaShadow",
    "AlphaNoShadow",
    "Dummy0",
    "DetailMacroAS",
    "NormalMapMacroAS",
    "NormalMapDiffuseMacroAS",
    "NormalMapSpecularMap",
    "NormalMapDetailSpecularMap",
    "NormalMapMacroASSpecularMap",
    "NormalMapDetailMacroASSpecularMap",
    "NormalMapSpecularDIMap",
    "NormalMapDetailSpecularDIMap",
    "NormalMapMacroASSpecularDIMap",
    "NormalMapDetailMacroASSpecularDIMap",
    "Glass",
    "NonTL",
    "NormalMapSpecularThrough",
    "Grass",
    "NormalMapThroughSimple",
    "NormalMapSpecularThroughSimple",
    "Road",
    "Shore",
    "ShoreWet",
    "Road2Pass",
    "ShoreFoam",
    "NonTLFlare",
    "NormalMapThroughLowEnd",
    "Sprite",
    "SpriteSimple",
    "Cloud",
    "Horizon",
    "Super",
    "Multi",
    "Tree",
    "TreePRT",
    "TreeSimple",
    "Skin",
    "CalmWater",
    "TreeAToC",
    "GrassAToC",
    "TreeAdv",
    "TreeAdvSimple",
    "TreeAdvTrunk",
    "TreeAdvTrunkSimple",
    "TreeAdvAToC",
    "TreeAdvSimpleAToC",
    "TreeSN",
    "SpriteExtTi",
    "Hair",
    "Interior",
    "InteriorSimple",
    "Terrain",
    "TerrainSimple",
    "TerrainGrass",
    "Crater",
};

/// Vertex shader identifiers accepted by the engine's material loader.
pub static KNOWN_VERTEX_SHADER_IDS: Set<&'static str> = phf_set! {
    "Basic",
    "NormalMap",
    "NormalMapDiffuse",
    "Grass",
    "Dummy1",
    "Dummy2",
    "ShadowVolume",
    "Water",
    "WaterSimple",
    "Sprite",
    "Point",
    "NormalMapThrough",
    "Dummy3",
    "Terrain",
    "BasicAS",
    "NormalMapAS",
    "NormalMapDiffuseAS",
    "Glass",
    "NormalMapSpecularThrough",
    "NormalMapThroughNoFade",
    "NormalMapSpecularThroughNoFade",
    "Shore",
    "TerrainGrass",
    "Super",
    "Multi",
    "Tree",
    "TreeNoFade",
    "TreePRT",
    "TreePRTNoFade",
    "Skin",
    "CalmWater",
    "TreeAdv",
    "TreeAdvTrunk",
    "Hair",
    "Interior",
    "BasicFade",
};

// =============================================================================
// STAGES
// =============================================================================

/// Stage class names the engine binds to shader sampler slots.
pub static KNOWN_STAGE_NAMES: Set<&'static str> = phf_set! {
    "Stage0",
    "Stage1",
    "Stage2",
    "Stage3",
    "Stage4",
    "Stage5",
    "Stage6",
    "Stage7",
    "Stage8",
    "Stage9",
    "Stage10",
    "Stage11",
    "Stage12",
    "Stage13",
    "Stage14",
    "Stage15",
    "StageTI",
};

// =============================================================================
// PROCEDURAL TEXTURES
// =============================================================================

/// Procedural texture generator functions, lowercase.
pub static KNOWN_PROCEDURAL_FNS: Set<&'static str> = phf_set! {
    "color",
    "fresnel",
    "fresnelglass",
    "irradiance",
    "perlinnoise",
    "waterirradiance",
    "treecrown",
    "treecrownamb",
    "point",
};

/// Texture suffix tags understood by the texture converter, lowercase.
pub static KNOWN_TEXTURE_TAGS: Set<&'static str> = phf_set! {
    "co",
    "ca",
    "cdt",
    "dt",
    "dtsmdi",
    "mc",
    "mco",
    "lco",
    "lca",
    "sky",
    "no",
    "nohq",
    "nof",
    "nofhq",
    "nofex",
    "nopx",
    "non",
    "noex",
    "ns",
    "nshq",
    "nsex",
    "as",
    "ads",
    "sm",
    "smdi",
    "mask",
    "pr",
    "raw",
    "ti",
    "detail",
};

// =============================================================================
// LOOKUPS
// =============================================================================

/// Reports whether `id` is a known pixel shader identifier (exact match).
pub fn is_known_pixel_shader(id: &str) -> bool {
    KNOWN_PIXEL_SHADER_IDS.contains(id)
}

/// Reports whether `id` is a known vertex shader identifier (exact match).
pub fn is_known_vertex_shader(id: &str) -> bool {
    KNOWN_VERTEX_SHADER_IDS.contains(id)
}

/// Reports whether `name` is a known stage class name (exact match).
pub fn is_known_stage_name(name: &str) -> bool {
    KNOWN_STAGE_NAMES.contains(name)
}

/// Reports whether `name` is a known procedural function, ignoring case.
pub fn is_known_procedural_fn(name: &str) -> bool {
    KNOWN_PROCEDURAL_FNS.contains(name.to_ascii_lowercase().as_str())
}

/// Reports whether `tag` is a known texture tag, ignoring case.
pub fn is_known_texture_tag(tag: &str) -> bool {
    KNOWN_TEXTURE_TAGS.contains(tag.to_ascii_lowercase().as_str())
}
