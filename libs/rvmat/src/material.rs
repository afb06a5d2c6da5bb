//! # Material Model
//!
//! Typed representation of an RVMAT document. Known fields are normalized
//! into struct fields; everything else is kept in per-scope `extras` in
//! source order.
//!
//! ## Example
//!
//! ```rust
//! use rvmat::{Color, Material, Stage, TextureRef};
//!
//! let mut material = Material::default();
//! material.diffuse = Color::rgb(1.0, 1.0, 1.0).to_array();
//! material.stages.push(Stage::new("Stage1", TextureRef::parse("data\\x_nohq.paa")));
//! assert_eq!(material.stage("Stage1").map(|s| s.texture.raw.as_str()), Some("data\\x_nohq.paa"));
//! ```

use crate::ast::Node;
use crate::texture::TextureRef;
use serde::{Deserialize, Serialize};

// =============================================================================
// MATERIAL
// =============================================================================

/// A parsed material file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Vec<f64>,
    pub diffuse: Vec<f64>,
    pub forced_diffuse: Vec<f64>,
    /// Emissive color, spelled the way material files spell it.
    pub emmisive: Vec<f64>,
    pub specular: Vec<f64>,
    pub specular_power: Option<f64>,
    /// Empty when absent.
    pub pixel_shader_id: String,
    /// Empty when absent.
    pub vertex_shader_id: String,
    pub stages: Vec<Stage>,
    pub texgens: Vec<TexGen>,
    /// Unrecognized top-level nodes in source order.
    pub extras: Vec<Node>,
}

impl Material {
    /// Find a stage by exact name.
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// Find a texture generator by exact name.
    pub fn texgen(&self, name: &str) -> Option<&TexGen> {
        self.texgens.iter().find(|t| t.name == name)
    }

    /// Color fields paired with their canonical key, in emission order.
    pub fn color_fields(&self) -> [(&'static str, &[f64]); 5] {
        [
            ("ambient", self.ambient.as_slice()),
            ("diffuse", self.diffuse.as_slice()),
            ("forcedDiffuse", self.forced_diffuse.as_slice()),
            ("emmisive", self.emmisive.as_slice()),
            ("specular", self.specular.as_slice()),
        ]
    }
}

// =============================================================================
// STAGE
// =============================================================================

/// A `StageN` class.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub texture: TextureRef,
    /// Empty when absent.
    pub uv_source: String,
    /// Referenced texture generator, empty when absent.
    pub texgen: String,
    pub uv_transform: Option<UVTransform>,
    /// Unrecognized nodes inside the stage body.
    pub extras: Vec<Node>,
}

impl Stage {
    pub fn new(name: impl Into<String>, texture: TextureRef) -> Self {
        Self {
            name: name.into(),
            texture,
            ..Self::default()
        }
    }

    /// Whether UV wiring comes from a texture generator.
    pub fn uses_texgen(&self) -> bool {
        !self.texgen.is_empty()
    }
}

// =============================================================================
// TEXGEN
// =============================================================================

/// A `TexGenN` class.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TexGen {
    pub name: String,
    /// Base class, empty when absent.
    pub base: String,
    pub uv_source: String,
    pub uv_transform: Option<UVTransform>,
    pub extras: Vec<Node>,
}

impl TexGen {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// UV TRANSFORM
// =============================================================================

/// A `uvTransform` class: four 3-component vectors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UVTransform {
    pub aside: Vec<f64>,
    pub up: Vec<f64>,
    pub dir: Vec<f64>,
    pub pos: Vec<f64>,
}

impl UVTransform {
    /// The identity mapping most material files use.
    pub fn identity() -> Self {
        Self {
            aside: vec![1.0, 0.0, 0.0],
            up: vec![0.0, 1.0, 0.0],
            dir: vec![0.0, 0.0, 0.0],
            pos: vec![0.0, 0.0, 0.0],
        }
    }

    /// Vectors paired with their canonical key, in emission order.
    pub fn fields(&self) -> [(&'static str, &[f64]); 4] {
        [
            ("aside", self.aside.as_slice()),
            ("up", self.up.as_slice()),
            ("dir", self.dir.as_slice()),
            ("pos", self.pos.as_slice()),
        ]
    }
}

// =============================================================================
// TESTS
// =============================================================================
