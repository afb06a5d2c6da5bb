//! Material-level grammar: top-level fields, stages, texture generators and
//! `uvTransform` blocks.

use super::Parser;
use crate::ast::{AssignNode, Node};
use crate::error::Result;
use crate::lexer::TokenKind;
use crate::material::{Material, Stage, TexGen, UVTransform};
use crate::texture::TextureRef;
use config::constants::{DEFAULT_STAGE_NAME, DEFAULT_TEXGEN_NAME};
use log::trace;

impl Parser<'_> {
    /// Parse a whole material.
    ///
    /// ```text
    /// material := (topAssign | topClass)*
    /// ```
    pub(super) fn parse_material(&mut self) -> Result<Material> {
        let mut material = Material::default();
        loop {
            match self.peek_kind()? {
                TokenKind::Eof => return Ok(material),
                TokenKind::Class => self.parse_top_class(&mut material)?,
                _ => self.parse_top_assign(&mut material)?,
            }
        }
    }

    // =========================================================================
    // TOP LEVEL
    // =========================================================================

    /// Dispatch a top-level class to the stage, texgen or generic grammar.
    fn parse_top_class(&mut self, material: &mut Material) -> Result<()> {
        let (name, base) = self.parse_class_header()?;

        if base.is_empty() && self.has_prefix(&name, DEFAULT_STAGE_NAME) {
            trace!("class {} parsed as stage", name);
            let stage = self.parse_stage_body(name)?;
            material.stages.push(stage);
        } else if self.has_prefix(&name, DEFAULT_TEXGEN_NAME) {
            trace!("class {} parsed as texgen", name);
            let texgen = self.parse_texgen_body(name, base)?;
            material.texgens.push(texgen);
        } else {
            trace!("class {} kept as extra", name);
            let class = self.parse_class_body(name, base)?;
            material.extras.push(Node::Class(class));
        }
        Ok(())
    }

    fn parse_top_assign(&mut self, material: &mut Material) -> Result<()> {
        let (name, is_array) = self.parse_assign_head()?;

        if is_array {
            if let Some(slot) = self.color_slot(material, &name) {
                *slot = self.parse_number_array()?;
                return self.expect_semicolon();
            }
        } else if self.key_is(&name, "specularPower") {
            material.specular_power = Some(self.parse_number_value()?);
            return self.expect_semicolon();
        } else if self.key_is(&name, "PixelShaderID") {
            material.pixel_shader_id = self.parse_string_value()?;
            return self.expect_semicolon();
        } else if self.key_is(&name, "VertexShaderID") {
            material.vertex_shader_id = self.parse_string_value()?;
            return self.expect_semicolon();
        }

        let node = self.parse_assign_tail(name, is_array)?;
        material.extras.push(Node::Assign(node));
        Ok(())
    }

    /// Field receiving a top-level color array named `name`.
    fn color_slot<'m>(&self, material: &'m mut Material, name: &str) -> Option<&'m mut Vec<f64>> {
        if self.key_is(name, "ambient") {
            Some(&mut material.ambient)
        } else if self.key_is(name, "diffuse") {
            Some(&mut material.diffuse)
        } else if self.key_is(name, "forcedDiffuse") {
            Some(&mut material.forced_diffuse)
        } else if self.key_is(name, "emmisive") {
            Some(&mut material.emmisive)
        } else if self.key_is(name, "specular") {
            Some(&mut material.specular)
        } else {
            None
        }
    }

    // =========================================================================
    // STAGE
    // =========================================================================

    fn parse_stage_body(&mut self, name: String) -> Result<Stage> {
        self.expect(TokenKind::LBrace)?;
        let mut stage = Stage {
            name,
            ..Stage::default()
        };

        while !self.eat(TokenKind::RBrace)? {
            if self.peek_kind()? == TokenKind::Class {
                let (name, base) = self.parse_class_header()?;
                if let Some(uv) = self.parse_scoped_class(name, base, &mut stage.extras)? {
                    stage.uv_transform = Some(uv);
                }
                continue;
            }

            let (name, is_array) = self.parse_assign_head()?;
            if !is_array {
                if self.key_is(&name, "texture") {
                    stage.texture = TextureRef::parse(&self.parse_string_value()?);
                    self.expect_semicolon()?;
                    continue;
                }
                if self.key_is(&name, "uvSource") {
                    stage.uv_source = self.parse_string_value()?;
                    self.expect_semicolon()?;
                    continue;
                }
                if self.key_is(&name, "texGen") {
                    stage.texgen = self.parse_string_or_number_value()?;
                    self.expect_semicolon()?;
                    continue;
                }
            }
            let node = self.parse_assign_tail(name, is_array)?;
            stage.extras.push(Node::Assign(node));
        }

        self.expect_semicolon()?;
        Ok(stage)
    }

    // =========================================================================
    // TEXGEN
    // =========================================================================

    fn parse_texgen_body(&mut self, name: String, base: String) -> Result<TexGen> {
        self.expect(TokenKind::LBrace)?;
        let mut texgen = TexGen {
            name,
            base,
            ..TexGen::default()
        };

        while !self.eat(TokenKind::RBrace)? {
            if self.peek_kind()? == TokenKind::Class {
                let (name, base) = self.parse_class_header()?;
                if let Some(uv) = self.parse_scoped_class(name, base, &mut texgen.extras)? {
                    texgen.uv_transform = Some(uv);
                }
                continue;
            }

            let (name, is_array) = self.parse_assign_head()?;
            if !is_array && self.key_is(&name, "uvSource") {
                texgen.uv_source = self.parse_string_value()?;
                self.expect_semicolon()?;
                continue;
            }
            let node = self.parse_assign_tail(name, is_array)?;
            texgen.extras.push(Node::Assign(node));
        }

        self.expect_semicolon()?;
        Ok(texgen)
    }

    // =========================================================================
    // NESTED CLASSES
    // =========================================================================

    /// Parse a class nested in a stage or texgen body.
    ///
    /// A base-less `uvTransform` is returned; anything else is appended to
    /// `extras`.
    fn parse_scoped_class(
        &mut self,
        name: String,
        base: String,
        extras: &mut Vec<Node>,
    ) -> Result<Option<UVTransform>> {
        if base.is_empty() && self.key_is(&name, "uvTransform") {
            return self.parse_uv_transform_body().map(Some);
        }
        let class = self.parse_class_body(name, base)?;
        extras.push(Node::Class(class));
        Ok(None)
    }

    /// Parse a `uvTransform` body.
    ///
    /// Every entry is read as a numeric array (the `[]` suffix is optional).
    /// Keys other than `aside`, `up`, `dir` and `pos` are discarded here and
    /// do not survive a parse/format round trip.
    fn parse_uv_transform_body(&mut self) -> Result<UVTransform> {
        self.expect(TokenKind::LBrace)?;
        let mut uv = UVTransform::default();

        while !self.eat(TokenKind::RBrace)? {
            let (name, _) = self.parse_assign_head()?;
            let values = self.parse_number_array()?;

            if self.key_is(&name, "aside") {
                uv.aside = values;
            } else if self.key_is(&name, "up") {
                uv.up = values;
            } else if self.key_is(&name, "dir") {
                uv.dir = values;
            } else if self.key_is(&name, "pos") {
                uv.pos = values;
            } else {
                trace!("uvTransform entry {} dropped", name);
            }
            self.expect_semicolon()?;
        }

        self.expect_semicolon()?;
        Ok(uv)
    }

    /// Finish a generic assignment whose head has been consumed.
    fn parse_assign_tail(&mut self, name: String, is_array: bool) -> Result<AssignNode> {
        let value = self.parse_value()?;
        self.expect_semicolon()?;
        Ok(AssignNode::new(name, is_array, value))
    }
}
