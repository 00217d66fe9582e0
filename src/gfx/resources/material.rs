//! Material system
//!
//! Provides PBR material definitions. Materials live in the
//! [`AssetRegistry`](super::AssetRegistry) and scene nodes reference them by id.

use cgmath::{Vector3, Vector4};

use crate::gfx::rendering::{FrameEncoder, Shader, UniformValue};

/// Material definition with PBR properties
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.0, 0.0, 0.0],
        }
    }
}

impl Material {
    /// Creates a new material with basic PBR properties
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            emissive: [0.0, 0.0, 0.0],
        }
    }

    /// Builds a material from an OBJ/MTL definition
    ///
    /// MTL has no metallic term; shininess (0..128) is mapped onto roughness.
    pub fn from_mtl(name: &str, mtl: &tobj::Material) -> Self {
        let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
        let shininess = mtl.shininess.unwrap_or(32.0);

        Self::new(
            name,
            [diffuse[0], diffuse[1], diffuse[2], mtl.dissolve.unwrap_or(1.0)],
            0.0,
            1.0 - (shininess / 128.0).clamp(0.0, 1.0),
        )
    }

    /// Builder pattern: Set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Writes the `u_material.*` uniform block through `shader`
    pub fn apply(&self, shader: &dyn Shader, frame: &mut dyn FrameEncoder) {
        shader.set_uniform_if_present(
            frame,
            "u_material.base_color",
            UniformValue::Vec4(Vector4::from(self.base_color)),
        );
        shader.set_uniform_if_present(frame, "u_material.metallic", UniformValue::Float(self.metallic));
        shader.set_uniform_if_present(frame, "u_material.roughness", UniformValue::Float(self.roughness));
        shader.set_uniform_if_present(
            frame,
            "u_material.emissive",
            UniformValue::Vec3(Vector3::from(self.emissive)),
        );
    }
}
