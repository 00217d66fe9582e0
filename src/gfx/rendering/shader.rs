//! Shader program handles
//!
//! A [`ShaderProgram`] is the engine-side view of a compiled program: its name and
//! the uniforms it declares. Uniform writes for anything else are dropped, which
//! lets one traversal feed programs with different uniform subsets.

use std::collections::HashSet;

use super::traits::{FrameEncoder, Shader, UniformValue};

#[derive(Debug, Clone)]
pub struct ShaderProgram {
    name: String,
    uniforms: HashSet<String>,
}

impl ShaderProgram {
    /// Creates a program declaring the given uniforms
    pub fn new<I, S>(name: &str, uniforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            uniforms: uniforms.into_iter().map(Into::into).collect(),
        }
    }

    /// Lit program used for mesh nodes
    pub fn phong(name: &str) -> Self {
        Self::new(
            name,
            [
                "u_model",
                "u_mvp",
                "u_normal_matrix",
                "u_light_color",
                "u_light_position",
                "u_color",
                "u_material.base_color",
                "u_material.metallic",
                "u_material.roughness",
                "u_material.emissive",
            ],
        )
    }

    /// Unlit line program used for bounding box overlays
    pub fn debug_lines(name: &str) -> Self {
        Self::new(name, ["u_mvp", "u_color"])
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains(name)
    }
}

impl Shader for ShaderProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, frame: &mut dyn FrameEncoder) {
        frame.bind_shader(&self.name);
    }

    fn set_uniform_if_present(&self, frame: &mut dyn FrameEncoder, name: &str, value: UniformValue) {
        if self.has_uniform(name) {
            frame.set_uniform(name, value);
        } else {
            log::trace!("shader '{}' has no uniform '{}', skipped", self.name, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::{CommandRecorder, DrawCommand};

    #[test]
    fn test_unknown_uniform_is_ignored() {
        let shader = ShaderProgram::debug_lines("lines");
        let mut recorder = CommandRecorder::new();

        shader.bind(&mut recorder);
        shader.set_uniform_if_present(&mut recorder, "u_model", UniformValue::Float(1.0));
        shader.set_uniform_if_present(&mut recorder, "u_color", UniformValue::Float(2.0));

        assert_eq!(
            recorder.commands(),
            &[
                DrawCommand::BindShader("lines".to_string()),
                DrawCommand::SetUniform {
                    name: "u_color".to_string(),
                    value: UniformValue::Float(2.0),
                },
            ]
        );
    }

    #[test]
    fn test_phong_declares_material_block() {
        let shader = ShaderProgram::phong("phong");
        assert!(shader.has_uniform("u_material.roughness"));
        assert!(!shader.has_uniform("u_time"));
    }
}
