//! Headless frame encoder
//!
//! [`CommandRecorder`] implements [`FrameEncoder`] by logging every call as a
//! [`DrawCommand`]. Demos use it in place of a device, and tests assert on the
//! recorded stream.

use super::traits::{FrameEncoder, UniformValue};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BindShader(String),
    SetUniform { name: String, value: UniformValue },
    DrawIndexed { mesh: String, index_count: u32 },
}

#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop everything recorded so far, typically at the start of a frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of draw commands issued
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::DrawIndexed { .. }))
            .count()
    }

    /// Labels of drawn meshes, in submission order
    pub fn drawn_meshes(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::DrawIndexed { mesh, .. } => Some(mesh.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Value of the last write to uniform `name` issued before the `draw_index`-th draw
    pub fn uniform_at_draw(&self, draw_index: usize, name: &str) -> Option<UniformValue> {
        let mut draws_seen = 0;
        let mut value = None;

        for command in &self.commands {
            match command {
                DrawCommand::SetUniform { name: n, value: v } if n == name => value = Some(*v),
                DrawCommand::DrawIndexed { .. } => {
                    if draws_seen == draw_index {
                        return value;
                    }
                    draws_seen += 1;
                }
                _ => {}
            }
        }

        None
    }
}

impl FrameEncoder for CommandRecorder {
    fn bind_shader(&mut self, shader: &str) {
        self.commands.push(DrawCommand::BindShader(shader.to_string()));
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.commands.push(DrawCommand::SetUniform {
            name: name.to_string(),
            value,
        });
    }

    fn draw_indexed(&mut self, mesh: &str, index_count: u32) {
        self.commands.push(DrawCommand::DrawIndexed {
            mesh: mesh.to_string(),
            index_count,
        });
    }
}
