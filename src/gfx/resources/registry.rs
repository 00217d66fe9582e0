//! Asset registry
//!
//! One explicit registry owns every mesh, shader and material of the application.
//! It is built at startup and handed by reference to whatever needs lookups; scene
//! graphs only ever store the ids it returns, so it must outlive them.

use std::collections::HashMap;

use crate::error::{AssetKind, Result, SceneError};
use crate::gfx::{
    geometry::generate_wire_cube,
    rendering::{Drawable, Mesh, Shader, ShaderProgram},
};

use super::material::Material;

/// Index of a mesh in the [`AssetRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Index of a shader in the [`AssetRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub usize);

/// Index of a material in the [`AssetRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

pub const DEBUG_SHADER_NAME: &str = "debug_lines";
pub const WIRE_CUBE_NAME: &str = "wire_cube";

pub struct AssetRegistry {
    meshes: Vec<Box<dyn Drawable>>,
    mesh_names: HashMap<String, MeshId>,
    shaders: Vec<Box<dyn Shader>>,
    shader_names: HashMap<String, ShaderId>,
    materials: Vec<Material>,
    material_names: HashMap<String, MaterialId>,
    debug_shader: ShaderId,
    wire_cube: MeshId,
}

impl AssetRegistry {
    /// Creates a registry holding the built-in debug assets and the default material
    pub fn new() -> Self {
        let mut registry = Self {
            meshes: Vec::new(),
            mesh_names: HashMap::new(),
            shaders: Vec::new(),
            shader_names: HashMap::new(),
            materials: Vec::new(),
            material_names: HashMap::new(),
            debug_shader: ShaderId(0),
            wire_cube: MeshId(0),
        };

        registry.debug_shader =
            registry.add_shader(Box::new(ShaderProgram::debug_lines(DEBUG_SHADER_NAME)));
        registry.wire_cube = registry.add_mesh(Box::new(Mesh::from_geometry(
            WIRE_CUBE_NAME,
            &generate_wire_cube(),
        )));
        registry.add_material(Material::default());

        registry
    }

    /// Registers a drawable under its label
    ///
    /// Registering a second drawable with the same label keeps both entries; name
    /// lookups resolve to the newest one.
    pub fn add_mesh(&mut self, mesh: Box<dyn Drawable>) -> MeshId {
        let id = MeshId(self.meshes.len());
        self.mesh_names.insert(mesh.label().to_string(), id);
        self.meshes.push(mesh);
        log::debug!("registered mesh {:?} as '{}'", id, self.meshes[id.0].label());
        id
    }

    pub fn add_shader(&mut self, shader: Box<dyn Shader>) -> ShaderId {
        let id = ShaderId(self.shaders.len());
        self.shader_names.insert(shader.name().to_string(), id);
        self.shaders.push(shader);
        id
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.material_names.insert(material.name.clone(), id);
        self.materials.push(material);
        id
    }

    /// Panics if `id` was not issued by this registry
    pub fn mesh(&self, id: MeshId) -> &dyn Drawable {
        self.meshes[id.0].as_ref()
    }

    pub fn shader(&self, id: ShaderId) -> &dyn Shader {
        self.shaders[id.0].as_ref()
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn material_mut(&mut self, id: MaterialId) -> &mut Material {
        &mut self.materials[id.0]
    }

    pub fn mesh_id(&self, name: &str) -> Result<MeshId> {
        self.mesh_names
            .get(name)
            .copied()
            .ok_or_else(|| unknown(AssetKind::Mesh, name))
    }

    pub fn shader_id(&self, name: &str) -> Result<ShaderId> {
        self.shader_names
            .get(name)
            .copied()
            .ok_or_else(|| unknown(AssetKind::Shader, name))
    }

    pub fn material_id(&self, name: &str) -> Result<MaterialId> {
        self.material_names
            .get(name)
            .copied()
            .ok_or_else(|| unknown(AssetKind::Material, name))
    }

    /// Program used for bounding box overlays
    pub fn debug_shader(&self) -> ShaderId {
        self.debug_shader
    }

    /// `[-1, 1]^3` line cube used for bounding box overlays
    pub fn wire_cube(&self) -> MeshId {
        self.wire_cube
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Lists all material names
    pub fn list_materials(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.name.as_str()).collect()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown(kind: AssetKind, name: &str) -> SceneError {
    SceneError::UnknownAsset {
        kind,
        name: name.to_string(),
    }
}
