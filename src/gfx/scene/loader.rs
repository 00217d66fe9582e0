//! Nested scene loading
//!
//! A [`SceneLoader`] reads a scene file and grows a [`SceneGraph`] below an
//! attachment node, registering whatever geometry and materials it finds in the
//! [`AssetRegistry`]. [`ObjSceneLoader`] handles Wavefront OBJ files through `tobj`.

use std::path::Path;

use crate::error::{Result, SceneError};
use crate::gfx::{
    rendering::Mesh,
    resources::{AssetRegistry, Material, MaterialId, ShaderId},
};

use super::{node::NodeId, scene_graph::SceneGraph};

pub trait SceneLoader {
    /// Populates `graph` with the contents of `path` as descendants of `attach`
    ///
    /// Returns the number of nodes added.
    fn load_into(
        &self,
        path: &Path,
        registry: &mut AssetRegistry,
        graph: &mut SceneGraph,
        attach: NodeId,
    ) -> Result<usize>;
}

/// Loads every model of an OBJ file as one mesh node
pub struct ObjSceneLoader {
    shader: ShaderId,
}

impl ObjSceneLoader {
    /// Mesh nodes created by this loader are drawn with `shader`
    pub fn new(shader: ShaderId) -> Self {
        Self { shader }
    }

    /// Adds the file's materials to the registry, reusing any already registered by name
    fn register_materials(&self, materials: &[tobj::Material], registry: &mut AssetRegistry) -> Vec<MaterialId> {
        materials
            .iter()
            .enumerate()
            .map(|(i, mtl)| {
                let name = if mtl.name.is_empty() {
                    format!("material_{}", i)
                } else {
                    mtl.name.clone()
                };

                registry
                    .material_id(&name)
                    .unwrap_or_else(|_| registry.add_material(Material::from_mtl(&name, mtl)))
            })
            .collect()
    }
}

impl SceneLoader for ObjSceneLoader {
    fn load_into(
        &self,
        path: &Path,
        registry: &mut AssetRegistry,
        graph: &mut SceneGraph,
        attach: NodeId,
    ) -> Result<usize> {
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| SceneError::SceneLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let materials = materials.unwrap_or_else(|error| {
            log::warn!("no material library for '{}': {}", path.display(), error);
            Vec::new()
        });

        let models: Vec<_> = models
            .into_iter()
            .filter(|model| !model.mesh.positions.is_empty())
            .collect();
        if models.is_empty() {
            return Err(SceneError::EmptyScene(path.to_path_buf()));
        }

        let material_ids = self.register_materials(&materials, registry);
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());

        for (i, model) in models.iter().enumerate() {
            let mesh = &model.mesh;
            let name = if model.name.is_empty() {
                format!("model_{}", i)
            } else {
                model.name.clone()
            };

            let normals = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals.clone()
            } else {
                Mesh::calculate_face_normals(&mesh.positions, &mesh.indices)
            };

            let mesh_id = registry.add_mesh(Box::new(Mesh::new(
                format!("{}/{}", stem, name),
                mesh.positions.clone(),
                normals,
                mesh.indices.clone(),
            )));
            let node = graph.add_mesh_node(&name, attach, mesh_id, self.shader);

            if let Some(material) = mesh.material_id.filter(|&id| id < material_ids.len()) {
                graph.add_material_to_node(node, material_ids[material]);
                if let Some(diffuse) = materials[material].diffuse {
                    graph.add_color_to_node(node, diffuse);
                }
            }
        }

        Ok(models.len())
    }
}
