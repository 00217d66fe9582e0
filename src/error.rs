//! Error types for the Thistle engine
//!
//! The scene graph itself has no failure path: bad node indices are programming
//! errors and panic. Errors only surface from asset lookups and nested-scene
//! loading, which touch names and files supplied from outside.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of asset stored in the [`AssetRegistry`](crate::gfx::resources::AssetRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Mesh,
    Shader,
    Material,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            AssetKind::Mesh => "mesh",
            AssetKind::Shader => "shader",
            AssetKind::Material => "material",
        };
        f.write_str(kind)
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    /// The nested-scene file could not be read or parsed
    #[error("failed to load scene file '{}': {source}", .path.display())]
    SceneLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// A name lookup in the asset registry found nothing
    #[error("unknown {kind} asset '{name}'")]
    UnknownAsset { kind: AssetKind, name: String },

    /// The file parsed but produced no geometry to attach
    #[error("scene file '{}' contains no geometry", .0.display())]
    EmptyScene(PathBuf),
}

pub type Result<T> = std::result::Result<T, SceneError>;
