//! Scene description and mesh lookup
//!
//! The fish bowl is described by a small RON file: a table of meshes, a list
//! of named transforms (some of which reference a mesh) and the cameras.
//! `SceneDesc::validate` checks everything the simulation later assumes, so
//! a scene that loads can always be played.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::components::FishType;
use crate::game::Transform;

/// The scene shipped with the game.
pub const DEFAULT_SCENE: &str = include_str!("../assets/fish.scene.ron");

/// Name of the transform the player controls.
pub const PLAYER_TRANSFORM: &str = "Player";

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("expecting scene to have exactly one camera, but it has {0}")]
    CameraCount(usize),
    #[error("scene has no transform named {0:?}")]
    MissingTransform(String),
    #[error("scene has no mesh named {0:?}")]
    MissingMesh(String),
    #[error("duplicate {kind} name {name:?}")]
    Duplicate { kind: &'static str, name: String },
}

// =============================================================================
// Meshes
// =============================================================================

/// Primitive the renderer uses to stand in for a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshShape {
    Cube,
    Sphere,
    Plane,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDesc {
    pub name: String,
    /// First vertex of the draw range
    pub start: u32,
    /// Vertex count of the draw range
    pub count: u32,
    pub shape: MeshShape,
    pub color: [u8; 4],
    /// Half-size before the entity's scale is applied
    pub extent: [f32; 3],
}

/// Index into a [`MeshLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshId(pub u32);

/// Name → mesh lookup built once from the scene.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: Vec<MeshDesc>,
    by_name: HashMap<String, MeshId>,
}

impl MeshLibrary {
    pub fn new(meshes: Vec<MeshDesc>) -> Result<Self, SceneError> {
        let mut by_name = HashMap::with_capacity(meshes.len());
        for (idx, mesh) in meshes.iter().enumerate() {
            if by_name.insert(mesh.name.clone(), MeshId(idx as u32)).is_some() {
                return Err(SceneError::Duplicate { kind: "mesh", name: mesh.name.clone() });
            }
        }
        Ok(Self { meshes, by_name })
    }

    pub fn lookup(&self, name: &str) -> Option<MeshId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: MeshId) -> Option<&MeshDesc> {
        self.meshes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }
}

// =============================================================================
// Scene description
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDesc {
    pub name: String,
    pub position: [f32; 3],
    /// Quaternion as (x, y, z, w)
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub mesh: Option<String>,
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl TransformDesc {
    pub fn to_transform(&self) -> Transform {
        Transform {
            position: Vec3::from_array(self.position),
            rotation: Quat::from_array(self.rotation).normalize(),
            scale: Vec3::from_array(self.scale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    /// Name of the transform the camera is attached to
    pub transform: String,
    #[serde(default = "default_fovy")]
    pub fovy_degrees: f32,
}

fn default_fovy() -> f32 {
    60.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    pub meshes: Vec<MeshDesc>,
    pub transforms: Vec<TransformDesc>,
    pub cameras: Vec<CameraDesc>,
}

impl SceneDesc {
    pub fn transform(&self, name: &str) -> Option<&TransformDesc> {
        self.transforms.iter().find(|t| t.name == name)
    }

    /// The scene's only camera. Fails unless there is exactly one.
    pub fn camera(&self) -> Result<&CameraDesc, SceneError> {
        match self.cameras.as_slice() {
            [camera] => Ok(camera),
            cameras => Err(SceneError::CameraCount(cameras.len())),
        }
    }

    /// Check every lookup the play mode performs after construction.
    pub fn validate(&self) -> Result<(), SceneError> {
        let camera = self.camera()?;

        let mut seen = std::collections::HashSet::new();
        for t in &self.transforms {
            if !seen.insert(t.name.as_str()) {
                return Err(SceneError::Duplicate { kind: "transform", name: t.name.clone() });
            }
        }

        for required in [PLAYER_TRANSFORM, camera.transform.as_str()] {
            if self.transform(required).is_none() {
                return Err(SceneError::MissingTransform(required.to_string()));
            }
        }

        let mesh_names = self.transforms.iter().filter_map(|t| t.mesh.clone());
        let fish_meshes = FishType::ALL.iter().map(|t| t.mesh_name());
        for name in mesh_names.chain(fish_meshes) {
            if !self.meshes.iter().any(|m| m.name == name) {
                return Err(SceneError::MissingMesh(name));
            }
        }
        Ok(())
    }
}

/// Parse and validate a scene from RON text.
pub fn load_scene_from_str(s: &str) -> Result<SceneDesc, SceneError> {
    let scene: SceneDesc = ron::from_str(s)?;
    scene.validate()?;
    Ok(scene)
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneDesc, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}
