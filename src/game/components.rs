//! Game Components
//!
//! Plain data attached to entities. Behaviour lives in the systems
//! (`fish_ai`, `collision`, `spawner`, `player`).

use serde::{Deserialize, Serialize};
use crate::scene::MeshId;

// =============================================================================
// Rendering
// =============================================================================

/// Anything the renderer draws. Fixed at creation: a fish never changes mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawable {
    pub mesh: MeshId,
}

/// Display name carried over from the scene file ("Player", "Water", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

// =============================================================================
// Fish
// =============================================================================

/// Cosmetic variant of a fish. Also the species used for scare propagation:
/// only fish of the same type take fright when one of them is eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishType {
    Carp,
    Perch,
    Trout,
}

impl FishType {
    pub const ALL: [FishType; 3] = [FishType::Carp, FishType::Perch, FishType::Trout];

    /// 1-based variant number, as used in mesh names.
    pub fn number(self) -> u8 {
        match self {
            FishType::Carp => 1,
            FishType::Perch => 2,
            FishType::Trout => 3,
        }
    }

    /// Mesh looked up when a fish of this type is created.
    pub fn mesh_name(self) -> String {
        format!("Fish{}", self.number())
    }
}

/// How big a fish is. Drives its scale and how many points it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FishSize {
    Small,
    Medium,
    Large,
}

impl FishSize {
    /// Score awarded for eating a fish of this size (1, 2 or 3).
    pub fn points(self) -> u32 {
        match self {
            FishSize::Small => 1,
            FishSize::Medium => 2,
            FishSize::Large => 3,
        }
    }

    /// Uniform render scale.
    pub fn scale(self) -> f32 {
        0.1 + self.points() as f32 * 0.1
    }
}

/// Per-fish gameplay state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub fish_type: FishType,
    pub size: FishSize,
    /// Fleeing while positive. Decremented without clamping.
    pub scared_timer: f32,
    /// Countdown to the next random heading change while wandering.
    pub random_yaw_timer: f32,
}

impl Fish {
    pub fn new(fish_type: FishType, size: FishSize) -> Self {
        Self {
            fish_type,
            size,
            scared_timer: 0.0,
            random_yaw_timer: 0.0,
        }
    }

    pub fn is_fleeing(&self) -> bool {
        self.scared_timer > 0.0
    }

    /// Start (or restart) fleeing. Resets rather than extends.
    pub fn scare(&mut self, duration: f32) {
        self.scared_timer = duration;
    }
}

// =============================================================================
// Markers
// =============================================================================

/// Marks the player entity
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Player;
