//! Transform Component
//!
//! Position, rotation and scale of an entity in world space. The fish bowl
//! scene is flat (no parenting), so there is only one tier of transform.
//!
//! Axis conventions: +Z is up. A fish swims along its local +Y axis, the
//! player faces along its local -X axis and the camera looks down its local
//! -Z axis.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World up axis.
pub const UP: Vec3 = Vec3::Z;

/// Local heading of a fish.
pub const FISH_FORWARD: Vec3 = Vec3::Y;

/// Local heading of the player.
pub const PLAYER_FORWARD: Vec3 = Vec3::NEG_X;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[cfg(test)]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation, ..Self::IDENTITY }
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Rotate a local-space direction into world space.
    pub fn local_to_world_dir(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Compose a world-frame yaw about [`UP`] on the left of the current
    /// rotation and renormalize.
    pub fn yaw_world(&mut self, angle: f32) {
        self.rotation = (Quat::from_axis_angle(UP, angle) * self.rotation).normalize();
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_yaw_world_rotates_about_up() {
        let mut t = Transform::IDENTITY;
        t.yaw_world(FRAC_PI_2);

        let heading = t.local_to_world_dir(FISH_FORWARD);
        assert!((heading - Vec3::NEG_X).length() < 0.001);
        assert!((t.rotation.length() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_yaw_is_composed_in_world_frame() {
        // Tilted about X first; a world-frame yaw must still turn about +Z.
        let mut t = Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_x(0.3));
        let before = t.local_to_world_dir(FISH_FORWARD);
        t.yaw_world(FRAC_PI_2);
        let after = t.local_to_world_dir(FISH_FORWARD);

        let expected = Quat::from_rotation_z(FRAC_PI_2) * before;
        assert!((after - expected).length() < 0.001);
    }
}
