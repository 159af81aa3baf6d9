//! Player Controller & Camera Rig
//!
//! The player turns about the up axis and swims forward; it never strafes or
//! changes depth. The camera is not simulated on its own: every frame its
//! pose is rebuilt from the player's pose and the offset it had when the
//! scene was loaded.

use glam::{Quat, Vec2, Vec3};

use super::transform::{Transform, PLAYER_FORWARD};
use crate::config::PlayerConfig;
use crate::input::Controls;

/// Apply one frame of turning and forward motion.
///
/// Turning right yaws by a negative angle about +Z, which is clockwise seen
/// from above.
pub fn move_player(transform: &mut Transform, controls: &Controls, config: &PlayerConfig, elapsed: f32) {
    let turn = controls.turn_axis();
    if turn != 0.0 {
        let yaw = turn * config.turn_speed_degrees.to_radians() * elapsed;
        transform.yaw_world(-yaw);
    }
    if controls.up.pressed {
        let forward = transform.local_to_world_dir(PLAYER_FORWARD);
        transform.translate(forward * config.speed * elapsed);
    }
}

/// Uniform scale for a given score.
pub fn player_scale(fish_point: u32, config: &PlayerConfig) -> f32 {
    1.0 + fish_point as f32 * config.growth_per_point
}

/// Camera pose relative to the player, fixed when the session starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// World-space position delta at capture time
    pub offset: Vec3,
    /// Rotation delta in the player's local frame
    pub relative_angle: Quat,
}

impl CameraRig {
    pub fn capture(player: &Transform, camera: &Transform) -> Self {
        Self {
            offset: camera.position - player.position,
            relative_angle: (player.rotation.inverse() * camera.rotation).normalize(),
        }
    }

    /// Overwrite the camera pose from the player pose.
    pub fn follow(&self, player: &Transform, camera: &mut Transform) {
        camera.rotation = (player.rotation * self.relative_angle).normalize();
        camera.position = player.position + player.rotation * self.offset;
    }
}

/// Free look: yaw about the camera's local Y, pitch about its local X.
/// `motion` is the pointer delta divided by the window height, with +y up.
pub fn mouse_look(camera: &mut Transform, motion: Vec2, fovy: f32) {
    camera.rotation = (camera.rotation
        * Quat::from_axis_angle(Vec3::Y, -motion.x * fovy)
        * Quat::from_axis_angle(Vec3::X, motion.y * fovy))
    .normalize();
}
