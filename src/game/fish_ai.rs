//! Fish Behaviour
//!
//! Each fish is either fleeing (scared timer positive) or wandering. A
//! fleeing fish turns to face directly away from the player and swims off
//! horizontally at double speed. A wandering fish swims along its heading and
//! every so often picks a random yaw rate for one frame.

use glam::{Quat, Vec3};
use rand::Rng;

use super::components::Fish;
use super::transform::{Transform, FISH_FORWARD};
use super::world::World;
use crate::config::FishConfig;

/// Advance every fish by one frame.
pub fn update_fishes<R: Rng + ?Sized>(
    world: &mut World,
    player_position: Vec3,
    config: &FishConfig,
    rng: &mut R,
    elapsed: f32,
) {
    for (entity, fish) in world.fish.iter_mut() {
        let Some(transform) = world.transforms.get_mut(entity) else {
            continue;
        };
        step_fish(fish, transform, player_position, config, rng, elapsed);
    }
}

/// Advance a single fish.
pub fn step_fish<R: Rng + ?Sized>(
    fish: &mut Fish,
    transform: &mut Transform,
    player_position: Vec3,
    config: &FishConfig,
    rng: &mut R,
    elapsed: f32,
) {
    if fish.is_fleeing() {
        fish.scared_timer -= elapsed;
        flee(transform, player_position, config, elapsed);
    } else {
        wander(fish, transform, config, rng, elapsed);
    }
}

fn flee(transform: &mut Transform, player_position: Vec3, config: &FishConfig, elapsed: f32) {
    // Sitting exactly on the player leaves no direction to flee in.
    let Some(away) = (transform.position - player_position).try_normalize() else {
        return;
    };
    transform.rotation = Quat::from_rotation_arc(FISH_FORWARD, away);

    // Straight above or below the player: face away but stay put.
    if let Some(forward) = Vec3::new(away.x, away.y, 0.0).try_normalize() {
        transform.translate(forward * config.move_speed * config.flee_multiplier * elapsed);
    }
}

fn wander<R: Rng + ?Sized>(
    fish: &mut Fish,
    transform: &mut Transform,
    config: &FishConfig,
    rng: &mut R,
    elapsed: f32,
) {
    if fish.random_yaw_timer < 0.0 {
        fish.random_yaw_timer += rng.gen::<f32>() * config.yaw_retarget_max;
        let random_yaw: f32 = rng.gen_range(-2.0..=2.0);
        transform.yaw_world(random_yaw * config.max_yaw * elapsed);
    }
    let forward = transform.local_to_world_dir(FISH_FORWARD);
    transform.translate(forward * config.move_speed * elapsed);
    fish.random_yaw_timer -= elapsed;
}
