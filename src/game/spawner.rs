//! Fish Spawner
//!
//! Keeps the bowl stocked. A cooldown timer queues a batch of fish whenever
//! it runs out, and the queue is drained in full every frame. New fish appear
//! in a square band around the player, never inside the dead zone right next
//! to it.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use super::components::{FishSize, FishType};
use super::event::{Events, FishSpawned};
use super::transform::UP;
use super::world::World;
use crate::config::SpawnConfig;
use crate::scene::MeshLibrary;

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Cooldown until the next batch is queued
    fish_spawn_timer: f32,
    /// Fish waiting to be created
    fish_to_add: u32,
}

impl Spawner {
    pub fn new(config: &SpawnConfig) -> Self {
        Self {
            fish_spawn_timer: 0.0,
            fish_to_add: config.initial_fish,
        }
    }

    #[cfg(test)]
    pub fn fish_spawn_timer(&self) -> f32 {
        self.fish_spawn_timer
    }

    #[cfg(test)]
    pub fn fish_to_add(&self) -> u32 {
        self.fish_to_add
    }

    /// Advance the cooldown. The expiry check looks at the timer *before*
    /// this frame's time is subtracted, so a batch is queued on the frame
    /// after the timer goes negative.
    pub fn tick(&mut self, elapsed: f32, config: &SpawnConfig) {
        if self.fish_spawn_timer < 0.0 {
            self.fish_to_add += config.batch_size;
            self.fish_spawn_timer += config.cooldown;
        }
        self.fish_spawn_timer -= elapsed;
    }

    /// Create every queued fish around `player_position`. Returns how many
    /// were created.
    pub fn drain<R: Rng + ?Sized>(
        &mut self,
        world: &mut World,
        player_position: Vec3,
        config: &SpawnConfig,
        meshes: &MeshLibrary,
        rng: &mut R,
        events: &mut Events,
    ) -> u32 {
        let count = self.fish_to_add;
        while self.fish_to_add > 0 {
            let position = roll_position(rng, player_position, config.range);
            let rotation = roll_rotation(rng);
            let size = roll_size(rng, config);
            let fish_type = roll_type(rng);

            let fish = world.spawn_fish(position, rotation, fish_type, size, meshes);
            events.spawned.send(FishSpawned { fish, fish_type, size, position });
            self.fish_to_add -= 1;
        }
        if count > 0 {
            log::debug!("spawned {} fish, {} in the bowl", count, world.fish_count());
        }
        count
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        world: &mut World,
        player_position: Vec3,
        config: &SpawnConfig,
        meshes: &MeshLibrary,
        rng: &mut R,
        events: &mut Events,
        elapsed: f32,
    ) -> u32 {
        self.tick(elapsed, config);
        self.drain(world, player_position, config, meshes, rng, events)
    }
}

/// Offset along one axis: `[-2R, -R)` or `[R, 2R)` with equal odds.
pub fn roll_offset<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    if rng.gen::<bool>() {
        rng.gen_range(-2.0 * range..-range)
    } else {
        rng.gen_range(range..2.0 * range)
    }
}

/// Spawn point on the water plane (`z = 0`) around the player.
pub fn roll_position<R: Rng + ?Sized>(rng: &mut R, player_position: Vec3, range: f32) -> Vec3 {
    let x = player_position.x + roll_offset(rng, range);
    let y = player_position.y + roll_offset(rng, range);
    Vec3::new(x, y, 0.0)
}

/// Uniform heading about the up axis.
pub fn roll_rotation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    Quat::from_axis_angle(UP, rng.gen_range(0.0..TAU))
}

/// Weighted size roll on a 0..100 scale: the first `large_percent` values
/// give a large fish, the next `medium_percent` a medium one.
pub fn roll_size<R: Rng + ?Sized>(rng: &mut R, config: &SpawnConfig) -> FishSize {
    let r = rng.gen_range(0..100);
    if r < config.large_percent {
        FishSize::Large
    } else if r < config.large_percent + config.medium_percent {
        FishSize::Medium
    } else {
        FishSize::Small
    }
}

pub fn roll_type<R: Rng + ?Sized>(rng: &mut R) -> FishType {
    FishType::ALL[rng.gen_range(0..FishType::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{load_scene_from_str, DEFAULT_SCENE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn library() -> MeshLibrary {
        let scene = load_scene_from_str(DEFAULT_SCENE).unwrap();
        MeshLibrary::new(scene.meshes).unwrap()
    }

    #[test]
    fn test_first_frames_follow_check_then_subtract() {
        let config = SpawnConfig::default();
        let lib = library();
        let mut world = World::new();
        let mut events = Events::new();
        let mut rng = StdRng::seed_from_u64(11);
        let mut spawner = Spawner::new(&config);
        assert_eq!(spawner.fish_to_add(), 10);

        // Timer starts at 0, which has not expired yet: only the initial ten.
        let created = spawner.update(&mut world, Vec3::ZERO, &config, &lib, &mut rng, &mut events, 0.1);
        assert_eq!(created, 10);
        assert!((spawner.fish_spawn_timer() + 0.1).abs() < 1e-6);

        // Now negative: queue a batch, add the cooldown, then subtract.
        let created = spawner.update(&mut world, Vec3::ZERO, &config, &lib, &mut rng, &mut events, 0.1);
        assert_eq!(created, 5);
        assert!((spawner.fish_spawn_timer() - 0.8).abs() < 1e-6);
        assert_eq!(spawner.fish_to_add(), 0);
        assert_eq!(world.fish_count(), 15);
        assert_eq!(events.spawned.len(), 15);
    }

    #[test]
    fn test_one_batch_per_cooldown() {
        let config = SpawnConfig::default();
        let lib = library();
        let mut world = World::new();
        let mut events = Events::new();
        let mut rng = StdRng::seed_from_u64(12);
        let mut spawner = Spawner::new(&config);

        // 0.25s frames: timer 0 -> -0.25 -> 0.5 -> 0.25 -> 0.0 -> -0.25 -> 0.5
        let created: Vec<u32> = (0..6)
            .map(|_| spawner.update(&mut world, Vec3::ZERO, &config, &lib, &mut rng, &mut events, 0.25))
            .collect();
        assert_eq!(created, vec![10, 5, 0, 0, 0, 5]);
    }

    #[test]
    fn test_new_fish_are_calm_and_on_the_water() {
        let config = SpawnConfig::default();
        let lib = library();
        let mut world = World::new();
        let mut events = Events::new();
        let mut rng = StdRng::seed_from_u64(13);
        let mut spawner = Spawner::new(&config);
        let player = Vec3::new(100.0, -40.0, 3.0);

        spawner.drain(&mut world, player, &config, &lib, &mut rng, &mut events);

        for (entity, fish) in world.fish.iter() {
            assert_eq!(fish.scared_timer, 0.0);
            let pos = world.position(entity).unwrap();
            assert_eq!(pos.z, 0.0);
            // Outside the dead zone around the player, inside the band.
            let (dx, dy) = (pos.x - player.x, pos.y - player.y);
            assert!(dx.abs() >= config.range - 1e-3 && dx.abs() <= 2.0 * config.range + 1e-3, "dx {}", dx);
            assert!(dy.abs() >= config.range - 1e-3 && dy.abs() <= 2.0 * config.range + 1e-3, "dy {}", dy);
            let heading = world.transforms.get(entity).unwrap().local_to_world_dir(Vec3::Y);
            assert!(heading.z.abs() < 1e-5);
        }
    }

    #[test]
    fn test_offsets_avoid_dead_zone() {
        let mut rng = StdRng::seed_from_u64(14);
        let range = 5.0;
        let (mut negative, mut positive) = (0, 0);

        for _ in 0..10_000 {
            let offset = roll_offset(&mut rng, range);
            assert!(!(-range..range).contains(&offset), "offset {} in dead zone", offset);
            assert!((-2.0 * range..2.0 * range).contains(&offset));
            if offset < 0.0 {
                negative += 1;
            } else {
                positive += 1;
            }
        }
        assert!(negative > 4_500 && positive > 4_500);
    }

    #[test]
    fn test_size_distribution() {
        let config = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(15);
        let samples = 20_000;
        let mut counts = [0u32; 3];

        for _ in 0..samples {
            match roll_size(&mut rng, &config) {
                FishSize::Small => counts[0] += 1,
                FishSize::Medium => counts[1] += 1,
                FishSize::Large => counts[2] += 1,
            }
        }

        let share = |n: u32| n as f32 / samples as f32;
        assert!((share(counts[0]) - 0.70).abs() < 0.03);
        assert!((share(counts[1]) - 0.20).abs() < 0.03);
        assert!((share(counts[2]) - 0.10).abs() < 0.03);
    }

    #[test]
    fn test_every_type_is_rolled() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            seen.insert(roll_type(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
