//! Collision & Consumption
//!
//! Runs in two phases so the entity store is never mutated while it is being
//! scanned:
//! 1. `detect_collisions` reads every fish and sorts the ones close enough to
//!    eat and the ones too far away to keep.
//! 2. `resolve_collisions` applies the outcomes: score, scare propagation and
//!    removal by handle.

use glam::Vec3;

use super::entity::Entity;
use super::event::{Events, FishDespawned, FishEaten};
use super::world::World;
use crate::config::{FishConfig, PlayerConfig};

/// Fish marked during the read pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollisionReport {
    pub eaten: Vec<Entity>,
    pub too_far: Vec<Entity>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.eaten.is_empty() && self.too_far.is_empty()
    }
}

/// Distance under which the player eats a fish. Grows with the score.
pub fn catch_radius(fish_point: u32, config: &PlayerConfig) -> f32 {
    config.catch_radius + fish_point as f32 * config.catch_radius_per_point
}

/// Read pass. A fish inside the catch radius is eaten even if it would
/// somehow also be past the despawn distance.
pub fn detect_collisions(
    world: &World,
    player_position: Vec3,
    fish_point: u32,
    fish_config: &FishConfig,
    player_config: &PlayerConfig,
) -> CollisionReport {
    let radius = catch_radius(fish_point, player_config);
    let mut report = CollisionReport::default();

    for (entity, _) in world.fish.iter() {
        let Some(position) = world.position(entity) else {
            continue;
        };
        let distance = position.distance(player_position);
        if distance < radius {
            report.eaten.push(entity);
        } else if distance > fish_config.despawn_distance {
            report.too_far.push(entity);
        }
    }
    report
}

/// Apply pass. Returns the points earned.
///
/// Each eaten fish scares every other live fish of its type within
/// `scare_radius` of where it was eaten, then is removed. Despawned fish are
/// removed afterwards with no score effect.
pub fn resolve_collisions(
    world: &mut World,
    report: &CollisionReport,
    config: &FishConfig,
    events: &mut Events,
) -> u32 {
    let mut points = 0;

    for &entity in &report.eaten {
        let (Some(fish), Some(position)) = (world.fish.get(entity).copied(), world.position(entity)) else {
            continue;
        };
        points += fish.size.points();

        let mut scared = 0;
        for (other, other_fish) in world.fish.iter_mut() {
            if other == entity || other_fish.fish_type != fish.fish_type {
                continue;
            }
            let Some(other_transform) = world.transforms.get(other) else {
                continue;
            };
            if other_transform.position.distance(position) < config.scare_radius {
                other_fish.scare(config.scare_duration);
                scared += 1;
            }
        }

        world.despawn(entity);
        log::debug!(
            "ate {:?} {:?} at {:?}, scared {} more",
            fish.size, fish.fish_type, position, scared
        );
        events.eaten.send(FishEaten {
            fish: entity,
            fish_type: fish.fish_type,
            size: fish.size,
            position,
            scared,
        });
    }

    for &entity in &report.too_far {
        let Some(position) = world.position(entity) else {
            continue;
        };
        if world.despawn(entity) {
            log::debug!("dropped {}, too far from the player", entity);
            events.despawned.send(FishDespawned { fish: entity, position });
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{FishSize, FishType};
    use crate::scene::{load_scene_from_str, MeshLibrary, DEFAULT_SCENE};
    use glam::Quat;

    fn library() -> MeshLibrary {
        let scene = load_scene_from_str(DEFAULT_SCENE).unwrap();
        MeshLibrary::new(scene.meshes).unwrap()
    }

    fn add(world: &mut World, lib: &MeshLibrary, pos: Vec3, fish_type: FishType, size: FishSize) -> Entity {
        world.spawn_fish(pos, Quat::IDENTITY, fish_type, size, lib)
    }

    #[test]
    fn test_catch_radius_grows_with_score() {
        let config = PlayerConfig::default();
        assert!((catch_radius(0, &config) - 0.4).abs() < 1e-6);
        assert!((catch_radius(10, &config) - 0.5).abs() < 1e-6);

        let mut last = catch_radius(0, &config);
        for points in 1..500 {
            let r = catch_radius(points, &config);
            assert!(r >= last);
            last = r;
        }
    }

    #[test]
    fn test_close_fish_is_eaten() {
        let lib = library();
        let mut world = World::new();
        let fish = add(&mut world, &lib, Vec3::new(0.3, 0.0, 0.0), FishType::Carp, FishSize::Small);

        let report = detect_collisions(&world, Vec3::ZERO, 0, &FishConfig::default(), &PlayerConfig::default());
        assert_eq!(report.eaten, vec![fish]);
        assert!(report.too_far.is_empty());
    }

    #[test]
    fn test_far_fish_is_dropped_without_score() {
        let lib = library();
        let mut world = World::new();
        let fish = add(&mut world, &lib, Vec3::new(25.0, 0.0, 0.0), FishType::Carp, FishSize::Large);
        let mut events = Events::new();

        let report = detect_collisions(&world, Vec3::ZERO, 0, &FishConfig::default(), &PlayerConfig::default());
        assert_eq!(report.too_far, vec![fish]);

        let points = resolve_collisions(&mut world, &report, &FishConfig::default(), &mut events);
        assert_eq!(points, 0);
        assert!(!world.is_alive(fish));
        assert_eq!(events.despawned.len(), 1);
    }

    #[test]
    fn test_mid_range_fish_is_left_alone() {
        let lib = library();
        let mut world = World::new();
        add(&mut world, &lib, Vec3::new(10.0, 0.0, 0.0), FishType::Carp, FishSize::Small);

        let report = detect_collisions(&world, Vec3::ZERO, 0, &FishConfig::default(), &PlayerConfig::default());
        assert!(report.is_empty());
    }

    #[test]
    fn test_eating_scores_size_and_scares_same_type() {
        let lib = library();
        let config = FishConfig::default();
        let mut world = World::new();
        let mut events = Events::new();

        let meal = add(&mut world, &lib, Vec3::new(0.2, 0.0, 0.0), FishType::Trout, FishSize::Medium);
        let near_same = add(&mut world, &lib, Vec3::new(5.0, 0.0, 0.0), FishType::Trout, FishSize::Small);
        let far_same = add(&mut world, &lib, Vec3::new(0.2, 12.0, 0.0), FishType::Trout, FishSize::Small);
        let near_other = add(&mut world, &lib, Vec3::new(3.0, 0.0, 0.0), FishType::Carp, FishSize::Small);

        // Already fleeing: the timer is reset, not extended.
        world.fish.get_mut(near_same).unwrap().scared_timer = 1.25;

        let report = detect_collisions(&world, Vec3::ZERO, 0, &config, &PlayerConfig::default());
        let points = resolve_collisions(&mut world, &report, &config, &mut events);

        assert_eq!(points, 2);
        assert!(!world.is_alive(meal));
        assert_eq!(world.fish.get(near_same).unwrap().scared_timer, 5.0);
        assert_eq!(world.fish.get(far_same).unwrap().scared_timer, 0.0);
        assert_eq!(world.fish.get(near_other).unwrap().scared_timer, 0.0);

        let eaten: Vec<_> = events.eaten.iter().collect();
        assert_eq!(eaten.len(), 1);
        assert_eq!(eaten[0].fish, meal);
        assert_eq!(eaten[0].scared, 1);
    }

    #[test]
    fn test_two_meals_in_one_frame() {
        let lib = library();
        let config = FishConfig::default();
        let mut world = World::new();
        let mut events = Events::new();

        let a = add(&mut world, &lib, Vec3::new(0.1, 0.0, 0.0), FishType::Perch, FishSize::Large);
        let b = add(&mut world, &lib, Vec3::new(0.0, 0.1, 0.0), FishType::Perch, FishSize::Small);

        let report = detect_collisions(&world, Vec3::ZERO, 0, &config, &PlayerConfig::default());
        let points = resolve_collisions(&mut world, &report, &config, &mut events);

        assert_eq!(points, 4);
        assert!(!world.is_alive(a));
        assert!(!world.is_alive(b));
        assert_eq!(world.fish_count(), 0);
    }

    #[test]
    fn test_removal_is_by_identity() {
        let lib = library();
        let config = FishConfig::default();
        let mut world = World::new();
        let mut events = Events::new();
        let pos = Vec3::new(30.0, 0.0, 0.0);

        let a = add(&mut world, &lib, pos, FishType::Carp, FishSize::Small);
        let b = add(&mut world, &lib, pos, FishType::Carp, FishSize::Small);

        let report = CollisionReport { eaten: Vec::new(), too_far: vec![a] };
        resolve_collisions(&mut world, &report, &config, &mut events);

        assert!(!world.is_alive(a));
        assert!(world.is_alive(b));
        assert_eq!(world.position(b), Some(pos));
    }

    #[test]
    fn test_stale_handles_are_ignored() {
        let lib = library();
        let config = FishConfig::default();
        let mut world = World::new();
        let mut events = Events::new();

        let a = add(&mut world, &lib, Vec3::ZERO, FishType::Carp, FishSize::Small);
        world.despawn(a);
        let reused = add(&mut world, &lib, Vec3::ZERO, FishType::Carp, FishSize::Small);

        let report = CollisionReport { eaten: vec![a], too_far: vec![a] };
        let points = resolve_collisions(&mut world, &report, &config, &mut events);

        assert_eq!(points, 0);
        assert!(world.is_alive(reused));
        assert!(events.eaten.is_empty());
    }
}
