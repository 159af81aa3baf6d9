//! Play Mode
//!
//! Owns the world and every gameplay system, and runs them in a fixed order
//! once per frame:
//!
//! clock tick, fish movement, collision, spawning, player and camera, input
//! counter reset.
//!
//! Input events arrive between frames through [`PlayMode::handle_event`].

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::collision::{detect_collisions, resolve_collisions};
use super::entity::Entity;
use super::event::{Events, SessionEnded};
use super::fish_ai::update_fishes;
use super::player::{move_player, mouse_look, player_scale, CameraRig};
use super::session::{Session, SessionState};
use super::spawner::Spawner;
use super::transform::Transform;
use super::world::World;
use crate::config::GameConfig;
use crate::input::{Controls, InputEvent, Key};
use crate::scene::{MeshLibrary, SceneDesc, SceneError, PLAYER_TRANSFORM};

pub struct PlayMode {
    world: World,
    meshes: MeshLibrary,
    config: GameConfig,
    rng: StdRng,

    session: Session,
    spawner: Spawner,
    controls: Controls,
    events: Events,

    player: Entity,
    camera: Entity,
    rig: CameraRig,
    /// Vertical field of view, radians
    fovy: f32,
    mouse_captured: bool,
}

impl PlayMode {
    /// Build a play mode from a scene, seeding the RNG from `config.seed` or
    /// from OS entropy.
    pub fn new(scene: &SceneDesc, config: GameConfig) -> Result<Self, SceneError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(scene, config, rng)
    }

    pub fn with_rng(scene: &SceneDesc, config: GameConfig, rng: StdRng) -> Result<Self, SceneError> {
        scene.validate()?;
        let camera_desc = scene.camera()?;
        let meshes = MeshLibrary::new(scene.meshes.clone())?;

        let mut world = World::new();
        world.instantiate_scene(scene, &meshes);

        let player = world
            .find_by_name(PLAYER_TRANSFORM)
            .ok_or_else(|| SceneError::MissingTransform(PLAYER_TRANSFORM.to_string()))?;
        let camera = world
            .find_by_name(&camera_desc.transform)
            .ok_or_else(|| SceneError::MissingTransform(camera_desc.transform.clone()))?;

        let player_transform = world
            .transforms
            .get(player)
            .ok_or_else(|| SceneError::MissingTransform(PLAYER_TRANSFORM.to_string()))?;
        let camera_transform = world
            .transforms
            .get(camera)
            .ok_or_else(|| SceneError::MissingTransform(camera_desc.transform.clone()))?;
        let rig = CameraRig::capture(player_transform, camera_transform);

        log::info!(
            "session started: {:.0}s on the clock, {} fish queued",
            config.session.duration,
            config.spawn.initial_fish
        );

        Ok(Self {
            world,
            meshes,
            session: Session::new(config.session.duration),
            spawner: Spawner::new(&config.spawn),
            controls: Controls::default(),
            events: Events::new(),
            player,
            camera,
            rig,
            fovy: camera_desc.fovy_degrees.to_radians(),
            mouse_captured: false,
            config,
            rng,
        })
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Apply one input event. Returns true if the event was consumed.
    ///
    /// Ignored entirely once the session has ended. `window_size` is in
    /// pixels and scales mouse motion into view angles.
    pub fn handle_event(&mut self, event: &InputEvent, window_size: Vec2) -> bool {
        if !self.session.is_running() {
            return false;
        }

        match *event {
            InputEvent::KeyDown(Key::Escape) => {
                self.mouse_captured = false;
                true
            }
            InputEvent::KeyDown(key) => match self.controls.button_mut(key) {
                Some(button) => {
                    button.press();
                    true
                }
                None => false,
            },
            InputEvent::KeyUp(key) => match self.controls.button_mut(key) {
                Some(button) => {
                    button.release();
                    true
                }
                None => false,
            },
            // Consumed only when it grabs the mouse
            InputEvent::MouseButtonDown(_) => {
                let was_captured = self.mouse_captured;
                self.mouse_captured = true;
                !was_captured
            }
            InputEvent::MouseMotion { delta } => {
                if !self.mouse_captured || window_size.y <= 0.0 {
                    return false;
                }
                let motion = Vec2::new(delta.x / window_size.y, -delta.y / window_size.y);
                if let Some(camera) = self.world.transforms.get_mut(self.camera) {
                    mouse_look(camera, motion, self.fovy);
                }
                true
            }
        }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    pub fn update(&mut self, elapsed: f32) {
        self.events.clear_all();
        if !self.session.tick(elapsed) {
            return;
        }

        let player_position = self.player_position();

        update_fishes(&mut self.world, player_position, &self.config.fish, &mut self.rng, elapsed);

        let report = detect_collisions(
            &self.world,
            player_position,
            self.session.fish_point(),
            &self.config.fish,
            &self.config.player,
        );
        if !report.is_empty() {
            let points = resolve_collisions(&mut self.world, &report, &self.config.fish, &mut self.events);
            self.session.add_points(points);
        }

        self.spawner.update(
            &mut self.world,
            player_position,
            &self.config.spawn,
            &self.meshes,
            &mut self.rng,
            &mut self.events,
            elapsed,
        );

        self.update_player(elapsed);
        self.controls.reset_downs();

        if self.session.state() == SessionState::Ended {
            let final_score = self.session.fish_point();
            log::info!("time's up, final score {}", final_score);
            self.events.session_ended.send(SessionEnded { final_score });
        }
    }

    fn update_player(&mut self, elapsed: f32) {
        let scale = player_scale(self.session.fish_point(), &self.config.player);
        let Some(player) = self.world.transforms.get_mut(self.player) else {
            return;
        };
        move_player(player, &self.controls, &self.config.player, elapsed);
        player.scale = Vec3::splat(scale);
        let player = *player;

        if let Some(camera) = self.world.transforms.get_mut(self.camera) {
            self.rig.follow(&player, camera);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// What happened during the last `update`.
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn hud_line(&self) -> String {
        self.session.hud_line()
    }

    #[cfg(test)]
    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_position(&self) -> Vec3 {
        self.world.position(self.player).unwrap_or(Vec3::ZERO)
    }

    pub fn camera_transform(&self) -> Transform {
        self.world.transforms.get(self.camera).copied().unwrap_or(Transform::IDENTITY)
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn mouse_captured(&self) -> bool {
        self.mouse_captured
    }
}
