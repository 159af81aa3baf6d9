//! Game World
//!
//! The entity store: entity allocation plus one typed storage per component.
//! Component types are known up front, so they are plain fields rather than
//! a type-erased map.
//!
//! Scene props, the player, the camera and every fish all live here. Only
//! entities with a [`Fish`] component take part in gameplay.

use glam::{Quat, Vec3};

use super::component::ComponentStorage;
use super::components::{Drawable, Fish, FishSize, FishType, Name, Player};
use super::entity::{Entity, EntityAllocator};
use super::transform::Transform;
use crate::scene::{MeshLibrary, SceneDesc, PLAYER_TRANSFORM};

pub struct World {
    entities: EntityAllocator,

    pub transforms: ComponentStorage<Transform>,
    pub drawables: ComponentStorage<Drawable>,
    pub names: ComponentStorage<Name>,

    pub fish: ComponentStorage<Fish>,
    pub players: ComponentStorage<Player>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            transforms: ComponentStorage::new(),
            drawables: ComponentStorage::new(),
            names: ComponentStorage::new(),
            fish: ComponentStorage::new(),
            players: ComponentStorage::new(),
        }
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Spawn an entity with just a transform.
    pub fn spawn(&mut self, transform: Transform) -> Entity {
        let entity = self.entities.allocate();
        self.transforms.insert(entity, transform);
        entity
    }

    /// Remove an entity and all of its components. Returns false if the
    /// handle was already dead.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            return false;
        }
        self.transforms.remove(entity);
        self.drawables.remove(entity);
        self.names.remove(entity);
        self.fish.remove(entity);
        self.players.remove(entity);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.names
            .iter()
            .find(|(_, n)| n.0 == name)
            .map(|(entity, _)| entity)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.transforms.get(entity).map(|t| t.position)
    }

    // =========================================================================
    // Fish
    // =========================================================================

    /// Create a fish. Its mesh is chosen from `fish_type` here and never
    /// changes afterwards.
    ///
    /// The fish meshes are checked when the scene is validated, so a missing
    /// mesh only happens with a hand-built library; the fish is then created
    /// without a drawable.
    pub fn spawn_fish(
        &mut self,
        position: Vec3,
        rotation: Quat,
        fish_type: FishType,
        size: FishSize,
        meshes: &MeshLibrary,
    ) -> Entity {
        let transform = Transform::from_position_rotation(position, rotation)
            .with_uniform_scale(size.scale());
        let entity = self.spawn(transform);
        self.fish.insert(entity, Fish::new(fish_type, size));
        match meshes.lookup(&fish_type.mesh_name()) {
            Some(mesh) => self.drawables.insert(entity, Drawable { mesh }),
            None => log::error!("no mesh for {:?}, fish {:?} will be invisible", fish_type, entity),
        }
        entity
    }

    pub fn fish_count(&self) -> usize {
        self.fish.len()
    }

    /// Handles of every fish, for the read pass of a system.
    #[cfg(test)]
    pub fn fish_entities(&self) -> Vec<Entity> {
        self.fish.entities()
    }

    // =========================================================================
    // Scene
    // =========================================================================

    /// Create one entity per scene transform, attaching a drawable where the
    /// transform names a mesh. The player transform is tagged with [`Player`].
    pub fn instantiate_scene(&mut self, scene: &SceneDesc, meshes: &MeshLibrary) {
        for desc in &scene.transforms {
            let entity = self.spawn(desc.to_transform());
            self.names.insert(entity, Name(desc.name.clone()));
            if let Some(mesh) = desc.mesh.as_deref().and_then(|name| meshes.lookup(name)) {
                self.drawables.insert(entity, Drawable { mesh });
            }
            if desc.name == PLAYER_TRANSFORM {
                self.players.insert(entity, Player);
            }
        }
        log::info!(
            "scene loaded: {} entities, {} drawables, {} meshes",
            self.entity_count(),
            self.drawables.len(),
            meshes.len()
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
