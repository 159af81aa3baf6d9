//! Entity Handles
//!
//! Every fish, the player, the camera and each scene prop is addressed by an
//! `Entity`: a slot index paired with a generation. Freeing a slot bumps its
//! generation, so a handle held across a despawn (for example a fish queued
//! for removal twice in one frame) can never alias the fish that later
//! reuses the slot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle to an entity in the [`World`](super::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    /// Handle that never refers to a live entity.
    pub const NULL: Entity = Entity { index: u32::MAX, generation: 0 };

    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, used to address component storage.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_null(&self) -> bool {
        self.index == u32::MAX
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::NULL
    }
}

/// `#index.generation`, as it appears in the logs.
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index(), self.generation())
    }
}

/// Hands out entity slots and tracks which handles are still alive.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Current generation of each slot
    generations: Vec<u32>,
    /// Freed slots, reused LIFO
    free_indices: Vec<u32>,
    alive_count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle, reusing a freed slot when one is available.
    pub fn allocate(&mut self) -> Entity {
        self.alive_count += 1;
        match self.free_indices.pop() {
            Some(index) => Entity::new(index, self.generations[index as usize]),
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                Entity::new(index, 0)
            }
        }
    }

    /// Release a handle. Returns false if it was already dead.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = &mut self.generations[entity.index as usize];
        *slot = slot.wrapping_add(1);
        self.free_indices.push(entity.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        if entity.is_null() {
            return false;
        }
        self.generations
            .get(entity.index as usize)
            .is_some_and(|&generation| generation == entity.generation)
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut alloc = EntityAllocator::new();

        let fish_a = alloc.allocate();
        let fish_b = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);

        assert!(alloc.free(fish_a));
        assert!(!alloc.free(fish_a), "double free must be rejected");
        assert_eq!(alloc.alive_count(), 1);
        assert!(!alloc.is_alive(fish_a));
        assert!(alloc.is_alive(fish_b));
    }

    #[test]
    fn test_reused_slot_gets_new_identity() {
        let mut alloc = EntityAllocator::new();

        let eaten = alloc.allocate();
        alloc.free(eaten);
        let spawned = alloc.allocate();

        assert_eq!(spawned.index(), eaten.index());
        assert_ne!(spawned, eaten);
        assert!(!alloc.is_alive(eaten));
        assert!(alloc.is_alive(spawned));
        assert_eq!(spawned.generation(), eaten.generation() + 1);
        assert_eq!(eaten.to_string(), "#0.0");
        assert_eq!(spawned.to_string(), "#0.1");
    }

    #[test]
    fn test_null_entity() {
        let alloc = EntityAllocator::new();
        assert!(!alloc.is_alive(Entity::NULL));
        assert!(Entity::default().is_null());
    }
}
