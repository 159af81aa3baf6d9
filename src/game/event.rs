//! Event System
//!
//! Systems report what happened in a frame through typed queues instead of
//! calling each other. The play mode clears every queue at the start of
//! `update`, so after an update the queues describe exactly that frame.

use glam::Vec3;
use super::components::{FishSize, FishType};
use super::entity::Entity;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All gameplay event queues.
#[derive(Debug, Default)]
pub struct Events {
    pub spawned: EventQueue<FishSpawned>,
    pub eaten: EventQueue<FishEaten>,
    pub despawned: EventQueue<FishDespawned>,
    pub session_ended: EventQueue<SessionEnded>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_all(&mut self) {
        self.spawned.clear();
        self.eaten.clear();
        self.despawned.clear();
        self.session_ended.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct FishSpawned {
    pub fish: Entity,
    pub fish_type: FishType,
    pub size: FishSize,
    pub position: Vec3,
}

/// The player ate a fish. The entity is already gone when this is read.
#[derive(Debug, Clone, Copy)]
pub struct FishEaten {
    pub fish: Entity,
    pub fish_type: FishType,
    pub size: FishSize,
    pub position: Vec3,
    /// Same-type fish that started fleeing because of this meal
    pub scared: usize,
}

/// A fish swam too far from the player and was dropped.
#[derive(Debug, Clone, Copy)]
pub struct FishDespawned {
    pub fish: Entity,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionEnded {
    pub final_score: u32,
}
