//! Game Module
//!
//! A small ECS-style core for the fish bowl:
//! - Entity: generational index, so a removed fish can never be confused
//!   with a new one in the same slot
//! - Component: plain data attached to entities
//! - World: every entity with its components
//! - Event: what happened during the last frame
//!
//! Systems are free functions over the world. [`PlayMode`] owns the world
//! and calls them in order once per frame.

pub mod entity;
pub mod component;
pub mod world;
pub mod event;
pub mod transform;
pub mod components;
pub mod fish_ai;
pub mod collision;
pub mod spawner;
pub mod player;
pub mod session;
pub mod runtime;
pub mod renderer;

pub use event::Events;
pub use runtime::PlayMode;
pub use transform::Transform;
