//! Input handling
//!
//! Key/mouse events for the play mode, the directional button state they
//! drive, and the macroquad adapter that produces the events each frame.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
