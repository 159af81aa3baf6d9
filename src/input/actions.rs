//! Input event definitions
//!
//! The play mode never talks to the windowing layer directly. Whatever
//! drives the main loop translates its own input into these events and
//! hands them to `PlayMode::handle_event` between frames.

use glam::Vec2;

/// Keys the game reacts to. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Turn left
    A,
    /// Turn right
    D,
    /// Swim forward
    W,
    /// Tracked, currently unused
    S,
    /// Release the mouse
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseButtonDown(MouseButton),
    /// Relative pointer motion in pixels, +y pointing down the screen
    MouseMotion { delta: Vec2 },
}
