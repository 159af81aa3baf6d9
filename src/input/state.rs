//! Button state and event polling
//!
//! `Controls` holds the four directional buttons the player controller reads.
//! `poll_events` turns macroquad's polled keyboard and mouse state into
//! discrete [`InputEvent`]s, one batch per frame.

use glam::Vec2;
use macroquad::input as mq;
use macroquad::window::{screen_height, screen_width};

use super::{InputEvent, Key, MouseButton};

/// One tracked button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    /// Press edges seen since the last reset
    pub downs: u8,
    pub pressed: bool,
}

impl Button {
    pub fn press(&mut self) {
        self.downs = self.downs.saturating_add(1);
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }
}

/// The four directional buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
}

impl Controls {
    /// Button bound to a key, if any.
    pub fn button_mut(&mut self, key: Key) -> Option<&mut Button> {
        match key {
            Key::A => Some(&mut self.left),
            Key::D => Some(&mut self.right),
            Key::W => Some(&mut self.up),
            Key::S => Some(&mut self.down),
            Key::Escape | Key::Other => None,
        }
    }

    /// -1 turning left, +1 turning right, 0 for neither or both.
    pub fn turn_axis(&self) -> f32 {
        match (self.left.pressed, self.right.pressed) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Clear the per-frame press counters. Held state is kept.
    pub fn reset_downs(&mut self) {
        self.left.downs = 0;
        self.right.downs = 0;
        self.up.downs = 0;
        self.down.downs = 0;
    }
}

const POLLED_KEYS: [(mq::KeyCode, Key); 5] = [
    (mq::KeyCode::A, Key::A),
    (mq::KeyCode::D, Key::D),
    (mq::KeyCode::W, Key::W),
    (mq::KeyCode::S, Key::S),
    (mq::KeyCode::Escape, Key::Escape),
];

const POLLED_BUTTONS: [(mq::MouseButton, MouseButton); 3] = [
    (mq::MouseButton::Left, MouseButton::Left),
    (mq::MouseButton::Right, MouseButton::Right),
    (mq::MouseButton::Middle, MouseButton::Middle),
];

/// Convert macroquad's frame mouse delta to a pixel motion.
///
/// `mouse_delta_position` reports `previous - current` in local coordinates,
/// where the window spans -1..1 on both axes. Motion events want
/// `current - previous` in pixels, +y down.
pub fn pixel_motion(local_delta: Vec2, screen: Vec2) -> Vec2 {
    -local_delta * screen * 0.5
}

/// This frame's input from macroquad, in key, button, motion order.
///
/// Motion comes from the frame delta rather than cursor positions, so it
/// keeps flowing while the cursor is grabbed.
pub fn poll_events() -> Vec<InputEvent> {
    let mut events = Vec::new();

    for (code, key) in POLLED_KEYS {
        if mq::is_key_pressed(code) {
            events.push(InputEvent::KeyDown(key));
        }
        if mq::is_key_released(code) {
            events.push(InputEvent::KeyUp(key));
        }
    }

    for (code, button) in POLLED_BUTTONS {
        if mq::is_mouse_button_pressed(code) {
            events.push(InputEvent::MouseButtonDown(button));
        }
    }

    let screen = Vec2::new(screen_width(), screen_height());
    let delta = pixel_motion(mq::mouse_delta_position(), screen);
    if delta != Vec2::ZERO {
        events.push(InputEvent::MouseMotion { delta });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges() {
        let mut button = Button::default();
        button.press();
        button.press();
        assert_eq!(button.downs, 2);
        assert!(button.pressed);

        button.release();
        assert!(!button.pressed);
        assert_eq!(button.downs, 2);
    }

    #[test]
    fn test_turn_axis() {
        let mut controls = Controls::default();
        assert_eq!(controls.turn_axis(), 0.0);

        controls.left.press();
        assert_eq!(controls.turn_axis(), -1.0);

        controls.right.press();
        assert_eq!(controls.turn_axis(), 0.0);

        controls.left.release();
        assert_eq!(controls.turn_axis(), 1.0);
    }

    #[test]
    fn test_pixel_motion_from_local_delta() {
        let screen = Vec2::new(800.0, 600.0);

        // Cursor moved 40 px right and 30 px down: local x grew by 0.1 and
        // local y by 0.1, so the reported previous-minus-current is negative.
        let motion = pixel_motion(Vec2::new(-0.1, -0.1), screen);
        assert!((motion - Vec2::new(40.0, 30.0)).length() < 1e-3);

        assert_eq!(pixel_motion(Vec2::ZERO, screen), Vec2::ZERO);
    }

    #[test]
    fn test_key_bindings_and_reset() {
        let mut controls = Controls::default();
        for key in [Key::A, Key::D, Key::W, Key::S] {
            controls.button_mut(key).unwrap().press();
        }
        assert!(controls.button_mut(Key::Escape).is_none());
        assert!(controls.down.pressed);

        controls.reset_downs();
        assert_eq!(controls.up.downs, 0);
        assert!(controls.up.pressed);
    }
}
