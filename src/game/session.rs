//! Session Clock & Score
//!
//! One play-through: a countdown and the number of points scored. Once the
//! countdown goes negative the session is over for good and the play mode
//! stops simulating.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Timer is zero or more
    Running,
    /// Timer went negative; terminal
    Ended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    timer: f32,
    fish_point: u32,
}

impl Session {
    pub fn new(duration: f32) -> Self {
        Self { timer: duration, fish_point: 0 }
    }

    pub fn state(&self) -> SessionState {
        if self.timer < 0.0 {
            SessionState::Ended
        } else {
            SessionState::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    /// Seconds left. Negative once the session has ended.
    #[cfg(test)]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn fish_point(&self) -> u32 {
        self.fish_point
    }

    /// Count down by `elapsed`. Returns false, and leaves the timer alone, if
    /// the session had already ended; the caller must then skip the frame.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.timer -= elapsed;
        true
    }

    pub fn add_points(&mut self, points: u32) {
        self.fish_point += points;
    }

    /// The single HUD line.
    pub fn hud_line(&self) -> String {
        format!("Fish Eaten: {}      Time Left: {:.2}", self.fish_point, self.timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_to_end() {
        let mut session = Session::new(1.0);
        assert!(session.tick(0.5));
        assert!(session.tick(0.5));
        // Exactly zero is still running.
        assert_eq!(session.state(), SessionState::Running);

        assert!(session.tick(0.25));
        assert_eq!(session.state(), SessionState::Ended);
    }

    #[test]
    fn test_ended_session_is_frozen() {
        let mut session = Session::new(0.5);
        session.tick(1.0);
        let timer = session.timer();

        assert!(!session.tick(1.0));
        assert_eq!(session.timer(), timer);
        assert!(!session.is_running());
    }

    #[test]
    fn test_hud_line() {
        let mut session = Session::new(60.0);
        session.add_points(3);
        session.tick(1.5);
        assert_eq!(session.hud_line(), "Fish Eaten: 3      Time Left: 58.50");
    }
}
