//! Discrete player input
//!
//! Keyboard presses and pointer/touch swipes both collapse into a single
//! pending [`InputAction`]. The slot is last-write-wins: anything that arrives
//! before the simulation consumes it simply replaces the previous action.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SWIPE_THRESHOLD;

/// A discrete player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputAction {
    #[default]
    None,
    Left,
    Right,
    /// Jump
    Up,
    /// Slide
    Down,
}

impl InputAction {
    /// Map a `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(InputAction::Left),
            "ArrowRight" | "d" | "D" => Some(InputAction::Right),
            "ArrowUp" | "w" | "W" | " " => Some(InputAction::Up),
            "ArrowDown" | "s" | "S" => Some(InputAction::Down),
            _ => None,
        }
    }

    /// Classify a drag from press to release (screen coordinates, +Y down)
    pub fn from_swipe(delta: Vec2, threshold: f32) -> Option<Self> {
        let (ax, ay) = (delta.x.abs(), delta.y.abs());
        if ax <= threshold && ay <= threshold {
            return None;
        }
        if ax > ay {
            Some(if delta.x < 0.0 {
                InputAction::Left
            } else {
                InputAction::Right
            })
        } else {
            // Screen Y grows downward, so an upward drag is negative
            Some(if delta.y < 0.0 {
                InputAction::Up
            } else {
                InputAction::Down
            })
        }
    }
}

/// Collects raw device events into one pending action
#[derive(Debug, Clone)]
pub struct InputSource {
    pending: InputAction,
    /// Where the current press started (None when no press is tracked)
    press_start: Option<Vec2>,
    swipe_threshold: f32,
}

impl Default for InputSource {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl InputSource {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            pending: InputAction::None,
            press_start: None,
            swipe_threshold,
        }
    }

    /// Handle a key press. Returns true if the key was recognised, in which
    /// case the caller should suppress the platform's default handling.
    pub fn key_down(&mut self, key: &str) -> bool {
        match InputAction::from_key(key) {
            Some(action) => {
                self.pending = action;
                true
            }
            None => false,
        }
    }

    /// Queue an action from a programmatic source (demo driver, test harness)
    pub fn submit(&mut self, action: InputAction) {
        self.pending = action;
    }

    /// Start tracking a mouse/touch press
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.press_start = Some(pos);
    }

    /// Finish a press; emits a swipe action if the drag was long enough
    pub fn pointer_up(&mut self, pos: Vec2) -> Option<InputAction> {
        let start = self.press_start.take()?;
        let action = InputAction::from_swipe(pos - start, self.swipe_threshold)?;
        self.pending = action;
        Some(action)
    }

    /// Abandon a press without emitting anything
    pub fn pointer_cancel(&mut self) {
        self.press_start = None;
    }

    /// The action waiting to be consumed
    #[inline]
    pub fn pending(&self) -> InputAction {
        self.pending
    }

    /// Consume the pending action, leaving `None` behind
    pub fn take(&mut self) -> InputAction {
        std::mem::take(&mut self.pending)
    }

    /// Clear the pending action and any tracked press
    pub fn reset(&mut self) {
        self.pending = InputAction::None;
        self.press_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputAction::from_key("ArrowLeft"), Some(InputAction::Left));
        assert_eq!(InputAction::from_key("a"), Some(InputAction::Left));
        assert_eq!(InputAction::from_key("D"), Some(InputAction::Right));
        assert_eq!(InputAction::from_key(" "), Some(InputAction::Up));
        assert_eq!(InputAction::from_key("w"), Some(InputAction::Up));
        assert_eq!(InputAction::from_key("ArrowDown"), Some(InputAction::Down));
        assert_eq!(InputAction::from_key("Escape"), None);
    }

    #[test]
    fn test_unrecognised_key_not_consumed() {
        let mut input = InputSource::default();
        input.key_down("ArrowLeft");
        assert!(!input.key_down("Tab"));
        assert_eq!(input.pending(), InputAction::Left);
    }

    #[test]
    fn test_last_write_wins() {
        let mut input = InputSource::default();
        assert!(input.key_down("ArrowLeft"));
        assert!(input.key_down("ArrowUp"));
        assert_eq!(input.take(), InputAction::Up);
        assert_eq!(input.pending(), InputAction::None);
        assert_eq!(input.take(), InputAction::None);
    }

    #[test]
    fn test_swipe_directions() {
        let mut input = InputSource::default();

        input.pointer_down(Vec2::new(200.0, 200.0));
        assert_eq!(input.pointer_up(Vec2::new(100.0, 220.0)), Some(InputAction::Left));

        input.pointer_down(Vec2::new(200.0, 200.0));
        assert_eq!(input.pointer_up(Vec2::new(300.0, 180.0)), Some(InputAction::Right));

        input.pointer_down(Vec2::new(200.0, 200.0));
        assert_eq!(input.pointer_up(Vec2::new(210.0, 100.0)), Some(InputAction::Up));

        input.pointer_down(Vec2::new(200.0, 200.0));
        assert_eq!(input.pointer_up(Vec2::new(190.0, 300.0)), Some(InputAction::Down));
        assert_eq!(input.pending(), InputAction::Down);
    }

    #[test]
    fn test_short_drag_emits_nothing() {
        let mut input = InputSource::default();
        input.pointer_down(Vec2::new(0.0, 0.0));
        assert_eq!(input.pointer_up(Vec2::new(30.0, -40.0)), None);
        assert_eq!(input.pending(), InputAction::None);
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut input = InputSource::default();
        assert_eq!(input.pointer_up(Vec2::new(500.0, 0.0)), None);

        // A cancelled press is forgotten too
        input.pointer_down(Vec2::ZERO);
        input.pointer_cancel();
        assert_eq!(input.pointer_up(Vec2::new(500.0, 0.0)), None);
    }

    #[test]
    fn test_submit_overwrites_pending() {
        let mut input = InputSource::default();
        input.key_down("ArrowLeft");
        input.submit(InputAction::Down);
        assert_eq!(input.take(), InputAction::Down);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut input = InputSource::default();
        input.key_down("s");
        input.pointer_down(Vec2::ZERO);
        input.reset();
        assert_eq!(input.pending(), InputAction::None);
        assert_eq!(input.pointer_up(Vec2::new(0.0, 500.0)), None);
    }
}
