//! Lane Runner - an endless three-lane runner
//!
//! Core modules:
//! - `sim`: Simulation core (player kinematics, spawning, collisions, game state)
//! - `input`: Keyboard/gesture mapping into discrete actions
//! - `session`: Game session controller (status, restart, frame driving, timers)
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{InputAction, InputSource};
pub use session::{FrameClock, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Number of lanes (0 = left, 1 = center, 2 = right)
    pub const LANE_COUNT: u8 = 3;
    /// Lane the player starts in
    pub const CENTER_LANE: u8 = 1;

    /// Forward travel, units per second
    pub const FORWARD_SPEED: f32 = 8.0;
    /// Horizontal distance between lane centers
    pub const LANE_DISTANCE: f32 = 50.0;
    /// Blend rate for horizontal lane easing (per second)
    pub const LANE_CHANGE_SPEED: f32 = 10.0;
    /// Initial upward velocity of a jump
    pub const JUMP_FORCE: f32 = 100.0;
    /// Vertical acceleration, units/s²
    pub const GRAVITY: f32 = -300.0;
    /// Height considered "grounded"
    pub const GROUND_LEVEL: f32 = 0.0;

    /// Player dimensions
    pub const PLAYER_HEIGHT_NORMAL: f32 = 50.0;
    pub const PLAYER_HEIGHT_SLIDING: f32 = 20.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_DEPTH: f32 = 30.0;

    /// How long a slide lasts (seconds)
    pub const SLIDE_DURATION: f32 = 0.8;

    /// Distance ahead of the player (along +Z) where obstacles appear
    pub const SPAWN_DISTANCE_AHEAD: f32 = 500.0;
    /// Obstacles this far behind the player are culled
    pub const CULL_DISTANCE_BEHIND: f32 = 50.0;
    /// Spawn interval range (seconds)
    pub const MIN_SPAWN_INTERVAL: f32 = 0.8;
    pub const MAX_SPAWN_INTERVAL: f32 = 1.6;

    /// Obstacle dimensions
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_DEPTH: f32 = 40.0;
    pub const OBSTACLE_SHORT_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_TALL_HEIGHT: f32 = 80.0;

    /// Vertical slack when testing collisions
    pub const COLLISION_BUFFER_Y: f32 = 10.0;

    /// Score accrued per second survived
    pub const SCORE_PER_SECOND: f32 = 5.0;

    /// Camera offsets from the player, for presentation
    pub const CAMERA_OFFSET_Y: f32 = 150.0;
    pub const CAMERA_OFFSET_Z: f32 = 200.0;

    /// Minimum drag distance (pixels) for a swipe
    pub const SWIPE_THRESHOLD: f32 = 50.0;

    /// Delta used for the very first frame (no previous timestamp)
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;
}

/// Linear interpolation from `a` to `b` by `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Horizontal position of a lane's center
#[inline]
pub fn lane_center_x(lane: u8, lane_distance: f32) -> f32 {
    (lane as f32 - consts::CENTER_LANE as f32) * lane_distance
}
