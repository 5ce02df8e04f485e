//! Game state and core simulation types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{CENTER_LANE, LANE_COUNT};
use crate::tuning::Tuning;

/// Overall status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay
    #[default]
    Playing,
    /// Run ended by a collision; terminal until restart
    GameOver,
    /// Reserved for external pause control; nothing in the crate enters it
    Paused,
}

/// The runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// x = horizontal, y = vertical, z = forward progress
    pub pos: Vec3,
    /// 0 = left, 1 = center, 2 = right
    pub lane: u8,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub sliding: bool,
}

impl PlayerState {
    pub fn new(ground_level: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, ground_level, 0.0),
            lane: CENTER_LANE,
            vertical_velocity: 0.0,
            grounded: true,
            sliding: false,
        }
    }

    /// Move one lane left; no-op at the leftmost lane
    pub fn shift_left(&mut self) {
        self.lane = self.lane.saturating_sub(1);
    }

    /// Move one lane right; no-op at the rightmost lane
    pub fn shift_right(&mut self) {
        self.lane = (self.lane + 1).min(LANE_COUNT - 1);
    }

    /// Current body height (sliding crouches)
    #[inline]
    pub fn height(&self, tuning: &Tuning) -> f32 {
        tuning.player_height(self.sliding)
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low barrier; cannot be slid under
    Short,
    /// High barrier; a sliding player passes beneath
    Tall,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Short, ObstacleKind::Tall];

    pub fn height(self, tuning: &Tuning) -> f32 {
        match self {
            ObstacleKind::Short => tuning.obstacle_short_height,
            ObstacleKind::Tall => tuning.obstacle_tall_height,
        }
    }
}

/// An obstacle sitting on the ground in one lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Correlation id for renderers; unique within a run
    pub id: u32,
    pub lane: u8,
    /// Forward position, fixed at spawn
    pub z: f32,
    pub kind: ObstacleKind,
    /// width, height, depth
    pub size: Vec3,
    /// Always the ground level: obstacles never float
    base_y: f32,
}

impl Obstacle {
    pub fn new(id: u32, lane: u8, z: f32, kind: ObstacleKind, tuning: &Tuning) -> Self {
        Self {
            id,
            lane: lane.min(LANE_COUNT - 1),
            z,
            kind,
            size: Vec3::new(
                tuning.obstacle_width,
                kind.height(tuning),
                tuning.obstacle_depth,
            ),
            base_y: tuning.ground_level,
        }
    }

    #[inline]
    pub fn vertical_base(&self) -> f32 {
        self.base_y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.base_y + self.size.y
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.size.z
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerState,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: f32,
    pub status: GameStatus,
    /// Seconds of play in this run
    pub elapsed: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh run: centered grounded player, no obstacles, zero score
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: PlayerState::new(tuning.ground_level),
            obstacles: Vec::new(),
            score: 0.0,
            status: GameStatus::Playing,
            elapsed: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an obstacle of `kind` in `lane` at forward position `z`
    pub fn spawn_obstacle(&mut self, lane: u8, z: f32, kind: ObstacleKind, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, lane, z, kind, tuning));
        id
    }

    /// Score as shown to the player
    #[inline]
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }
}

/// Things that happened during a tick, for presentation hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LaneChanged { from: u8, to: u8 },
    Jumped,
    Landed,
    SlideStarted,
    ObstaclesCulled { count: usize },
    Collision { obstacle_id: u32 },
}
