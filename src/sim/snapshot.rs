//! Read-only render view of the game state

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{GameState, GameStatus, Obstacle, PlayerState};
use crate::tuning::Tuning;

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: PlayerState,
    /// Body height for the current posture
    pub player_height: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: f32,
    pub display_score: u64,
    pub status: GameStatus,
    /// Camera position trailing the player
    pub camera: Vec3,
}

impl Snapshot {
    pub fn capture(state: &GameState, tuning: &Tuning) -> Self {
        let player = state.player;
        Self {
            player,
            player_height: player.height(tuning),
            obstacles: state.obstacles.clone(),
            score: state.score,
            display_score: state.display_score(),
            status: state.status,
            camera: Vec3::new(
                0.0,
                player.pos.y + tuning.camera_offset_y,
                player.pos.z + tuning.camera_offset_z,
            ),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
