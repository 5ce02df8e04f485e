//! Collision detection between the runner and obstacles
//!
//! Both bodies are treated as boxes: lanes are discrete so the horizontal axis
//! reduces to a lane comparison, leaving a Z interval (depth centered on the
//! forward position) and a Y interval (base to top) to overlap-test. A sliding
//! player gets a relaxed vertical rule against tall obstacles so it can pass
//! underneath.

use super::state::{Obstacle, ObstacleKind, PlayerState};
use crate::tuning::Tuning;

/// Extent of a body along the forward and vertical axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub back: f32,
    pub front: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Bounds {
    /// Player box for its current posture
    pub fn of_player(player: &PlayerState, tuning: &Tuning) -> Self {
        let half_depth = tuning.player_depth / 2.0;
        Self {
            back: player.pos.z - half_depth,
            front: player.pos.z + half_depth,
            bottom: player.pos.y,
            top: player.pos.y + player.height(tuning),
        }
    }

    pub fn of_obstacle(obstacle: &Obstacle) -> Self {
        let half_depth = obstacle.depth() / 2.0;
        Self {
            back: obstacle.z - half_depth,
            front: obstacle.z + half_depth,
            bottom: obstacle.vertical_base(),
            top: obstacle.top(),
        }
    }

    /// Strict overlap on the forward axis (touching faces do not count)
    #[inline]
    pub fn overlaps_z(&self, other: &Bounds) -> bool {
        self.front > other.back && self.back < other.front
    }
}

/// Does the player collide with this obstacle?
pub fn player_hits_obstacle(player: &PlayerState, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    if obstacle.lane != player.lane {
        return false;
    }

    let body = Bounds::of_player(player, tuning);
    let obs = Bounds::of_obstacle(obstacle);
    if !body.overlaps_z(&obs) {
        return false;
    }

    let buffer = tuning.collision_buffer_y;
    if player.sliding && obstacle.kind == ObstacleKind::Tall {
        // Pass-under: only clip the narrow band at the obstacle's underside
        let height = body.top - body.bottom;
        body.top > obs.top - height - buffer
    } else {
        body.top > obs.bottom + buffer && body.bottom < obs.top - buffer
    }
}

/// First obstacle (in spawn order) the player collides with
pub fn find_collision<'a>(
    player: &PlayerState,
    obstacles: &'a [Obstacle],
    tuning: &Tuning,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|obstacle| player_hits_obstacle(player, obstacle, tuning))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(kind: ObstacleKind, z: f32) -> (PlayerState, Obstacle, Tuning) {
        let tuning = Tuning::default();
        let player = PlayerState::new(tuning.ground_level);
        let obstacle = Obstacle::new(1, player.lane, z, kind, &tuning);
        (player, obstacle, tuning)
    }

    #[test]
    fn test_short_obstacle_hits_standing_player() {
        let (player, obstacle, tuning) = setup(ObstacleKind::Short, 0.0);
        assert!(player_hits_obstacle(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_short_obstacle_hits_sliding_player() {
        let (mut player, obstacle, tuning) = setup(ObstacleKind::Short, 0.0);
        player.sliding = true;
        assert!(player_hits_obstacle(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_slide_under_tall_obstacle() {
        let (mut player, obstacle, tuning) = setup(ObstacleKind::Tall, 0.0);
        assert!(player_hits_obstacle(&player, &obstacle, &tuning));

        player.sliding = true;
        // top 20 < 80 - 20 - 10
        assert!(!player_hits_obstacle(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_sliding_while_airborne_clips_tall_underside() {
        let (mut player, obstacle, tuning) = setup(ObstacleKind::Tall, 0.0);
        player.sliding = true;
        player.pos.y = 35.0; // top 55 > 50
        assert!(player_hits_obstacle(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_other_lane_never_hits() {
        let (mut player, obstacle, tuning) = setup(ObstacleKind::Tall, 0.0);
        player.lane = 0;
        assert!(!player_hits_obstacle(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_z_overlap_is_strict() {
        // Half depths 15 + 20: faces touch at distance 35
        let (player, obstacle, tuning) = setup(ObstacleKind::Short, 35.0);
        assert!(!player_hits_obstacle(&player, &obstacle, &tuning));

        let (player, obstacle, tuning) = setup(ObstacleKind::Short, 34.0);
        assert!(player_hits_obstacle(&player, &obstacle, &tuning));

        let (player, obstacle, tuning) = setup(ObstacleKind::Short, -34.0);
        assert!(player_hits_obstacle(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_high_enough_jump_clears_short_obstacle() {
        let (mut player, obstacle, tuning) = setup(ObstacleKind::Short, 0.0);
        // Bottom must reach top - buffer = 20
        player.pos.y = 19.0;
        assert!(player_hits_obstacle(&player, &obstacle, &tuning));
        player.pos.y = 20.0;
        assert!(!player_hits_obstacle(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_find_collision_returns_first_in_order() {
        let tuning = Tuning::default();
        let player = PlayerState::new(tuning.ground_level);
        let obstacles = vec![
            Obstacle::new(7, 0, 0.0, ObstacleKind::Short, &tuning),
            Obstacle::new(8, 1, 10.0, ObstacleKind::Short, &tuning),
            Obstacle::new(9, 1, -10.0, ObstacleKind::Tall, &tuning),
        ];
        let hit = find_collision(&player, &obstacles, &tuning).map(|o| o.id);
        assert_eq!(hit, Some(8));
    }
}
