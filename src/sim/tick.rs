//! Variable timestep simulation tick
//!
//! Advances the runner by one real-time delta. Step order matters: each stage
//! reads what the previous one wrote.

use super::collision::find_collision;
use super::state::{GameEvent, GameState, GameStatus, PlayerState};
use crate::input::InputAction;
use crate::tuning::Tuning;
use crate::{lane_center_x, lerp};

/// What a tick produced besides the state mutation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Obstacle that ended the run, if any
    pub collided_with: Option<u32>,
    /// Presentation events in the order they happened
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    #[inline]
    pub fn game_over(&self) -> bool {
        self.collided_with.is_some()
    }

    /// A slide began this tick and needs its end scheduled
    pub fn slide_started(&self) -> bool {
        self.events.contains(&GameEvent::SlideStarted)
    }
}

/// Advance the game state by `dt` seconds, applying at most one action.
///
/// `dt` must be finite and non-negative; it is not clamped here, so a very
/// large delta can carry the player straight through an obstacle.
pub fn tick(state: &mut GameState, action: InputAction, dt: f32, tuning: &Tuning) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Don't tick unless a run is live
    if state.status != GameStatus::Playing {
        return outcome;
    }

    state.elapsed += dt;

    let player = &mut state.player;

    // Forward motion
    player.pos.z += tuning.forward_speed * dt;

    apply_action(player, action, tuning, &mut outcome.events);

    // Ease toward the lane center
    let target_x = lane_center_x(player.lane, tuning.lane_distance);
    player.pos.x = lerp(player.pos.x, target_x, (tuning.lane_change_speed * dt).min(1.0));

    integrate_vertical(player, dt, tuning, &mut outcome.events);

    // Cull obstacles that fell behind
    let cull_line = player.pos.z - tuning.cull_distance_behind;
    let before = state.obstacles.len();
    state.obstacles.retain(|obs| obs.z > cull_line);
    let culled = before - state.obstacles.len();
    if culled > 0 {
        log::debug!("Culled {} obstacle(s) behind z={:.1}", culled, cull_line);
        outcome.events.push(GameEvent::ObstaclesCulled { count: culled });
    }

    if let Some(hit) = find_collision(&state.player, &state.obstacles, tuning) {
        outcome.collided_with = Some(hit.id);
        outcome.events.push(GameEvent::Collision { obstacle_id: hit.id });
    }

    state.score += tuning.score_per_second * dt;

    outcome
}

/// Resolve one discrete action against the player
fn apply_action(
    player: &mut PlayerState,
    action: InputAction,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    match action {
        InputAction::None => {}
        InputAction::Left | InputAction::Right => {
            let from = player.lane;
            if action == InputAction::Left {
                player.shift_left();
            } else {
                player.shift_right();
            }
            if player.lane != from {
                events.push(GameEvent::LaneChanged {
                    from,
                    to: player.lane,
                });
            }
        }
        InputAction::Up => {
            if player.grounded {
                player.vertical_velocity = tuning.jump_force;
                player.grounded = false;
                events.push(GameEvent::Jumped);
            }
        }
        InputAction::Down => {
            // Ending the slide is scheduled by the session
            if player.grounded && !player.sliding {
                player.sliding = true;
                events.push(GameEvent::SlideStarted);
            }
        }
    }
}

/// Gravity, vertical motion and the ground clamp
fn integrate_vertical(
    player: &mut PlayerState,
    dt: f32,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let was_grounded = player.grounded;

    player.vertical_velocity += tuning.gravity * dt;
    player.pos.y += player.vertical_velocity * dt;

    if player.pos.y <= tuning.ground_level {
        player.pos.y = tuning.ground_level;
        if player.vertical_velocity < 0.0 {
            player.vertical_velocity = 0.0;
            player.grounded = true;
        }
    } else {
        player.grounded = false;
    }

    if player.grounded && !was_grounded {
        events.push(GameEvent::Landed);
    }
}
