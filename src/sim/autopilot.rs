//! Demo/attract-mode driver
//!
//! Looks a fixed distance down each lane. When something is coming in the
//! current lane it moves to a neighbouring lane that is clear over the whole
//! window. With no clear neighbour it slides under tall obstacles, holding
//! the slide for as long as the obstacle is in reach, and jumps at short ones.

use super::state::{GameState, GameStatus, ObstacleKind, PlayerState};
use crate::consts::LANE_COUNT;
use crate::input::InputAction;
use crate::tuning::Tuning;

/// Scripted player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// How far ahead of the player's front face to react (world units)
    pub look_ahead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { look_ahead: 60.0 }
    }
}

impl Autopilot {
    pub fn new(look_ahead: f32) -> Self {
        Self { look_ahead }
    }

    /// Choose the next action for the current state
    pub fn decide(&self, state: &GameState, tuning: &Tuning) -> InputAction {
        if state.status != GameStatus::Playing {
            return InputAction::None;
        }

        let player = &state.player;
        let Some((_, kind)) = self.nearest_threat(state, player.lane, tuning) else {
            return InputAction::None;
        };

        let open_lane = neighbours(player)
            .find(|&(_, lane)| self.nearest_threat(state, lane, tuning).is_none());
        if let Some((action, _)) = open_lane {
            return action;
        }

        if !player.grounded {
            return InputAction::None;
        }
        match kind {
            // Keep asking while already sliding: the slide can time out on
            // the very frame this action is applied
            ObstacleKind::Tall => InputAction::Down,
            ObstacleKind::Short => InputAction::Up,
        }
    }

    /// Distance to and kind of the closest obstacle in `lane` that the player
    /// has not yet passed, within the look-ahead window
    fn nearest_threat(
        &self,
        state: &GameState,
        lane: u8,
        tuning: &Tuning,
    ) -> Option<(f32, ObstacleKind)> {
        let player = &state.player;
        let back = player.pos.z - tuning.player_depth / 2.0;
        let front = player.pos.z + tuning.player_depth / 2.0;

        state
            .obstacles
            .iter()
            .filter(|obs| obs.lane == lane)
            .filter(|obs| obs.z + obs.depth() / 2.0 > back)
            .map(|obs| (((obs.z - obs.depth() / 2.0) - front).max(0.0), obs.kind))
            .filter(|(distance, _)| *distance <= self.look_ahead)
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}

fn neighbours(player: &PlayerState) -> impl Iterator<Item = (InputAction, u8)> {
    let left = (player.lane > 0).then(|| (InputAction::Left, player.lane - 1));
    let right = (player.lane + 1 < LANE_COUNT).then(|| (InputAction::Right, player.lane + 1));
    left.into_iter().chain(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        (GameState::new(&tuning), tuning)
    }

    #[test]
    fn test_clear_road_does_nothing() {
        let (mut state, tuning) = new_game();
        state.spawn_obstacle(1, 400.0, ObstacleKind::Short, &tuning);
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::None);
    }

    #[test]
    fn test_sidesteps_tall_when_neighbour_open() {
        let (mut state, tuning) = new_game();
        state.spawn_obstacle(1, 50.0, ObstacleKind::Tall, &tuning);
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::Left);
    }

    #[test]
    fn test_slides_under_tall_when_boxed_in() {
        let (mut state, tuning) = new_game();
        for lane in 0..LANE_COUNT {
            state.spawn_obstacle(lane, 50.0, ObstacleKind::Tall, &tuning);
        }
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::Down);

        // Still asks while sliding so the slide is renewed when it times out
        state.player.sliding = true;
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::Down);

        state.player.sliding = false;
        state.player.grounded = false;
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::None);
    }

    #[test]
    fn test_sidesteps_short_toward_open_lane() {
        let (mut state, tuning) = new_game();
        state.spawn_obstacle(1, 50.0, ObstacleKind::Short, &tuning);
        state.spawn_obstacle(0, 60.0, ObstacleKind::Short, &tuning);
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::Right);
    }

    #[test]
    fn test_edge_lane_only_has_one_neighbour() {
        let (mut state, tuning) = new_game();
        state.player.lane = 0;
        state.spawn_obstacle(0, 50.0, ObstacleKind::Short, &tuning);
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::Right);
    }

    #[test]
    fn test_jumps_when_boxed_in() {
        let (mut state, tuning) = new_game();
        for lane in 0..LANE_COUNT {
            state.spawn_obstacle(lane, 50.0, ObstacleKind::Short, &tuning);
        }
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::Up);
    }

    #[test]
    fn test_passed_obstacles_ignored() {
        let (mut state, tuning) = new_game();
        state.player.pos.z = 200.0;
        state.spawn_obstacle(1, 150.0, ObstacleKind::Short, &tuning);
        assert_eq!(Autopilot::default().decide(&state, &tuning), InputAction::None);
    }

    mod with_session {
        use crate::consts::LANE_COUNT;
        use crate::session::Session;
        use crate::sim::state::{GameEvent, ObstacleKind};
        use crate::sim::Autopilot;
        use crate::tuning::Tuning;

        const DT: f32 = 1.0 / 60.0;

        /// Drive until none of `ids` remain, or the run ends
        fn drive_past(session: &mut Session, ids: &[u32], max_frames: usize) -> Vec<GameEvent> {
            let pilot = Autopilot::default();
            let mut events = Vec::new();
            for _ in 0..max_frames {
                if !session.is_running()
                    || !session.state().obstacles.iter().any(|o| ids.contains(&o.id))
                {
                    break;
                }
                events.extend(session.autopilot_frame(&pilot, DT).events);
            }
            events
        }

        fn spawn_ahead(session: &mut Session, lane: u8, kind: ObstacleKind) -> u32 {
            let tuning = session.tuning().clone();
            session.state_mut().spawn_obstacle(lane, 100.0, kind, &tuning)
        }

        #[test]
        fn test_survives_tall_in_own_lane() {
            let mut session = Session::new(Tuning::default(), 1);
            let id = spawn_ahead(&mut session, 1, ObstacleKind::Tall);

            drive_past(&mut session, &[id], 3000);

            assert!(session.is_running(), "status {:?}", session.status());
            assert!(!session.state().obstacles.iter().any(|o| o.id == id));
            assert_ne!(session.state().player.lane, 1);
        }

        #[test]
        fn test_holds_slide_under_tall_wall() {
            let mut session = Session::new(Tuning::default(), 2);
            let ids: Vec<u32> = (0..LANE_COUNT)
                .map(|lane| spawn_ahead(&mut session, lane, ObstacleKind::Tall))
                .collect();

            let events = drive_past(&mut session, &ids, 3000);

            assert!(session.is_running(), "status {:?}", session.status());
            assert_eq!(session.state().player.lane, 1);
            // Passing a 70 unit overlap takes many back-to-back slides
            let slides = events
                .iter()
                .filter(|e| **e == GameEvent::SlideStarted)
                .count();
            assert!(slides > 5, "only {} slides", slides);
        }

        #[test]
        fn test_seeded_run_survives_sparse_traffic() {
            // Spawns at least 80 units apart: never more than one obstacle
            // beside the player at a time
            let tuning = Tuning {
                min_spawn_interval: 10.0,
                max_spawn_interval: 12.0,
                ..Tuning::default()
            };
            let mut session = Session::new(tuning, 0x5EED);
            let pilot = Autopilot::default();

            let mut culled = 0;
            for _ in 0..(240.0 / DT) as usize {
                let outcome = session.autopilot_frame(&pilot, DT);
                culled += outcome
                    .events
                    .iter()
                    .map(|e| match e {
                        GameEvent::ObstaclesCulled { count } => *count,
                        _ => 0,
                    })
                    .sum::<usize>();
                assert!(session.is_running(), "crashed at t={}", session.state().elapsed);
            }
            assert!(culled >= 5, "only {} obstacles passed", culled);
        }
    }
}
