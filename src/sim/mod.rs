//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time enters only as an explicit `dt`
//! - Randomness only through a caller-supplied RNG
//! - Obstacles are kept in spawn order

pub mod autopilot;
pub mod collision;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Bounds, find_collision, player_hits_obstacle};
pub use snapshot::Snapshot;
pub use spawner::Spawner;
pub use state::{GameEvent, GameState, GameStatus, Obstacle, ObstacleKind, PlayerState};
pub use tick::{TickOutcome, tick};
