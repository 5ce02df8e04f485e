//! Procedural obstacle spawning
//!
//! A millisecond countdown independent of the tick: each time it runs out one
//! obstacle appears ahead of the player in a random lane, and the countdown is
//! re-drawn from the configured interval range.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, GameStatus, ObstacleKind};
use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// Countdown-driven obstacle generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Milliseconds until the next spawn
    countdown_ms: f32,
}

impl Spawner {
    /// New spawner with a freshly drawn first interval
    pub fn new(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        Self {
            countdown_ms: Self::draw_interval_ms(rng, tuning),
        }
    }

    #[inline]
    pub fn countdown_ms(&self) -> f32 {
        self.countdown_ms
    }

    /// Uniform draw from the spawn interval range, in milliseconds
    pub fn draw_interval_ms(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
        let min = tuning.min_spawn_interval * 1000.0;
        let max = tuning.max_spawn_interval * 1000.0;
        if max > min {
            rng.random_range(min..=max)
        } else {
            min
        }
    }

    /// Count down by `dt` seconds; spawns at most one obstacle when the
    /// countdown elapses. Returns the new obstacle's id.
    pub fn update(
        &mut self,
        dt: f32,
        state: &mut GameState,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) -> Option<u32> {
        if state.status != GameStatus::Playing {
            return None;
        }

        self.countdown_ms -= dt * 1000.0;
        if self.countdown_ms > 0.0 {
            return None;
        }

        let lane = rng.random_range(0..LANE_COUNT);
        let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
        let z = state.player.pos.z + tuning.spawn_distance_ahead;
        let id = state.spawn_obstacle(lane, z, kind, tuning);

        self.countdown_ms = Self::draw_interval_ms(rng, tuning);
        log::debug!(
            "Spawned {:?} obstacle #{} in lane {} at z={:.1}, next in {:.0}ms",
            kind,
            id,
            lane,
            z,
            self.countdown_ms
        );

        Some(id)
    }
}
