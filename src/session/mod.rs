//! Game session controller
//!
//! Owns everything that lives for the length of a run: the simulation state,
//! the input slot, the obstacle spawner, its RNG and the slide timer. An
//! external driver calls [`Session::frame`] once per animation frame; the
//! presentation layer reads [`Session::snapshot`] afterwards.

pub mod clock;
pub mod timer;

pub use clock::{FrameClock, sanitize_dt};
pub use timer::{DeferredTimer, TimerHandle};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::{InputAction, InputSource};
use crate::sim::{Autopilot, GameState, GameStatus, Snapshot, Spawner, TickOutcome, tick};
use crate::tuning::Tuning;

/// One player's game, from start through any number of restarts
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    tuning: Tuning,
    input: InputSource,
    spawner: Spawner,
    rng: Pcg32,
    /// Ends the current slide
    slide_timer: DeferredTimer,
    /// Whether frames are being scheduled
    running: bool,
}

impl Session {
    /// Start a run with the given tuning and spawn seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = Spawner::new(&mut rng, &tuning);
        log::info!("Session started with seed: {}", seed);
        Self {
            state: GameState::new(&tuning),
            input: InputSource::new(tuning.swipe_threshold),
            spawner,
            rng,
            slide_timer: DeferredTimer::new(),
            running: true,
            tuning,
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn slide_timer(&self) -> &DeferredTimer {
        &self.slide_timer
    }

    pub fn input(&self) -> &InputSource {
        &self.input
    }

    /// Device handlers write here
    pub fn input_mut(&mut self) -> &mut InputSource {
        &mut self.input
    }

    /// Advance one frame of `dt` seconds: slide timer, core tick, then spawner
    pub fn frame(&mut self, dt: f32) -> TickOutcome {
        let dt = sanitize_dt(dt, self.tuning.max_frame_dt);
        if !self.running || self.state.status != GameStatus::Playing {
            return TickOutcome::default();
        }

        if self.slide_timer.advance(dt).is_some() {
            self.state.player.sliding = false;
        }

        let action = self.input.take();
        let outcome = tick(&mut self.state, action, dt, &self.tuning);

        if outcome.slide_started() {
            self.slide_timer.schedule(self.tuning.slide_duration);
        }

        match outcome.collided_with {
            Some(obstacle_id) => self.game_over(obstacle_id),
            None => {
                self.spawner
                    .update(dt, &mut self.state, &mut self.rng, &self.tuning);
            }
        }

        outcome
    }

    /// Advance one frame with the autopilot choosing the action
    pub fn autopilot_frame(&mut self, pilot: &Autopilot, dt: f32) -> TickOutcome {
        let action = pilot.decide(&self.state, &self.tuning);
        if action != InputAction::None {
            self.input.submit(action);
        }
        self.frame(dt)
    }

    /// Start over: fresh player, no obstacles, zero score, playing
    pub fn restart(&mut self) {
        self.slide_timer.cancel();
        self.state = GameState::new(&self.tuning);
        self.spawner = Spawner::new(&mut self.rng, &self.tuning);
        self.input.reset();
        self.running = true;
        log::info!("Run restarted");
    }

    /// Halt frame scheduling. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Frame scheduling stopped");
        }
        self.running = false;
    }

    /// Collision ends the run; only restart leaves this state
    fn game_over(&mut self, obstacle_id: u32) {
        self.state.status = GameStatus::GameOver;
        self.stop();
        self.slide_timer.cancel();
        log::info!(
            "Game over: hit obstacle #{} at z={:.1}, score {}",
            obstacle_id,
            self.state.player.pos.z,
            self.state.display_score()
        );
    }

    /// Owned render view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.tuning)
    }
}
