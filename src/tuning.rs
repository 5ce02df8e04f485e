//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from a JSON document. Missing
//! fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player motion ===
    pub forward_speed: f32,
    pub lane_distance: f32,
    pub lane_change_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub ground_level: f32,
    pub slide_duration: f32,

    // === Player body ===
    pub player_height_normal: f32,
    pub player_height_sliding: f32,
    pub player_width: f32,
    pub player_depth: f32,

    // === Obstacles ===
    pub spawn_distance_ahead: f32,
    pub cull_distance_behind: f32,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    pub obstacle_width: f32,
    pub obstacle_depth: f32,
    pub obstacle_short_height: f32,
    pub obstacle_tall_height: f32,
    pub collision_buffer_y: f32,

    // === Scoring ===
    pub score_per_second: f32,

    // === Presentation ===
    pub camera_offset_y: f32,
    pub camera_offset_z: f32,
    pub swipe_threshold: f32,

    /// Upper bound on a single frame delta (seconds). `None` leaves long
    /// frames unclamped, so a resumed background tab can tunnel through
    /// obstacles and jump the score.
    pub max_frame_dt: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            forward_speed: FORWARD_SPEED,
            lane_distance: LANE_DISTANCE,
            lane_change_speed: LANE_CHANGE_SPEED,
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,
            ground_level: GROUND_LEVEL,
            slide_duration: SLIDE_DURATION,

            player_height_normal: PLAYER_HEIGHT_NORMAL,
            player_height_sliding: PLAYER_HEIGHT_SLIDING,
            player_width: PLAYER_WIDTH,
            player_depth: PLAYER_DEPTH,

            spawn_distance_ahead: SPAWN_DISTANCE_AHEAD,
            cull_distance_behind: CULL_DISTANCE_BEHIND,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            max_spawn_interval: MAX_SPAWN_INTERVAL,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_depth: OBSTACLE_DEPTH,
            obstacle_short_height: OBSTACLE_SHORT_HEIGHT,
            obstacle_tall_height: OBSTACLE_TALL_HEIGHT,
            collision_buffer_y: COLLISION_BUFFER_Y,

            score_per_second: SCORE_PER_SECOND,

            camera_offset_y: CAMERA_OFFSET_Y,
            camera_offset_z: CAMERA_OFFSET_Z,
            swipe_threshold: SWIPE_THRESHOLD,

            max_frame_dt: None,
        }
    }
}

impl Tuning {
    /// Environment variable naming a tuning file
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "LANE_RUNNER_TUNING";

    /// Element id holding inline tuning JSON
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "tuning";

    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (useful as a starting template)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("forward_speed", self.forward_speed),
            ("lane_distance", self.lane_distance),
            ("lane_change_speed", self.lane_change_speed),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("ground_level", self.ground_level),
            ("slide_duration", self.slide_duration),
            ("player_height_normal", self.player_height_normal),
            ("player_height_sliding", self.player_height_sliding),
            ("player_width", self.player_width),
            ("player_depth", self.player_depth),
            ("spawn_distance_ahead", self.spawn_distance_ahead),
            ("cull_distance_behind", self.cull_distance_behind),
            ("min_spawn_interval", self.min_spawn_interval),
            ("max_spawn_interval", self.max_spawn_interval),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_depth", self.obstacle_depth),
            ("obstacle_short_height", self.obstacle_short_height),
            ("obstacle_tall_height", self.obstacle_tall_height),
            ("collision_buffer_y", self.collision_buffer_y),
            ("score_per_second", self.score_per_second),
            ("camera_offset_y", self.camera_offset_y),
            ("camera_offset_z", self.camera_offset_z),
            ("swipe_threshold", self.swipe_threshold),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }

        let positive = [
            ("lane_distance", self.lane_distance),
            ("lane_change_speed", self.lane_change_speed),
            ("jump_force", self.jump_force),
            ("slide_duration", self.slide_duration),
            ("player_height_normal", self.player_height_normal),
            ("player_height_sliding", self.player_height_sliding),
            ("player_width", self.player_width),
            ("player_depth", self.player_depth),
            ("min_spawn_interval", self.min_spawn_interval),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_depth", self.obstacle_depth),
            ("obstacle_short_height", self.obstacle_short_height),
            ("obstacle_tall_height", self.obstacle_tall_height),
            ("swipe_threshold", self.swipe_threshold),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(invalid(field, "must be greater than zero"));
            }
        }

        let non_negative = [
            ("forward_speed", self.forward_speed),
            ("cull_distance_behind", self.cull_distance_behind),
            ("collision_buffer_y", self.collision_buffer_y),
            ("score_per_second", self.score_per_second),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }

        if self.gravity >= 0.0 {
            return Err(invalid("gravity", "must pull downward (negative)"));
        }
        if self.player_height_sliding > self.player_height_normal {
            return Err(invalid(
                "player_height_sliding",
                "must not exceed player_height_normal",
            ));
        }
        if self.min_spawn_interval > self.max_spawn_interval {
            return Err(invalid(
                "min_spawn_interval",
                "must not exceed max_spawn_interval",
            ));
        }
        // Spawning inside the cull zone would discard every obstacle on the next tick
        if self.spawn_distance_ahead <= -self.cull_distance_behind {
            return Err(invalid(
                "spawn_distance_ahead",
                "places obstacles inside the cull zone",
            ));
        }
        if let Some(max_dt) = self.max_frame_dt {
            if !max_dt.is_finite() || max_dt <= 0.0 {
                return Err(invalid("max_frame_dt", "must be a positive number of seconds"));
            }
        }

        Ok(())
    }

    /// Player body height for the current posture
    #[inline]
    pub fn player_height(&self, sliding: bool) -> f32 {
        if sliding {
            self.player_height_sliding
        } else {
            self.player_height_normal
        }
    }

    /// Load tuning from the file named by `LANE_RUNNER_TUNING`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.to_string_lossy());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning file {}: {}", path.to_string_lossy(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.to_string_lossy(), e);
                Self::default()
            }
        }
    }

    /// Load tuning from an inline `<script id="tuning">` element, if any
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded inline tuning");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring inline tuning: {}", e);
                    Self::default()
                }
            },
            _ => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}
