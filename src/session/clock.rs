//! Frame delta boundary
//!
//! Converts animation-frame timestamps into simulation deltas and is the one
//! place invalid deltas are turned away before they reach the core.

use crate::consts::NOMINAL_FRAME_DT;

/// Make a raw delta safe for the simulation.
///
/// Negative or non-finite values are rejected (0 is returned). Large values
/// pass through untouched unless `max_dt` is set.
pub fn sanitize_dt(dt: f32, max_dt: Option<f32>) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Rejected frame delta {}", dt);
        return 0.0;
    }
    match max_dt {
        Some(max) if dt > max => max,
        _ => dt,
    }
}

/// Turns monotonic millisecond timestamps into frame deltas in seconds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: Option<f32>,
}

impl FrameClock {
    pub fn new(max_dt: Option<f32>) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous call; the first call yields one nominal frame
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp");
            return 0.0;
        }
        match self.last_ms.replace(now_ms) {
            Some(last) => sanitize_dt(((now_ms - last) / 1000.0) as f32, self.max_dt),
            None => NOMINAL_FRAME_DT,
        }
    }

    /// Forget the previous timestamp (next delta is nominal)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
