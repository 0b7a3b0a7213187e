//! Fixed-timestep scheduler
//!
//! Decouples "who drives time" from the simulation: the frontend feeds
//! wall-clock timestamps from its frame callback, `pump` answers with how
//! many whole fixed steps to run. Tests drive it with synthetic timestamps.

use crate::consts::{FIXED_STEP, MAX_FRAME_DELTA};

/// Accumulates frame deltas and drains them in fixed steps
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp and any banked time; called when a
    /// level starts so a long menu stay does not burst into catch-up ticks
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    /// Feed one frame timestamp (milliseconds) and drain the accumulator.
    /// Returns the number of fixed steps the caller must run before
    /// rendering this frame. The delta is capped so a stall cannot trigger
    /// a runaway catch-up burst.
    pub fn pump(&mut self, now_ms: f64) -> u32 {
        let last = self.last_time.replace(now_ms).unwrap_or(now_ms);
        let delta = (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DELTA);
        self.accumulator += delta;

        let mut steps = 0;
        while self.accumulator >= FIXED_STEP {
            self.accumulator -= FIXED_STEP;
            steps += 1;
        }
        steps
    }
}
