//! Time-driven spin about the rotation axis.
//!
//! Two states, idle and spinning. The scene decides whether a transition is
//! allowed (an axis must be defined); this type only tracks the flag, the
//! signed speed and the last tick time used for delta-time integration.

use std::time::Instant;

use tracing::trace;

pub const MAX_SPEED_DEG_PER_SEC: f64 = 180.0;
pub const DEFAULT_SPEED_DEG_PER_SEC: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    spinning: bool,
    /// Degrees per second; the sign is the direction.
    speed_deg_per_sec: f64,
    last_tick: Option<Instant>,
}

impl SpinState {
    /// A non-finite speed falls back to [`DEFAULT_SPEED_DEG_PER_SEC`].
    pub fn new(speed_deg_per_sec: f64) -> Self {
        let speed = if speed_deg_per_sec.is_finite() {
            speed_deg_per_sec
        } else {
            DEFAULT_SPEED_DEG_PER_SEC
        };
        Self {
            spinning: false,
            speed_deg_per_sec: clamp_speed(speed),
            last_tick: None,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn speed_deg_per_sec(&self) -> f64 {
        self.speed_deg_per_sec
    }

    /// Starts spinning. The tick reference restarts at `now` so the first
    /// step after a pause is not one large jump.
    pub fn start(&mut self, now: Instant) {
        self.spinning = true;
        self.last_tick = Some(now);
    }

    pub fn stop(&mut self) {
        self.spinning = false;
    }

    /// Flips between idle and spinning; returns the new state.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.spinning {
            self.stop();
        } else {
            self.start(now);
        }
        self.spinning
    }

    /// Negates the speed without changing the state.
    pub fn reverse(&mut self) {
        self.speed_deg_per_sec = -self.speed_deg_per_sec;
    }

    /// Clamped to ±180°/s. Non-finite values are ignored.
    pub fn set_speed(&mut self, deg_per_sec: f64) {
        if !deg_per_sec.is_finite() {
            return;
        }
        self.speed_deg_per_sec = clamp_speed(deg_per_sec);
    }

    /// Records a tick at `now` and returns the angle (radians) to rotate by
    /// since the previous tick, or `None` while idle.
    pub fn advance(&mut self, now: Instant) -> Option<f64> {
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        if !self.spinning {
            return None;
        }
        let delta = (self.speed_deg_per_sec * dt).to_radians();
        trace!(dt, delta, "spin step");
        Some(delta)
    }
}

impl Default for SpinState {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_DEG_PER_SEC)
    }
}

fn clamp_speed(deg_per_sec: f64) -> f64 {
    deg_per_sec.clamp(-MAX_SPEED_DEG_PER_SEC, MAX_SPEED_DEG_PER_SEC)
}
