//! Elapsed-time trackers driven by the frame delta.
//!
//! Nothing here reads the wall clock: callers feed `dt` once per frame, so
//! tests can step the simulation with fixed increments.

/// Fires once each time its interval has accumulated.
#[derive(Clone, Debug, PartialEq)]
pub struct Cadence {
    interval: f32,
    elapsed: f32,
}

impl Cadence {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Accumulate `dt`.  Returns true (and restarts from zero) when the
    /// interval has been reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Restart the clock without touching the interval.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Input rate-limiter: ready once `duration` has passed since the last
/// trigger.  Starts ready.
#[derive(Clone, Debug, PartialEq)]
pub struct Cooldown {
    duration: f32,
    elapsed: f32,
}

impl Cooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: duration,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn ready(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn trigger(&mut self) {
        self.elapsed = 0.0;
    }
}
