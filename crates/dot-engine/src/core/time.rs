/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on steps per frame (spiral-of-death guard).
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // A backgrounded tab can hand us garbage deltas.
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// A bounded repeating timer: fires every `interval` seconds until
/// `duration` seconds have elapsed, then finishes on its own.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: f32,
    duration: f32,
    elapsed: f32,
    since_fire: f32,
    cancelled: bool,
}

impl IntervalTimer {
    /// A timer whose interval is not a positive finite number never fires
    /// and starts out finished.
    pub fn new(interval: f32, duration: f32) -> Self {
        let usable = interval.is_finite() && interval > 0.0;
        if !usable {
            log::warn!("interval timer with interval {interval} will never fire");
        }
        Self {
            interval,
            duration,
            elapsed: 0.0,
            since_fire: 0.0,
            cancelled: !usable,
        }
    }

    /// Advance by `dt` seconds. Returns the time left (in seconds) at each
    /// firing that happened during this step, oldest first.
    ///
    /// A firing whose time left would be zero or negative does not happen:
    /// the timer has run out by then.
    pub fn advance(&mut self, dt: f32) -> Vec<f32> {
        let mut fired = Vec::new();
        if self.is_finished() || !dt.is_finite() || dt <= 0.0 {
            return fired;
        }
        self.since_fire += dt;
        while self.since_fire >= self.interval {
            self.since_fire -= self.interval;
            let fire_at = self.elapsed + self.interval;
            self.elapsed = fire_at;
            let left = self.duration - fire_at;
            if left <= 0.0 {
                self.elapsed = self.duration;
                return fired;
            }
            fired.push(left);
        }
        fired
    }

    /// Stop the timer before its duration runs out.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.elapsed >= self.duration
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}
