/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
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

/// Repeating timer fed by tick time, used in place of a host `setInterval`.
/// Cancelled timers never fire until restarted.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: f32,
    elapsed: f32,
    armed: bool,
}

impl IntervalTimer {
    /// Create a disarmed timer firing every `period` seconds once started.
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            armed: false,
        }
    }

    /// Arm the timer and restart its period.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.armed = true;
    }

    /// Disarm the timer and drop any partial period.
    pub fn cancel(&mut self) {
        self.elapsed = 0.0;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Change the period without resetting elapsed time.
    pub fn set_period(&mut self, period: f32) {
        self.period = period;
    }

    /// Advance by `dt` seconds. Returns how many periods completed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.armed || self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let fired = (self.elapsed / self.period) as u32;
        self.elapsed -= fired as f32 * self.period;
        fired
    }
}
