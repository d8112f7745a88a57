/// Largest frame delta accepted by the clock. A stalled tab or a debugger
/// pause must not fast-forward every timer at once.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Time deltas for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Delta affected by the time scale (gameplay timers).
    pub dt: f32,
    /// Raw delta, unaffected by pause or slow motion (UI animation).
    pub unscaled_dt: f32,
}

impl FrameTime {
    /// Frame time with no time scaling applied.
    pub fn uniform(dt: f32) -> Self {
        Self { dt, unscaled_dt: dt }
    }
}

/// Turns raw frame deltas from the host into [`FrameTime`].
#[derive(Debug, Clone)]
pub struct Clock {
    time_scale: f32,
    /// Total unscaled time since creation.
    elapsed: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            elapsed: 0.0,
        }
    }

    /// Set the time scale. 0.0 pauses gameplay timers, UI keeps animating.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Total unscaled seconds observed so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by one host frame.
    pub fn advance(&mut self, raw_dt: f32) -> FrameTime {
        let unscaled_dt = if raw_dt.is_finite() {
            raw_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.elapsed += unscaled_dt;
        FrameTime {
            dt: unscaled_dt * self.time_scale,
            unscaled_dt,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-shot, cancelable delay driven by frame ticks.
///
/// Replaces "wait N seconds, then continue": the owner starts it, ticks it
/// every frame and acts on the tick that reports completion.
#[derive(Debug, Clone, Default)]
pub struct Delay {
    duration: f32,
    elapsed: f32,
    running: bool,
    fired: bool,
}

impl Delay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the delay. Any pending run is discarded.
    pub fn start(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
        self.running = true;
        self.fired = false;
    }

    /// Advance the delay. Returns true exactly once, on the tick it expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.running = false;
            self.fired = true;
            return true;
        }
        false
    }

    /// Drop the pending run without firing.
    pub fn cancel(&mut self) {
        self.running = false;
        self.fired = false;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the last run expired (and was not restarted or cancelled).
    pub fn is_complete(&self) -> bool {
        self.fired
    }

    /// Seconds left before expiry (0.0 when idle).
    pub fn remaining(&self) -> f32 {
        if self.running {
            (self.duration - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }
}
