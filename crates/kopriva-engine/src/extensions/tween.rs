// extensions/tween.rs
//
// Single-value tween. Owners keep one per animated property and replace it
// to redirect; nothing here knows about panels.
//
// Usage:
//   let mut alpha = Tween::new(0.0, 1.0, 0.18, Easing::SmoothStep);
//   let done = alpha.tick(dt);
//   host_alpha = alpha.value();

use super::easing::{Easing, ease};

/// Time-driven interpolation of one `f32` from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// A new tween toward `to` that starts from this tween's current value,
    /// so a redirected animation never snaps.
    pub fn redirect(&self, to: f32, duration: f32) -> Self {
        Self::new(self.value(), to, duration, self.easing)
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Current eased value.
    pub fn value(&self) -> f32 {
        if self.is_complete() {
            return self.to;
        }
        ease(self.from, self.to, self.progress(), self.easing)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt`. Returns true once the tween has reached its end.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        // Frame deltas summed in f32 can land a hair short of the duration.
        if self.duration - self.elapsed < 1e-6 {
            self.elapsed = self.duration;
        }
        self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_tween_reaches_target() {
        let mut t = Tween::new(0.0, 100.0, 1.0, Easing::Linear);
        assert!(!t.tick(0.5));
        assert!((t.value() - 50.0).abs() < 0.01);
        assert!(t.tick(0.5));
        assert_eq!(t.value(), 100.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let t = Tween::new(3.0, 7.0, 0.0, Easing::Linear);
        assert!(t.is_complete());
        assert_eq!(t.value(), 7.0);
    }

    #[test]
    fn redirect_starts_from_current_value() {
        let mut t = Tween::new(0.0, 1.0, 1.0, Easing::Linear);
        t.tick(0.25);
        let back = t.redirect(0.0, 1.0);
        assert!((back.from - 0.25).abs() < 1e-6);
        assert_eq!(back.elapsed, 0.0);
        assert!((back.value() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn overshooting_dt_clamps() {
        let mut t = Tween::new(1.0, 0.0, 0.18, Easing::SmoothStep);
        assert!(t.tick(5.0));
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.value(), 0.0);
    }
}
