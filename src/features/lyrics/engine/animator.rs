//! Fixed-duration vertical scroll animation

use std::time::{Duration, Instant};

/// Easing function: easeOutCubic
pub fn ease_out_cubic(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    1.0 - (1.0 - x).powi(3)
}

/// Animates the vertical offset from `from` to `to` over `duration`.
///
/// Cancelling is dropping the animator; the offset keeps whatever value
/// was last sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimator {
    from: f64,
    to: f64,
    started_at: Instant,
    duration: Duration,
}

impl ScrollAnimator {
    pub fn start(now: Instant, from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at: now,
            duration,
        }
    }

    /// Offset at `now`, and whether the animation has arrived
    pub fn sample(&self, now: Instant) -> (f64, bool) {
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.from + (self.to - self.from) * ease_out_cubic(t), false)
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}
