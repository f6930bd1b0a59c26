//! Repeating and one-shot timers driven by the engine's tick
//!
//! Nothing here owns a thread. A timer is a deadline that the engine polls
//! from its single update loop, so dropping the value is a synchronous
//! cancel: a dropped timer has no way left to fire.

use std::time::{Duration, Instant};

/// Fractions above this are reported as complete so the last glyph is
/// never left half-revealed
pub const SNAP_THRESHOLD: f64 = 0.9;

/// Clamp a raw elapsed/total ratio into `[0, 1]`, snapping to 1 past
/// [`SNAP_THRESHOLD`]
pub fn snap_fraction(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let fraction = raw.clamp(0.0, 1.0);
    if fraction > SNAP_THRESHOLD { 1.0 } else { fraction }
}

/// Fires every `interval` until `total` has elapsed.
///
/// Each delivery carries the elapsed fraction of `total`, measured at the
/// interval boundary that triggered it. The first delivery is immediate
/// (fraction 0). Boundaries missed between two polls collapse into one
/// delivery of the latest fraction. Once `total` has elapsed a final 1.0 is
/// delivered and the ticker is finished.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    started_at: Instant,
    interval: Duration,
    total: Duration,
    /// Index of the last delivered boundary
    delivered: Option<u64>,
    finished: bool,
}

impl IntervalTicker {
    pub fn start(now: Instant, interval: Duration, total: Duration) -> Self {
        Self {
            started_at: now,
            interval: interval.max(Duration::from_millis(1)),
            total,
            delivered: None,
            finished: false,
        }
    }

    /// Deliver the current fraction if a new boundary was crossed
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        if self.finished {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.total {
            self.finished = true;
            return Some(1.0);
        }

        let index = (elapsed.as_nanos() / self.interval.as_nanos()) as u64;
        if self.delivered == Some(index) {
            return None;
        }
        self.delivered = Some(index);

        let ticked = self.interval.as_secs_f64() * index as f64;
        Some(snap_fraction(ticked / self.total.as_secs_f64()))
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn total(&self) -> Duration {
        self.total
    }
}

/// One-shot deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedTask {
    deadline: Instant,
}

impl DelayedTask {
    pub fn after(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_snap_fraction() {
        assert_eq!(snap_fraction(-0.5), 0.0);
        assert_eq!(snap_fraction(0.5), 0.5);
        assert_eq!(snap_fraction(0.9), 0.9);
        assert_eq!(snap_fraction(0.91), 1.0);
        assert_eq!(snap_fraction(3.0), 1.0);
        assert_eq!(snap_fraction(f64::NAN), 0.0);
    }

    #[test]
    fn test_ticker_delivers_on_boundaries() {
        let t0 = Instant::now();
        let mut ticker = IntervalTicker::start(t0, ms(100), ms(1000));

        assert_eq!(ticker.poll(t0), Some(0.0), "first delivery is immediate");
        assert_eq!(ticker.poll(t0 + ms(50)), None, "no boundary crossed yet");

        let f = ticker.poll(t0 + ms(100)).expect("boundary at 100ms");
        assert!((f - 0.1).abs() < 1e-9);
        assert_eq!(ticker.poll(t0 + ms(150)), None);
    }

    #[test]
    fn test_ticker_coalesces_missed_boundaries() {
        let t0 = Instant::now();
        let mut ticker = IntervalTicker::start(t0, ms(100), ms(1000));
        ticker.poll(t0);

        let f = ticker.poll(t0 + ms(430)).expect("several boundaries crossed");
        assert!((f - 0.4).abs() < 1e-9, "latest boundary wins, got {f}");
    }

    #[test]
    fn test_ticker_snaps_and_finishes() {
        let t0 = Instant::now();
        let mut ticker = IntervalTicker::start(t0, ms(100), ms(2000));

        assert_eq!(ticker.poll(t0 + ms(1950)), Some(1.0), "0.95 snaps to 1");
        assert!(!ticker.is_finished());
        assert_eq!(ticker.poll(t0 + ms(2000)), Some(1.0));
        assert!(ticker.is_finished());
        assert_eq!(ticker.poll(t0 + ms(5000)), None, "finished tickers stay silent");
    }

    #[test]
    fn test_ticker_never_exceeds_one() {
        let t0 = Instant::now();
        let mut ticker = IntervalTicker::start(t0, ms(100), ms(2300));
        for step in 0..40 {
            if let Some(f) = ticker.poll(t0 + ms(step * 70)) {
                assert!((0.0..=1.0).contains(&f), "fraction {f} out of range");
            }
        }
        assert!(ticker.is_finished());
    }

    #[test]
    fn test_zero_length_ticker_completes_at_once() {
        let t0 = Instant::now();
        let mut ticker = IntervalTicker::start(t0, ms(100), Duration::ZERO);
        assert_eq!(ticker.poll(t0), Some(1.0));
        assert!(ticker.is_finished());
    }

    #[test]
    fn test_delayed_task() {
        let t0 = Instant::now();
        let task = DelayedTask::after(t0, ms(3000));
        assert!(!task.is_due(t0 + ms(2999)));
        assert!(task.is_due(t0 + ms(3000)));
        assert_eq!(task.deadline(), t0 + ms(3000));
    }
}
