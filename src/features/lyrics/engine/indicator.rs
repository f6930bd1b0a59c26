//! Scrub indicator visibility
//!
//! The indicator (scrub line, time label and play affordance) appears while
//! the user drags and lingers for a short delay afterwards. Only one hide
//! timer exists at a time; arming it replaces any pending one.

use std::time::{Duration, Instant};

use super::ticker::DelayedTask;

#[derive(Debug, Clone, Default)]
pub struct IndicatorVisibility {
    visible: bool,
    hide_task: Option<DelayedTask>,
}

impl IndicatorVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make visible and drop any pending hide
    pub fn show(&mut self) {
        self.hide_task = None;
        self.visible = true;
    }

    /// Arm the hide timer, replacing a pending one
    pub fn schedule_hide(&mut self, now: Instant, delay: Duration) {
        self.hide_task = Some(DelayedTask::after(now, delay));
    }

    pub fn cancel_hide(&mut self) {
        self.hide_task = None;
    }

    /// Hide immediately
    pub fn hide(&mut self) {
        self.hide_task = None;
        self.visible = false;
    }

    /// Fire the hide timer if it is due. Returns `true` when it fired.
    pub fn poll_expired(&mut self, now: Instant) -> bool {
        match self.hide_task {
            Some(task) if task.is_due(now) => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hide_pending(&self) -> bool {
        self.hide_task.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(3000);

    #[test]
    fn test_hide_fires_once_after_delay() {
        let t0 = Instant::now();
        let mut indicator = IndicatorVisibility::new();
        indicator.show();
        indicator.schedule_hide(t0, DELAY);

        assert!(!indicator.poll_expired(t0 + Duration::from_millis(2999)));
        assert!(indicator.is_visible());

        assert!(indicator.poll_expired(t0 + DELAY));
        assert!(!indicator.is_visible());
        assert!(!indicator.poll_expired(t0 + DELAY * 2), "one-shot");
    }

    #[test]
    fn test_show_cancels_pending_hide() {
        let t0 = Instant::now();
        let mut indicator = IndicatorVisibility::new();
        indicator.show();
        indicator.schedule_hide(t0, DELAY);
        indicator.show();

        assert!(!indicator.is_hide_pending());
        assert!(!indicator.poll_expired(t0 + DELAY * 10));
        assert!(indicator.is_visible());
    }

    #[test]
    fn test_rescheduling_replaces_deadline() {
        let t0 = Instant::now();
        let mut indicator = IndicatorVisibility::new();
        indicator.show();
        indicator.schedule_hide(t0, DELAY);
        indicator.schedule_hide(t0 + Duration::from_millis(2000), DELAY);

        assert!(!indicator.poll_expired(t0 + DELAY), "first deadline was superseded");
        assert!(indicator.poll_expired(t0 + Duration::from_millis(5000)));
    }

    #[test]
    fn test_cancel_on_idle_is_noop() {
        let mut indicator = IndicatorVisibility::new();
        indicator.cancel_hide();
        indicator.hide();
        assert!(!indicator.is_visible());
        assert!(!indicator.poll_expired(Instant::now()));
    }
}
