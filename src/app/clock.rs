//! Simulated playback position

use std::time::Instant;

/// Wall-clock driven playback position in whole seconds
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    anchor: Instant,
    anchor_secs: u32,
}

impl PlaybackClock {
    pub fn new(now: Instant, start_secs: u32) -> Self {
        Self {
            anchor: now,
            anchor_secs: start_secs,
        }
    }

    pub fn position_secs(&self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.anchor).as_secs();
        self.anchor_secs
            .saturating_add(u32::try_from(elapsed).unwrap_or(u32::MAX))
    }

    pub fn seek(&mut self, now: Instant, secs: u32) {
        self.anchor = now;
        self.anchor_secs = secs;
    }
}
