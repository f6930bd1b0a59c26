//! Host-facing lyric view
//!
//! Bundles the sync engine with gesture handling and the two callbacks a
//! player registers: play requests from the affordance and taps on the
//! view. The host forwards playback progress, pointer events and frame
//! ticks, and reads a snapshot to paint.

use std::time::Instant;

use super::engine::{
    GestureController, LyricsEvent, PointerEvent, SyncConfig, SyncEngine, SyncSnapshot,
    TextMeasure,
};
use super::parser::LyricTrack;

type PlayCallback = Box<dyn FnMut(u32) + Send>;
type TapCallback = Box<dyn FnMut() + Send>;

pub struct LyricsView {
    engine: SyncEngine,
    gestures: GestureController,
    on_play_requested: Option<PlayCallback>,
    on_view_tapped: Option<TapCallback>,
}

impl LyricsView {
    pub fn new(config: SyncConfig, measure: Box<dyn TextMeasure + Send>) -> Self {
        Self {
            engine: SyncEngine::new(config, measure),
            gestures: GestureController::new(),
            on_play_requested: None,
            on_view_tapped: None,
        }
    }

    /// Called with the selected row's start (seconds) when play is tapped
    pub fn on_play_requested(&mut self, callback: impl FnMut(u32) + Send + 'static) {
        self.on_play_requested = Some(Box::new(callback));
    }

    /// Called when the view is tapped away from the play affordance
    pub fn on_view_tapped(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_view_tapped = Some(Box::new(callback));
    }

    pub fn load_track(&mut self, track: impl Into<LyricTrack>) {
        self.engine.load_track(track);
    }

    pub fn show_loading(&mut self) {
        self.engine.show_loading();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn set_progress(&mut self, progress_secs: u32, is_user_seek: bool, now: Instant) {
        self.engine.set_progress(progress_secs, is_user_seek, now);
    }

    /// Feed a pointer event; registered callbacks fire before this returns
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<LyricsEvent> {
        let emitted = self.gestures.handle(&mut self.engine, event)?;
        match emitted {
            LyricsEvent::PlayRequested(secs) => {
                if let Some(callback) = self.on_play_requested.as_mut() {
                    callback(secs);
                }
            }
            LyricsEvent::ViewTapped => {
                if let Some(callback) = self.on_view_tapped.as_mut() {
                    callback();
                }
            }
        }
        Some(emitted)
    }

    /// Advance timers; `true` means repaint
    pub fn tick(&mut self, now: Instant) -> bool {
        self.engine.tick(now)
    }

    pub fn needs_frames(&self) -> bool {
        self.engine.needs_frames()
    }

    pub fn snapshot(&self) -> SyncSnapshot<'_> {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SyncEngine {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::lyrics::engine::{FixedAdvance, Point, PointerKind};
    use std::sync::{Arc, Mutex};

    fn view() -> LyricsView {
        let mut view = LyricsView::new(SyncConfig::default(), Box::new(FixedAdvance::default()));
        view.load_track(LyricTrack::from_timestamps([
            (0, "first"),
            (2000, "second"),
            (5000, "third"),
        ]));
        view
    }

    fn press(view: &mut LyricsView, at: Point, now: Instant) -> Option<LyricsEvent> {
        view.handle_pointer(PointerEvent::new(PointerKind::Down, at, now));
        view.handle_pointer(PointerEvent::new(PointerKind::Up, at, now))
    }

    #[test]
    fn test_callbacks_receive_events() {
        let now = Instant::now();
        let mut view = view();
        let played = Arc::new(Mutex::new(Vec::new()));
        let taps = Arc::new(Mutex::new(0));

        let sink = played.clone();
        view.on_play_requested(move |secs| sink.lock().unwrap().push(secs));
        let counter = taps.clone();
        view.on_view_tapped(move || *counter.lock().unwrap() += 1);

        view.set_progress(6, true, now);
        assert_eq!(
            press(&mut view, Point::new(1040.0, 360.0), now),
            Some(LyricsEvent::PlayRequested(5))
        );
        assert_eq!(
            press(&mut view, Point::new(300.0, 300.0), now),
            Some(LyricsEvent::ViewTapped)
        );

        assert_eq!(*played.lock().unwrap(), vec![5]);
        assert_eq!(*taps.lock().unwrap(), 1);
    }

    #[test]
    fn test_events_without_callbacks() {
        let now = Instant::now();
        let mut view = view();
        assert_eq!(
            press(&mut view, Point::new(300.0, 300.0), now),
            Some(LyricsEvent::ViewTapped)
        );
    }

    #[test]
    fn test_frame_loop_settles() {
        let t0 = Instant::now();
        let mut view = view();
        view.set_progress(3, false, t0);
        assert!(view.needs_frames());

        let mut now = t0;
        while view.needs_frames() {
            now += std::time::Duration::from_millis(16);
            view.tick(now);
        }
        let snap = view.snapshot();
        assert_eq!(snap.vertical_offset, 52.0);
        assert_eq!(snap.highlight_fraction, 1.0);
    }
}
