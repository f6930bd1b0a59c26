//! Pointer gesture classification
//!
//! Turns raw DOWN / MOVE / UP / CANCEL events into taps and drags and
//! forwards them to the [`SyncEngine`]. A press is a tap until the pointer
//! travels more than the touch slop vertically; after that it is a drag
//! and the engine's vertical offset follows the finger.

use std::time::Instant;

use super::SyncEngine;
use super::types::{LyricsEvent, Point, PointerEvent, PointerKind};

/// Gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pressed, still within the slop
    PossibleTap,
    Dragging,
    /// The platform cancelled the gesture; waits for the next press
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
    down_pos: Point,
    /// Whether the press landed on the play affordance
    down_on_play: bool,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Dispatch a raw pointer event
    pub fn handle(&mut self, engine: &mut SyncEngine, event: PointerEvent) -> Option<LyricsEvent> {
        match event.kind {
            PointerKind::Down => {
                self.on_down(engine, event.position);
                None
            }
            PointerKind::Move => {
                self.on_move(engine, event.position);
                None
            }
            PointerKind::Up => self.on_up(engine, event.position, event.at),
            PointerKind::Cancel => {
                self.on_cancel(engine);
                None
            }
        }
    }

    pub fn on_down(&mut self, engine: &mut SyncEngine, position: Point) {
        // A lost UP must not leave the previous drag in charge
        engine.abort_drag();
        self.state = GestureState::PossibleTap;
        self.down_pos = position;
        self.down_on_play = engine.layout().hits_play_button(position);
        engine.show_indicator();
    }

    pub fn on_move(&mut self, engine: &mut SyncEngine, position: Point) {
        match self.state {
            GestureState::PossibleTap => {
                let travel = (position.y - self.down_pos.y).abs();
                if travel > engine.config().touch_slop {
                    self.state = GestureState::Dragging;
                    engine.begin_drag(position.y);
                }
            }
            GestureState::Dragging => engine.drag_to(position.y),
            GestureState::Idle | GestureState::Cancelled => {}
        }
    }

    /// Finish the gesture, returning the event it produced, if any
    pub fn on_up(
        &mut self,
        engine: &mut SyncEngine,
        position: Point,
        now: Instant,
    ) -> Option<LyricsEvent> {
        let state = std::mem::take(&mut self.state);
        let down_on_play = std::mem::take(&mut self.down_on_play);

        match state {
            GestureState::Idle | GestureState::Cancelled => return None,
            GestureState::PossibleTap if !down_on_play => {
                engine.end_drag();
                engine.dismiss_indicator(now);
                return Some(LyricsEvent::ViewTapped);
            }
            GestureState::PossibleTap | GestureState::Dragging => {}
        }

        if !engine.has_track() {
            return None;
        }

        engine.end_drag();
        engine.schedule_indicator_hide(now);

        let released_on_play = engine.layout().hits_play_button(position);
        if down_on_play && released_on_play && engine.indicator_visible() {
            return engine.request_play(now).map(LyricsEvent::PlayRequested);
        }
        None
    }

    /// Platform cancel: drop the drag, leave the offset where it is
    pub fn on_cancel(&mut self, engine: &mut SyncEngine) {
        self.state = GestureState::Cancelled;
        self.down_on_play = false;
        engine.abort_drag();
    }
}
