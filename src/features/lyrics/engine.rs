//! Lyric sync engine
//!
//! Keeps a highlighted "current line" in step with playback and owns every
//! value the painter reads each frame.
//!
//! ## Architecture
//!
//! Everything runs on one logical timeline. The host feeds progress updates,
//! pointer input and `tick(now)` calls from a single loop; timers are
//! deadlines the engine polls, so there is no locking and a cancelled timer
//! can never fire late.
//!
//! ## Key Components
//!
//! - `SyncEngine`: line selection, scroll authority, tickers
//! - `ScrollAnimator`: fixed-duration vertical scroll
//! - `IntervalTicker`: highlight fraction and horizontal auto-scroll
//! - `IndicatorVisibility`: scrub overlay with delayed hide
//! - `GestureController`: tap / drag classification
//! - `TextMeasure`: line width, for the overflow decision
//!
//! ## Vertical authority
//!
//! The vertical offset has exactly one writer at a time, tracked by
//! [`ScrollAuthority`]. While a drag owns it, scroll requests from playback
//! are dropped; ending the drag hands it back.

pub mod animator;
pub mod gesture;
pub mod indicator;
pub mod layout;
pub mod text_measure;
pub mod ticker;
pub mod types;

pub use animator::ScrollAnimator;
pub use gesture::{GestureController, GestureState};
pub use indicator::IndicatorVisibility;
pub use layout::LayoutMetrics;
pub use text_measure::{CosmicMeasure, FixedAdvance, SharedFontSystem, TextMeasure, TextStyle};
pub use ticker::{DelayedTask, IntervalTicker, snap_fraction};
pub use types::{
    LineRole, LyricsEvent, PlayButtonConfig, Point, PointerEvent, PointerKind, Rect, SyncConfig,
};

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::features::lyrics::parser::LyricTrack;

/// Placeholder painted while lyrics are being fetched
pub const LOADING_TEXT: &str = "Loading lyrics…";
/// Placeholder painted when there is nothing to show
pub const NO_LYRICS_TEXT: &str = "No lyrics";

/// Who currently writes the vertical offset
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollAuthority {
    /// Nobody; the offset rests where it was left
    Idle,
    /// The engine's animator is moving toward a line
    Animating(ScrollAnimator),
    /// The user's finger; `last_y` is the previous pointer y
    Dragging { last_y: f64 },
}

/// Horizontal auto-scroll of an overflowing current line
#[derive(Debug, Clone)]
struct HorizontalScroll {
    ticker: IntervalTicker,
    /// Offset reached when the ticker completes (negative)
    extent: f64,
}

/// Read-only view of the engine for one painted frame
#[derive(Debug, Clone, Serialize)]
pub struct SyncSnapshot<'a> {
    pub current_line: usize,
    pub line_texts: Vec<&'a str>,
    pub vertical_offset: f64,
    /// Shift of the current line inside its clip window (0 or negative)
    pub horizontal_offset: f64,
    pub highlight_fraction: f64,
    pub indicator_visible: bool,
    /// `mm:ss` of the selected row while the indicator shows
    pub indicator_label: Option<String>,
    pub is_loading: bool,
    pub has_track: bool,
    /// Text to paint instead of lines, if any
    pub placeholder: Option<&'static str>,
    /// Left edge of the clip window for overflowing lines
    pub line_start_x: f64,
    pub max_line_width: f64,
}

impl SyncSnapshot<'_> {
    /// Emphasis tier of row `index`
    pub fn role_of(&self, index: usize) -> LineRole {
        if index == self.current_line {
            LineRole::Current
        } else if index + 1 == self.current_line || index == self.current_line + 1 {
            LineRole::Adjacent
        } else {
            LineRole::Normal
        }
    }
}

/// Main sync engine - owns line selection, offsets and timers
pub struct SyncEngine {
    config: SyncConfig,
    layout: LayoutMetrics,
    measure: Box<dyn TextMeasure + Send>,
    track: LyricTrack,
    is_loading: bool,

    current_line: usize,
    vertical_offset: f64,
    horizontal_offset: f64,
    highlight_fraction: f64,

    authority: ScrollAuthority,
    highlight_ticker: Option<IntervalTicker>,
    horizontal_scroll: Option<HorizontalScroll>,
    indicator: IndicatorVisibility,
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("rows", &self.track.len())
            .field("is_loading", &self.is_loading)
            .field("current_line", &self.current_line)
            .field("vertical_offset", &self.vertical_offset)
            .field("horizontal_offset", &self.horizontal_offset)
            .field("highlight_fraction", &self.highlight_fraction)
            .field("authority", &self.authority)
            .field("indicator", &self.indicator)
            .finish()
    }
}

impl SyncEngine {
    pub fn new(config: SyncConfig, measure: Box<dyn TextMeasure + Send>) -> Self {
        Self {
            layout: LayoutMetrics::new(&config),
            config,
            measure,
            track: LyricTrack::default(),
            is_loading: false,
            current_line: 0,
            vertical_offset: 0.0,
            horizontal_offset: 0.0,
            highlight_fraction: 0.0,
            authority: ScrollAuthority::Idle,
            highlight_ticker: None,
            horizontal_scroll: None,
            indicator: IndicatorVisibility::new(),
        }
    }

    // ===== Track lifecycle =====

    /// Install a new track, discarding all runtime state
    pub fn load_track(&mut self, track: impl Into<LyricTrack>) {
        self.clear_runtime_state();
        self.track = track.into();
        self.is_loading = false;
        tracing::debug!("Lyric track loaded with {} rows", self.track.len());
    }

    /// Drop the track and show the loading placeholder
    pub fn show_loading(&mut self) {
        self.reset();
        self.is_loading = true;
    }

    /// Drop the track and all runtime state
    pub fn reset(&mut self) {
        tracing::debug!("Lyric engine reset");
        self.clear_runtime_state();
        self.track = LyricTrack::default();
        self.is_loading = false;
    }

    fn clear_runtime_state(&mut self) {
        self.authority = ScrollAuthority::Idle;
        self.highlight_ticker = None;
        self.horizontal_scroll = None;
        self.indicator.hide();
        self.current_line = 0;
        self.vertical_offset = 0.0;
        self.horizontal_offset = 0.0;
        self.highlight_fraction = 0.0;
    }

    /// Update the viewport size and the geometry derived from it
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.config.view_width = width;
        self.config.view_height = height;
        self.layout = LayoutMetrics::new(&self.config);
    }

    // ===== Playback =====

    /// Playback-driven entry point.
    ///
    /// `progress_secs` is whole seconds. A user seek jumps straight to the
    /// new line; natural playback animates there. While the indicator is up
    /// after a drag, natural playback only moves the highlight and keeps the
    /// indicator alive, leaving the scroll where the user put it.
    pub fn set_progress(&mut self, progress_secs: u32, is_user_seek: bool, now: Instant) {
        if self.track.is_empty() {
            return;
        }

        let line = self.track.line_at(progress_secs);
        if line == self.current_line {
            return;
        }

        self.select_line(line);

        if self.indicator.is_visible() && !is_user_seek {
            if !self.is_dragging() {
                self.indicator.schedule_hide(now, self.config.hide_delay());
            }
            self.start_highlight(now);
            return;
        }

        if is_user_seek {
            tracing::debug!("User seek to {}s -> line {}", progress_secs, line);
            self.indicator.hide();
            self.jump_to_line(line);
        } else {
            self.animate_to_line(line, now);
        }
        self.start_horizontal_scroll(now);
        self.start_highlight(now);
    }

    /// Make `line` current; per-line effects restart from zero
    fn select_line(&mut self, line: usize) {
        self.current_line = line;
        self.highlight_fraction = 0.0;
        self.highlight_ticker = None;
        self.horizontal_offset = 0.0;
        self.horizontal_scroll = None;
    }

    fn start_highlight(&mut self, now: Instant) {
        let duration = self.current_row_duration();
        self.highlight_ticker = Some(IntervalTicker::start(
            now,
            self.config.tick_interval(),
            duration,
        ));
    }

    /// Start horizontal auto-scroll if the current line is too wide
    fn start_horizontal_scroll(&mut self, now: Instant) {
        self.horizontal_scroll = None;
        self.horizontal_offset = 0.0;

        let style = TextStyle {
            font_size: self.config.highlight_text_size,
        };
        let width = self
            .measure
            .measure_width(self.track.text_at(self.current_line), style) as f64;
        if !self.layout.overflows(width) {
            return;
        }

        self.horizontal_scroll = Some(HorizontalScroll {
            ticker: IntervalTicker::start(
                now,
                self.config.tick_interval(),
                self.current_row_duration(),
            ),
            extent: self.layout.horizontal_scroll_extent(width),
        });
    }

    fn current_row_duration(&self) -> Duration {
        let ms = self
            .track
            .row_at(self.current_line)
            .map(|row| row.duration_ms)
            .unwrap_or(0);
        Duration::from_millis(ms as u64)
    }

    // ===== Vertical scroll =====

    /// Move to `line` without animation, unless a drag owns the offset
    fn jump_to_line(&mut self, line: usize) {
        if self.is_dragging() {
            return;
        }
        self.authority = ScrollAuthority::Idle;
        self.vertical_offset = self.layout.line_offset(line);
    }

    /// Animate to `line`, replacing any running animation, unless a drag
    /// owns the offset
    fn animate_to_line(&mut self, line: usize, now: Instant) {
        if self.is_dragging() {
            return;
        }
        self.authority = ScrollAuthority::Animating(ScrollAnimator::start(
            now,
            self.vertical_offset,
            self.layout.line_offset(line),
            self.config.scroll_duration(),
        ));
    }

    // ===== Frame loop =====

    /// Advance every timer to `now`. Returns `true` when the snapshot
    /// changed and a redraw is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.indicator.poll_expired(now) {
            changed = true;
            if self.has_track() {
                self.animate_to_line(self.current_line, now);
            }
        }

        if let ScrollAuthority::Animating(animator) = &self.authority {
            let (offset, arrived) = animator.sample(now);
            if offset != self.vertical_offset {
                self.vertical_offset = offset;
                changed = true;
            }
            if arrived {
                self.authority = ScrollAuthority::Idle;
            }
        }

        if let Some(ticker) = &mut self.highlight_ticker {
            if let Some(fraction) = ticker.poll(now) {
                self.highlight_fraction = fraction;
                changed = true;
            }
            if ticker.is_finished() {
                self.highlight_ticker = None;
            }
        }

        if let Some(scroll) = &mut self.horizontal_scroll {
            if let Some(fraction) = scroll.ticker.poll(now) {
                self.horizontal_offset = scroll.extent * fraction;
                changed = true;
            }
            if scroll.ticker.is_finished() {
                self.horizontal_scroll = None;
            }
        }

        changed
    }

    /// Whether any animation or timer is pending
    pub fn needs_frames(&self) -> bool {
        matches!(self.authority, ScrollAuthority::Animating(_))
            || self.highlight_ticker.is_some()
            || self.horizontal_scroll.is_some()
            || self.indicator.is_hide_pending()
    }

    // ===== Interaction (driven by GestureController) =====

    /// Show the indicator and suspend its auto-hide
    pub fn show_indicator(&mut self) {
        if self.has_track() {
            self.indicator.show();
        }
    }

    /// Arm the indicator's auto-hide
    pub fn schedule_indicator_hide(&mut self, now: Instant) {
        if self.has_track() {
            self.indicator.schedule_hide(now, self.config.hide_delay());
        }
    }

    /// Hide the indicator right away
    pub fn hide_indicator(&mut self) {
        self.indicator.hide();
    }

    /// Hide the indicator and scroll back to the selected line
    pub fn dismiss_indicator(&mut self, now: Instant) {
        self.indicator.hide();
        if self.has_track() {
            self.animate_to_line(self.current_line, now);
        }
    }

    /// Take vertical authority for a drag starting at pointer `y`
    pub fn begin_drag(&mut self, y: f64) {
        if !self.has_track() {
            return;
        }
        tracing::debug!("Drag started at line {}", self.current_line);
        self.horizontal_scroll = None;
        self.authority = ScrollAuthority::Dragging { last_y: y };
    }

    /// Follow the pointer to `y`. The offset moves opposite to the finger
    /// and stays within one row past either end of the track.
    pub fn drag_to(&mut self, y: f64) {
        if !y.is_finite() {
            return;
        }
        let ScrollAuthority::Dragging { last_y } = &mut self.authority else {
            return;
        };

        let delta = y - *last_y;
        *last_y = y;

        let (min, max) = self.layout.drag_bounds(self.track.len());
        self.vertical_offset = (self.vertical_offset - delta).clamp(min, max);

        let line = self
            .layout
            .line_for_offset(self.vertical_offset, self.track.len());
        if line != self.current_line {
            self.select_line(line);
        }
    }

    /// Hand vertical authority back to the engine
    pub fn end_drag(&mut self) {
        if self.is_dragging() {
            tracing::debug!("Drag ended at line {}", self.current_line);
            self.authority = ScrollAuthority::Idle;
        }
    }

    /// The platform took the gesture away. Authority returns to the engine
    /// but nothing else happens.
    pub fn abort_drag(&mut self) {
        if self.is_dragging() {
            tracing::debug!("Drag cancelled at line {}", self.current_line);
            self.authority = ScrollAuthority::Idle;
        }
    }

    /// Commit the line under the current offset and hide the indicator,
    /// returning that row's start in seconds.
    ///
    /// The line is recomputed here rather than trusted from earlier, since
    /// progress updates may have moved `current_line` during the gesture.
    pub fn request_play(&mut self, now: Instant) -> Option<u32> {
        if !self.has_track() {
            return None;
        }

        let line = self
            .layout
            .line_for_offset(self.vertical_offset, self.track.len());
        if line != self.current_line {
            self.select_line(line);
        }

        self.indicator.hide();
        self.animate_to_line(line, now);

        let secs = self.track.row_at(line)?.timestamp_secs();
        tracing::info!("Play requested at line {} ({}s)", line, secs);
        Some(secs)
    }

    // ===== Accessors =====

    pub fn snapshot(&self) -> SyncSnapshot<'_> {
        let placeholder = if self.is_loading {
            Some(LOADING_TEXT)
        } else if self.track.is_empty() {
            Some(NO_LYRICS_TEXT)
        } else {
            None
        };

        let indicator_label = if self.indicator.is_visible() {
            self.track.row_at(self.current_line).map(|row| row.time_label())
        } else {
            None
        };

        SyncSnapshot {
            current_line: self.current_line,
            line_texts: self.track.rows().iter().map(|r| r.text.as_str()).collect(),
            vertical_offset: self.vertical_offset,
            horizontal_offset: self.horizontal_offset,
            highlight_fraction: self.highlight_fraction,
            indicator_visible: self.indicator.is_visible(),
            indicator_label,
            is_loading: self.is_loading,
            has_track: self.has_track(),
            placeholder,
            line_start_x: self.layout.line_start_x,
            max_line_width: self.layout.max_line_width,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn layout(&self) -> &LayoutMetrics {
        &self.layout
    }

    pub fn track(&self) -> &LyricTrack {
        &self.track
    }

    pub fn has_track(&self) -> bool {
        !self.track.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    pub fn horizontal_offset(&self) -> f64 {
        self.horizontal_offset
    }

    pub fn highlight_fraction(&self) -> f64 {
        self.highlight_fraction
    }

    pub fn authority(&self) -> &ScrollAuthority {
        &self.authority
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.authority, ScrollAuthority::Dragging { .. })
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator.is_visible()
    }

    pub fn indicator_hide_pending(&self) -> bool {
        self.indicator.is_hide_pending()
    }
}
