//! Core data types for the sync engine
//!
//! Configuration, geometry primitives, pointer input and the events the
//! engine reports back to its host.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Play affordance geometry
///
/// The bitmap is drawn `right_offset` px from the right edge of the view,
/// vertically centred. Its hit region is the bitmap bounds grown by
/// `hit_margin` on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayButtonConfig {
    pub width: f64,
    pub height: f64,
    pub right_offset: f64,
    pub hit_margin: f64,
}

impl Default for PlayButtonConfig {
    fn default() -> Self {
        Self {
            width: 37.0,
            height: 37.0,
            right_offset: 57.0,
            hit_margin: 20.0,
        }
    }
}

/// Configuration for the sync engine
///
/// Timing values are in milliseconds, distances in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    // === View ===
    /// Width of the lyric view
    pub view_width: f64,
    /// Height of the lyric view
    pub view_height: f64,

    // === Text ===
    /// Text size of ordinary lines
    pub normal_text_size: f32,
    /// Text size of the lines directly above and below the current one
    pub adjacent_text_size: f32,
    /// Text size of the current line, also used for overflow measurement
    pub highlight_text_size: f32,
    /// Vertical gap added to `normal_text_size` to get the line height
    pub line_padding: f64,
    /// Widest a line may render before it scrolls horizontally
    pub max_line_width: f64,

    // === Timing ===
    /// Duration of the automatic scroll to a new line
    pub scroll_duration_ms: u64,
    /// Delay before the indicator hides after interaction ends
    pub hide_delay_ms: u64,
    /// Interval of the highlight and horizontal-scroll tickers
    pub tick_interval_ms: u64,

    // === Input ===
    /// Pointer travel before a press becomes a drag
    pub touch_slop: f64,
    /// Play affordance geometry
    pub play_button: PlayButtonConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            view_width: 1080.0,
            view_height: 720.0,

            normal_text_size: 27.0,
            adjacent_text_size: 28.0,
            highlight_text_size: 32.0,
            line_padding: 25.0,
            max_line_width: 680.0,

            scroll_duration_ms: 500,
            hide_delay_ms: 3000,
            tick_interval_ms: 100,

            touch_slop: 8.0,
            play_button: PlayButtonConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Height of one lyric row
    pub fn line_height(&self) -> f64 {
        self.normal_text_size as f64 + self.line_padding
    }

    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// A position in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn expand(self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Raw pointer event kinds delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The platform took the gesture away (e.g. a sideways micro-swipe)
    Cancel,
}

/// A pointer event with its position and arrival time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    pub at: Instant,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point, at: Instant) -> Self {
        Self { kind, position, at }
    }
}

/// Notifications the engine emits to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsEvent {
    /// Play affordance tapped; carries the selected row's start in seconds
    PlayRequested(u32),
    /// The view was tapped outside the play affordance
    ViewTapped,
}

/// How a row should be emphasised when painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Current,
    /// Directly above or below the current line
    Adjacent,
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_height() {
        assert_eq!(SyncConfig::default().line_height(), 52.0);
    }

    #[test]
    fn test_rect_expand_contains() {
        let r = Rect {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 20.0,
        };
        assert!(!r.contains(Point::new(5.0, 5.0)));
        assert!(r.expand(5.0).contains(Point::new(5.0, 5.0)));
        assert!(r.contains(Point::new(30.0, 30.0)), "edges are inclusive");
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: SyncConfig =
            serde_json::from_str(r#"{ "max_line_width": 500.0, "play_button": { "hit_margin": 4.0 } }"#)
                .expect("partial config parses");
        assert_eq!(config.max_line_width, 500.0);
        assert_eq!(config.play_button.hit_margin, 4.0);
        assert_eq!(config.play_button.width, 37.0);
        assert_eq!(config.hide_delay_ms, 3000);
    }
}
