//! Layout calculations for the lyric view
//!
//! Rows are stacked at a fixed pitch; the vertical offset of row `i` is
//! `i * line_height`. Lines wider than `max_line_width` are clipped to a
//! window starting at `line_start_x` and scroll horizontally inside it.

use super::types::{Point, Rect, SyncConfig};

/// Layout parameters derived from the configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Height of one row
    pub line_height: f64,
    /// Width of the clip window for overflowing lines
    pub max_line_width: f64,
    /// Left edge of the clip window
    pub line_start_x: f64,
    /// Where the play bitmap is drawn
    pub play_button: Rect,
    /// Where a press counts as hitting the play bitmap
    pub play_hit_region: Rect,
}

impl LayoutMetrics {
    pub fn new(config: &SyncConfig) -> Self {
        let button = config.play_button;
        let play_button = Rect {
            x: config.view_width - button.right_offset,
            y: config.view_height / 2.0 - button.height / 2.0,
            width: button.width,
            height: button.height,
        };

        Self {
            line_height: config.line_height(),
            max_line_width: config.max_line_width,
            line_start_x: (config.view_width - config.max_line_width) / 2.0,
            play_button,
            play_hit_region: play_button.expand(button.hit_margin),
        }
    }

    /// Vertical offset that centres row `index`
    pub fn line_offset(&self, index: usize) -> f64 {
        index as f64 * self.line_height
    }

    /// Row under a vertical offset, clamped to `[0, len - 1]`
    pub fn line_for_offset(&self, offset: f64, len: usize) -> usize {
        if len == 0 || self.line_height <= 0.0 {
            return 0;
        }
        let line = (offset / self.line_height).floor();
        if line <= 0.0 {
            0
        } else {
            (line as usize).min(len - 1)
        }
    }

    /// Range a drag may move the vertical offset through:
    /// one row above the first line to the end of the last
    pub fn drag_bounds(&self, len: usize) -> (f64, f64) {
        (-self.line_height, len as f64 * self.line_height)
    }

    /// Whether a line of `text_width` needs horizontal scrolling
    pub fn overflows(&self, text_width: f64) -> bool {
        text_width > self.max_line_width
    }

    /// Shift, relative to `line_start_x`, that brings the right end of an
    /// overflowing line to the right edge of the clip window
    pub fn horizontal_scroll_extent(&self, text_width: f64) -> f64 {
        (self.max_line_width - text_width).min(0.0)
    }

    pub fn hits_play_button(&self, position: Point) -> bool {
        self.play_hit_region.contains(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics::new(&SyncConfig::default())
    }

    #[test]
    fn test_line_for_offset_clamps() {
        let m = metrics();
        assert_eq!(m.line_for_offset(-40.0, 3), 0, "cannot go negative");
        assert_eq!(m.line_for_offset(51.9, 3), 0);
        assert_eq!(m.line_for_offset(52.0, 3), 1);
        assert_eq!(m.line_for_offset(10_000.0, 3), 2, "clamped to last index");
        assert_eq!(m.line_for_offset(100.0, 0), 0);
    }

    #[test]
    fn test_drag_bounds() {
        let m = metrics();
        assert_eq!(m.drag_bounds(3), (-52.0, 156.0));
    }

    #[test]
    fn test_horizontal_scroll_geometry() {
        let m = metrics();
        assert_eq!(m.line_start_x, 200.0);
        assert!(!m.overflows(680.0));
        assert!(m.overflows(680.5));
        // A 900px line shifts 220px left so its tail meets the window edge
        assert_eq!(m.horizontal_scroll_extent(900.0), -220.0);
        assert_eq!(m.horizontal_scroll_extent(300.0), 0.0);
    }

    #[test]
    fn test_play_hit_region() {
        let m = metrics();
        // Bitmap at x 1023..1060, y 341.5..378.5
        assert!(m.hits_play_button(Point::new(1040.0, 360.0)));
        assert!(m.hits_play_button(Point::new(1005.0, 325.0)), "margin extends the target");
        assert!(!m.hits_play_button(Point::new(990.0, 360.0)));
        assert!(!m.hits_play_button(Point::new(1040.0, 300.0)));
    }
}
