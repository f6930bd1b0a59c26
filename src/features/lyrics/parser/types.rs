//! Lyrics data types
//!
//! A track is an ordered list of timed rows. It is built once by a parser
//! and then only read; loading new lyrics replaces the whole track.

use serde::{Deserialize, Serialize};

/// Duration given to the last row, which has no successor to measure against
pub const LAST_ROW_DURATION_MS: u32 = 5000;

/// A single timed lyric line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricRow {
    /// Start time in milliseconds
    pub timestamp_ms: u32,
    /// Time until the next row starts, in milliseconds
    pub duration_ms: u32,
    /// Line text
    pub text: String,
}

impl LyricRow {
    pub fn new(timestamp_ms: u32, duration_ms: u32, text: impl Into<String>) -> Self {
        Self {
            timestamp_ms,
            duration_ms,
            text: text.into(),
        }
    }

    /// Start time in whole seconds (the granularity progress is reported in)
    pub fn timestamp_secs(&self) -> u32 {
        self.timestamp_ms / 1000
    }

    /// `mm:ss` label for the scrub indicator
    pub fn time_label(&self) -> String {
        let secs = self.timestamp_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Ordered sequence of rows, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LyricTrack {
    rows: Vec<LyricRow>,
}

impl LyricTrack {
    pub fn new(rows: Vec<LyricRow>) -> Self {
        Self { rows }
    }

    /// Build a track from `(timestamp, text)` pairs, deriving each duration
    /// from the next row's start
    pub fn from_timestamps<S: Into<String>>(entries: impl IntoIterator<Item = (u32, S)>) -> Self {
        let mut rows: Vec<LyricRow> = entries
            .into_iter()
            .map(|(timestamp_ms, text)| LyricRow::new(timestamp_ms, 0, text))
            .collect();
        fill_durations(&mut rows);
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[LyricRow] {
        &self.rows
    }

    /// Index of the row playing at `progress_secs`.
    ///
    /// Row timestamps are truncated to whole seconds before comparing, and the
    /// latest qualifying row wins. Returns 0 when nothing qualifies or the
    /// track is empty.
    pub fn line_at(&self, progress_secs: u32) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.timestamp_secs() <= progress_secs)
            .unwrap_or(0)
    }

    /// Row at `index`, or `None` when out of range
    pub fn row_at(&self, index: usize) -> Option<&LyricRow> {
        self.rows.get(index)
    }

    /// Text at `index`; out-of-range reads as empty content
    pub fn text_at(&self, index: usize) -> &str {
        self.rows.get(index).map(|row| row.text.as_str()).unwrap_or("")
    }
}

impl From<Vec<LyricRow>> for LyricTrack {
    fn from(rows: Vec<LyricRow>) -> Self {
        Self::new(rows)
    }
}

/// Set each row's duration to the gap before the next row; the last row
/// gets [`LAST_ROW_DURATION_MS`]
pub fn fill_durations(rows: &mut [LyricRow]) {
    let len = rows.len();
    for i in 0..len {
        rows[i].duration_ms = if i + 1 < len {
            rows[i + 1].timestamp_ms.saturating_sub(rows[i].timestamp_ms)
        } else {
            LAST_ROW_DURATION_MS
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_rows() -> LyricTrack {
        LyricTrack::from_timestamps([(0, "first"), (2000, "second"), (5000, "third")])
    }

    #[test]
    fn test_line_at_picks_latest_started_row() {
        let track = three_rows();
        assert_eq!(track.line_at(1), 0);
        assert_eq!(track.line_at(3), 1);
        assert_eq!(track.line_at(10), 2);
    }

    #[test]
    fn test_line_at_boundaries() {
        let track = three_rows();
        assert_eq!(track.line_at(2), 1, "row starting exactly at 2s is selected");
        assert_eq!(track.line_at(5), 2);

        let late = LyricTrack::from_timestamps([(3000, "a"), (4000, "b")]);
        assert_eq!(late.line_at(0), 0, "before the first row falls back to 0");
        assert_eq!(LyricTrack::default().line_at(42), 0);
    }

    #[test]
    fn test_line_at_truncates_to_seconds() {
        let track = LyricTrack::from_timestamps([(0, "a"), (1999, "b"), (2500, "c")]);
        // Both 1999ms and 2500ms truncate to 1s and 2s respectively
        assert_eq!(track.line_at(1), 1);
        assert_eq!(track.line_at(2), 2);
    }

    #[test]
    fn test_line_at_duplicate_seconds_takes_latest() {
        let track = LyricTrack::from_timestamps([(0, "a"), (4100, "b"), (4800, "c")]);
        assert_eq!(track.line_at(4), 2);
    }

    #[test]
    fn test_line_at_is_monotonic() {
        let track = LyricTrack::from_timestamps([
            (0, "a"),
            (1500, "b"),
            (3200, "c"),
            (3900, "d"),
            (12000, "e"),
        ]);
        let mut last = 0;
        for p in 0..20 {
            let line = track.line_at(p);
            assert!(line >= last, "line_at({p}) went backwards");
            last = line;
        }
    }

    #[test]
    fn test_row_at_out_of_range() {
        let track = three_rows();
        assert!(track.row_at(3).is_none());
        assert_eq!(track.text_at(3), "");
        assert_eq!(track.text_at(usize::MAX), "");
        assert_eq!(track.text_at(1), "second");
    }

    #[test]
    fn test_fill_durations() {
        let track = three_rows();
        let durations: Vec<u32> = track.rows().iter().map(|r| r.duration_ms).collect();
        assert_eq!(durations, vec![2000, 3000, LAST_ROW_DURATION_MS]);
    }

    #[test]
    fn test_time_label() {
        assert_eq!(LyricRow::new(83_450, 0, "x").time_label(), "01:23");
        assert_eq!(LyricRow::new(0, 0, "x").time_label(), "00:00");
    }
}
