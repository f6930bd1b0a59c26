//! Standard LRC format parser
//!
//! Supports the common [mm:ss.xx]text format with line-level synchronization.

use super::types::{LyricRow, fill_durations};

/// Parse timestamp from LRC format: [mm:ss.xx] or [mm:ss:xx]
fn parse_time(src: &str) -> Option<(usize, u32)> {
    if !src.starts_with('[') {
        return None;
    }

    let end_bracket = src.find(']')?;
    let time_str = &src[1..end_bracket];

    // Skip metadata tags like [ar:Artist], [ti:Title]
    if time_str.chars().next().is_some_and(|c| c.is_alphabetic()) {
        return None;
    }

    let parts: Vec<&str> = time_str.split([':', '.']).collect();

    let time_ms = match parts.len() {
        2 => {
            let min: u64 = parts[0].parse().ok()?;
            let sec: u64 = parts[1].parse().ok()?;
            min * 60 * 1000 + sec * 1000
        }
        3 => {
            let min: u64 = parts[0].parse().ok()?;
            let sec: u64 = parts[1].parse().ok()?;
            let frac = parts[2];
            let mut ms: u64 = frac.parse().ok()?;

            // xx is centiseconds, xxx milliseconds
            match frac.len() {
                1 => ms *= 100,
                2 => ms *= 10,
                3 => {}
                _ => return None,
            }

            min * 60 * 1000 + sec * 1000 + ms
        }
        _ => return None,
    };

    // Stamps past u32 milliseconds (~49 days) are rejected
    let time_ms = u32::try_from(time_ms).ok()?;
    Some((end_bracket + 1, time_ms))
}

/// Parse a single LRC line, which may carry several timestamps
fn parse_line(line: &str) -> Vec<LyricRow> {
    let line = line.trim();
    let mut timestamps = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        match parse_time(&line[pos..]) {
            Some((consumed, time)) => {
                timestamps.push(time);
                pos += consumed;
            }
            None => break,
        }
    }

    let text = line[pos..].trim();
    timestamps
        .into_iter()
        .map(|timestamp_ms| LyricRow::new(timestamp_ms, 0, text))
        .collect()
}

/// Parse LRC content into timed rows, sorted by timestamp
pub fn parse_lrc(src: &str) -> Vec<LyricRow> {
    let mut rows: Vec<LyricRow> = src.lines().flat_map(parse_line).collect();

    // Stable so repeated stamps keep file order
    rows.sort_by_key(|row| row.timestamp_ms);
    fill_durations(&mut rows);

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::lyrics::parser::types::LAST_ROW_DURATION_MS;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("[00:01.12]"), Some((10, 1120)));
        assert_eq!(parse_time("[00:10.254]"), Some((11, 10254)));
        assert_eq!(parse_time("[01:10.1]"), Some((9, 70100)));
        assert_eq!(parse_time("[00:00.00]"), Some((10, 0)));
        assert_eq!(parse_time("[02:03]"), Some((7, 123_000)));
        assert_eq!(parse_time("[00:05:50]"), Some((10, 5500)));
        assert_eq!(parse_time("[ti:Song]"), None);
        assert_eq!(parse_time("no bracket"), None);
    }

    #[test]
    fn test_parse_time_rejects_oversized_stamps() {
        assert_eq!(parse_time("[99999:00.00]"), None);
        assert_eq!(parse_time("[71582:47.296]"), None, "one past u32::MAX ms");
        assert_eq!(parse_time("[71582:47.295]"), Some((14, u32::MAX)));
        assert!(parse_lrc("[99999:00.00]x").is_empty());
        assert_eq!(parse_lrc("[99999:00.00]x\n[00:01.00]y").len(), 1);
    }

    #[test]
    fn test_parse_multiple_timestamps() {
        let rows = parse_line("[00:12.50][01:30.00]Repeated line");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp_ms, 12500);
        assert_eq!(rows[1].timestamp_ms, 90000);
        assert_eq!(rows[1].text, "Repeated line");
    }

    #[test]
    fn test_parse_lrc() {
        let content = "[ti:Test Song]\n[ar:Test Artist]\n[00:00.00]First line\n[00:05.00]Second line\n[00:10.00]Third line";
        let rows = parse_lrc(content);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text, "First line");
        assert_eq!(rows[2].text, "Third line");
        assert_eq!(rows[0].duration_ms, 5000);
        assert_eq!(rows[2].duration_ms, LAST_ROW_DURATION_MS);
    }

    #[test]
    fn test_parse_lrc_sorts_out_of_order_stamps() {
        let rows = parse_lrc("[00:20.00]chorus\n[00:03.00]verse\n[00:10.00][00:30.00]hook");
        let stamps: Vec<u32> = rows.iter().map(|r| r.timestamp_ms).collect();
        assert_eq!(stamps, vec![3000, 10000, 20000, 30000]);
        assert_eq!(rows[1].duration_ms, 10000);
    }
}
