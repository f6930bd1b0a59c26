//! Lyrics parsing module
//!
//! Turns raw lyric files into the row list the sync engine consumes.
//! Only line-level LRC is understood; anything else yields no rows.

mod lrc;
mod types;

pub use lrc::parse_lrc;
pub use types::*;

use std::path::Path;

/// Parse lyrics from string content
pub fn parse_lyrics(content: &str) -> Vec<LyricRow> {
    if content.trim_start().starts_with('[') {
        parse_lrc(content)
    } else {
        Vec::new()
    }
}

/// Read and parse a lyrics file
pub fn load_lyrics_file(path: &Path) -> std::io::Result<LyricTrack> {
    let content = std::fs::read_to_string(path)?;
    let rows = parse_lyrics(&content);
    tracing::debug!("Parsed {} lyric rows from {:?}", rows.len(), path);
    Ok(LyricTrack::new(rows))
}
