//! LyricSync - time-synchronised lyric scrolling
//!
//! The core lives in [`features::lyrics`]; [`app`] is a headless host that
//! drives it from simulated playback and stdin.

pub mod app;
pub mod features;
