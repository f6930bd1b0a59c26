//! Lyrics module - parsing and synchronised display
//!
//! - `parser`: LRC parsing into timed rows
//! - `engine`: line sync, scroll authority and timers
//! - `view`: host-facing facade with gesture handling and callbacks

pub mod engine;
pub mod parser;
pub mod view;

// Re-export commonly used items
pub use engine::{LyricsEvent, SyncConfig, SyncEngine, SyncSnapshot};
pub use parser::*;
pub use view::LyricsView;
