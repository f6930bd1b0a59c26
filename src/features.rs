//! Feature modules - business logic separated from the host
//!
//! Each feature module contains the core logic for a specific functionality.

pub mod lyrics;
pub mod settings;

pub use settings::{DisplaySettings, PlaybackSettings, Settings, SettingsError};
