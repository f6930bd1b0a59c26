//! Helper functions for application initialization

use std::path::PathBuf;

use crate::features::lyrics::LyricTrack;
use crate::features::lyrics::engine::SharedFontSystem;

/// Initialize font system for lyrics text measurement
/// We do it in a background thread
pub async fn init_font_system() -> anyhow::Result<SharedFontSystem> {
    let font_system = tokio::task::spawn_blocking(|| {
        tracing::info!("Initializing FontSystem for lyrics...");
        let start = std::time::Instant::now();
        let font_system = cosmic_text::FontSystem::new();
        tracing::info!("FontSystem initialized in {:?}", start.elapsed());
        std::sync::Arc::new(parking_lot::Mutex::new(font_system))
    })
    .await?;
    Ok(font_system)
}

/// Read and parse a lyric file off the async runtime
pub async fn load_track(path: PathBuf) -> Result<LyricTrack, String> {
    tokio::task::spawn_blocking(move || {
        crate::features::lyrics::load_lyrics_file(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
    })
    .await
    .map_err(|e| format!("Lyric loader panicked: {}", e))?
}
