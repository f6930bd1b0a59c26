//! LyricSync - play an LRC file against a simulated clock
//! and drive the lyric view from the terminal

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use lyricsync::app::App;
use lyricsync::app::helpers::init_font_system;
use lyricsync::features::Settings;
use lyricsync::features::lyrics::engine::{CosmicMeasure, FixedAdvance, TextMeasure};

#[derive(Parser, Debug, Clone)]
#[command(name = "lyricsync", version, about = "Time-synchronised lyric scrolling in the terminal")]
struct Args {
    /// LRC file to play
    lyrics: PathBuf,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print snapshots as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Start playback at this position in seconds
    #[arg(long, default_value_t = 0)]
    start: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load(),
    };

    let measure: Box<dyn TextMeasure + Send> = if settings.display.use_system_fonts {
        let font_system = init_font_system()
            .await
            .context("initializing font system")?;
        Box::new(CosmicMeasure::new(
            font_system,
            settings.display.font_family.clone(),
        ))
    } else {
        Box::new(FixedAdvance::default())
    };

    let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
    let now = Instant::now();
    let mut app = App::new(settings, measure, args.lyrics, args.json, sender, now);
    app.start_at(now, args.start);
    app.run(receiver).await
}
