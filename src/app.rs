//! Main application module
//!
//! A headless host for the lyric view: simulated playback feeds progress,
//! stdin commands become pointer gestures, and frames are only requested
//! while the engine has something animating. Every input is turned into a
//! [`Message`] and handled by [`App::update`] on one task.

pub mod clock;
pub mod helpers;
mod message;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::MissedTickBehavior;

use crate::features::Settings;
use crate::features::lyrics::engine::{Point, PointerEvent, PointerKind, TextMeasure};
use crate::features::lyrics::{LyricsView, SyncSnapshot};
use clock::PlaybackClock;
pub use message::{Command, Message};

/// Lines printed on each side of the current one
const SNAPSHOT_CONTEXT: usize = 3;
/// Pointer moves emitted per simulated drag
const DRAG_STEPS: u32 = 10;

/// Whether the loop keeps going after a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    view: LyricsView,
    settings: Settings,
    lyrics_path: PathBuf,
    json: bool,
    clock: PlaybackClock,
    sender: UnboundedSender<Message>,
    last_line: Option<usize>,
}

impl App {
    /// Create new application instance
    pub fn new(
        settings: Settings,
        measure: Box<dyn TextMeasure + Send>,
        lyrics_path: PathBuf,
        json: bool,
        sender: UnboundedSender<Message>,
        now: Instant,
    ) -> Self {
        let mut view = LyricsView::new(settings.lyrics.clone(), measure);

        let play_sender = sender.clone();
        view.on_play_requested(move |secs| {
            let _ = play_sender.send(Message::PlayFrom(secs));
        });
        let tap_sender = sender.clone();
        view.on_view_tapped(move || {
            let _ = tap_sender.send(Message::ViewTapped);
        });

        Self {
            view,
            settings,
            lyrics_path,
            json,
            clock: PlaybackClock::new(now, 0),
            sender,
            last_line: None,
        }
    }

    pub fn view(&self) -> &LyricsView {
        &self.view
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Start playback at `secs`
    pub fn start_at(&mut self, now: Instant, secs: u32) {
        self.clock.seek(now, secs);
    }

    /// Kick off a background (re)load of the lyric file
    pub fn reload(&mut self) {
        self.view.show_loading();
        let path = self.lyrics_path.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = helpers::load_track(path).await;
            let _ = sender.send(Message::TrackLoaded(result));
        });
    }

    /// Drive the app until `quit` or Ctrl-C
    pub async fn run(mut self, mut receiver: UnboundedReceiver<Message>) -> anyhow::Result<()> {
        spawn_input_reader(self.sender.clone());
        spawn_interrupt_handler(self.sender.clone());
        self.reload();

        let playback = &self.settings.playback;
        let mut progress = tokio::time::interval(Duration::from_millis(
            playback.progress_interval_ms.max(1),
        ));
        let mut frames =
            tokio::time::interval(Duration::from_millis(playback.frame_interval_ms.max(1)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let message = tokio::select! {
                Some(message) = receiver.recv() => message,
                _ = progress.tick() => Message::PlaybackTick,
                _ = frames.tick(), if self.view.needs_frames() => Message::Frame,
            };

            if self.update(message, Instant::now()) == Flow::Quit {
                break;
            }
        }

        tracing::info!("Shutting down");
        Ok(())
    }

    /// Handle one message
    pub fn update(&mut self, message: Message, now: Instant) -> Flow {
        let flow = match message {
            Message::PlaybackTick => {
                let secs = self.clock.position_secs(now);
                self.view.set_progress(secs, false, now);
                Flow::Continue
            }
            Message::PlayFrom(secs) => {
                tracing::info!("Playing from {}s", secs);
                self.clock.seek(now, secs);
                self.view.set_progress(secs, false, now);
                Flow::Continue
            }
            Message::TrackLoaded(Ok(track)) => {
                tracing::info!("Loaded {} lyric rows", track.len());
                self.view.load_track(track);
                self.last_line = None;
                let secs = self.clock.position_secs(now);
                self.view.set_progress(secs, true, now);
                Flow::Continue
            }
            Message::TrackLoaded(Err(e)) => {
                tracing::warn!("{}", e);
                self.view.reset();
                Flow::Continue
            }
            Message::ViewTapped => {
                tracing::info!("Lyric view tapped");
                Flow::Continue
            }
            Message::Frame => {
                self.view.tick(now);
                Flow::Continue
            }
            Message::Command(command) => self.handle_command(command, now),
            Message::InputClosed => {
                tracing::debug!("stdin closed; playback continues until Ctrl-C");
                Flow::Continue
            }
        };

        self.report_line_change();
        flow
    }

    fn handle_command(&mut self, command: Command, now: Instant) -> Flow {
        let config = self.view.engine().config();
        let center = Point::new(config.view_width / 2.0, config.view_height / 2.0);
        let touch_slop = config.touch_slop;

        match command {
            Command::Seek(secs) => {
                self.clock.seek(now, secs);
                self.view.set_progress(secs, true, now);
            }
            Command::Drag(dy) => {
                self.pointer(PointerKind::Down, center, now);
                for step in 1..=DRAG_STEPS {
                    let y = center.y + dy * step as f64 / DRAG_STEPS as f64;
                    self.pointer(PointerKind::Move, Point::new(center.x, y), now);
                }
                self.pointer(PointerKind::Up, Point::new(center.x, center.y + dy), now);
            }
            Command::Tap => {
                self.pointer(PointerKind::Down, center, now);
                self.pointer(PointerKind::Up, center, now);
            }
            Command::Play => {
                let button = self.view.engine().layout().play_button;
                let at = Point::new(button.x + button.width / 2.0, button.y + button.height / 2.0);
                self.pointer(PointerKind::Down, at, now);
                self.pointer(PointerKind::Up, at, now);
            }
            Command::Cancel => {
                self.pointer(PointerKind::Down, center, now);
                self.pointer(
                    PointerKind::Move,
                    Point::new(center.x, center.y - touch_slop * 4.0),
                    now,
                );
                self.pointer(PointerKind::Cancel, center, now);
            }
            Command::Reset => self.view.reset(),
            Command::Loading => self.view.show_loading(),
            Command::Reload => self.reload(),
            Command::Snapshot => self.print_snapshot(),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn pointer(&mut self, kind: PointerKind, position: Point, now: Instant) {
        if let Some(event) = self
            .view
            .handle_pointer(PointerEvent::new(kind, position, now))
        {
            tracing::debug!("Gesture produced {:?}", event);
        }
    }

    fn report_line_change(&mut self) {
        let snapshot = self.view.snapshot();
        if !snapshot.has_track {
            self.last_line = None;
            return;
        }
        if self.last_line == Some(snapshot.current_line) {
            return;
        }
        self.last_line = Some(snapshot.current_line);
        tracing::info!(
            "Line {}: {}",
            snapshot.current_line,
            snapshot
                .line_texts
                .get(snapshot.current_line)
                .copied()
                .unwrap_or_default()
        );
    }

    fn print_snapshot(&self) {
        let snapshot = self.view.snapshot();
        if self.json {
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::warn!("Failed to serialize snapshot: {}", e),
            }
        } else {
            print!("{}", render_text(&snapshot));
        }
    }
}

/// Plain-text rendering of a snapshot around the current line
pub fn render_text(snapshot: &SyncSnapshot<'_>) -> String {
    use crate::features::lyrics::engine::LineRole;
    use std::fmt::Write;

    if let Some(placeholder) = snapshot.placeholder {
        return format!("{}\n", placeholder);
    }

    let mut out = String::new();
    let first = snapshot.current_line.saturating_sub(SNAPSHOT_CONTEXT);
    let last = (snapshot.current_line + SNAPSHOT_CONTEXT)
        .min(snapshot.line_texts.len().saturating_sub(1));

    for (index, text) in snapshot
        .line_texts
        .iter()
        .enumerate()
        .take(last + 1)
        .skip(first)
    {
        let _ = match snapshot.role_of(index) {
            LineRole::Current => writeln!(
                out,
                "> {} ({:.0}%)",
                text,
                snapshot.highlight_fraction * 100.0
            ),
            LineRole::Adjacent => writeln!(out, "  {}", text),
            LineRole::Normal => writeln!(out, "  · {}", text),
        };
    }

    if let Some(label) = &snapshot.indicator_label {
        let _ = writeln!(out, "-- {} --", label);
    }
    out
}

fn spawn_input_reader(sender: UnboundedSender<Message>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        tracing::info!("{}", Command::HELP);
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => match line.parse::<Command>() {
                    Ok(command) => {
                        if sender.send(Message::Command(command)).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("{}; {}", e, Command::HELP),
                },
                Ok(None) => {
                    let _ = sender.send(Message::InputClosed);
                    break;
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    let _ = sender.send(Message::InputClosed);
                    break;
                }
            }
        }
    });
}

fn spawn_interrupt_handler(sender: UnboundedSender<Message>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = sender.send(Message::Command(Command::Quit));
        }
    });
}
