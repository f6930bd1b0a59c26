//! Application messages

use std::str::FromStr;

use crate::features::lyrics::LyricTrack;

/// Application messages
#[derive(Debug)]
pub enum Message {
    // ============ Playback ============
    /// The simulated player reports its position
    PlaybackTick,
    /// Play was tapped on the lyric view; seek the player here (seconds)
    PlayFrom(u32),

    // ============ Lyrics ============
    /// Background lyric load finished
    TrackLoaded(Result<LyricTrack, String>),
    /// The view was tapped outside the play affordance
    ViewTapped,

    // ============ Host ============
    /// Animation frame
    Frame,
    /// A line typed on stdin
    Command(Command),
    /// stdin reached end of file
    InputClosed,
}

/// Interactive commands read from stdin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// User seek to a position in seconds
    Seek(u32),
    /// Press, drag vertically by the given pixels, release
    Drag(f64),
    /// Tap the middle of the view
    Tap,
    /// Tap the play affordance
    Play,
    /// Press, drag, then have the platform cancel the gesture
    Cancel,
    Reset,
    Loading,
    /// Read the lyric file again
    Reload,
    /// Print the current snapshot
    Snapshot,
    Quit,
}

impl Command {
    pub const HELP: &'static str =
        "commands: seek <secs> | drag <dy> | tap | play | cancel | reset | loading | reload | snapshot | quit";
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or_else(|| "empty command".to_string())?;
        let arg = parts.next();

        let command = match (name, arg) {
            ("seek", Some(secs)) => Command::Seek(
                secs.parse()
                    .map_err(|_| format!("invalid seconds: {}", secs))?,
            ),
            ("drag", Some(dy)) => Command::Drag(
                dy.parse()
                    .map_err(|_| format!("invalid distance: {}", dy))?,
            ),
            ("seek" | "drag", None) => return Err(format!("{} needs an argument", name)),
            ("tap", None) => Command::Tap,
            ("play", None) => Command::Play,
            ("cancel", None) => Command::Cancel,
            ("reset", None) => Command::Reset,
            ("loading", None) => Command::Loading,
            ("reload", None) => Command::Reload,
            ("snapshot", None) => Command::Snapshot,
            ("quit" | "exit", None) => Command::Quit,
            _ => return Err(format!("unknown command: {}", line.trim())),
        };

        if parts.next().is_some() {
            return Err(format!("too many arguments: {}", line.trim()));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("seek 42".parse(), Ok(Command::Seek(42)));
        assert_eq!("  drag -120.5 ".parse(), Ok(Command::Drag(-120.5)));
        assert_eq!("play".parse(), Ok(Command::Play));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("seek".parse::<Command>().is_err());
        assert!("seek soon".parse::<Command>().is_err());
        assert!("tap twice".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }
}
