//! Monitor command language
//!
//! Line-oriented commands for the serial shell. A line is a command word
//! plus whitespace-separated arguments; commands match on their first two
//! characters, so `si`, `sin` and `sine` all select the sine command. The
//! shell itself (prompting, echoing, per-channel defaults) lives in the CLI
//! crate; this module only turns lines into [`Command`] values and renders
//! the help table.

use crate::channel::Channel;
use crate::{Result, WfgError};

/// A parsed monitor command. The optional frequency means "keep the
/// channel's current rate".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `si {A|B} [freq]` - play the built-in sine on a channel.
    Sine {
        /// Target channel.
        channel: Channel,
        /// New repetition frequency, Hz.
        freq: Option<f32>,
    },
    /// `sq {A|B} [freq]` - play the built-in square block on a channel.
    Square {
        /// Target channel.
        channel: Channel,
        /// New repetition frequency, Hz.
        freq: Option<f32>,
    },
    /// `sa {A|B} [freq]` - play the built-in sawtooth on a channel.
    Sawtooth {
        /// Target channel.
        channel: Channel,
        /// New repetition frequency, Hz.
        freq: Option<f32>,
    },
    /// `cl {A|B} <freq>` - keep the channel's waveform, change its rate.
    Clock {
        /// Target channel.
        channel: Channel,
        /// New repetition frequency, Hz.
        freq: Option<f32>,
    },
}

/// Syntax and help text for one command, shell-table style.
pub struct CommandSpec {
    /// Two-character command word.
    pub name: &'static str,
    /// Usage line.
    pub syntax: &'static str,
    /// One-line description.
    pub help: &'static str,
}

/// The command table.
pub const COMMANDS: [CommandSpec; 4] = [
    CommandSpec {
        name: "si",
        syntax: "si {A|B} <freq>",
        help: "sine wave at frequency freq",
    },
    CommandSpec {
        name: "sq",
        syntax: "sq {A|B} <freq>",
        help: "square wave at frequency freq",
    },
    CommandSpec {
        name: "sa",
        syntax: "sa {A|B} <freq>",
        help: "sawtooth at frequency freq",
    },
    CommandSpec {
        name: "cl",
        syntax: "cl {A|B} <freq>",
        help: "set waveform frequency freq",
    },
];

/// Render the help listing, one syntax/description pair per command.
pub fn help() -> String {
    let mut out = String::new();
    for spec in &COMMANDS {
        out.push_str(spec.syntax);
        out.push_str("\n   ");
        out.push_str(spec.help);
        out.push('\n');
    }
    out
}

fn parse_channel(token: &str) -> Result<Channel> {
    match token.chars().next() {
        Some('A') | Some('a') => Ok(Channel::A),
        Some('B') | Some('b') => Ok(Channel::B),
        _ => Err(WfgError::Command(format!(
            "expected channel A or B, got '{token}'"
        ))),
    }
}

fn parse_freq(token: Option<&str>) -> Result<Option<f32>> {
    match token {
        None => Ok(None),
        Some(t) => {
            let freq: f32 = t
                .parse()
                .map_err(|_| WfgError::Command(format!("bad frequency '{t}'")))?;
            if freq > 0.0 && freq.is_finite() {
                Ok(Some(freq))
            } else {
                Err(WfgError::Command(format!("frequency must be positive, got '{t}'")))
            }
        }
    }
}

/// Parse one input line into a [`Command`].
///
/// Returns [`WfgError::Command`] for empty lines, unknown command words or
/// malformed arguments; the shell prints [`help`] in response.
pub fn parse_line(line: &str) -> Result<Command> {
    let mut args = line.split_whitespace();
    let word = args
        .next()
        .ok_or_else(|| WfgError::Command("empty line".into()))?;

    let channel_token = args
        .next()
        .ok_or_else(|| WfgError::Command(format!("'{word}' needs a channel argument")))?;
    let channel = parse_channel(channel_token)?;
    let freq = parse_freq(args.next())?;

    // First two characters select the command
    let key: String = word.chars().take(2).collect();
    match key.to_ascii_lowercase().as_str() {
        "si" => Ok(Command::Sine { channel, freq }),
        "sq" => Ok(Command::Square { channel, freq }),
        "sa" => Ok(Command::Sawtooth { channel, freq }),
        "cl" => Ok(Command::Clock { channel, freq }),
        _ => Err(WfgError::Command(format!("unknown command '{word}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(
            parse_line("si A 1000").unwrap(),
            Command::Sine {
                channel: Channel::A,
                freq: Some(1000.0)
            }
        );
        assert_eq!(
            parse_line("sq b 2.5e6").unwrap(),
            Command::Square {
                channel: Channel::B,
                freq: Some(2_500_000.0)
            }
        );
        assert_eq!(
            parse_line("cl B 440").unwrap(),
            Command::Clock {
                channel: Channel::B,
                freq: Some(440.0)
            }
        );
    }

    #[test]
    fn test_two_character_prefix_match() {
        assert_eq!(
            parse_line("sine A 100").unwrap(),
            Command::Sine {
                channel: Channel::A,
                freq: Some(100.0)
            }
        );
        assert_eq!(
            parse_line("sawtooth A 100").unwrap(),
            Command::Sawtooth {
                channel: Channel::A,
                freq: Some(100.0)
            }
        );
    }

    #[test]
    fn test_frequency_is_optional() {
        assert_eq!(
            parse_line("sa A").unwrap(),
            Command::Sawtooth {
                channel: Channel::A,
                freq: None
            }
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_line("").is_err());
        assert!(parse_line("   ").is_err());
        assert!(parse_line("xx A 100").is_err());
        assert!(parse_line("si C 100").is_err());
        assert!(parse_line("si A lots").is_err());
        assert!(parse_line("si A -5").is_err());
        assert!(parse_line("si A 0").is_err());
        assert!(parse_line("si").is_err());
    }

    #[test]
    fn test_help_lists_every_command() {
        let text = help();
        for spec in &COMMANDS {
            assert!(text.contains(spec.syntax));
            assert!(text.contains(spec.help));
        }
    }
}
