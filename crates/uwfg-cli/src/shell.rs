//! Monitor shell state and dispatch
//!
//! Holds the rig plus the per-channel shell bookkeeping the original front
//! panel kept: which preset a channel is currently playing and at what
//! frequency, so `cl` can change the rate without respecifying the shape
//! and a shape command without a frequency keeps the current one.

use uwfg::export::{capture_to_wav, CaptureConfig};
use uwfg::{parse_line, presets, Channel, Command, Waveform, Wfg};

const DEFAULT_FREQ_HZ: f32 = 1_000_000.0;

/// Built-in pattern a channel is currently set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preset {
    Sine16,
    Block16,
    Saw256,
}

impl Preset {
    fn waveform(self, freq_hz: f32) -> Waveform {
        match self {
            Preset::Sine16 => presets::sine16(freq_hz),
            Preset::Block16 => presets::block16(freq_hz),
            Preset::Saw256 => presets::sawtooth256(freq_hz),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Preset::Sine16 => "sine16",
            Preset::Block16 => "block16",
            Preset::Saw256 => "saw256",
        }
    }
}

/// What the shell should do after handling a line.
pub enum Outcome {
    /// Keep reading.
    Continue,
    /// Leave the shell.
    Quit,
}

/// The interactive monitor: one rig plus per-channel shape/rate memory.
pub struct Shell {
    wfg: Wfg,
    preset: [Preset; 2],
    freq_hz: [f32; 2],
}

impl Shell {
    /// Bring up the rig with both channels on the default pattern.
    pub fn new() -> Self {
        Shell {
            wfg: Wfg::new(),
            preset: [Preset::Sine16; 2],
            freq_hz: [DEFAULT_FREQ_HZ; 2],
        }
    }

    fn apply(&mut self, channel: Channel, preset: Preset, freq: Option<f32>) {
        let i = channel.index();
        self.preset[i] = preset;
        if let Some(f) = freq {
            self.freq_hz[i] = f;
        }
        let wave = preset.waveform(self.freq_hz[i]);
        self.wfg.play(channel, &wave);
        println!(
            "{channel}: {} at {} Hz (divider {})",
            preset.name(),
            self.freq_hz[i],
            self.wfg.divider(channel).decode()
        );
    }

    fn status(&self) {
        for ch in Channel::ALL {
            let i = ch.index();
            let state = self.wfg.channel_state(ch);
            println!(
                "{ch}: {} at {} Hz, {} words, divider {}, {} ticks emitted",
                self.preset[i].name(),
                self.freq_hz[i],
                state.len_words(),
                self.wfg.divider(ch).decode(),
                self.wfg.tick_count(ch)
            );
        }
    }

    fn capture(&mut self, args: &[&str]) {
        let (channel, path) = match args {
            [ch, path, ..] => match ch.to_ascii_uppercase().as_str() {
                "A" => (Channel::A, *path),
                "B" => (Channel::B, *path),
                _ => {
                    println!("wav {{A|B}} <file> [ticks]");
                    return;
                }
            },
            _ => {
                println!("wav {{A|B}} <file> [ticks]");
                return;
            }
        };
        let config = args
            .get(2)
            .and_then(|t| t.parse().ok())
            .map(|ticks| CaptureConfig { ticks })
            .unwrap_or_default();
        match capture_to_wav(&mut self.wfg, channel, config, path) {
            Ok(()) => println!("captured {} ticks of {channel} to {path}", config.ticks),
            Err(e) => println!("capture failed: {e}"),
        }
    }

    /// Handle one input line.
    pub fn evaluate(&mut self, line: &str) -> Outcome {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.first().copied() {
            None => return Outcome::Continue,
            Some("quit") | Some("exit") => return Outcome::Quit,
            Some("help") => {
                print!("{}", uwfg::monitor::help());
                println!("st\n   show both channel settings");
                println!("wav {{A|B}} <file> [ticks]\n   capture a channel to a WAV file");
                println!("quit\n   leave the monitor");
                return Outcome::Continue;
            }
            Some("st") => {
                self.status();
                return Outcome::Continue;
            }
            Some("wav") => {
                self.capture(&tokens[1..]);
                return Outcome::Continue;
            }
            Some(_) => {}
        }

        match parse_line(line) {
            Ok(Command::Sine { channel, freq }) => self.apply(channel, Preset::Sine16, freq),
            Ok(Command::Square { channel, freq }) => self.apply(channel, Preset::Block16, freq),
            Ok(Command::Sawtooth { channel, freq }) => self.apply(channel, Preset::Saw256, freq),
            Ok(Command::Clock { channel, freq }) => {
                let preset = self.preset[channel.index()];
                self.apply(channel, preset, freq);
            }
            Err(e) => {
                println!("{e}");
                print!("{}", uwfg::monitor::help());
            }
        }
        Outcome::Continue
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
