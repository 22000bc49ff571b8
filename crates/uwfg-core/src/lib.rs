//! Dual-channel arbitrary waveform generator core
//!
//! A cycle-steppable model of the uWFG output rig: two independent output
//! channels, each driven by an autonomous sequencer engine that emits one
//! byte of a cyclic sample buffer per divided clock tick, fed by a chained
//! pair of copy engines that loop the active buffer forever without
//! processor involvement.
//!
//! # Architecture
//! - Divider calculator: pure 16.8 fixed-point clock-divider math
//! - Sequencer: per-channel engine running a shared micro-program
//!   (pull word, shift out four bytes, one per tick)
//! - Feeder: chained data/control engine pair re-reading the active-buffer
//!   indirection cell on every loop iteration
//! - Channel controller ([`Wfg`]): owns both channels, exposes `play()`
//!
//! # Crate feature flags
//! - `export-wav` (optional): WAV capture of a channel's emitted tick stream
//!
//! # Quick start
//! ```
//! use uwfg::{Channel, Waveform, Wfg};
//!
//! let mut wfg = Wfg::new();
//! let wave = Waveform::from_bytes(&[0x00, 0x40, 0x80, 0xC0], 250_000.0);
//! wfg.play(Channel::A, &wave);
//! let ticks = wfg.generate_ticks(Channel::A, 8);
//! assert_eq!(&ticks[..4], &[0x00, 0x40, 0x80, 0xC0]);
//! ```
//!
//! The steady-state stream needs no attention from the caller: once `play()`
//! returns, stepping the system clock reproduces the buffer cyclically with
//! zero-gap looping. Reconfiguring one channel leaves the other channel's
//! stream undisturbed.

#![warn(missing_docs)]

pub mod channel;
pub mod constants;
pub mod divider;
pub mod feeder;
pub mod monitor;
pub mod presets;
pub mod program;
pub mod sequencer;
pub mod shaper;
pub mod wfg;

#[cfg(feature = "export-wav")]
pub mod export;

/// Error types for waveform generator operations
///
/// Register-level rig operations are infallible by design (out-of-range
/// requests are clamped, see the divider calculator); errors exist for
/// waveform shaping parameters, command parsing and capture I/O.
#[derive(thiserror::Error, Debug)]
pub enum WfgError {
    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid shaping or capture configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Monitor command could not be parsed
    #[error("Unknown command: {0}")]
    Command(String),

    /// WAV capture error
    #[cfg(feature = "export-wav")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

/// Result type for waveform generator operations
pub type Result<T> = std::result::Result<T, WfgError>;

// Public API exports
pub use channel::{Channel, ChannelState, Waveform};
pub use divider::ClockDivider;
pub use feeder::{Feeder, FeederPhase};
pub use monitor::{parse_line, Command};
pub use sequencer::Sequencer;
pub use shaper::Shape;
pub use wfg::Wfg;
