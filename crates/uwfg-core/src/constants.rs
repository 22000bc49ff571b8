//! Platform constants
//!
//! Numeric contract shared across the rig components: system clock rate,
//! queue geometry, buffer length bounds and the built-in default waveform.

/// System clock rate in Hz. The sequencer clock is derived from this by the
/// 16.8 fixed-point divider and can only be slowed down, never sped up.
pub const FSYS_HZ: f32 = 125_000_000.0;

/// Output ticks produced per queued word: each 32-bit word shifts out as
/// four byte-wide ticks on the pin group.
pub const TICKS_PER_WORD: usize = 4;

/// Depth of a sequencer's input queue, in words.
pub const FIFO_DEPTH: usize = 8;

/// Minimum sample buffer length in bytes. Below this, timing accuracy
/// degrades predictably (the divider drops under 4 at high frequencies).
pub const MIN_BUFLEN_BYTES: usize = 20;

/// Maximum sample buffer length in bytes (memory-constrained platform).
pub const MAX_BUFLEN_BYTES: usize = 2000;

/// First pin of channel A's output group.
pub const PIN_BASE_A: u8 = 2;

/// First pin of channel B's output group.
pub const PIN_BASE_B: u8 = 10;

/// Width of one output pin group, in pins.
pub const PIN_GROUP_WIDTH: u8 = 8;

/// Frequency of the built-in default waveform, in Hz.
pub const DEFAULT_FREQ_HZ: f32 = 1_000_000.0;

/// Built-in default waveform: a 16-byte square pattern, low half first.
/// Both channels stream this from bring-up until the first `play()`.
pub const DEFAULT_PATTERN: [u32; 4] = [0x0000_0000, 0x0000_0000, 0xFFFF_FFFF, 0xFFFF_FFFF];
