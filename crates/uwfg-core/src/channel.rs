//! Channel selectors, waveform descriptors and per-channel state
//!
//! A waveform is a cyclic sequence of 4-byte-aligned 32-bit words plus the
//! frequency at which one full pass of the buffer should repeat. The core
//! holds a shared handle to the sample data and never copies it; exactly one
//! buffer is active per channel at a time, and swapping it is atomic from
//! the sequencer's point of view.

use std::sync::Arc;

use crate::constants::TICKS_PER_WORD;

/// One of the two independent output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Output channel A (first pin group, sequencer 0, engines 0/1).
    A,
    /// Output channel B (second pin group, sequencer 1, engines 2/3).
    B,
}

impl Channel {
    /// Both channels, in fixed order.
    pub const ALL: [Channel; 2] = [Channel::A, Channel::B];

    /// Dense index for per-channel arrays.
    pub fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::A => f.write_str("A"),
            Channel::B => f.write_str("B"),
        }
    }
}

/// A waveform descriptor: shared sample buffer plus target frequency.
///
/// The buffer stays owned by whoever built it; the descriptor and the rig
/// only hold handles to it. It must stay unmodified while it is the active
/// buffer of a channel (until superseded by the next `play()`).
#[derive(Debug, Clone)]
pub struct Waveform {
    words: Arc<[u32]>,
    freq_hz: f32,
}

impl Waveform {
    /// Wrap an existing word buffer.
    pub fn new(words: Arc<[u32]>, freq_hz: f32) -> Self {
        Waveform { words, freq_hz }
    }

    /// Pack a byte sample sequence into words, little-endian, so the byte
    /// stream on the pins reproduces `bytes` in order. A trailing partial
    /// word is zero-padded; callers should supply whole words (the shaping
    /// step sizes its buffers to multiples of four).
    pub fn from_bytes(bytes: &[u8], freq_hz: f32) -> Self {
        let words: Vec<u32> = bytes
            .chunks(TICKS_PER_WORD)
            .map(|chunk| {
                let mut w = [0u8; 4];
                w[..chunk.len()].copy_from_slice(chunk);
                u32::from_le_bytes(w)
            })
            .collect();
        Waveform {
            words: words.into(),
            freq_hz,
        }
    }

    /// Shared handle to the sample words.
    pub fn words(&self) -> &Arc<[u32]> {
        &self.words
    }

    /// Buffer length in words.
    pub fn len_words(&self) -> u32 {
        self.words.len() as u32
    }

    /// Buffer length in byte samples (output ticks per cycle).
    pub fn len_bytes(&self) -> usize {
        self.words.len() * TICKS_PER_WORD
    }

    /// Target repetition frequency in Hz.
    pub fn frequency_hz(&self) -> f32 {
        self.freq_hz
    }

    /// The byte stream one full pass of the buffer emits.
    pub fn byte_samples(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }
}

/// Active parameters of one channel: what the controller stored at the last
/// reconfiguration, plus the fixed engine assignments made at bring-up.
#[derive(Debug, Clone)]
pub struct ChannelState {
    waveform: Waveform,
    sequencer_id: u8,
    engine_ids: (u8, u8),
}

impl ChannelState {
    pub(crate) fn new(waveform: Waveform, sequencer_id: u8, engine_ids: (u8, u8)) -> Self {
        ChannelState {
            waveform,
            sequencer_id,
            engine_ids,
        }
    }

    pub(crate) fn store(&mut self, waveform: &Waveform) {
        self.waveform = waveform.clone();
    }

    /// The active waveform descriptor.
    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Active buffer handle.
    pub fn buffer(&self) -> &Arc<[u32]> {
        self.waveform.words()
    }

    /// Active buffer length in words.
    pub fn len_words(&self) -> u32 {
        self.waveform.len_words()
    }

    /// Active target frequency in Hz.
    pub fn frequency_hz(&self) -> f32 {
        self.waveform.frequency_hz()
    }

    /// Assigned sequencer engine identifier.
    pub fn sequencer_id(&self) -> u8 {
        self.sequencer_id
    }

    /// Assigned feeder engine-pair identifiers (data, control).
    pub fn engine_ids(&self) -> (u8, u8) {
        self.engine_ids
    }
}
