//! Channel controller: the public face of the rig
//!
//! [`Wfg`] owns two fully disjoint channel resource sets (sequencer, engine
//! pair, indirection cell, pin group) and exposes the two operations the
//! outside world gets: bring-up ([`Wfg::new`]) and live reconfiguration
//! ([`Wfg::play`]). Once `play()` returns, the stream sustains itself; the
//! caller only steps the system clock.
//!
//! `play()` is a short, bounded sequence of register writes performed in a
//! fixed order on the targeted channel only:
//!
//! 1. store the new buffer/length/frequency (the pointer-cell write comes
//!    first, so the control engine can never latch a stale pointer),
//! 2. re-point the data engine and flush the queue (fresh, non-chained
//!    control word; nothing auto-starts yet),
//! 3. re-trigger the control engine, which arms the loop and starts the
//!    first data transfer,
//! 4. latch the recomputed divider and restart the fractional clock so the
//!    new rate takes effect at a tick boundary.
//!
//! There is no error path and no stop operation: invalid requests clamp to a
//! bounded best-effort stream, and "stopping" only ever happens as a side
//! effect of playing something else.

use std::sync::Arc;

use crate::channel::{Channel, ChannelState, Waveform};
use crate::constants::{DEFAULT_FREQ_HZ, DEFAULT_PATTERN, PIN_BASE_A, PIN_BASE_B};
use crate::divider::ClockDivider;
use crate::feeder::{BufferCell, Feeder, FeederPhase};
use crate::program::SeqProgram;
use crate::sequencer::Sequencer;

/// One channel's full resource set.
struct ChannelUnit {
    state: ChannelState,
    cell: BufferCell,
    sequencer: Sequencer,
    feeder: Feeder,
}

/// Snapshot of one channel's observable state, for equality checks across
/// operations that must not disturb it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSnapshot {
    /// Active buffer identity (pointer value of the shared handle).
    pub buffer_ptr: usize,
    /// Active length in words.
    pub len_words: u32,
    /// Active frequency in Hz.
    pub frequency_hz: f32,
    /// Encoded divider register.
    pub divider_bits: u32,
    /// Feeder loop phase.
    pub phase: FeederPhase,
    /// Words queued in the sequencer.
    pub fifo_len: usize,
    /// Latched pin-group value.
    pub pins: u8,
}

/// The dual-channel waveform generator rig.
pub struct Wfg {
    program: Arc<SeqProgram>,
    units: [ChannelUnit; 2],
    clocks: u64,
}

impl Wfg {
    /// Bring-up: load the sequencer program into the shared instruction
    /// store, wire both pin groups, arm both feeders with the built-in
    /// default waveform and start both streams. Call once; every later
    /// reconfiguration goes through [`play`](Self::play).
    pub fn new() -> Self {
        let program = SeqProgram::wfg_out();
        let default = Waveform::new(Arc::from(DEFAULT_PATTERN.as_slice()), DEFAULT_FREQ_HZ);

        let mut wfg = Wfg {
            units: [
                Self::unit(&program, &default, PIN_BASE_A, 0, (0, 1)),
                Self::unit(&program, &default, PIN_BASE_B, 1, (2, 3)),
            ],
            program,
            clocks: 0,
        };
        for ch in Channel::ALL {
            wfg.play(ch, &default);
        }
        wfg
    }

    fn unit(
        program: &Arc<SeqProgram>,
        default: &Waveform,
        pin_base: u8,
        sequencer_id: u8,
        engine_ids: (u8, u8),
    ) -> ChannelUnit {
        let cell = BufferCell::new(default.words().clone());
        // Data engine paced by this sequencer's queue demand signal
        let feeder = Feeder::new(engine_ids.0, engine_ids.1, sequencer_id, cell.clone());
        let divider = ClockDivider::for_waveform(default.frequency_hz(), default.len_words());
        ChannelUnit {
            state: ChannelState::new(default.clone(), sequencer_id, engine_ids),
            cell,
            sequencer: Sequencer::new(program.clone(), pin_base, divider),
            feeder,
        }
    }

    /// Reconfigure one channel to stream `wave`, leaving the other channel
    /// untouched. No return value and no error path: out-of-range requests
    /// produce a clamped, best-effort stream (see the divider calculator).
    pub fn play(&mut self, channel: Channel, wave: &Waveform) {
        let unit = &mut self.units[channel.index()];

        // 1. Store the new parameters; the pointer cell is written before
        //    anything can re-trigger the engines.
        unit.cell.set(wave.words().clone());
        unit.state.store(wave);

        // 2. Re-point the data engine, drain stale queued words so the new
        //    buffer streams from word zero.
        unit.feeder.rearm(wave.len_words());
        unit.sequencer.flush();

        // 3. Loop-start: the control engine latches the fresh pointer and
        //    kicks the first data transfer.
        unit.feeder.trigger();

        // 4. New rate, latched and restarted together.
        let divider = ClockDivider::for_waveform(wave.frequency_hz(), wave.len_words());
        unit.sequencer.configure(divider);
        unit.sequencer.restart();
    }

    /// Advance the whole rig by one system-clock cycle. Returns the byte
    /// each channel emitted this cycle, if its divided tick fired.
    pub fn clock(&mut self) -> [Option<u8>; 2] {
        self.clocks += 1;
        let mut out = [None; 2];
        for (i, unit) in self.units.iter_mut().enumerate() {
            unit.feeder.pump(&mut unit.sequencer);
            out[i] = unit.sequencer.clock();
        }
        out
    }

    /// Run the rig until `channel` has emitted `count` further ticks and
    /// collect them. The other channel keeps streaming in the background.
    pub fn generate_ticks(&mut self, channel: Channel, count: usize) -> Vec<u8> {
        let mut ticks = vec![0u8; count];
        self.generate_ticks_into(channel, &mut ticks);
        ticks
    }

    /// Like [`generate_ticks`](Self::generate_ticks) into a caller-provided
    /// buffer, avoiding the allocation in hot paths.
    pub fn generate_ticks_into(&mut self, channel: Channel, buffer: &mut [u8]) {
        let mut filled = 0;
        while filled < buffer.len() {
            if let Some(byte) = self.clock()[channel.index()] {
                buffer[filled] = byte;
                filled += 1;
            }
        }
    }

    /// Current pin-group value of a channel.
    pub fn output(&self, channel: Channel) -> u8 {
        self.units[channel.index()].sequencer.pins()
    }

    /// Stored parameters of a channel.
    pub fn channel_state(&self, channel: Channel) -> &ChannelState {
        &self.units[channel.index()].state
    }

    /// A channel's current divider register value.
    pub fn divider(&self, channel: Channel) -> ClockDivider {
        self.units[channel.index()].sequencer.divider()
    }

    /// A channel's feeder loop phase.
    pub fn feeder_phase(&self, channel: Channel) -> FeederPhase {
        self.units[channel.index()].feeder.phase()
    }

    /// Divided ticks a channel has emitted since bring-up.
    pub fn tick_count(&self, channel: Channel) -> u64 {
        self.units[channel.index()].sequencer.tick_count()
    }

    /// Ticks a channel spent stalled on an empty queue.
    pub fn stall_count(&self, channel: Channel) -> u64 {
        self.units[channel.index()].sequencer.stall_count()
    }

    /// System-clock cycles elapsed since bring-up.
    pub fn clock_count(&self) -> u64 {
        self.clocks
    }

    /// The shared instruction store both sequencers execute from.
    pub fn program(&self) -> &Arc<SeqProgram> {
        &self.program
    }

    /// Snapshot a channel's observable state.
    pub fn snapshot(&self, channel: Channel) -> ChannelSnapshot {
        let unit = &self.units[channel.index()];
        ChannelSnapshot {
            buffer_ptr: unit.state.buffer().as_ptr() as usize,
            len_words: unit.state.len_words(),
            frequency_hz: unit.state.frequency_hz(),
            divider_bits: unit.sequencer.divider().bits(),
            phase: unit.feeder.phase(),
            fifo_len: unit.sequencer.fifo_len(),
            pins: unit.sequencer.pins(),
        }
    }
}

impl Default for Wfg {
    fn default() -> Self {
        Self::new()
    }
}
