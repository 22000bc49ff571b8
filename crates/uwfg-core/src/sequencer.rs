//! Autonomous output sequencer
//!
//! One sequencer instance per channel. Each runs the shared micro-program at
//! a rate set by its 16.8 fixed-point clock divider, pulling 32-bit words
//! from its input queue and clocking out one byte lane onto its pin group
//! per divided tick. Bytes leave a word least-significant first, so a
//! 4-byte-aligned sample buffer streams in memory order.
//!
//! An empty queue is back-pressure, not corruption: the sequencer stalls on
//! the pull and the pins hold their last value until the next word arrives,
//! observable as frequency error only.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::constants::FIFO_DEPTH;
use crate::divider::ClockDivider;
use crate::program::{SeqOp, SeqProgram};

/// Cycle-steppable model of one output sequencer engine.
#[derive(Debug)]
pub struct Sequencer {
    program: Arc<SeqProgram>,
    pc: usize,
    divider: ClockDivider,
    /// Fractional clock accumulator, in 1/256 system-clock steps.
    acc: u32,
    fifo: VecDeque<u32>,
    /// Output shift register and the number of valid bits left in it.
    osr: u32,
    osr_bits: u8,
    /// Latched pin-group value: what the output pins currently drive.
    pins: u8,
    pin_base: u8,
    ticks: u64,
    stalls: u64,
}

impl Sequencer {
    /// Create a sequencer bound to a pin group, running `program` at the
    /// given divider. The engine is live immediately; it simply stalls
    /// until the feeder supplies its first word.
    pub fn new(program: Arc<SeqProgram>, pin_base: u8, divider: ClockDivider) -> Self {
        Sequencer {
            program,
            pc: 0,
            divider,
            acc: 0,
            fifo: VecDeque::with_capacity(FIFO_DEPTH),
            osr: 0,
            osr_bits: 0,
            pins: 0,
            pin_base,
            ticks: 0,
            stalls: 0,
        }
    }

    /// Latch a new divider value. Takes effect from the next divided tick;
    /// call [`restart`](Self::restart) in the same reconfiguration step so
    /// the fractional counter starts clean at the new rate.
    pub fn configure(&mut self, divider: ClockDivider) {
        self.divider = divider;
    }

    /// Restart the fractional clock at the current divider. A discrete,
    /// glitch-free re-latch: in-flight shift state is untouched.
    pub fn restart(&mut self) {
        self.acc = 0;
    }

    /// Demand signal: true while the input queue has room for another word.
    pub fn dreq(&self) -> bool {
        self.fifo.len() < FIFO_DEPTH
    }

    /// Queue one word. The feeder only calls this when [`dreq`](Self::dreq)
    /// is asserted; excess words are dropped like writes to a full hardware
    /// queue.
    pub fn push(&mut self, word: u32) {
        if self.fifo.len() < FIFO_DEPTH {
            self.fifo.push_back(word);
        }
    }

    /// Drain the queue and shift register. Used by the channel controller
    /// when re-priming a channel so a swapped buffer streams from its first
    /// word instead of behind stale queued data.
    pub fn flush(&mut self) {
        self.fifo.clear();
        self.osr = 0;
        self.osr_bits = 0;
    }

    /// Advance one system-clock cycle. Returns the emitted byte when this
    /// cycle produced a divided tick that shifted out a new value.
    pub fn clock(&mut self) -> Option<u8> {
        self.acc += 256;
        let div = self.divider.bits() >> 8;
        if self.acc < div {
            return None;
        }
        self.acc -= div;
        self.exec_tick()
    }

    fn exec_tick(&mut self) -> Option<u8> {
        match self.program.op(self.pc) {
            SeqOp::OutPins { bits } => {
                if self.osr_bits == 0 {
                    // Autopull; stall in place if the queue is empty
                    match self.fifo.pop_front() {
                        Some(word) => {
                            self.osr = word;
                            self.osr_bits = self.program.autopull_threshold;
                        }
                        None => {
                            self.stalls += 1;
                            return None;
                        }
                    }
                }
                let out = (self.osr & ((1u32 << bits) - 1)) as u8;
                self.osr >>= bits;
                self.osr_bits -= bits;
                self.pins = out;
                self.ticks += 1;
                self.pc = (self.pc + 1) % self.program.len();
                Some(out)
            }
        }
    }

    /// Current pin-group value.
    pub fn pins(&self) -> u8 {
        self.pins
    }

    /// First pin of this sequencer's output group.
    pub fn pin_base(&self) -> u8 {
        self.pin_base
    }

    /// Current divider register value.
    pub fn divider(&self) -> ClockDivider {
        self.divider
    }

    /// Words currently queued.
    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    /// Total divided ticks that emitted a byte.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Divided ticks spent stalled on an empty queue.
    pub fn stall_count(&self) -> u64 {
        self.stalls
    }
}
