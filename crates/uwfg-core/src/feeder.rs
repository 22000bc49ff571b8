//! Autonomous buffer feeder
//!
//! A chained pair of copy engines keeps each sequencer's queue filled in a
//! closed loop. The data engine streams the active buffer's words into the
//! queue, one word per cycle and only when the sequencer's demand signal
//! allows it. On completing its transfer count it chains to the control
//! engine, which performs exactly one transfer: it re-fetches the current
//! value of the active-buffer indirection cell into the data engine's read
//! address and re-triggers it.
//!
//! The indirection is the point: the control engine reads through the
//! pointer's own storage cell, never a frozen copy, so a pointer update made
//! by the channel controller between two loop iterations takes effect at the
//! next wraparound without ever halting the stream. The data/control cycle
//! has no terminal state.

use std::sync::Arc;

use bitflags::bitflags;
use parking_lot::Mutex;

use crate::sequencer::Sequencer;

bitflags! {
    /// Single-bit flags of a copy-engine control word, laid out like the
    /// platform's DMA channel CTRL register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DmaControl: u32 {
        /// Engine enabled.
        const EN            = 1 << 0;
        /// Preferential treatment in transfer scheduling.
        const HIGH_PRIORITY = 1 << 1;
        /// Read address increments with each transfer.
        const INCR_READ     = 1 << 4;
        /// Write address increments with each transfer.
        const INCR_WRITE    = 1 << 5;
        /// Suppress per-block completion interrupts.
        const IRQ_QUIET     = 1 << 21;
    }
}

/// Transfer-request selector value meaning "unpaced, run at full speed".
pub const TREQ_PERMANENT: u8 = 0x3F;

/// A full copy-engine control word: flag bits plus the multi-bit transfer
/// pacing, chain-target and transfer-size fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlWord {
    /// Flag bits.
    pub flags: DmaControl,
    /// Transfer request selector: which demand signal paces this engine
    /// ([`TREQ_PERMANENT`] for unpaced).
    pub treq: u8,
    /// Engine triggered when this engine's transfer count runs out.
    pub chain_to: u8,
    /// Log2 of the transfer size in bytes (2 = 32-bit words).
    pub data_size: u8,
}

impl CtrlWord {
    /// Control word for a data engine: word-sized, incrementing reads into a
    /// fixed queue address, paced by `treq`, chained to `chain_to`.
    pub fn data(treq: u8, chain_to: u8) -> Self {
        CtrlWord {
            flags: DmaControl::EN
                | DmaControl::HIGH_PRIORITY
                | DmaControl::INCR_READ
                | DmaControl::IRQ_QUIET,
            treq,
            chain_to,
            data_size: 2,
        }
    }

    /// Control word for a control engine: a single unpaced word transfer
    /// from the indirection cell, chained back to `chain_to`.
    pub fn control(chain_to: u8) -> Self {
        CtrlWord {
            flags: DmaControl::EN | DmaControl::HIGH_PRIORITY | DmaControl::IRQ_QUIET,
            treq: TREQ_PERMANENT,
            chain_to,
            data_size: 2,
        }
    }

    /// Pack into the register layout (TREQ in bits 20:15, chain target in
    /// bits 14:11, transfer size in bits 3:2).
    pub fn encode(self) -> u32 {
        self.flags.bits()
            | ((self.treq as u32 & 0x3F) << 15)
            | ((self.chain_to as u32 & 0xF) << 11)
            | ((self.data_size as u32 & 0x3) << 2)
    }

    /// Unpack from the register layout.
    pub fn decode(bits: u32) -> Self {
        CtrlWord {
            flags: DmaControl::from_bits_truncate(bits),
            treq: ((bits >> 15) & 0x3F) as u8,
            chain_to: ((bits >> 11) & 0xF) as u8,
            data_size: ((bits >> 2) & 0x3) as u8,
        }
    }
}

/// The one-word indirection cell holding a channel's active-buffer pointer.
///
/// Written by the channel controller, read by the control engine on every
/// loop iteration. Cloning the cell clones the handle, not the cell: both
/// sides observe the same storage, mirroring a shared pointer word that both
/// the processor and the engine address. The cell holds a shared handle to
/// the sample data, never a copy of it.
#[derive(Debug, Clone)]
pub struct BufferCell(Arc<Mutex<Arc<[u32]>>>);

impl BufferCell {
    /// Create a cell pointing at `buffer`.
    pub fn new(buffer: Arc<[u32]>) -> Self {
        BufferCell(Arc::new(Mutex::new(buffer)))
    }

    /// Redirect the cell to a new buffer. A single whole-word update: the
    /// control engine can never observe a half-written pointer.
    pub fn set(&self, buffer: Arc<[u32]>) {
        *self.0.lock() = buffer;
    }

    /// Fetch the current buffer handle.
    pub fn get(&self) -> Arc<[u32]> {
        self.0.lock().clone()
    }
}

/// Where a feeder pair is in its closed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeederPhase {
    /// Armed but not yet triggered; nothing moves.
    Priming,
    /// Data engine streaming buffer words into the queue.
    Streaming,
    /// Data engine done; control engine about to re-arm and re-trigger it.
    Rearming,
}

/// The chained data/control engine pair of one channel.
#[derive(Debug)]
pub struct Feeder {
    cell: BufferCell,
    /// Data engine's latched read address: the buffer it is currently
    /// streaming, frozen at the last control-engine transfer.
    latched: Arc<[u32]>,
    pos: usize,
    remaining: u32,
    /// Programmed transfer count, re-applied at every re-arm.
    reload: u32,
    data_ctrl: CtrlWord,
    ctrl_ctrl: CtrlWord,
    phase: FeederPhase,
    data_ch: u8,
    ctrl_ch: u8,
}

impl Feeder {
    /// Create the engine pair for one channel. `treq` is the demand signal
    /// of the channel's sequencer queue; `data_ch`/`ctrl_ch` are the engine
    /// identifiers the pair chains between.
    pub fn new(data_ch: u8, ctrl_ch: u8, treq: u8, cell: BufferCell) -> Self {
        let latched = cell.get();
        Feeder {
            cell,
            latched,
            pos: 0,
            remaining: 0,
            reload: 0,
            data_ctrl: CtrlWord::data(treq, ctrl_ch),
            ctrl_ctrl: CtrlWord::control(data_ch),
            phase: FeederPhase::Priming,
            data_ch,
            ctrl_ch,
        }
    }

    /// Re-point the data engine at the cell's buffer with a fresh transfer
    /// count and a fresh, non-chained-start control word. The loop does not
    /// move again until [`trigger`](Self::trigger).
    ///
    /// The channel controller must update the indirection cell *before*
    /// calling this, so the first control-engine fetch already sees the new
    /// pointer.
    pub fn rearm(&mut self, len_words: u32) {
        self.reload = len_words;
        self.data_ctrl = CtrlWord::data(self.data_ctrl.treq, self.ctrl_ch);
        self.phase = FeederPhase::Priming;
    }

    /// Trigger the control engine. Its single transfer latches the current
    /// cell value into the data engine and starts the first data transfer;
    /// this is the loop-start signal.
    pub fn trigger(&mut self) {
        self.control_transfer();
    }

    /// The control engine's one transfer: re-fetch the current buffer
    /// pointer, reload the count, re-trigger the data engine.
    fn control_transfer(&mut self) {
        self.latched = self.cell.get();
        self.pos = 0;
        self.remaining = self.reload;
        self.phase = FeederPhase::Streaming;
    }

    /// Advance the pair by one system-clock cycle: at most one word moves.
    pub fn pump(&mut self, seq: &mut Sequencer) {
        match self.phase {
            FeederPhase::Priming => {}
            FeederPhase::Streaming => {
                if self.remaining == 0 {
                    // Zero-length transfer chains straight through
                    self.phase = FeederPhase::Rearming;
                    return;
                }
                if seq.dreq() {
                    seq.push(self.latched[self.pos]);
                    self.pos += 1;
                    self.remaining -= 1;
                    if self.remaining == 0 {
                        self.phase = FeederPhase::Rearming;
                    }
                }
            }
            FeederPhase::Rearming => self.control_transfer(),
        }
    }

    /// Current loop phase.
    pub fn phase(&self) -> FeederPhase {
        self.phase
    }

    /// Programmed transfer count in words.
    pub fn transfer_count(&self) -> u32 {
        self.reload
    }

    /// Engine identifier pair (data, control).
    pub fn engine_ids(&self) -> (u8, u8) {
        (self.data_ch, self.ctrl_ch)
    }

    /// The data engine's current control word.
    pub fn data_ctrl(&self) -> CtrlWord {
        self.data_ctrl
    }

    /// The control engine's control word.
    pub fn ctrl_ctrl(&self) -> CtrlWord {
        self.ctrl_ctrl
    }

    /// The buffer the data engine is currently latched onto. Tests use this
    /// to check which buffer a loop iteration is reading.
    pub fn latched_buffer(&self) -> &Arc<[u32]> {
        &self.latched
    }
}
