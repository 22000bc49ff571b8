//! Sequencer micro-program
//!
//! The output rig runs one fixed micro-program: shift eight bits of the
//! output register onto the pin group every divided tick, refilling the
//! register from the input queue whenever it runs empty (autopull). The
//! program text lives in a shared instruction store loaded once at bring-up;
//! both sequencer instances execute it concurrently with their own program
//! counters, queues and divider registers.

use std::sync::Arc;

/// One sequencer instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqOp {
    /// Shift `bits` bits out of the output register onto the pin group.
    /// Stalls (holding the pins) if the register is empty and the queue has
    /// no word to refill it with.
    OutPins {
        /// Number of bits to shift out on this tick.
        bits: u8,
    },
}

/// An immutable sequencer program plus its shift configuration.
#[derive(Debug)]
pub struct SeqProgram {
    ops: Box<[SeqOp]>,
    /// Autopull threshold in bits: the output register refills from the
    /// queue once this many bits have been shifted out.
    pub autopull_threshold: u8,
}

impl SeqProgram {
    /// The waveform output program: a single `out pins, 8` with a 32-bit
    /// autopull, so each queued word yields four byte-wide output ticks.
    pub fn wfg_out() -> Arc<Self> {
        Arc::new(SeqProgram {
            ops: Box::new([SeqOp::OutPins { bits: 8 }]),
            autopull_threshold: 32,
        })
    }

    /// Fetch the instruction at `pc`.
    pub fn op(&self, pc: usize) -> SeqOp {
        self.ops[pc]
    }

    /// Number of instructions; the program counter wraps at this bound.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the program contains no instructions.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wfg_out_shape() {
        let program = SeqProgram::wfg_out();
        assert_eq!(program.len(), 1);
        assert_eq!(program.op(0), SeqOp::OutPins { bits: 8 });
        // One word must fan out into exactly four ticks
        assert_eq!(program.autopull_threshold, 32);
    }
}
