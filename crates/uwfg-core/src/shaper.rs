//! Waveform shaping
//!
//! Renders the standard shapes into byte-sample buffers sized from an
//! intended duration: the buffer gets one sample per system clock
//! (`len = fsys * duration`), clamped to the platform's 20..2000 byte range
//! and masked to whole words, and plays back at `1 / duration` Hz. For
//! durations under a few hundred nanoseconds the clamp makes the divider
//! drop below 4 and frequency accuracy degrades; that trade-off belongs to
//! the divider calculator's documented precision contract.

use crate::channel::Waveform;
use crate::constants::{FSYS_HZ, MAX_BUFLEN_BYTES, MIN_BUFLEN_BYTES};
use crate::presets::SINE256;
use crate::{Result, WfgError};

/// A waveform shape to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// 50% square: high half period, then low half.
    Square,
    /// Symmetric triangle: linear up, linear down.
    Triangle,
    /// Rising sawtooth ramp.
    Sawtooth,
    /// Sine, via the 256-entry lookup table.
    Sine,
    /// Trapezoid pulse described in percentages of the period.
    Pulse {
        /// High time including the rising flank, percent of the period.
        duty: u8,
        /// Rising flank, percent of the period (clamped to `duty`).
        rise: u8,
        /// Falling flank, percent of the period (clamped to `100 - duty`).
        fall: u8,
    },
}

/// Number of byte samples a waveform of `duration_secs` gets.
fn sample_count(duration_secs: f32) -> usize {
    let len = (FSYS_HZ * duration_secs) as usize;
    len.clamp(MIN_BUFLEN_BYTES, MAX_BUFLEN_BYTES) & !3
}

/// Render `shape` into a playable waveform repeating every `duration_secs`.
///
/// Fails only on a non-positive or non-finite duration; all percentage
/// parameters are clamped into range rather than rejected.
pub fn render(shape: Shape, duration_secs: f32) -> Result<Waveform> {
    if !(duration_secs > 0.0 && duration_secs.is_finite()) {
        return Err(WfgError::Config(format!(
            "waveform duration must be positive and finite, got {duration_secs}"
        )));
    }
    let len = sample_count(duration_secs);
    let mut samples = vec![0u8; len];

    match shape {
        Shape::Square => {
            samples[..len / 2].fill(0xFF);
            // second half stays low
        }
        Shape::Triangle => {
            let half = len / 2;
            let step = 255.0 / half as f32;
            for i in 0..half {
                let up = (i as f32 * step) as u8;
                samples[i] = up;
                samples[i + half] = 255 - up;
            }
        }
        Shape::Sawtooth => {
            let step = 255.0 / len as f32;
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample = (i as f32 * step) as u8;
            }
        }
        Shape::Sine => {
            let step = SINE256.len() as f32 / len as f32;
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample = SINE256[(i as f32 * step) as usize & 0xFF];
            }
        }
        Shape::Pulse { duty, rise, fall } => {
            let duty = duty.min(100);
            let rise = rise.min(duty);
            let fall = fall.min(100 - duty);
            let d = duty as usize * len / 100;
            let r = rise as usize * len / 100;
            let f = fall as usize * len / 100;
            if r > 0 {
                let step = 255.0 / r as f32;
                for i in 0..r {
                    samples[i] = (i as f32 * step) as u8;
                }
            }
            samples[r..d].fill(0xFF);
            if f > 0 {
                let step = 255.0 / f as f32;
                for i in 0..f {
                    samples[d + i] = 255 - (i as f32 * step) as u8;
                }
            }
            // tail past d + f stays low
        }
    }

    Ok(Waveform::from_bytes(&samples, 1.0 / duration_secs))
}
