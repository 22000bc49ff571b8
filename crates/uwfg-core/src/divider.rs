//! Clock divider calculator
//!
//! Pure fixed-point math that maps a target waveform frequency and buffer
//! length onto the sequencer clock-divider register. The register holds a
//! 16.8 fixed-point ratio between the system clock and the sequencer tick
//! rate: integer part in bits 31:16, fractional 1/256 steps in bits 15:8,
//! low byte reserved.
//!
//! Precision contract: accuracy is bounded by the 1/256 fractional step and
//! the truncation of the fraction, so the realized frequency is within 0.1%
//! of the target whenever the divider is at least 4. Shorter buffers at high
//! frequencies push the divider below that and degrade accuracy predictably.

use crate::constants::{FSYS_HZ, TICKS_PER_WORD};

/// Encoded sequencer clock divider (16.8 fixed point, left-shifted by 8 to
/// match the register format).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockDivider(u32);

impl ClockDivider {
    /// Unity ratio: sequencer ticks at the full system clock rate.
    pub const UNITY: ClockDivider = ClockDivider(1 << 16);

    /// Largest ratio the register can hold: 65535 + 255/256.
    pub const MAX: ClockDivider = ClockDivider((0xFFFF << 16) | (0xFF << 8));

    /// Encode a raw divide ratio into register format.
    ///
    /// The ratio is clamped to the achievable range before encoding: the
    /// sequencer clock can only be slowed relative to the system clock, so
    /// anything below 1.0 saturates to [`ClockDivider::UNITY`]; anything
    /// past the register ceiling saturates to [`ClockDivider::MAX`]. The
    /// fractional part is truncated to 1/256 steps.
    pub fn encode(ratio: f32) -> Self {
        if !(ratio >= 1.0) {
            // NaN and sub-unity ratios both land here
            return Self::UNITY;
        }
        if ratio >= 65536.0 {
            return Self::MAX;
        }
        let int = ratio as u32;
        let frac = ((ratio - int as f32) * 256.0) as u32;
        ClockDivider((int << 16) | (frac.min(0xFF) << 8))
    }

    /// Compute and encode the divider for a waveform of `len_words` 32-bit
    /// words played at `freq_hz` cycles per second:
    ///
    /// `ratio = FSYS / (freq * 4 * len_words)`
    ///
    /// Degenerate inputs (zero length, non-positive frequency) produce an
    /// infinite raw ratio in float arithmetic, which saturates to
    /// [`ClockDivider::MAX`] rather than dividing by zero or faulting.
    pub fn for_waveform(freq_hz: f32, len_words: u32) -> Self {
        let fsam = freq_hz * TICKS_PER_WORD as f32 * len_words as f32;
        Self::encode(FSYS_HZ / fsam)
    }

    /// Decode the register value back into a ratio.
    pub fn decode(self) -> f32 {
        (self.0 >> 16) as f32 + ((self.0 >> 8) & 0xFF) as f32 / 256.0
    }

    /// Raw register value.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Integer part of the ratio.
    pub fn integer(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Fractional part of the ratio, in 1/256 steps.
    pub fn fraction(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// The sequencer tick rate this divider realizes, in Hz.
    pub fn tick_rate_hz(self) -> f32 {
        FSYS_HZ / self.decode()
    }
}

impl Default for ClockDivider {
    fn default() -> Self {
        Self::UNITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_encoding() {
        // 1 MHz over a 4-word buffer: 125e6 / (1e6 * 4 * 4) = 7.8125
        let div = ClockDivider::for_waveform(1_000_000.0, 4);
        assert_eq!(div.integer(), 7);
        assert_eq!(div.fraction(), 208);
        assert_eq!(div.bits(), (7 << 16) | (208 << 8));
        assert_relative_eq!(div.decode(), 7.8125);
    }

    #[test]
    fn test_low_byte_reserved() {
        for freq in [100.0, 1000.0, 440.0, 1.5e6] {
            assert_eq!(ClockDivider::for_waveform(freq, 16).bits() & 0xFF, 0);
        }
    }

    #[test]
    fn test_clamping_floor() {
        // Any combination fast enough to need a sub-unity ratio must encode
        // the minimum ratio exactly
        for (freq, len) in [(40e6, 1), (10e6, 4), (125e6, 100)] {
            let div = ClockDivider::for_waveform(freq, len);
            assert_eq!(div, ClockDivider::UNITY);
            assert_relative_eq!(div.decode(), 1.0);
        }
    }

    #[test]
    fn test_monotonic_in_frequency() {
        // For a fixed buffer length, raising the frequency never raises the
        // divider, and the encoding never drops below unity
        let mut prev = u32::MAX;
        let mut freq = 10.0f32;
        while freq < 50e6 {
            let bits = ClockDivider::for_waveform(freq, 25).bits();
            assert!(bits <= prev, "divider rose with frequency at {freq} Hz");
            assert!(bits >= ClockDivider::UNITY.bits());
            prev = bits;
            freq *= 1.37;
        }
    }

    #[test]
    fn test_roundtrip_accuracy_bound() {
        // Whenever the divider lands at 4 or above, the realized frequency
        // must be within 0.1% of the target
        for len_words in [5u32, 16, 100, 500] {
            let mut freq = 50.0f32;
            while freq < 10e6 {
                let div = ClockDivider::for_waveform(freq, len_words);
                if div.decode() >= 4.0 && div != ClockDivider::MAX {
                    let realized =
                        div.tick_rate_hz() / (TICKS_PER_WORD as f32 * len_words as f32);
                    let err = (realized - freq).abs() / freq;
                    assert!(
                        err < 0.001,
                        "error {err} at {freq} Hz / {len_words} words (divider {})",
                        div.decode()
                    );
                }
                freq *= 1.93;
            }
        }
    }

    #[test]
    fn test_ceiling_saturation() {
        assert_eq!(ClockDivider::encode(1e9), ClockDivider::MAX);
        assert_eq!(ClockDivider::encode(65536.0), ClockDivider::MAX);
        // 0.01 Hz over the smallest buffer overflows the register range
        assert_eq!(ClockDivider::for_waveform(0.01, 5), ClockDivider::MAX);
    }

    #[test]
    fn test_degenerate_inputs_saturate() {
        // Zero length and non-positive frequency must not fault
        assert_eq!(ClockDivider::for_waveform(1000.0, 0), ClockDivider::MAX);
        assert_eq!(ClockDivider::for_waveform(0.0, 16), ClockDivider::MAX);
        // A negative ratio is below unity, so it clamps to the floor
        assert_eq!(ClockDivider::for_waveform(-5.0, 16), ClockDivider::UNITY);
    }

    #[test]
    fn test_exact_integer_ratio() {
        // 125e6 / (100 * 4 * 500) = 625.0 exactly
        let div = ClockDivider::for_waveform(100.0, 500);
        assert_eq!(div.integer(), 625);
        assert_eq!(div.fraction(), 0);
    }
}
