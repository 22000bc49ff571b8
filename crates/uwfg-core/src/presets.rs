//! Built-in test waveforms
//!
//! Predefined byte-sample tables, 4-byte aligned by construction once packed
//! into words: one sine period at three resolutions, a square block and a
//! full-scale sawtooth ramp. The monitor shell plays these directly; the
//! shaper uses the 256-entry sine as its lookup table.

use crate::channel::Waveform;

/// One sine period, 16 byte samples.
pub const SINE16: [u8; 16] = [
    128, 176, 218, 245, 255, 245, 218, 176, 128, 79, 37, 10, 0, 10, 37, 79,
];

/// One sine period, 64 byte samples.
pub const SINE64: [u8; 64] = [
    128, 140, 152, 165, 176, 188, 198, 208, 218, 226, 234, 240, 245, 250, 253, 254, //
    255, 254, 253, 250, 245, 240, 234, 226, 218, 208, 198, 188, 176, 165, 152, 140, //
    128, 115, 103, 90, 79, 67, 57, 47, 37, 29, 21, 15, 10, 5, 2, 1, //
    0, 1, 2, 5, 10, 15, 21, 29, 37, 47, 57, 67, 79, 90, 103, 115,
];

/// One sine period, 256 byte samples.
pub const SINE256: [u8; 256] = [
    128, 131, 134, 137, 140, 143, 146, 149, 152, 155, 158, 162, 165, 167, 170, 173, //
    176, 179, 182, 185, 188, 190, 193, 196, 198, 201, 203, 206, 208, 211, 213, 215, //
    218, 220, 222, 224, 226, 228, 230, 232, 234, 235, 237, 238, 240, 241, 243, 244, //
    245, 246, 248, 249, 250, 250, 251, 252, 253, 253, 254, 254, 254, 255, 255, 255, //
    255, 255, 255, 255, 254, 254, 254, 253, 253, 252, 251, 250, 250, 249, 248, 246, //
    245, 244, 243, 241, 240, 238, 237, 235, 234, 232, 230, 228, 226, 224, 222, 220, //
    218, 215, 213, 211, 208, 206, 203, 201, 198, 196, 193, 190, 188, 185, 182, 179, //
    176, 173, 170, 167, 165, 162, 158, 155, 152, 149, 146, 143, 140, 137, 134, 131, //
    128, 124, 121, 118, 115, 112, 109, 106, 103, 100, 97, 93, 90, 88, 85, 82, //
    79, 76, 73, 70, 67, 65, 62, 59, 57, 54, 52, 49, 47, 44, 42, 40, //
    37, 35, 33, 31, 29, 27, 25, 23, 21, 20, 18, 17, 15, 14, 12, 11, //
    10, 9, 7, 6, 5, 5, 4, 3, 2, 2, 1, 1, 1, 0, 0, 0, //
    0, 0, 0, 0, 1, 1, 1, 2, 2, 3, 4, 5, 5, 6, 7, 9, //
    10, 11, 12, 14, 15, 17, 18, 20, 21, 23, 25, 27, 29, 31, 33, 35, //
    37, 40, 42, 44, 47, 49, 52, 54, 57, 59, 62, 65, 67, 70, 73, 76, //
    79, 82, 85, 88, 90, 93, 97, 100, 103, 106, 109, 112, 115, 118, 121, 124,
];

/// One square period, 16 byte samples, low half first.
pub const BLOCK16: [u8; 16] = [
    0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255,
];

/// One full-scale sawtooth ramp, 256 byte samples.
pub fn saw256() -> [u8; 256] {
    let mut ramp = [0u8; 256];
    for (i, sample) in ramp.iter_mut().enumerate() {
        *sample = i as u8;
    }
    ramp
}

/// The 16-sample sine as a playable waveform at `freq_hz`.
pub fn sine16(freq_hz: f32) -> Waveform {
    Waveform::from_bytes(&SINE16, freq_hz)
}

/// The 64-sample sine as a playable waveform at `freq_hz`.
pub fn sine64(freq_hz: f32) -> Waveform {
    Waveform::from_bytes(&SINE64, freq_hz)
}

/// The 256-sample sine as a playable waveform at `freq_hz`.
pub fn sine256(freq_hz: f32) -> Waveform {
    Waveform::from_bytes(&SINE256, freq_hz)
}

/// The square block as a playable waveform at `freq_hz`.
pub fn block16(freq_hz: f32) -> Waveform {
    Waveform::from_bytes(&BLOCK16, freq_hz)
}

/// The sawtooth ramp as a playable waveform at `freq_hz`.
pub fn sawtooth256(freq_hz: f32) -> Waveform {
    Waveform::from_bytes(&saw256(), freq_hz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_whole_words() {
        assert_eq!(SINE16.len() % 4, 0);
        assert_eq!(SINE64.len() % 4, 0);
        assert_eq!(SINE256.len() % 4, 0);
        assert_eq!(BLOCK16.len() % 4, 0);
    }

    #[test]
    fn test_sine_tables_midpoint_and_extremes() {
        for table in [&SINE16[..], &SINE64[..], &SINE256[..]] {
            assert_eq!(table[0], 128, "sine starts at the midpoint");
            assert_eq!(*table.iter().max().unwrap(), 255);
            assert_eq!(*table.iter().min().unwrap(), 0);
        }
        // Peak at a quarter period, trough at three quarters
        assert_eq!(SINE256[64], 255);
        assert_eq!(SINE256[192], 0);
    }

    #[test]
    fn test_saw_ramp_is_linear() {
        let ramp = saw256();
        for i in 0..256 {
            assert_eq!(ramp[i], i as u8);
        }
    }

    #[test]
    fn test_preset_waveform_packing() {
        let wave = sine16(1000.0);
        assert_eq!(wave.len_words(), 4);
        assert_eq!(wave.byte_samples(), SINE16);
        assert_eq!(wave.frequency_hz(), 1000.0);
    }
}
