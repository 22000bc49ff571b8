//! WAV capture writing
//!
//! Runs the rig forward and records one channel's byte stream as a mono
//! 16-bit WAV file. This is a logic capture, not audio: the nominal sample
//! rate is the channel's realized tick rate, which sits anywhere between
//! ~119 Hz and the full system clock depending on the divider.

use std::path::Path;

use crate::channel::Channel;
use crate::wfg::Wfg;
use crate::Result;

/// Capture configuration.
#[derive(Debug, Clone, Copy)]
pub struct CaptureConfig {
    /// Number of output ticks to record.
    pub ticks: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        // Four periods of the largest buffer
        CaptureConfig { ticks: 8000 }
    }
}

/// Record `config.ticks` ticks of `channel` into a WAV file at
/// `output_path`. The rig keeps running normally; the untouched channel
/// streams in the background while the capture collects.
pub fn capture_to_wav<P: AsRef<Path>>(
    wfg: &mut Wfg,
    channel: Channel,
    config: CaptureConfig,
    output_path: P,
) -> Result<()> {
    let sample_rate = wfg.divider(channel).tick_rate_hz() as u32;
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let ticks = wfg.generate_ticks(channel, config.ticks);

    let mut writer = hound::WavWriter::create(output_path, spec)?;
    for byte in ticks {
        // Center the unsigned byte lane and scale to full span
        writer.write_sample(((byte as i16) - 128) << 8)?;
    }
    writer.finalize()?;
    Ok(())
}
