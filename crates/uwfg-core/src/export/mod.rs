//! Capture export
//!
//! Renders a channel's emitted tick stream offline and writes it to disk.

mod wav;

pub use wav::{capture_to_wav, CaptureConfig};
