//! Dual-channel rig demo
//!
//! Brings up the rig, plays a shaped triangle on channel A and the built-in
//! sine on channel B, then prints a short stretch of both tick streams.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example rig_demo -p uwfg
//! ```

use uwfg::shaper::{render, Shape};
use uwfg::{presets, Channel, Wfg};

fn main() {
    let mut wfg = Wfg::new();
    println!("rig up: both channels streaming the default pattern");
    for ch in Channel::ALL {
        let state = wfg.channel_state(ch);
        println!(
            "  {ch}: {} words at {} Hz, divider {}",
            state.len_words(),
            state.frequency_hz(),
            wfg.divider(ch).decode()
        );
    }

    let triangle = render(Shape::Triangle, 4e-6).expect("valid duration");
    wfg.play(Channel::A, &triangle);
    wfg.play(Channel::B, &presets::sine16(1_000_000.0));

    println!("\nchannel A (triangle, 250 kHz):");
    println!("  {:?}", wfg.generate_ticks(Channel::A, 16));
    println!("channel B (sine16, 1 MHz):");
    println!("  {:?}", wfg.generate_ticks(Channel::B, 16));
}
