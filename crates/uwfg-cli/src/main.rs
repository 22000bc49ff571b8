//! uWFG monitor shell
//!
//! Line-oriented command shell on stdin/stdout driving the simulated
//! dual-channel waveform generator rig: select built-in test patterns and
//! sample rates per channel, inspect channel state, capture tick streams
//! to WAV files.

mod shell;

use std::io::{self, BufRead, Write};

use shell::{Outcome, Shell};

fn banner() {
    println!();
    println!("=============");
    println!(" uWFG        ");
    println!(" monitor     ");
    println!("=============");
}

fn main() {
    banner();
    let mut shell = Shell::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("uWFG> ");
        let _ = stdout.flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }
        if let Outcome::Quit = shell.evaluate(line.trim_end()) {
            break;
        }
    }
}
