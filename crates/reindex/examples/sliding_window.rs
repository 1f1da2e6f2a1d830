//! Example demonstrating a sliding window addressed by absolute sample numbers.
//!
//! This example shows how to:
//! - Wrap a `VecDeque` in a `Reindex` adapter with a `Rebase` converter
//! - Slide the window by popping from the front and re-seating the offset
//! - Address samples by their absolute sample number instead of their slot
//! - View every `step`-th sample through a strided `Slit` adapter
//!
//! # Usage
//!
//! ```sh
//! cargo run --example sliding_window
//! ```
//!
//! Change the window length and the number of generated samples:
//!
//! ```sh
//! cargo run --example sliding_window -- --window 8 --samples 40
//! ```
//!
//! Show re-seating decisions:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example sliding_window
//! ```

use std::collections::VecDeque;

use clap::Parser;
use reindex::{Rebase, Reindex, Slit};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of samples kept in the window.
    #[arg(short, long, value_name = "LEN", default_value_t = 5)]
    window: usize,

    /// Absolute number of the first sample.
    #[arg(long, value_name = "KEY", default_value_t = 1000)]
    start: u64,

    /// Total number of samples to generate.
    #[arg(short, long, value_name = "COUNT", default_value_t = 20)]
    samples: u64,

    /// Stride of the decimated view.
    #[arg(long, value_name = "STEP", default_value_t = 2)]
    step: usize,
}

fn sample(n: u64) -> f64 {
    #[expect(clippy::cast_precision_loss)]
    let n = n as f64;
    (n * 0.25).sin() * 10.0
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.window == 0 || args.step == 0 {
        eprintln!("window and step must be positive");
        std::process::exit(1);
    }

    let mut window = Reindex::new(Rebase::<u64, usize>::new(args.start), VecDeque::new());

    for n in args.start..args.start + args.samples {
        if window.len() == args.window {
            window.container_mut().pop_front();
            window.reindex(window.begin_index() + 1);
        }
        window.container_mut().push_back(sample(n));

        #[expect(clippy::cast_precision_loss)]
        let mean = window.container().iter().sum::<f64>() / window.len() as f64;
        log::info!(
            "sample {n}: window [{}, {}) mean {mean:.3}",
            window.begin_index(),
            window.end_index()
        );
    }

    println!(
        "window covers samples [{}, {})",
        window.begin_index(),
        window.end_index()
    );
    let mut key = window.begin_index();
    while key < window.end_index() {
        println!("  sample {key:>6}: {:>8.3}", window[key]);
        key += window.stride();
    }

    let samples: Vec<f64> = window.container().iter().copied().collect();
    let decimated = Reindex::shared(Slit::<usize>::new(0, args.step), &samples);
    println!("every {}-th slot of the window:", args.step);
    let mut key = decimated.begin_index();
    while let Ok(value) = decimated.at(key) {
        println!("  slot {key:>3}: {value:>8.3}");
        key += decimated.stride();
    }
}
