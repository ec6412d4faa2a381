//! # `PractRand` Stream Generator
//!
//! High-performance stream generator for `PractRand` / `dieharder`
//! testing.
//!
//! This binary writes an endless keystream to stdout, produced by the
//! selected chaotic map under a fixed key. Pipe it straight into the
//! statistical battery:
//!
//! ```text
//! cargo run --release -p vortex-verification -- lorenz | RNG_test stdin
//! ```

use std::io::{self, Write};
use vortex::{MapKind, VortexRng};

/// Entry point for the `PractRand` stream generator.
fn main() {
    let args: Vec<String> = std::env::args().collect();

    let map = match args.get(1).map(String::as_str) {
        Some("logistic") => MapKind::Logistic,
        Some("sine") => MapKind::Sine,
        Some("henon") => MapKind::Henon,
        Some("lorenz") => MapKind::Lorenz,
        Some("chen") => MapKind::Chen,
        _ => MapKind::Tent,
    };

    // Fixed key so runs are reproducible; the IV counter walks the
    // keystream forward one 4096-byte pool at a time.
    let key = [0x42u8; 32];
    let iv = [0u8; 16];
    let Ok(mut rng) = VortexRng::from_key_iv(map, &key, &iv) else {
        eprintln!("keystream setup failed");
        std::process::exit(1);
    };

    eprintln!("vortex keystream: {map} ({})", vortex::active_backend());

    let stdout = io::stdout();
    let mut handle = io::BufWriter::new(stdout.lock());
    let mut buf = [0u8; 65_536];

    loop {
        rng.fill(&mut buf);
        if handle.write_all(&buf).is_err() {
            break;
        }
    }
}
