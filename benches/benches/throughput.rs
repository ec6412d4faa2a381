//! Vortex Criterion Benchmark
//!
//! Cipher throughput per map and buffer size, RNG fill rate, scientific
//! fill rate, and a chacha20 baseline for context.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use vortex::{Lorenz, MapKind, VortexRng};

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

const MAPS: [MapKind; 6] = [
    MapKind::Tent,
    MapKind::Logistic,
    MapKind::Sine,
    MapKind::Henon,
    MapKind::Lorenz,
    MapKind::Chen,
];

// =============================================================================
// BENCHMARK 1: CIPHER THROUGHPUT PER MAP
// =============================================================================

fn bench_cipher_maps(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Cipher");
    let key = [0x42u8; 32];
    let iv = [0x24u8; 16];

    for map in MAPS {
        for (size, name) in [(4 * KB, "4KB"), (64 * KB, "64KB"), (MB, "1MB")] {
            let mut buf = vec![0u8; size];
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_function(format!("{map}/{name}"), |b| {
                b.iter(|| {
                    vortex::process(map, black_box(&mut buf), &key, &iv).unwrap();
                });
            });
        }
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: COMPETITOR BASELINE
// =============================================================================

fn bench_chacha20_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Baseline");
    let key = [0x42u8; 32];
    let nonce = [0x24u8; 12];

    for (size, name) in [(64 * KB, "64KB"), (MB, "1MB")] {
        let mut buf = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("chacha20/{name}"), |b| {
            b.iter(|| {
                let mut cipher = ChaCha20::new(&key.into(), &nonce.into());
                cipher.apply_keystream(black_box(&mut buf));
            });
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: RNG FILL RATE
// =============================================================================

fn bench_rng_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Rng");
    let mut rng = VortexRng::from_key_iv(MapKind::Tent, &[0x11u8; 32], &[0x22u8; 16]).unwrap();

    for (size, name) in [(4 * KB, "4KB"), (MB, "1MB")] {
        let mut buf = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("fill/{name}"), |b| {
            b.iter(|| rng.fill(black_box(&mut buf)));
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 4: SCIENTIFIC FILL RATE
// =============================================================================

fn bench_scientific_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Scientific");
    let n = 1_000_000;
    let mut x = vec![0.0f64; n];
    let mut y = vec![0.0f64; n];
    let mut z = vec![0.0f64; n];

    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("lorenz/1M", |b| {
        b.iter(|| {
            Lorenz::default()
                .generate(
                    black_box(&mut x),
                    black_box(&mut y),
                    black_box(&mut z),
                    0.1,
                    0.1,
                    0.1,
                )
                .unwrap();
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_cipher_maps,
    bench_chacha20_baseline,
    bench_rng_fill,
    bench_scientific_fill
);
criterion_main!(benches);
