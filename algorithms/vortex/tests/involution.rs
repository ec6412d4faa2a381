//! Cipher Involution & Boundary Tests
//!
//! Verifies that Process is its own inverse for every map and a grid of
//! buffer lengths, plus the boundary behaviors around the vector strides:
//! - Empty buffers are a no-op
//! - Buffers shorter than the widest stride are fully handled by the tail
//! - Exact-stride buffers leave no tail
//! - Key/IV validation and truncation rules

#![allow(missing_docs)]
#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]

use vortex::{process, MapKind, VortexError};

const MAPS: [MapKind; 6] = [
    MapKind::Tent,
    MapKind::Logistic,
    MapKind::Sine,
    MapKind::Henon,
    MapKind::Lorenz,
    MapKind::Chen,
];

/// Deterministic filler so failures reproduce without a rand dependency.
fn pattern(len: usize) -> Vec<u8> {
    let mut state = 0x1234_5678_9ABC_DEF0_u64;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            (state >> 56) as u8
        })
        .collect()
}

// =============================================================================
// INVOLUTION
// =============================================================================

#[test]
fn test_roundtrip_all_maps() {
    // Lengths straddle both vector strides (32 and 64) and the 4-byte
    // scalar word.
    let lengths = [
        0, 1, 3, 4, 5, 27, 28, 31, 32, 33, 63, 64, 65, 127, 128, 129, 1000, 4096, 10_000,
    ];
    let key = [0x5Au8; 32];
    let iv = [0xA5u8; 16];

    for map in MAPS {
        for &len in &lengths {
            let original = pattern(len);
            let mut buf = original.clone();

            process(map, &mut buf, &key, &iv).unwrap();
            if len >= 8 {
                assert_ne!(buf, original, "{map}: keystream left {len} bytes untouched");
            }

            process(map, &mut buf, &key, &iv).unwrap();
            assert_eq!(buf, original, "{map}: double-process broke at len {len}");
        }
    }
}

#[test]
fn test_hello_chaos_roundtrip() {
    // Literal scenario: tent map, all-zero key and IV, 28-byte message.
    let mut buf = *b"Hello Chaos! Secure Message.";
    assert_eq!(buf.len(), 28);
    let key = [0u8; 32];
    let iv = [0u8; 16];

    process(MapKind::Tent, &mut buf, &key, &iv).unwrap();
    process(MapKind::Tent, &mut buf, &key, &iv).unwrap();

    assert_eq!(&buf, b"Hello Chaos! Secure Message.");
}

#[test]
fn test_exact_stride_buffers() {
    // 32 and 64 bytes are exactly one W256 / W512 iteration: no scalar
    // tail runs, and the involution must still hold.
    let key = [0x77u8; 32];
    let iv = [0x33u8; 16];
    for map in MAPS {
        for len in [32usize, 64, 128, 4096] {
            let original = pattern(len);
            let mut buf = original.clone();
            process(map, &mut buf, &key, &iv).unwrap();
            assert_ne!(buf, original, "{map}: no keystream at stride length {len}");
            process(map, &mut buf, &key, &iv).unwrap();
            assert_eq!(buf, original, "{map}: stride length {len}");
        }
    }
}

// =============================================================================
// BOUNDARIES & VALIDATION
// =============================================================================

#[test]
fn test_empty_buffer_is_noop() {
    let mut buf: Vec<u8> = Vec::new();
    let key = [9u8; 32];
    process(MapKind::Logistic, &mut buf, &key, &[1u8; 16]).unwrap();
    assert!(buf.is_empty());
}

#[test]
fn test_short_key_rejected_before_mutation() {
    let key = [1u8; 31];
    let mut buf = pattern(64);
    let original = buf.clone();
    let err = process(MapKind::Tent, &mut buf, &key, &[0u8; 16]).unwrap_err();
    assert_eq!(err, VortexError::InvalidKey { len: 31 });
    assert_eq!(buf, original, "failed call must not touch the buffer");
}

#[test]
fn test_long_key_truncated_at_32() {
    let mut long_key = [0u8; 64];
    for (i, b) in long_key.iter_mut().enumerate() {
        *b = i as u8;
    }
    let iv = [0x10u8; 16];

    let mut a = pattern(200);
    let mut b = a.clone();
    process(MapKind::Henon, &mut a, &long_key, &iv).unwrap();
    process(MapKind::Henon, &mut b, &long_key[..32], &iv).unwrap();
    assert_eq!(a, b, "bytes past 32 must not influence the keystream");
}

#[test]
fn test_iv_shorter_than_four_is_key_only() {
    let key = [0xABu8; 32];
    let mut none = pattern(96);
    let mut tiny = none.clone();
    process(MapKind::Chen, &mut none, &key, &[]).unwrap();
    process(MapKind::Chen, &mut tiny, &key, &[1u8, 2, 3]).unwrap();
    assert_eq!(none, tiny, "IVs under 4 bytes degrade to key-only seeding");
}

#[test]
fn test_iv_changes_keystream() {
    let key = [0xABu8; 32];
    let mut a = pattern(96);
    let mut b = a.clone();
    process(MapKind::Lorenz, &mut a, &key, &[0x01u8; 16]).unwrap();
    process(MapKind::Lorenz, &mut b, &key, &[0x02u8; 16]).unwrap();
    assert_ne!(a, b, "different IVs must produce different keystream");
}

#[test]
fn test_maps_produce_distinct_keystream() {
    let key = [0xCDu8; 32];
    let iv = [0xEFu8; 16];
    let mut outputs = Vec::new();
    for map in MAPS {
        let mut buf = vec![0u8; 256];
        process(map, &mut buf, &key, &iv).unwrap();
        outputs.push(buf);
    }
    for i in 0..outputs.len() {
        for j in i + 1..outputs.len() {
            assert_ne!(
                outputs[i], outputs[j],
                "{} and {} share a keystream",
                MAPS[i], MAPS[j]
            );
        }
    }
}
