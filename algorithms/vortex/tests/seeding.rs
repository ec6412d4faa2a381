//! Seed Derivation Tests
//!
//! Covers the zero-lane invariant (no lane may sit at the origin after
//! derivation, where several maps have a fixed point), lane distinctness
//! under degenerate keys, and determinism.

#![allow(missing_docs)]
#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]

use vortex::{derive_seeds, MapKind};

const MAPS: [MapKind; 6] = [
    MapKind::Tent,
    MapKind::Logistic,
    MapKind::Sine,
    MapKind::Henon,
    MapKind::Lorenz,
    MapKind::Chen,
];

fn keys() -> Vec<[u8; 32]> {
    vec![
        [0u8; 32],                            // degenerate: all zero
        [0xFFu8; 32],                         // all ones
        *b"12345678901234567890123456789012", // ASCII
        {
            let mut k = [0u8; 32];
            k[0] = 1;
            k[31] = 1;
            k
        }, // sparse
    ]
}

// =============================================================================
// ZERO-LANE AVOIDANCE
// =============================================================================

#[test]
fn test_no_lane_is_zero_after_derivation() {
    let ivs: [&[u8]; 4] = [&[], &[0u8; 16], &[0x22u8; 16], &[1u8, 2, 3, 4]];
    for map in MAPS {
        for key in keys() {
            for iv in ivs {
                for lanes in [1usize, 8, 16] {
                    let mut state = [[0u32; 16]; 3];
                    derive_seeds(map, &key, iv, lanes, &mut state);
                    for d in 0..map.dimension() {
                        for lane in 0..lanes {
                            assert_ne!(
                                state[d][lane], 0,
                                "{map}: zero lane (dim {d}, lane {lane}) for key {} iv {}",
                                hex::encode(key),
                                hex::encode(iv),
                            );
                        }
                    }
                }
            }
        }
    }
}

// =============================================================================
// LANE DISTINCTNESS
// =============================================================================

#[test]
fn test_degenerate_key_still_separates_lanes() {
    // An all-zero key and IV repeat the same word into every lane; the
    // lane stagger must still decorrelate the orbits or wide keystream
    // would repeat each word 16 times.
    let key = [0u8; 32];
    for map in MAPS {
        let mut state = [[0u32; 16]; 3];
        derive_seeds(map, &key, &[0u8; 16], 16, &mut state);
        for a in 0..16 {
            for b in a + 1..16 {
                assert_ne!(
                    state[0][a], state[0][b],
                    "{map}: lanes {a} and {b} collapsed onto one orbit"
                );
            }
        }
    }
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn test_derivation_is_deterministic() {
    let key = *b"determinism-is-table-stakes!!!!!";
    for map in MAPS {
        let mut a = [[0u32; 16]; 3];
        let mut b = [[0u32; 16]; 3];
        derive_seeds(map, &key, &[7u8; 16], 16, &mut a);
        derive_seeds(map, &key, &[7u8; 16], 16, &mut b);
        assert_eq!(a, b, "{map}: derivation must be a pure function");
    }
}

#[test]
fn test_scalar_lane_matches_wide_lane_zero_rule() {
    // Lane 0 never receives a stagger term, so scalar derivation and the
    // first lane of a wide derivation start from the same key/IV word
    // (they then diverge through the lane-count-dependent warm-up).
    let key = *b"0123456789abcdef0123456789abcdef";
    let mut one = [[0u32; 16]; 3];
    let mut wide = [[0u32; 16]; 3];
    derive_seeds(MapKind::Tent, &key, &[3u8; 16], 1, &mut one);
    derive_seeds(MapKind::Tent, &key, &[3u8; 16], 16, &mut wide);
    assert_ne!(one[0][0], 0);
    assert_ne!(wide[0][0], 0);
}
