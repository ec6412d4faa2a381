//! Portable integer transitions.
//!
//! All arithmetic is wrapping u32 (add/sub/xor/shift/multiply-low); shifts
//! are logical. The sine transition routes through f64 using an operation
//! sequence whose every step is either exactly representable or correctly
//! rounded the same way in the SIMD kernels, so its output is still
//! bit-exact across tiers.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::kernels::constants::{
    HENON_WEYL, INV_TWO_POW_32, LOGISTIC_WEYL, MIX_MUL0, MIX_MUL1, SINE_WEYL, TENT_WEYL,
    TWO_POW_32,
};
use crate::types::MapKind;

// =============================================================================
// 1D TRANSITIONS
// =============================================================================

/// Tent: rotate-left of the value (or its complement, above the midpoint)
/// plus the Weyl increment.
#[must_use]
pub const fn tent_step(x: u32) -> u32 {
    let folded = if x < 0x8000_0000 { x } else { !x };
    folded.rotate_left(1).wrapping_add(TENT_WEYL)
}

/// Logistic: bits 30..62 of the widening product x·(¬x) plus the Weyl
/// increment. ¬x plays the role of (1 − x) in the unit interval.
#[must_use]
pub const fn logistic_step(x: u32) -> u32 {
    let p = (x as u64).wrapping_mul(!x as u64);
    ((p >> 30) as u32).wrapping_add(LOGISTIC_WEYL)
}

/// Sine: rational approximation of 4·sin(π·v) on the unit interval,
/// rescaled to u32 with wraparound.
#[must_use]
pub fn sine_step(x: u32) -> u32 {
    let v = f64::from(x) * INV_TWO_POW_32;
    let p = v * (1.0 - v);
    let s = (64.0 * p) / (5.0 - 4.0 * p);
    // s < 4, so s·2^32 < 2^34: the u64 cast is a plain truncation and the
    // u32 narrowing is the mod-2^32 wrap the SIMD kernels reproduce.
    let y = (s * TWO_POW_32) as u64;
    (y as u32).wrapping_add(SINE_WEYL)
}

// =============================================================================
// 2D / 3D TRANSITIONS
// =============================================================================

/// Henon: folds the halves of x² into the next x; y remembers the previous
/// x.
#[must_use]
pub const fn henon_step(x: u32, y: u32) -> (u32, u32) {
    let p = (x as u64).wrapping_mul(x as u64);
    let t = (p as u32) ^ ((p >> 32) as u32);
    (y.wrapping_add(HENON_WEYL).wrapping_sub(t), x)
}

/// Lorenz-derived integer flow: shear-and-feedback deltas added to all
/// three components.
#[must_use]
pub const fn lorenz_step(x: u32, y: u32, z: u32) -> (u32, u32, u32) {
    let dx = y.wrapping_sub(x) >> 2;
    let dy = (x ^ (y >> 3)).wrapping_sub(z);
    let dz = x.wrapping_add(y) ^ (z << 1);
    (
        x.wrapping_add(dx),
        y.wrapping_add(dy),
        z.wrapping_add(dz),
    )
}

/// Chen-derived integer flow.
#[must_use]
pub const fn chen_step(x: u32, y: u32, z: u32) -> (u32, u32, u32) {
    let d = y.wrapping_sub(x);
    let dx = d.wrapping_add(d << 1);
    let dy = (x ^ (y << 2)).wrapping_add(z >> 1);
    let dz = x.wrapping_add(y) ^ z.wrapping_add(z << 1);
    (
        x.wrapping_add(dx),
        y.wrapping_add(dy),
        z.wrapping_add(dz),
    )
}

// =============================================================================
// AVALANCHE MIX
// =============================================================================

/// Two-round multiply/xor-shift finalizer applied to every keystream word.
#[must_use]
pub const fn mix(k: u32) -> u32 {
    let mut k = k.wrapping_mul(MIX_MUL0);
    k ^= k >> 16;
    k = k.wrapping_mul(MIX_MUL1);
    k ^ (k >> 13)
}

// =============================================================================
// GENERIC SINGLE-LANE DRIVER
// =============================================================================

/// Advance one lane of `map` held in `s[..map.dimension()]`.
pub fn step(map: MapKind, s: &mut [u32; 3]) {
    match map {
        MapKind::Tent => s[0] = tent_step(s[0]),
        MapKind::Logistic => s[0] = logistic_step(s[0]),
        MapKind::Sine => s[0] = sine_step(s[0]),
        MapKind::Henon => (s[0], s[1]) = henon_step(s[0], s[1]),
        MapKind::Lorenz => (s[0], s[1], s[2]) = lorenz_step(s[0], s[1], s[2]),
        MapKind::Chen => (s[0], s[1], s[2]) = chen_step(s[0], s[1], s[2]),
    }
}

/// XOR-combine the state components into one pre-mix keystream word.
#[must_use]
pub const fn combine(map: MapKind, s: &[u32; 3]) -> u32 {
    match map.dimension() {
        1 => s[0],
        2 => s[0] ^ s[1],
        _ => s[0] ^ s[1] ^ s[2],
    }
}

/// Advance one lane and return its mixed keystream word.
#[must_use]
pub fn keystream_word(map: MapKind, s: &mut [u32; 3]) -> u32 {
    step(map, s);
    mix(combine(map, s))
}

/// XOR the scalar keystream over `buf`, four bytes per step, the final
/// partial word byte-wise. Handles any length, including empty.
pub fn keystream_xor(map: MapKind, s: &mut [u32; 3], buf: &mut [u8]) {
    let mut words = buf.chunks_exact_mut(4);
    for word in &mut words {
        let k = keystream_word(map, s).to_le_bytes();
        for (b, kb) in word.iter_mut().zip(k) {
            *b ^= kb;
        }
    }
    let tail = words.into_remainder();
    if !tail.is_empty() {
        let k = keystream_word(map, s).to_le_bytes();
        for (b, kb) in tail.iter_mut().zip(k) {
            *b ^= kb;
        }
    }
}
