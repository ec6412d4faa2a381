//! Keystream Cipher Core
//!
//! Derives a vector of parallel u32 seeds from (key, IV), iterates the
//! chosen integer map at the widest available width, pushes every state
//! word through the avalanche mix, and XORs the result over the caller's
//! buffer in place. XOR symmetry makes the operation an involution:
//! processing twice with the same key and IV restores the original bytes.
//!
//! Zero heap allocation: all transient state lives on the stack.

use crate::engine::Tier;
use crate::kernels::constants::{
    KEY_LEN, MAX_DIM, MAX_LANES, SEED_SENTINEL, TENT_WEYL, WARMUP_ROUNDS,
};
use crate::kernels::portable::int;
use crate::types::{MapKind, VortexError};

// =============================================================================
// PUBLIC API
// =============================================================================

/// XOR `map`'s keystream over `buf` in place, at the widest tier this CPU
/// supports.
///
/// Calling twice with the same `(key, iv)` restores the original buffer.
/// Keys must be at least 32 bytes (longer keys are truncated at 32). An
/// IV shorter than 4 bytes degrades to key-only seeding.
///
/// # Errors
/// `InvalidKey` if the key is shorter than 32 bytes. The buffer is not
/// touched on error.
pub fn process(map: MapKind, buf: &mut [u8], key: &[u8], iv: &[u8]) -> Result<(), VortexError> {
    process_with(map, buf, key, iv, Tier::detect())
}

/// Like [`process`], but pinned to an explicit tier.
///
/// The keystream depends on the tier's lane count, so a buffer encrypted
/// at one tier must be decrypted at the same tier. [`process`] resolves
/// the tier once per call, which keeps any single machine self-consistent.
///
/// # Errors
/// `InvalidKey` if the key is shorter than 32 bytes.
pub fn process_with(
    map: MapKind,
    buf: &mut [u8],
    key: &[u8],
    iv: &[u8],
    tier: Tier,
) -> Result<(), VortexError> {
    if key.len() < KEY_LEN {
        return Err(VortexError::InvalidKey { len: key.len() });
    }
    let mut k = [0u8; KEY_LEN];
    k.copy_from_slice(&key[..KEY_LEN]);
    run(map, buf, &k, iv, tier);
    Ok(())
}

/// Infallible driver for callers that validated the key up front (the
/// stream wrapper and the RNG regenerate blocks through this).
pub fn run(map: MapKind, buf: &mut [u8], key: &[u8; KEY_LEN], iv: &[u8], tier: Tier) {
    if buf.is_empty() {
        return;
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    let tier = {
        let _ = tier;
        Tier::Scalar
    };

    let lanes = tier.int_lanes();
    let mut state = [[0u32; MAX_LANES]; MAX_DIM];
    derive_seeds(map, key, iv, lanes, &mut state);

    // One tier owns the vector-aligned prefix; the residue always goes
    // through the scalar tail.
    let split = match tier {
        Tier::Scalar => 0,
        _ => buf.len() - buf.len() % tier.stride(),
    };
    let (head, tail) = buf.split_at_mut(split);

    match tier {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Tier::W512 => {
            // SAFETY: this arm is only selected after AVX-512F detection.
            #[allow(unsafe_code)]
            unsafe {
                crate::kernels::avx512::int::keystream_xor(map, &mut state, head);
            }
        }
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Tier::W256 => {
            let mut narrow = [[0u32; 8]; MAX_DIM];
            for (dst, src) in narrow.iter_mut().zip(state.iter()) {
                dst.copy_from_slice(&src[..8]);
            }
            // SAFETY: this arm is only selected after AVX2 detection.
            #[allow(unsafe_code)]
            unsafe {
                crate::kernels::avx2::int::keystream_xor(map, &mut narrow, head);
            }
            for (dst, src) in state.iter_mut().zip(narrow.iter()) {
                dst[..8].copy_from_slice(src);
            }
        }
        _ => {}
    }

    // Scalar tail: continue from lane 0 of the evolved state.
    let mut lane0 = [state[0][0], state[1][0], state[2][0]];
    int::keystream_xor(map, &mut lane0, tail);
}

// =============================================================================
// SEED DERIVATION
// =============================================================================

/// Derive the per-lane seed vector from (key, IV) and run the warm-up.
///
/// One uniform rule for all dimensionalities: lane k of dimension d uses
/// seed index `i = d·lanes + k`. Key words are read at `(4i) mod 32`, IV
/// words cyclically at `(4i) mod iv.len()` (skipped entirely for IVs
/// shorter than 4 bytes). Zero lanes are replaced by the sentinel, then 16
/// warm-up rounds diffuse key/IV bits across lanes.
#[doc(hidden)]
pub fn derive_seeds(
    map: MapKind,
    key: &[u8; KEY_LEN],
    iv: &[u8],
    lanes: usize,
    state: &mut [[u32; MAX_LANES]; MAX_DIM],
) {
    debug_assert!((1..=MAX_LANES).contains(&lanes));
    let dim = map.dimension();

    for (d, row) in state.iter_mut().take(dim).enumerate() {
        for (lane, slot) in row.iter_mut().take(lanes).enumerate() {
            let i = d * lanes + lane;
            let off = (4 * i) % KEY_LEN;
            let mut w =
                u32::from_le_bytes([key[off], key[off + 1], key[off + 2], key[off + 3]]);
            if iv.len() >= 4 {
                let base = (4 * i) % iv.len();
                let mut bytes = [0u8; 4];
                for (j, b) in bytes.iter_mut().enumerate() {
                    *b = iv[(base + j) % iv.len()];
                }
                w ^= u32::from_le_bytes(bytes);
            }
            // Weyl lane stagger: uniform keys repeat the same key/IV words
            // across lanes, which would collapse every lane onto one orbit
            // (the warm-up is lane-symmetric). Same idea as the counter
            // offsets in wide CTR kernels and the epsilon stagger on the
            // f64 side.
            #[allow(clippy::cast_possible_truncation)]
            {
                w ^= (i as u32).wrapping_mul(TENT_WEYL);
            }
            if w == 0 {
                w = SEED_SENTINEL;
            }
            *slot = w;
        }
    }

    for _ in 0..WARMUP_ROUNDS {
        for lane in 0..lanes {
            let mut s = [state[0][lane], state[1][lane], state[2][lane]];
            int::step(map, &mut s);
            state[0][lane] = s[0];
            state[1][lane] = s[1];
            state[2][lane] = s[2];
        }
        for row in state.iter_mut().take(dim) {
            let snap = *row;
            for (lane, slot) in row.iter_mut().take(lanes).enumerate() {
                *slot ^= snap[(lane + 1) % lanes] >> 1;
            }
        }
    }
}
