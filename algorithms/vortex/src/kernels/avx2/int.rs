//! AVX2 integer kernels (8 × u32 lanes, 32-byte stride).
//!
//! Lane k of every transition is bit-exact with the portable kernel
//! started from lane k's seed. Widening 32×32 multiplies use the
//! even/odd `mul_epu32` split; the sine transition goes through f64 with
//! an exact unsigned convert / floor / mod-2^32 sequence.

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_wrap)]
// loadu/storeu take unaligned pointers; the vector-pointer casts are fine.
#![allow(clippy::cast_ptr_alignment)]

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::kernels::constants::{
    HENON_WEYL, INV_TWO_POW_32, LOGISTIC_WEYL, MIX_MUL0, MIX_MUL1, SINE_WEYL, TENT_WEYL,
    TWO_POW_32,
};
use crate::types::MapKind;

/// Keystream bytes per vector iteration at this tier.
pub const STRIDE: usize = 32;

// =============================================================================
// STATE I/O
// =============================================================================

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load(state: &[u32; 8]) -> __m256i {
    _mm256_loadu_si256(state.as_ptr().cast())
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn store(state: &mut [u32; 8], v: __m256i) {
    _mm256_storeu_si256(state.as_mut_ptr().cast(), v);
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn xor_into(chunk: &mut [u8], k: __m256i) {
    let p = chunk.as_mut_ptr().cast::<__m256i>();
    let data = _mm256_loadu_si256(p);
    _mm256_storeu_si256(p, _mm256_xor_si256(data, k));
}

// =============================================================================
// AVALANCHE MIX
// =============================================================================

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn mix(k: __m256i) -> __m256i {
    let mut k = _mm256_mullo_epi32(k, _mm256_set1_epi32(MIX_MUL0 as i32));
    k = _mm256_xor_si256(k, _mm256_srli_epi32::<16>(k));
    k = _mm256_mullo_epi32(k, _mm256_set1_epi32(MIX_MUL1 as i32));
    _mm256_xor_si256(k, _mm256_srli_epi32::<13>(k))
}

// =============================================================================
// WIDENING MULTIPLY HELPERS
// =============================================================================

/// High 32 bits of the lanewise square of `x`.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn sq_hi(x: __m256i) -> __m256i {
    let even = _mm256_mul_epu32(x, x);
    let xodd = _mm256_srli_epi64::<32>(x);
    let odd = _mm256_mul_epu32(xodd, xodd);
    // Even dwords from the shifted even products, odd dwords already sit
    // in the upper halves of the odd products.
    _mm256_blend_epi32::<0b1010_1010>(_mm256_srli_epi64::<32>(even), odd)
}

// =============================================================================
// F64 BRIDGE (exact, for the sine transition)
// =============================================================================

/// Exact u32 → f64 conversion of four lanes: bias through the signed
/// converter, then add 2^31 back.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn u32_to_f64(half: __m128i) -> __m256d {
    let biased = _mm_xor_si128(half, _mm_set1_epi32(i32::MIN));
    _mm256_add_pd(_mm256_cvtepi32_pd(biased), _mm256_set1_pd(2_147_483_648.0))
}

/// Exact f64 → u32 conversion of four integer-valued lanes in [0, 2^32).
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn f64_to_u32(v: __m256d) -> __m128i {
    let biased = _mm256_sub_pd(v, _mm256_set1_pd(2_147_483_648.0));
    _mm_xor_si128(_mm256_cvttpd_epi32(biased), _mm_set1_epi32(i32::MIN))
}

/// The sine rational on four f64 lanes, reduced mod 2^32.
///
/// Operation order matches `portable::int::sine_step` exactly; every step
/// is exact or correctly rounded identically, so the result is bit-exact
/// with the scalar path.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn sine_rational(v: __m256d) -> __m256d {
    let one = _mm256_set1_pd(1.0);
    let p = _mm256_mul_pd(v, _mm256_sub_pd(one, v));
    let num = _mm256_mul_pd(_mm256_set1_pd(64.0), p);
    let den = _mm256_sub_pd(_mm256_set1_pd(5.0), _mm256_mul_pd(_mm256_set1_pd(4.0), p));
    let y = _mm256_mul_pd(_mm256_div_pd(num, den), _mm256_set1_pd(TWO_POW_32));
    let t = _mm256_floor_pd(y);
    // t < 2^34: reduce mod 2^32 with exact power-of-two scaling.
    let hi = _mm256_floor_pd(_mm256_mul_pd(t, _mm256_set1_pd(INV_TWO_POW_32)));
    _mm256_sub_pd(t, _mm256_mul_pd(hi, _mm256_set1_pd(TWO_POW_32)))
}

// =============================================================================
// TRANSITIONS
// =============================================================================

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn tent_next(x: __m256i) -> __m256i {
    // Lanes at or above 2^31 fold to their complement.
    let sign = _mm256_srai_epi32::<31>(x);
    let folded = _mm256_xor_si256(x, sign);
    let rot = _mm256_or_si256(
        _mm256_slli_epi32::<1>(folded),
        _mm256_srli_epi32::<31>(folded),
    );
    _mm256_add_epi32(rot, _mm256_set1_epi32(TENT_WEYL as i32))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn logistic_next(x: __m256i) -> __m256i {
    let nx = _mm256_xor_si256(x, _mm256_set1_epi32(-1));
    let even = _mm256_mul_epu32(x, nx);
    let odd = _mm256_mul_epu32(_mm256_srli_epi64::<32>(x), _mm256_srli_epi64::<32>(nx));
    let lo_even = _mm256_srli_epi64::<30>(even);
    let lo_odd = _mm256_slli_epi64::<32>(_mm256_srli_epi64::<30>(odd));
    let y = _mm256_blend_epi32::<0b1010_1010>(lo_even, lo_odd);
    _mm256_add_epi32(y, _mm256_set1_epi32(LOGISTIC_WEYL as i32))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn sine_next(x: __m256i) -> __m256i {
    let inv = _mm256_set1_pd(INV_TWO_POW_32);
    let lo = _mm256_castsi256_si128(x);
    let hi = _mm256_extracti128_si256::<1>(x);
    let vlo = _mm256_mul_pd(u32_to_f64(lo), inv);
    let vhi = _mm256_mul_pd(u32_to_f64(hi), inv);
    let rlo = f64_to_u32(sine_rational(vlo));
    let rhi = f64_to_u32(sine_rational(vhi));
    let y = _mm256_set_m128i(rhi, rlo);
    _mm256_add_epi32(y, _mm256_set1_epi32(SINE_WEYL as i32))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn henon_next(x: __m256i, y: __m256i) -> (__m256i, __m256i) {
    let t = _mm256_xor_si256(_mm256_mullo_epi32(x, x), sq_hi(x));
    let xn = _mm256_sub_epi32(
        _mm256_add_epi32(y, _mm256_set1_epi32(HENON_WEYL as i32)),
        t,
    );
    (xn, x)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn lorenz_next(x: __m256i, y: __m256i, z: __m256i) -> (__m256i, __m256i, __m256i) {
    let dx = _mm256_srli_epi32::<2>(_mm256_sub_epi32(y, x));
    let dy = _mm256_sub_epi32(_mm256_xor_si256(x, _mm256_srli_epi32::<3>(y)), z);
    let dz = _mm256_xor_si256(_mm256_add_epi32(x, y), _mm256_slli_epi32::<1>(z));
    (
        _mm256_add_epi32(x, dx),
        _mm256_add_epi32(y, dy),
        _mm256_add_epi32(z, dz),
    )
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn chen_next(x: __m256i, y: __m256i, z: __m256i) -> (__m256i, __m256i, __m256i) {
    let d = _mm256_sub_epi32(y, x);
    let dx = _mm256_add_epi32(d, _mm256_slli_epi32::<1>(d));
    let dy = _mm256_add_epi32(
        _mm256_xor_si256(x, _mm256_slli_epi32::<2>(y)),
        _mm256_srli_epi32::<1>(z),
    );
    let dz = _mm256_xor_si256(
        _mm256_add_epi32(x, y),
        _mm256_add_epi32(z, _mm256_slli_epi32::<1>(z)),
    );
    (
        _mm256_add_epi32(x, dx),
        _mm256_add_epi32(y, dy),
        _mm256_add_epi32(z, dz),
    )
}

// =============================================================================
// XOR DRIVERS
// =============================================================================

/// XOR the tent keystream over `buf` (length must be a multiple of 32).
///
/// # Safety
/// Requires AVX2 (enforced by the dispatcher).
#[target_feature(enable = "avx2")]
pub unsafe fn tent_xor(state: &mut [u32; 8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(state);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        x = tent_next(x);
        xor_into(chunk, mix(x));
    }
    store(state, x);
}

/// XOR the logistic keystream over `buf` (length must be a multiple of 32).
///
/// # Safety
/// Requires AVX2 (enforced by the dispatcher).
#[target_feature(enable = "avx2")]
pub unsafe fn logistic_xor(state: &mut [u32; 8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(state);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        x = logistic_next(x);
        xor_into(chunk, mix(x));
    }
    store(state, x);
}

/// XOR the sine keystream over `buf` (length must be a multiple of 32).
///
/// # Safety
/// Requires AVX2 (enforced by the dispatcher).
#[target_feature(enable = "avx2")]
pub unsafe fn sine_xor(state: &mut [u32; 8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(state);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        x = sine_next(x);
        xor_into(chunk, mix(x));
    }
    store(state, x);
}

/// XOR the Henon keystream over `buf` (length must be a multiple of 32).
///
/// # Safety
/// Requires AVX2 (enforced by the dispatcher).
#[target_feature(enable = "avx2")]
pub unsafe fn henon_xor(sx: &mut [u32; 8], sy: &mut [u32; 8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(sx);
    let mut y = load(sy);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        (x, y) = henon_next(x, y);
        xor_into(chunk, mix(_mm256_xor_si256(x, y)));
    }
    store(sx, x);
    store(sy, y);
}

/// XOR the Lorenz keystream over `buf` (length must be a multiple of 32).
///
/// # Safety
/// Requires AVX2 (enforced by the dispatcher).
#[target_feature(enable = "avx2")]
pub unsafe fn lorenz_xor(sx: &mut [u32; 8], sy: &mut [u32; 8], sz: &mut [u32; 8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(sx);
    let mut y = load(sy);
    let mut z = load(sz);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        (x, y, z) = lorenz_next(x, y, z);
        xor_into(chunk, mix(_mm256_xor_si256(_mm256_xor_si256(x, y), z)));
    }
    store(sx, x);
    store(sy, y);
    store(sz, z);
}

/// XOR the Chen keystream over `buf` (length must be a multiple of 32).
///
/// # Safety
/// Requires AVX2 (enforced by the dispatcher).
#[target_feature(enable = "avx2")]
pub unsafe fn chen_xor(sx: &mut [u32; 8], sy: &mut [u32; 8], sz: &mut [u32; 8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(sx);
    let mut y = load(sy);
    let mut z = load(sz);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        (x, y, z) = chen_next(x, y, z);
        xor_into(chunk, mix(_mm256_xor_si256(_mm256_xor_si256(x, y), z)));
    }
    store(sx, x);
    store(sy, y);
    store(sz, z);
}

/// Dispatch `map`'s XOR driver over the vector-aligned prefix.
///
/// # Safety
/// Requires AVX2 (enforced by the dispatcher).
#[target_feature(enable = "avx2")]
pub unsafe fn keystream_xor(map: MapKind, state: &mut [[u32; 8]; 3], buf: &mut [u8]) {
    let [sx, sy, sz] = state;
    match map {
        MapKind::Tent => tent_xor(sx, buf),
        MapKind::Logistic => logistic_xor(sx, buf),
        MapKind::Sine => sine_xor(sx, buf),
        MapKind::Henon => henon_xor(sx, sy, buf),
        MapKind::Lorenz => lorenz_xor(sx, sy, sz, buf),
        MapKind::Chen => chen_xor(sx, sy, sz, buf),
    }
}
