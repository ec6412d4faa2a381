//! AVX-512 integer kernels (16 × u32 lanes, 64-byte stride).
//!
//! Same transitions as the portable and AVX2 kernels, twice as wide. Lane
//! k remains bit-exact with the scalar path started from lane k's seed.

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
pub const STRIDE: usize = 64;

/// Odd-dword selector for the even/odd widening-multiply merge.
const ODD: __mmask16 = 0b1010_1010_1010_1010;

// =============================================================================
// STATE I/O
// =============================================================================

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn load(state: &[u32; 16]) -> __m512i {
    _mm512_loadu_si512(state.as_ptr().cast())
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn store(state: &mut [u32; 16], v: __m512i) {
    _mm512_storeu_si512(state.as_mut_ptr().cast(), v);
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn xor_into(chunk: &mut [u8], k: __m512i) {
    let p = chunk.as_mut_ptr();
    let data = _mm512_loadu_si512(p.cast());
    _mm512_storeu_si512(p.cast(), _mm512_xor_si512(data, k));
}

// =============================================================================
// AVALANCHE MIX
// =============================================================================

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn mix(k: __m512i) -> __m512i {
    let mut k = _mm512_mullo_epi32(k, _mm512_set1_epi32(MIX_MUL0 as i32));
    k = _mm512_xor_si512(k, _mm512_srli_epi32::<16>(k));
    k = _mm512_mullo_epi32(k, _mm512_set1_epi32(MIX_MUL1 as i32));
    _mm512_xor_si512(k, _mm512_srli_epi32::<13>(k))
}

// =============================================================================
// WIDENING MULTIPLY HELPERS
// =============================================================================

/// High 32 bits of the lanewise square of `x`.
#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn sq_hi(x: __m512i) -> __m512i {
    let even = _mm512_mul_epu32(x, x);
    let xodd = _mm512_srli_epi64::<32>(x);
    let odd = _mm512_mul_epu32(xodd, xodd);
    _mm512_mask_blend_epi32(ODD, _mm512_srli_epi64::<32>(even), odd)
}

// =============================================================================
// F64 BRIDGE (exact, for the sine transition)
// =============================================================================

/// The sine rational on eight f64 lanes, reduced mod 2^32. Operation order
/// matches `portable::int::sine_step` exactly.
#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn sine_rational(v: __m512d) -> __m512d {
    let one = _mm512_set1_pd(1.0);
    let p = _mm512_mul_pd(v, _mm512_sub_pd(one, v));
    let num = _mm512_mul_pd(_mm512_set1_pd(64.0), p);
    let den = _mm512_sub_pd(_mm512_set1_pd(5.0), _mm512_mul_pd(_mm512_set1_pd(4.0), p));
    let y = _mm512_mul_pd(_mm512_div_pd(num, den), _mm512_set1_pd(TWO_POW_32));
    // imm 0x01: round toward negative infinity, scale 0. Plain floor.
    let t = _mm512_roundscale_pd::<0x01>(y);
    let hi = _mm512_roundscale_pd::<0x01>(_mm512_mul_pd(t, _mm512_set1_pd(INV_TWO_POW_32)));
    _mm512_sub_pd(t, _mm512_mul_pd(hi, _mm512_set1_pd(TWO_POW_32)))
}

// =============================================================================
// TRANSITIONS
// =============================================================================

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn tent_next(x: __m512i) -> __m512i {
    let sign = _mm512_srai_epi32::<31>(x);
    let folded = _mm512_xor_si512(x, sign);
    let rot = _mm512_or_si512(
        _mm512_slli_epi32::<1>(folded),
        _mm512_srli_epi32::<31>(folded),
    );
    _mm512_add_epi32(rot, _mm512_set1_epi32(TENT_WEYL as i32))
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn logistic_next(x: __m512i) -> __m512i {
    let nx = _mm512_xor_si512(x, _mm512_set1_epi32(-1));
    let even = _mm512_mul_epu32(x, nx);
    let odd = _mm512_mul_epu32(_mm512_srli_epi64::<32>(x), _mm512_srli_epi64::<32>(nx));
    let lo_even = _mm512_srli_epi64::<30>(even);
    let lo_odd = _mm512_slli_epi64::<32>(_mm512_srli_epi64::<30>(odd));
    let y = _mm512_mask_blend_epi32(ODD, lo_even, lo_odd);
    _mm512_add_epi32(y, _mm512_set1_epi32(LOGISTIC_WEYL as i32))
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn sine_next(x: __m512i) -> __m512i {
    let inv = _mm512_set1_pd(INV_TWO_POW_32);
    let lo = _mm512_castsi512_si256(x);
    let hi = _mm512_extracti64x4_epi64::<1>(x);
    let vlo = _mm512_mul_pd(_mm512_cvtepu32_pd(lo), inv);
    let vhi = _mm512_mul_pd(_mm512_cvtepu32_pd(hi), inv);
    let rlo = _mm512_cvttpd_epu32(sine_rational(vlo));
    let rhi = _mm512_cvttpd_epu32(sine_rational(vhi));
    let y = _mm512_inserti64x4::<1>(_mm512_castsi256_si512(rlo), rhi);
    _mm512_add_epi32(y, _mm512_set1_epi32(SINE_WEYL as i32))
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn henon_next(x: __m512i, y: __m512i) -> (__m512i, __m512i) {
    let t = _mm512_xor_si512(_mm512_mullo_epi32(x, x), sq_hi(x));
    let xn = _mm512_sub_epi32(
        _mm512_add_epi32(y, _mm512_set1_epi32(HENON_WEYL as i32)),
        t,
    );
    (xn, x)
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn lorenz_next(x: __m512i, y: __m512i, z: __m512i) -> (__m512i, __m512i, __m512i) {
    let dx = _mm512_srli_epi32::<2>(_mm512_sub_epi32(y, x));
    let dy = _mm512_sub_epi32(_mm512_xor_si512(x, _mm512_srli_epi32::<3>(y)), z);
    let dz = _mm512_xor_si512(_mm512_add_epi32(x, y), _mm512_slli_epi32::<1>(z));
    (
        _mm512_add_epi32(x, dx),
        _mm512_add_epi32(y, dy),
        _mm512_add_epi32(z, dz),
    )
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn chen_next(x: __m512i, y: __m512i, z: __m512i) -> (__m512i, __m512i, __m512i) {
    let d = _mm512_sub_epi32(y, x);
    let dx = _mm512_add_epi32(d, _mm512_slli_epi32::<1>(d));
    let dy = _mm512_add_epi32(
        _mm512_xor_si512(x, _mm512_slli_epi32::<2>(y)),
        _mm512_srli_epi32::<1>(z),
    );
    let dz = _mm512_xor_si512(
        _mm512_add_epi32(x, y),
        _mm512_add_epi32(z, _mm512_slli_epi32::<1>(z)),
    );
    (
        _mm512_add_epi32(x, dx),
        _mm512_add_epi32(y, dy),
        _mm512_add_epi32(z, dz),
    )
}

// =============================================================================
// XOR DRIVERS
// =============================================================================

/// XOR the tent keystream over `buf` (length must be a multiple of 64).
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn tent_xor(state: &mut [u32; 16], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(state);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        x = tent_next(x);
        xor_into(chunk, mix(x));
    }
    store(state, x);
}

/// XOR the logistic keystream over `buf` (length must be a multiple of 64).
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn logistic_xor(state: &mut [u32; 16], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(state);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        x = logistic_next(x);
        xor_into(chunk, mix(x));
    }
    store(state, x);
}

/// XOR the sine keystream over `buf` (length must be a multiple of 64).
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn sine_xor(state: &mut [u32; 16], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(state);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        x = sine_next(x);
        xor_into(chunk, mix(x));
    }
    store(state, x);
}

/// XOR the Henon keystream over `buf` (length must be a multiple of 64).
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn henon_xor(sx: &mut [u32; 16], sy: &mut [u32; 16], buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(sx);
    let mut y = load(sy);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        (x, y) = henon_next(x, y);
        xor_into(chunk, mix(_mm512_xor_si512(x, y)));
    }
    store(sx, x);
    store(sy, y);
}

/// XOR the Lorenz keystream over `buf` (length must be a multiple of 64).
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn lorenz_xor(
    sx: &mut [u32; 16],
    sy: &mut [u32; 16],
    sz: &mut [u32; 16],
    buf: &mut [u8],
) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(sx);
    let mut y = load(sy);
    let mut z = load(sz);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        (x, y, z) = lorenz_next(x, y, z);
        xor_into(chunk, mix(_mm512_xor_si512(_mm512_xor_si512(x, y), z)));
    }
    store(sx, x);
    store(sy, y);
    store(sz, z);
}

/// XOR the Chen keystream over `buf` (length must be a multiple of 64).
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn chen_xor(
    sx: &mut [u32; 16],
    sy: &mut [u32; 16],
    sz: &mut [u32; 16],
    buf: &mut [u8],
) {
    debug_assert_eq!(buf.len() % STRIDE, 0);
    let mut x = load(sx);
    let mut y = load(sy);
    let mut z = load(sz);
    for chunk in buf.chunks_exact_mut(STRIDE) {
        (x, y, z) = chen_next(x, y, z);
        xor_into(chunk, mix(_mm512_xor_si512(_mm512_xor_si512(x, y), z)));
    }
    store(sx, x);
    store(sy, y);
    store(sz, z);
}

/// Dispatch `map`'s XOR driver over the vector-aligned prefix.
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn keystream_xor(map: MapKind, state: &mut [[u32; 16]; 3], buf: &mut [u8]) {
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
