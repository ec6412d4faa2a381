//! AVX-512 scientific kernels (8 × f64 lanes).
//!
//! Same fill structure as the AVX2 kernels, twice as wide, using mask
//! registers for the tent branch select.

#![allow(unsafe_code)]

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// f64 lanes per vector at this tier.
pub const LANES: usize = 8;

// =============================================================================
// 1D FILLS
// =============================================================================

/// Interleaved logistic fill; `out.len()` must be a multiple of 8.
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn logistic_fill(out: &mut [f64], state: &mut [f64; 8], r: f64) {
    debug_assert_eq!(out.len() % LANES, 0);
    let rv = _mm512_set1_pd(r);
    let one = _mm512_set1_pd(1.0);
    let mut x = _mm512_loadu_pd(state.as_ptr());
    for chunk in out.chunks_exact_mut(LANES) {
        x = _mm512_mul_pd(rv, _mm512_mul_pd(x, _mm512_sub_pd(one, x)));
        _mm512_storeu_pd(chunk.as_mut_ptr(), x);
    }
    _mm512_storeu_pd(state.as_mut_ptr(), x);
}

/// Interleaved tent fill; branch select via compare mask.
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn tent_fill(out: &mut [f64], state: &mut [f64; 8], mu: f64) {
    debug_assert_eq!(out.len() % LANES, 0);
    let muv = _mm512_set1_pd(mu);
    let one = _mm512_set1_pd(1.0);
    let half = _mm512_set1_pd(0.5);
    let mut x = _mm512_loadu_pd(state.as_ptr());
    for chunk in out.chunks_exact_mut(LANES) {
        let below = _mm512_cmp_pd_mask::<_CMP_LT_OQ>(x, half);
        let rise = _mm512_mul_pd(muv, x);
        let fall = _mm512_mul_pd(muv, _mm512_sub_pd(one, x));
        x = _mm512_mask_blend_pd(below, fall, rise);
        _mm512_storeu_pd(chunk.as_mut_ptr(), x);
    }
    _mm512_storeu_pd(state.as_mut_ptr(), x);
}

/// Interleaved sine fill using the rational approximation
/// r·16·x·(1−x)/(5 − x·(1−x)). Not bit-equivalent to the scalar `sin`
/// path; pin the tier if reproducibility across machines matters.
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn sine_fill(out: &mut [f64], state: &mut [f64; 8], r: f64) {
    debug_assert_eq!(out.len() % LANES, 0);
    let rv = _mm512_set1_pd(r);
    let one = _mm512_set1_pd(1.0);
    let five = _mm512_set1_pd(5.0);
    let sixteen = _mm512_set1_pd(16.0);
    let mut x = _mm512_loadu_pd(state.as_ptr());
    for chunk in out.chunks_exact_mut(LANES) {
        let p = _mm512_mul_pd(x, _mm512_sub_pd(one, x));
        let num = _mm512_mul_pd(sixteen, p);
        let den = _mm512_sub_pd(five, p);
        x = _mm512_mul_pd(rv, _mm512_div_pd(num, den));
        _mm512_storeu_pd(chunk.as_mut_ptr(), x);
    }
    _mm512_storeu_pd(state.as_mut_ptr(), x);
}

// =============================================================================
// 2D / 3D FILLS
// =============================================================================

/// Interleaved Henon fill; y' uses the pre-update x.
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
pub unsafe fn henon_fill(
    xout: &mut [f64],
    yout: &mut [f64],
    state: &mut [[f64; 8]; 2],
    a: f64,
    b: f64,
) {
    debug_assert_eq!(xout.len(), yout.len());
    debug_assert_eq!(xout.len() % LANES, 0);
    let av = _mm512_set1_pd(a);
    let bv = _mm512_set1_pd(b);
    let one = _mm512_set1_pd(1.0);
    let mut x = _mm512_loadu_pd(state[0].as_ptr());
    let mut y = _mm512_loadu_pd(state[1].as_ptr());
    for (xc, yc) in xout
        .chunks_exact_mut(LANES)
        .zip(yout.chunks_exact_mut(LANES))
    {
        let xn = _mm512_add_pd(
            _mm512_sub_pd(one, _mm512_mul_pd(av, _mm512_mul_pd(x, x))),
            y,
        );
        y = _mm512_mul_pd(bv, x);
        x = xn;
        _mm512_storeu_pd(xc.as_mut_ptr(), x);
        _mm512_storeu_pd(yc.as_mut_ptr(), y);
    }
    _mm512_storeu_pd(state[0].as_mut_ptr(), x);
    _mm512_storeu_pd(state[1].as_mut_ptr(), y);
}

/// Interleaved Lorenz fill (forward Euler).
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[allow(clippy::too_many_arguments)]
#[target_feature(enable = "avx512f")]
pub unsafe fn lorenz_fill(
    xout: &mut [f64],
    yout: &mut [f64],
    zout: &mut [f64],
    state: &mut [[f64; 8]; 3],
    sigma: f64,
    rho: f64,
    beta: f64,
    dt: f64,
) {
    debug_assert_eq!(xout.len() % LANES, 0);
    let sv = _mm512_set1_pd(sigma);
    let rv = _mm512_set1_pd(rho);
    let bv = _mm512_set1_pd(beta);
    let dtv = _mm512_set1_pd(dt);
    let mut x = _mm512_loadu_pd(state[0].as_ptr());
    let mut y = _mm512_loadu_pd(state[1].as_ptr());
    let mut z = _mm512_loadu_pd(state[2].as_ptr());
    for ((xc, yc), zc) in xout
        .chunks_exact_mut(LANES)
        .zip(yout.chunks_exact_mut(LANES))
        .zip(zout.chunks_exact_mut(LANES))
    {
        let dx = _mm512_mul_pd(_mm512_mul_pd(sv, _mm512_sub_pd(y, x)), dtv);
        let dy = _mm512_mul_pd(
            _mm512_sub_pd(_mm512_mul_pd(x, _mm512_sub_pd(rv, z)), y),
            dtv,
        );
        let dz = _mm512_mul_pd(
            _mm512_sub_pd(_mm512_mul_pd(x, y), _mm512_mul_pd(bv, z)),
            dtv,
        );
        x = _mm512_add_pd(x, dx);
        y = _mm512_add_pd(y, dy);
        z = _mm512_add_pd(z, dz);
        _mm512_storeu_pd(xc.as_mut_ptr(), x);
        _mm512_storeu_pd(yc.as_mut_ptr(), y);
        _mm512_storeu_pd(zc.as_mut_ptr(), z);
    }
    _mm512_storeu_pd(state[0].as_mut_ptr(), x);
    _mm512_storeu_pd(state[1].as_mut_ptr(), y);
    _mm512_storeu_pd(state[2].as_mut_ptr(), z);
}

/// Interleaved Chen fill (forward Euler).
///
/// # Safety
/// Requires AVX-512F (enforced by the dispatcher).
#[allow(clippy::too_many_arguments)]
#[target_feature(enable = "avx512f")]
pub unsafe fn chen_fill(
    xout: &mut [f64],
    yout: &mut [f64],
    zout: &mut [f64],
    state: &mut [[f64; 8]; 3],
    a: f64,
    b: f64,
    c: f64,
    dt: f64,
) {
    debug_assert_eq!(xout.len() % LANES, 0);
    let av = _mm512_set1_pd(a);
    let bv = _mm512_set1_pd(b);
    let cv = _mm512_set1_pd(c);
    let cav = _mm512_set1_pd(c - a);
    let dtv = _mm512_set1_pd(dt);
    let mut x = _mm512_loadu_pd(state[0].as_ptr());
    let mut y = _mm512_loadu_pd(state[1].as_ptr());
    let mut z = _mm512_loadu_pd(state[2].as_ptr());
    for ((xc, yc), zc) in xout
        .chunks_exact_mut(LANES)
        .zip(yout.chunks_exact_mut(LANES))
        .zip(zout.chunks_exact_mut(LANES))
    {
        let dx = _mm512_mul_pd(_mm512_mul_pd(av, _mm512_sub_pd(y, x)), dtv);
        let dy = _mm512_mul_pd(
            _mm512_add_pd(
                _mm512_sub_pd(_mm512_mul_pd(cav, x), _mm512_mul_pd(x, z)),
                _mm512_mul_pd(cv, y),
            ),
            dtv,
        );
        let dz = _mm512_mul_pd(
            _mm512_sub_pd(_mm512_mul_pd(x, y), _mm512_mul_pd(bv, z)),
            dtv,
        );
        x = _mm512_add_pd(x, dx);
        y = _mm512_add_pd(y, dy);
        z = _mm512_add_pd(z, dz);
        _mm512_storeu_pd(xc.as_mut_ptr(), x);
        _mm512_storeu_pd(yc.as_mut_ptr(), y);
        _mm512_storeu_pd(zc.as_mut_ptr(), z);
    }
    _mm512_storeu_pd(state[0].as_mut_ptr(), x);
    _mm512_storeu_pd(state[1].as_mut_ptr(), y);
    _mm512_storeu_pd(state[2].as_mut_ptr(), z);
}
