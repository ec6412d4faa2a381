//! Scientific Generators
//!
//! Fill caller-supplied f64 buffers with trajectories of the chaotic maps
//! and flows. At a vector tier, L independent epsilon-staggered
//! trajectories advance per step and their outputs are striped into the
//! buffer in lane order; a scalar loop finishes the tail, resuming from
//! the last written value. The interleaving preserves attractor geometry
//! and statistics, which is what scientific use cares about.

#![allow(clippy::cast_precision_loss)]
// No mul_add: fused rounding would diverge from the vector kernels.
#![allow(clippy::suboptimal_flops)]

use crate::engine::Tier;
use crate::kernels::constants::LANE_EPSILON;
use crate::kernels::portable::sci;
use crate::types::VortexError;

// =============================================================================
// LANE SEEDING
// =============================================================================

/// Epsilon-staggered seeds: lane k starts at x0 + k·1e-10 so trajectories
/// diverge under sensitive dependence. Unit-domain maps reduce mod 1.
fn stagger<const L: usize>(x0: f64, unit: bool) -> [f64; L] {
    let mut seeds = [0.0; L];
    for (k, s) in seeds.iter_mut().enumerate() {
        let v = x0 + (k as f64) * LANE_EPSILON;
        *s = if unit { v.rem_euclid(1.0) } else { v };
    }
    seeds
}

/// Largest multiple of the tier's lane count that fits in `n`; zero at the
/// scalar tier, which runs the tail loop outright.
const fn aligned_len(tier: Tier, n: usize) -> usize {
    let lanes = tier.f64_lanes();
    if lanes > 1 {
        n - n % lanes
    } else {
        0
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
const fn clamp_tier(_tier: Tier) -> Tier {
    Tier::Scalar
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const fn clamp_tier(tier: Tier) -> Tier {
    tier
}

// =============================================================================
// LOGISTIC MAP
// =============================================================================

/// Logistic map x' = r·x·(1 − x) on the unit interval.
#[derive(Debug, Clone, Copy)]
pub struct Logistic {
    /// Growth parameter; 3.99 sits deep in the chaotic band.
    pub r: f64,
}

impl Default for Logistic {
    fn default() -> Self {
        Self { r: 3.99 }
    }
}

impl Logistic {
    /// Fill `buf` with a trajectory from `x0` at the widest available
    /// tier.
    pub fn generate(&self, buf: &mut [f64], x0: f64) {
        self.generate_with(Tier::detect(), buf, x0);
    }

    /// Fill `buf` with a trajectory from `x0` at a pinned tier.
    pub fn generate_with(&self, tier: Tier, buf: &mut [f64], x0: f64) {
        let tier = clamp_tier(tier);
        let main = aligned_len(tier, buf.len());
        if main > 0 {
            match tier {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W512 => {
                    let mut state = stagger::<8>(x0, false);
                    // SAFETY: tier selection guarantees AVX-512F.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx512::sci::logistic_fill(
                            &mut buf[..main],
                            &mut state,
                            self.r,
                        );
                    }
                }
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W256 => {
                    let mut state = stagger::<4>(x0, false);
                    // SAFETY: tier selection guarantees AVX2.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx2::sci::logistic_fill(
                            &mut buf[..main],
                            &mut state,
                            self.r,
                        );
                    }
                }
                _ => {}
            }
        }
        let mut x = if main == 0 { x0 } else { buf[main - 1] };
        for slot in &mut buf[main..] {
            x = sci::logistic_step(x, self.r);
            *slot = x;
        }
    }
}

// =============================================================================
// TENT MAP
// =============================================================================

/// Tent map x' = μ·min(x, 1 − x) on the unit interval.
#[derive(Debug, Clone, Copy)]
pub struct Tent {
    /// Slope; 1.9999 keeps the map just inside the fully chaotic regime.
    pub mu: f64,
}

impl Default for Tent {
    fn default() -> Self {
        Self { mu: 1.9999 }
    }
}

impl Tent {
    /// Fill `buf` with a trajectory from `x0` at the widest available
    /// tier. The initial condition is reduced mod 1.
    pub fn generate(&self, buf: &mut [f64], x0: f64) {
        self.generate_with(Tier::detect(), buf, x0);
    }

    /// Fill `buf` with a trajectory from `x0` at a pinned tier.
    pub fn generate_with(&self, tier: Tier, buf: &mut [f64], x0: f64) {
        let tier = clamp_tier(tier);
        let main = aligned_len(tier, buf.len());
        if main > 0 {
            match tier {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W512 => {
                    let mut state = stagger::<8>(x0, true);
                    // SAFETY: tier selection guarantees AVX-512F.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx512::sci::tent_fill(&mut buf[..main], &mut state, self.mu);
                    }
                }
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W256 => {
                    let mut state = stagger::<4>(x0, true);
                    // SAFETY: tier selection guarantees AVX2.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx2::sci::tent_fill(&mut buf[..main], &mut state, self.mu);
                    }
                }
                _ => {}
            }
        }
        let mut x = if main == 0 {
            x0.rem_euclid(1.0)
        } else {
            buf[main - 1]
        };
        for slot in &mut buf[main..] {
            x = sci::tent_step(x, self.mu);
            *slot = x;
        }
    }
}

// =============================================================================
// SINE MAP
// =============================================================================

/// Sine map x' = r·sin(π·x) on the unit interval.
///
/// The scalar path evaluates `sin`; the vector paths use a rational
/// approximation. The two agree statistically, not bit-for-bit; pin the
/// tier with [`Sine::generate_with`] when exact reproducibility across
/// machines matters.
#[derive(Debug, Clone, Copy)]
pub struct Sine {
    /// Amplitude; values near 1 keep the orbit chaotic.
    pub r: f64,
}

impl Default for Sine {
    fn default() -> Self {
        Self { r: 0.99 }
    }
}

impl Sine {
    /// Fill `buf` with a trajectory from `x0` at the widest available
    /// tier. The initial condition is reduced mod 1.
    pub fn generate(&self, buf: &mut [f64], x0: f64) {
        self.generate_with(Tier::detect(), buf, x0);
    }

    /// Fill `buf` with a trajectory from `x0` at a pinned tier.
    pub fn generate_with(&self, tier: Tier, buf: &mut [f64], x0: f64) {
        let tier = clamp_tier(tier);
        let main = aligned_len(tier, buf.len());
        if main > 0 {
            match tier {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W512 => {
                    let mut state = stagger::<8>(x0, true);
                    // SAFETY: tier selection guarantees AVX-512F.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx512::sci::sine_fill(&mut buf[..main], &mut state, self.r);
                    }
                }
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W256 => {
                    let mut state = stagger::<4>(x0, true);
                    // SAFETY: tier selection guarantees AVX2.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx2::sci::sine_fill(&mut buf[..main], &mut state, self.r);
                    }
                }
                _ => {}
            }
        }
        let mut x = if main == 0 {
            x0.rem_euclid(1.0)
        } else {
            buf[main - 1]
        };
        for slot in &mut buf[main..] {
            x = sci::sine_step(x, self.r);
            *slot = x;
        }
    }
}

// =============================================================================
// HENON MAP
// =============================================================================

/// Henon map x' = 1 − a·x² + y, y' = b·x.
#[derive(Debug, Clone, Copy)]
pub struct Henon {
    /// Quadratic coefficient (classic value 1.4).
    pub a: f64,
    /// Contraction coefficient (classic value 0.3).
    pub b: f64,
}

impl Default for Henon {
    fn default() -> Self {
        Self { a: 1.4, b: 0.3 }
    }
}

impl Henon {
    /// Fill both buffers with a trajectory from `(x0, y0)` at the widest
    /// available tier.
    ///
    /// # Errors
    /// `ShapeMismatch` if the buffers differ in length; nothing is written.
    pub fn generate(
        &self,
        xbuf: &mut [f64],
        ybuf: &mut [f64],
        x0: f64,
        y0: f64,
    ) -> Result<(), VortexError> {
        self.generate_with(Tier::detect(), xbuf, ybuf, x0, y0)
    }

    /// Fill both buffers with a trajectory from `(x0, y0)` at a pinned
    /// tier.
    ///
    /// # Errors
    /// `ShapeMismatch` if the buffers differ in length; nothing is written.
    pub fn generate_with(
        &self,
        tier: Tier,
        xbuf: &mut [f64],
        ybuf: &mut [f64],
        x0: f64,
        y0: f64,
    ) -> Result<(), VortexError> {
        if xbuf.len() != ybuf.len() {
            return Err(VortexError::ShapeMismatch {
                expected: xbuf.len(),
                found: ybuf.len(),
            });
        }
        let tier = clamp_tier(tier);
        let main = aligned_len(tier, xbuf.len());
        if main > 0 {
            match tier {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W512 => {
                    let mut state = [stagger::<8>(x0, false), stagger::<8>(y0, false)];
                    // SAFETY: tier selection guarantees AVX-512F.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx512::sci::henon_fill(
                            &mut xbuf[..main],
                            &mut ybuf[..main],
                            &mut state,
                            self.a,
                            self.b,
                        );
                    }
                }
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W256 => {
                    let mut state = [stagger::<4>(x0, false), stagger::<4>(y0, false)];
                    // SAFETY: tier selection guarantees AVX2.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx2::sci::henon_fill(
                            &mut xbuf[..main],
                            &mut ybuf[..main],
                            &mut state,
                            self.a,
                            self.b,
                        );
                    }
                }
                _ => {}
            }
        }
        let (mut x, mut y) = if main == 0 {
            (x0, y0)
        } else {
            (xbuf[main - 1], ybuf[main - 1])
        };
        for i in main..xbuf.len() {
            (x, y) = sci::henon_step(x, y, self.a, self.b);
            xbuf[i] = x;
            ybuf[i] = y;
        }
        Ok(())
    }
}

// =============================================================================
// LORENZ SYSTEM
// =============================================================================

/// Lorenz system integrated with forward Euler.
#[derive(Debug, Clone, Copy)]
pub struct Lorenz {
    /// Prandtl number (classic value 10).
    pub sigma: f64,
    /// Rayleigh number (classic value 28).
    pub rho: f64,
    /// Geometric factor (classic value 8/3).
    pub beta: f64,
    /// Euler step size.
    pub dt: f64,
}

impl Default for Lorenz {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            dt: 0.01,
        }
    }
}

impl Lorenz {
    /// Fill all three buffers with a trajectory from `(x0, y0, z0)` at the
    /// widest available tier.
    ///
    /// # Errors
    /// `ShapeMismatch` if any buffer length differs; nothing is written.
    pub fn generate(
        &self,
        xbuf: &mut [f64],
        ybuf: &mut [f64],
        zbuf: &mut [f64],
        x0: f64,
        y0: f64,
        z0: f64,
    ) -> Result<(), VortexError> {
        self.generate_with(Tier::detect(), xbuf, ybuf, zbuf, x0, y0, z0)
    }

    /// Fill all three buffers with a trajectory from `(x0, y0, z0)` at a
    /// pinned tier.
    ///
    /// # Errors
    /// `ShapeMismatch` if any buffer length differs; nothing is written.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_with(
        &self,
        tier: Tier,
        xbuf: &mut [f64],
        ybuf: &mut [f64],
        zbuf: &mut [f64],
        x0: f64,
        y0: f64,
        z0: f64,
    ) -> Result<(), VortexError> {
        check_shape3(xbuf, ybuf, zbuf)?;
        let tier = clamp_tier(tier);
        let main = aligned_len(tier, xbuf.len());
        if main > 0 {
            match tier {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W512 => {
                    let mut state = [
                        stagger::<8>(x0, false),
                        stagger::<8>(y0, false),
                        stagger::<8>(z0, false),
                    ];
                    // SAFETY: tier selection guarantees AVX-512F.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx512::sci::lorenz_fill(
                            &mut xbuf[..main],
                            &mut ybuf[..main],
                            &mut zbuf[..main],
                            &mut state,
                            self.sigma,
                            self.rho,
                            self.beta,
                            self.dt,
                        );
                    }
                }
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W256 => {
                    let mut state = [
                        stagger::<4>(x0, false),
                        stagger::<4>(y0, false),
                        stagger::<4>(z0, false),
                    ];
                    // SAFETY: tier selection guarantees AVX2.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx2::sci::lorenz_fill(
                            &mut xbuf[..main],
                            &mut ybuf[..main],
                            &mut zbuf[..main],
                            &mut state,
                            self.sigma,
                            self.rho,
                            self.beta,
                            self.dt,
                        );
                    }
                }
                _ => {}
            }
        }
        let (mut x, mut y, mut z) = if main == 0 {
            (x0, y0, z0)
        } else {
            (xbuf[main - 1], ybuf[main - 1], zbuf[main - 1])
        };
        for i in main..xbuf.len() {
            (x, y, z) = sci::lorenz_step(x, y, z, self.sigma, self.rho, self.beta, self.dt);
            xbuf[i] = x;
            ybuf[i] = y;
            zbuf[i] = z;
        }
        Ok(())
    }
}

// =============================================================================
// CHEN SYSTEM
// =============================================================================

/// Chen system integrated with forward Euler.
#[derive(Debug, Clone, Copy)]
pub struct Chen {
    /// First shape parameter (classic value 35).
    pub a: f64,
    /// Second shape parameter (classic value 3).
    pub b: f64,
    /// Third shape parameter (classic value 28).
    pub c: f64,
    /// Euler step size. The Chen flow is stiffer than Lorenz; 0.002 keeps
    /// forward Euler stable.
    pub dt: f64,
}

impl Default for Chen {
    fn default() -> Self {
        Self {
            a: 35.0,
            b: 3.0,
            c: 28.0,
            dt: 0.002,
        }
    }
}

impl Chen {
    /// Fill all three buffers with a trajectory from `(x0, y0, z0)` at the
    /// widest available tier.
    ///
    /// # Errors
    /// `ShapeMismatch` if any buffer length differs; nothing is written.
    pub fn generate(
        &self,
        xbuf: &mut [f64],
        ybuf: &mut [f64],
        zbuf: &mut [f64],
        x0: f64,
        y0: f64,
        z0: f64,
    ) -> Result<(), VortexError> {
        self.generate_with(Tier::detect(), xbuf, ybuf, zbuf, x0, y0, z0)
    }

    /// Fill all three buffers with a trajectory from `(x0, y0, z0)` at a
    /// pinned tier.
    ///
    /// # Errors
    /// `ShapeMismatch` if any buffer length differs; nothing is written.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_with(
        &self,
        tier: Tier,
        xbuf: &mut [f64],
        ybuf: &mut [f64],
        zbuf: &mut [f64],
        x0: f64,
        y0: f64,
        z0: f64,
    ) -> Result<(), VortexError> {
        check_shape3(xbuf, ybuf, zbuf)?;
        let tier = clamp_tier(tier);
        let main = aligned_len(tier, xbuf.len());
        if main > 0 {
            match tier {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W512 => {
                    let mut state = [
                        stagger::<8>(x0, false),
                        stagger::<8>(y0, false),
                        stagger::<8>(z0, false),
                    ];
                    // SAFETY: tier selection guarantees AVX-512F.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx512::sci::chen_fill(
                            &mut xbuf[..main],
                            &mut ybuf[..main],
                            &mut zbuf[..main],
                            &mut state,
                            self.a,
                            self.b,
                            self.c,
                            self.dt,
                        );
                    }
                }
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                Tier::W256 => {
                    let mut state = [
                        stagger::<4>(x0, false),
                        stagger::<4>(y0, false),
                        stagger::<4>(z0, false),
                    ];
                    // SAFETY: tier selection guarantees AVX2.
                    #[allow(unsafe_code)]
                    unsafe {
                        crate::kernels::avx2::sci::chen_fill(
                            &mut xbuf[..main],
                            &mut ybuf[..main],
                            &mut zbuf[..main],
                            &mut state,
                            self.a,
                            self.b,
                            self.c,
                            self.dt,
                        );
                    }
                }
                _ => {}
            }
        }
        let (mut x, mut y, mut z) = if main == 0 {
            (x0, y0, z0)
        } else {
            (xbuf[main - 1], ybuf[main - 1], zbuf[main - 1])
        };
        for i in main..xbuf.len() {
            (x, y, z) = sci::chen_step(x, y, z, self.a, self.b, self.c, self.dt);
            xbuf[i] = x;
            ybuf[i] = y;
            zbuf[i] = z;
        }
        Ok(())
    }
}

// =============================================================================
// SHAPE VALIDATION
// =============================================================================

const fn check_shape3(xbuf: &[f64], ybuf: &[f64], zbuf: &[f64]) -> Result<(), VortexError> {
    if xbuf.len() != ybuf.len() {
        return Err(VortexError::ShapeMismatch {
            expected: xbuf.len(),
            found: ybuf.len(),
        });
    }
    if xbuf.len() != zbuf.len() {
        return Err(VortexError::ShapeMismatch {
            expected: xbuf.len(),
            found: zbuf.len(),
        });
    }
    Ok(())
}
