//! Portable f64 transitions.
//!
//! Scalar forms of the scientific maps and flows. These drive the scalar
//! tier outright and the tail of every interleaved fill. The sine map uses
//! the libm `sin` here; the SIMD kernels use a rational approximation, so
//! the two paths agree statistically but not bit-for-bit.

// No mul_add anywhere: fused rounding would diverge from the vector
// kernels, which evaluate multiply and add as separate operations.
#![allow(clippy::suboptimal_flops)]

use core::f64::consts::PI;

/// Logistic map x' = r·x·(1 − x).
///
/// Grouped as r·(x·(1 − x)), the same association the vector kernels use,
/// so a lane and its scalar continuation never drift apart.
#[must_use]
pub fn logistic_step(x: f64, r: f64) -> f64 {
    r * (x * (1.0 - x))
}

/// Tent map x' = μ·x below the midpoint, μ·(1 − x) above.
#[must_use]
pub fn tent_step(x: f64, mu: f64) -> f64 {
    if x < 0.5 {
        mu * x
    } else {
        mu * (1.0 - x)
    }
}

/// Sine map x' = r·sin(π·x).
#[must_use]
pub fn sine_step(x: f64, r: f64) -> f64 {
    r * (PI * x).sin()
}

/// Henon map. The returned y uses the pre-update x; the quadratic term is
/// grouped a·(x·x) to match the vector kernels.
#[must_use]
pub fn henon_step(x: f64, y: f64, a: f64, b: f64) -> (f64, f64) {
    (1.0 - a * (x * x) + y, b * x)
}

/// One forward-Euler step of the Lorenz system.
#[must_use]
pub fn lorenz_step(
    x: f64,
    y: f64,
    z: f64,
    sigma: f64,
    rho: f64,
    beta: f64,
    dt: f64,
) -> (f64, f64, f64) {
    let dx = sigma * (y - x) * dt;
    let dy = (x * (rho - z) - y) * dt;
    let dz = (x * y - beta * z) * dt;
    (x + dx, y + dy, z + dz)
}

/// One forward-Euler step of the Chen system.
#[must_use]
pub fn chen_step(x: f64, y: f64, z: f64, a: f64, b: f64, c: f64, dt: f64) -> (f64, f64, f64) {
    let dx = a * (y - x) * dt;
    let dy = ((c - a) * x - x * z + c * y) * dt;
    let dz = (x * y - b * z) * dt;
    (x + dx, y + dy, z + dz)
}
