//! Scientific Generator Tests
//!
//! Attractor statistics, the interleaved fill contract, the scalar-tail
//! resume rule, and shape validation.

#![allow(missing_docs)]
#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use vortex::kernels::portable::sci;
use vortex::{Henon, Logistic, Lorenz, Tent, Tier, VortexError};

const EPSILON: f64 = 1e-10;

// =============================================================================
// LORENZ ATTRACTOR STATISTICS
// =============================================================================

fn shannon_entropy_bits(values: &[f64]) -> f64 {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let mut bins = [0u64; 256];
    for &v in values {
        let idx = (((v - min) / span) * 256.0) as usize;
        bins[idx.min(255)] += 1;
    }
    let total = values.len() as f64;
    bins.iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn test_lorenz_attractor_statistics() {
    // Literal scenario: classic parameters, x0 = y0 = z0 = 0.1, 50000
    // samples, 1000-sample warm-up discarded. The trajectory must sweep
    // both attractor wings (x spanning roughly ±20, z roughly 0..50) and
    // the quantized x series must carry more than 5 bits of entropy.
    let n = 50_000;
    let mut xs = vec![0.0f64; n];
    let mut ys = vec![0.0f64; n];
    let mut zs = vec![0.0f64; n];
    Lorenz::default()
        .generate(&mut xs, &mut ys, &mut zs, 0.1, 0.1, 0.1)
        .unwrap();

    let x = &xs[1000..];
    let z = &zs[1000..];
    let xmin = x.iter().copied().fold(f64::INFINITY, f64::min);
    let xmax = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let zmin = z.iter().copied().fold(f64::INFINITY, f64::min);
    let zmax = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    assert!(xmin < -15.0 && xmin > -25.0, "x minimum off-attractor: {xmin}");
    assert!(xmax > 15.0 && xmax < 25.0, "x maximum off-attractor: {xmax}");
    assert!(zmin > -1.0, "z dipped below the attractor: {zmin}");
    assert!(zmax > 40.0 && zmax < 60.0, "z maximum off-attractor: {zmax}");

    let entropy = shannon_entropy_bits(x);
    assert!(entropy > 5.0, "x-series entropy too low: {entropy:.2} bits");
}

// =============================================================================
// INTERLEAVING CONTRACT
// =============================================================================

#[test]
fn test_logistic_lane_striping() {
    // At a vector tier, position j·L + k must hold iterate j of the
    // trajectory seeded x0 + k·ε. The scalar transition uses the same
    // multiplication grouping as the kernels, so the check is exact.
    let tier = Tier::detect();
    let lanes = tier.f64_lanes();
    if lanes == 1 {
        println!("Skipping: no vector tier available.");
        return;
    }

    let map = Logistic::default();
    let x0 = 0.37;
    let n = lanes * 64;
    let mut buf = vec![0.0f64; n];
    map.generate_with(tier, &mut buf, x0);

    for k in 0..lanes {
        let mut x = x0 + (k as f64) * EPSILON;
        for j in 0..64 {
            x = sci::logistic_step(x, map.r);
            assert_eq!(
                buf[j * lanes + k],
                x,
                "lane {k} iterate {j} not striped in lane order"
            );
        }
    }
}

#[test]
fn test_scalar_tail_resumes_from_last_written_value() {
    // The tail continues from buffer[i-1], the last lane of the final
    // vector iteration, not any single lane's natural continuation. The
    // discontinuity is part of the observable contract.
    let tier = Tier::detect();
    let lanes = tier.f64_lanes();
    let map = Logistic::default();
    let x0 = 0.61;
    let n = lanes * 16 + 3;
    let mut buf = vec![0.0f64; n];
    map.generate_with(tier, &mut buf, x0);

    let main = n - n % lanes.max(1);
    let start = if lanes == 1 { 0 } else { main };
    let mut x = if start == 0 { x0 } else { buf[start - 1] };
    for (i, &got) in buf.iter().enumerate().skip(start) {
        x = sci::logistic_step(x, map.r);
        assert_eq!(got, x, "tail element {i} did not continue from buf[i-1]");
    }
}

// =============================================================================
// DOMAIN HANDLING
// =============================================================================

#[test]
fn test_tent_reduces_initial_condition_mod_one() {
    // Out-of-domain x0 values fold back into [0,1); every iterate of the
    // tent map then stays within [0, mu/2].
    let map = Tent::default();
    let mut buf = vec![0.0f64; 257];
    map.generate(&mut buf, 7.3);
    for (i, &v) in buf.iter().enumerate() {
        assert!(
            (0.0..=1.0).contains(&v),
            "tent left the unit interval at {i}: {v}"
        );
    }
}

#[test]
fn test_epsilon_stagger_diverges_lanes() {
    // Chaotic divergence: after enough iterations the staggered lanes
    // must decorrelate even though their seeds differ by only 1e-10.
    let tier = Tier::detect();
    let lanes = tier.f64_lanes();
    if lanes == 1 {
        println!("Skipping: no vector tier available.");
        return;
    }
    let mut buf = vec![0.0f64; lanes * 512];
    Logistic::default().generate(&mut buf, 0.4);
    let last = &buf[buf.len() - lanes..];
    let spread = last
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
        - last.iter().copied().fold(f64::INFINITY, f64::min);
    assert!(spread > 1e-3, "lanes failed to diverge: spread {spread:e}");
}

// =============================================================================
// SHAPE VALIDATION
// =============================================================================

#[test]
fn test_shape_mismatch_rejected() {
    let mut x = vec![0.0f64; 10];
    let mut y = vec![0.0f64; 9];
    let err = Henon::default()
        .generate(&mut x, &mut y, 0.1, 0.1)
        .unwrap_err();
    assert_eq!(
        err,
        VortexError::ShapeMismatch {
            expected: 10,
            found: 9
        }
    );

    let mut y10 = vec![0.0f64; 10];
    let mut z = vec![0.0f64; 11];
    let err = Lorenz::default()
        .generate(&mut x, &mut y10, &mut z, 0.1, 0.1, 0.1)
        .unwrap_err();
    assert_eq!(
        err,
        VortexError::ShapeMismatch {
            expected: 10,
            found: 11
        }
    );
}

#[test]
fn test_empty_buffers_are_noop() {
    let mut a: Vec<f64> = Vec::new();
    let mut b: Vec<f64> = Vec::new();
    let mut c: Vec<f64> = Vec::new();
    Logistic::default().generate(&mut a, 0.5);
    Lorenz::default()
        .generate(&mut a, &mut b, &mut c, 0.1, 0.1, 0.1)
        .unwrap();
}
