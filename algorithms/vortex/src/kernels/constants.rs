//! Vortex Kernel Constants
//!
//! Every additive (Weyl) constant is derived from a published irrational:
//!
//! ```text
//! TENT_WEYL     = floor(2^32 / φ)          (golden ratio)
//! LOGISTIC_WEYL = 2^32 - TENT_WEYL         (golden ratio complement)
//! SINE_WEYL     = floor(2^32 · √2 / 2)
//! HENON_WEYL    = SplitMix-family increment
//! ```
//!
//! The mixer multipliers are the 32-bit `MurmurHash3` finalizer pair. None
//! of the constants is secret; their only job is to keep integer orbits
//! away from short cycles and fixed points.

// =============================================================================
// WEYL CONSTANTS (integer maps)
// =============================================================================

/// Tent map increment: floor(2^32 / φ).
pub const TENT_WEYL: u32 = 0x9E37_79B9;

/// Logistic map increment: 2^32 − floor(2^32 / φ).
pub const LOGISTIC_WEYL: u32 = 0x61C8_8647;

/// Sine map increment: floor(2^32 · √2 / 2).
pub const SINE_WEYL: u32 = 0xB504_F333;

/// Henon map increment (`SplitMix`-family constant).
pub const HENON_WEYL: u32 = 0x6D2B_79F5;

// =============================================================================
// AVALANCHE MIXER (MurmurHash3 32-bit finalizer pair)
// =============================================================================

/// First finalizer multiplier.
pub const MIX_MUL0: u32 = 0x85EB_CA6B;

/// Second finalizer multiplier.
pub const MIX_MUL1: u32 = 0xC2B2_AE35;

// =============================================================================
// SEEDING
// =============================================================================

/// Replacement for all-zero seed lanes. A zero lane would pin some maps to
/// their fixed point at the origin.
pub const SEED_SENTINEL: u32 = 0xDEAD_BEEF;

/// Key/IV diffusion rounds applied to the seed vector before any keystream
/// byte is emitted.
pub const WARMUP_ROUNDS: usize = 16;

/// Key length in bytes. Longer keys are truncated, shorter keys rejected.
pub const KEY_LEN: usize = 32;

/// Nominal IV length in bytes.
pub const IV_LEN: usize = 16;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Widest lane count across tiers (16 × u32 at 512 bits).
pub const MAX_LANES: usize = 16;

/// Maximum dimensionality of any map.
pub const MAX_DIM: usize = 3;

/// Counter-mode block size in bytes. Must be at least the widest tier's
/// stride; 4096 amortizes one seed derivation over 64 vector iterations.
pub const BLOCK_SIZE: usize = 4096;

/// Default pool size for the random number source.
pub const POOL_SIZE: usize = 4096;

// =============================================================================
// FLOAT DOMAIN
// =============================================================================

/// Per-lane stagger applied to initial conditions so parallel trajectories
/// diverge under sensitive dependence.
pub const LANE_EPSILON: f64 = 1e-10;

/// 2^32 as f64, used by the integer sine transition.
pub const TWO_POW_32: f64 = 4_294_967_296.0;

/// 2^-32 as f64.
pub const INV_TWO_POW_32: f64 = 1.0 / TWO_POW_32;
