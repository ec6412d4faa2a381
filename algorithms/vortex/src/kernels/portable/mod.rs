//! Portable kernels.
//!
//! Plain-Rust transitions for every map. The integer side is the reference
//! implementation that the SIMD tiers must match bit-for-bit; the float
//! side is the scalar tail used after any interleaved fill.

pub mod int;
#[cfg(feature = "std")]
pub mod sci;
