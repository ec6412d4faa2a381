//! Hardware Kernels
//!
//! Width-specific implementations of the chaotic map transitions. The
//! portable kernel is the semantic reference; the AVX2 and AVX-512 kernels
//! reproduce its integer transitions bit-for-bit, lane by lane.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx2;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx512;
pub mod constants;
pub mod portable;
