//! AVX-512 Kernel Module
//!
//! 512-bit transitions: 16 × u32 lanes for the keystream maps, 8 × f64
//! lanes for the scientific maps.

pub mod int;
#[cfg(feature = "std")]
pub mod sci;
