//! AVX2 Kernel Module
//!
//! 256-bit transitions: 8 × u32 lanes for the keystream maps, 4 × f64
//! lanes for the scientific maps.

pub mod int;
#[cfg(feature = "std")]
pub mod sci;
