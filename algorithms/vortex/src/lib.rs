#![cfg_attr(not(feature = "std"), no_std)]

//! # Vortex
//!
//! Chaotic dynamics at vector throughput: f64 generators for scientific
//! trajectories, and integer variants of the same maps driving a seekable
//! XOR stream cipher. Accelerated by AVX-512 / AVX2 with a bit-exact
//! scalar fallback for the integer paths.

//! # Usage
//! ```rust
//! use vortex::MapKind;
//!
//! // 1. In-place XOR cipher (processing twice restores the input)
//! let key = [0x42u8; 32];
//! let iv = [0x07u8; 16];
//! let mut msg = *b"symmetric either way";
//! vortex::process(MapKind::Lorenz, &mut msg, &key, &iv)?;
//! vortex::process(MapKind::Lorenz, &mut msg, &key, &iv)?;
//! assert_eq!(&msg, b"symmetric either way");
//!
//! // 2. Scientific trajectories
//! let mut xs = [0.0f64; 256];
//! vortex::Logistic::default().generate(&mut xs, 0.4);
//!
//! // 3. Seeded random numbers
//! let mut rng = vortex::VortexRng::from_key_iv(MapKind::Tent, &key, &iv)?;
//! let dice = rng.next_in_range(1, 6)?;
//! assert!((1..=6).contains(&dice));
//! # Ok::<(), vortex::VortexError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

mod cipher;
mod engine;
#[cfg(feature = "std")]
mod generator;
// Re-export internal kernels for benchmarking/testing if needed, but hide from docs
#[doc(hidden)]
pub mod kernels; // Public for test/example use only
#[cfg(feature = "std")]
mod rng;
#[cfg(feature = "std")]
mod stream;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

#[doc(hidden)]
pub use cipher::derive_seeds;
pub use cipher::{process, process_with};
pub use engine::Tier;
#[cfg(feature = "std")]
pub use generator::{Chen, Henon, Logistic, Lorenz, Sine, Tent};
#[cfg(feature = "std")]
pub use rng::VortexRng;
#[cfg(feature = "std")]
pub use stream::VortexStream;
pub use types::{MapKind, VortexError};

/// Returns the name of the hardware backend currently in use.
#[must_use]
pub fn active_backend() -> &'static str {
    engine::get_active_backend_name()
}
