//! Hardware Dispatcher
//!
//! Selects the widest execution tier (AVX-512, AVX2, or scalar) supported
//! by the current CPU. Detection happens once per `process`/`generate`
//! call; a tier never changes mid-buffer, because a switch would change the
//! interleaving (and, for the cipher, the keystream bytes).

// =============================================================================
// TIER
// =============================================================================

/// Execution width for one complete operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// One lane per step, plain Rust.
    Scalar,
    /// 256-bit vectors: 8 × u32 or 4 × f64 lanes.
    W256,
    /// 512-bit vectors: 16 × u32 or 8 × f64 lanes.
    W512,
}

impl Tier {
    /// Detect the widest tier available on this CPU.
    ///
    /// Runtime detection under `std` on x86; compile-time `target_feature`
    /// selection otherwise. Scalar everywhere else.
    #[must_use]
    #[allow(unreachable_code)] // the fallback is dead on pinned-feature builds
    pub fn detect() -> Self {
        // 1. Runtime Dispatch (Std-only)
        #[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
        {
            if is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw") {
                return Self::W512;
            }
            if is_x86_feature_detected!("avx2") {
                return Self::W256;
            }
        }

        // 2. Compile-Time Dispatch (no_std)
        #[cfg(not(feature = "std"))]
        {
            #[cfg(all(target_feature = "avx512f", target_feature = "avx512bw"))]
            return Self::W512;

            #[cfg(all(
                not(all(target_feature = "avx512f", target_feature = "avx512bw")),
                target_feature = "avx2"
            ))]
            return Self::W256;
        }

        // 3. Scalar Fallback
        Self::Scalar
    }

    /// u32 lanes driven per step at this tier.
    #[must_use]
    pub const fn int_lanes(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::W256 => 8,
            Self::W512 => 16,
        }
    }

    /// f64 lanes driven per step at this tier.
    #[must_use]
    pub const fn f64_lanes(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::W256 => 4,
            Self::W512 => 8,
        }
    }

    /// Keystream bytes produced per vector iteration.
    #[must_use]
    pub const fn stride(self) -> usize {
        self.int_lanes() * 4
    }
}

/// Returns the name of the active hardware backend.
#[must_use]
pub fn get_active_backend_name() -> &'static str {
    match Tier::detect() {
        Tier::W512 => "AVX-512",
        Tier::W256 => "AVX2",
        Tier::Scalar => "Scalar",
    }
}
