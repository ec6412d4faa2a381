//! Shared types used across the Vortex library.

use core::fmt;
#[cfg(feature = "std")]
use std::error;

// =============================================================================
// PRIMITIVE IDENTIFIER
// =============================================================================

/// Identifies one of the integer chaotic maps usable as a keystream
/// primitive.
///
/// All variants have scalar, 256-bit and 512-bit transitions with bit-exact
/// per-lane agreement, so the choice of SIMD tier never changes a lane's
/// orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Rotate-fold tent map (1D).
    Tent,
    /// Multiply-high logistic map (1D).
    Logistic,
    /// Rational sine map (1D).
    Sine,
    /// Henon map (2D).
    Henon,
    /// Lorenz-derived integer flow (3D).
    Lorenz,
    /// Chen-derived integer flow (3D).
    Chen,
}

impl MapKind {
    /// Number of state components (1, 2 or 3).
    #[must_use]
    pub const fn dimension(self) -> usize {
        match self {
            Self::Tent | Self::Logistic | Self::Sine => 1,
            Self::Henon => 2,
            Self::Lorenz | Self::Chen => 3,
        }
    }

    /// Short lowercase name, stable across releases.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tent => "tent",
            Self::Logistic => "logistic",
            Self::Sine => "sine",
            Self::Henon => "henon",
            Self::Lorenz => "lorenz",
            Self::Chen => "chen",
        }
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by Vortex operations.
///
/// Every variant is a caller-side precondition violation; there are no
/// transient failures and no internal error state. Operations fail before
/// mutating any output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VortexError {
    /// Multi-buffer generation was called with output buffers of unequal
    /// length.
    ShapeMismatch {
        /// Length of the first buffer.
        expected: usize,
        /// Length of the mismatching buffer.
        found: usize,
    },
    /// The key is too short. Keys must be at least 32 bytes; anything
    /// shorter than 4 bytes could not even seed a single lane.
    InvalidKey {
        /// Length of the rejected key.
        len: usize,
    },
    /// `next_in_range` was called with `hi < lo`.
    InvalidRange {
        /// Lower bound as given.
        lo: u64,
        /// Upper bound as given.
        hi: u64,
    },
    /// A size that must be positive was zero.
    InvalidArgument,
}

impl fmt::Display for VortexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, found } => write!(
                f,
                "output buffers must have equal length: expected {expected}, found {found}"
            ),
            Self::InvalidKey { len } => {
                write!(f, "key must be at least 32 bytes, got {len}")
            }
            Self::InvalidRange { lo, hi } => {
                write!(f, "empty range: lo ({lo}) exceeds hi ({hi})")
            }
            Self::InvalidArgument => write!(f, "size must be positive"),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for VortexError {}
