//! Seeded Random Number Source
//!
//! Treats the cipher as a keystream generator over a zero pool: the pool
//! is one cipher run, consumed through a cursor, and refilled by stepping
//! the first eight IV bytes as a little-endian counter. Construction from
//! the same (key, IV, map) always yields the same sequence.
//!
//! Implements [`rand_core::RngCore`] and [`rand_core::SeedableRng`] so it
//! drops into the wider `rand` ecosystem.

use rand_core::{RngCore, SeedableRng};

use crate::cipher;
use crate::engine::Tier;
use crate::kernels::constants::{IV_LEN, KEY_LEN, POOL_SIZE};
use crate::types::{MapKind, VortexError};

/// 2^-53, scaling a 53-bit integer into [0, 1).
const DOUBLE_UNIT: f64 = 1.0 / 9_007_199_254_740_992.0;

// =============================================================================
// RNG
// =============================================================================

/// Pooled random number source backed by a chaotic keystream.
///
/// Not a cryptographic RNG: the keystream passes basic uniformity tests
/// and nothing more.
#[derive(Debug)]
pub struct VortexRng {
    map: MapKind,
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
    pool: Vec<u8>,
    cursor: usize,
}

impl VortexRng {
    /// Construct from operating-system entropy, with the default map and
    /// pool size.
    ///
    /// # Panics
    /// Panics if the operating-system entropy source fails; use
    /// [`SeedableRng::try_from_os_rng`] to handle that case.
    #[must_use]
    pub fn new() -> Self {
        Self::from_os_rng()
    }

    /// Reproducible construction from an explicit key and IV.
    ///
    /// Keys must be at least 32 bytes (longer keys are truncated). IVs are
    /// taken up to 16 bytes and zero-padded; the first eight bytes act as
    /// the refill counter.
    ///
    /// # Errors
    /// `InvalidKey` if the key is shorter than 32 bytes.
    pub fn from_key_iv(map: MapKind, key: &[u8], iv: &[u8]) -> Result<Self, VortexError> {
        Self::with_pool_size(map, key, iv, POOL_SIZE)
    }

    /// Reproducible construction with an explicit pool size.
    ///
    /// The size is rounded up to a multiple of 8 so whole words never
    /// straddle a refill.
    ///
    /// # Errors
    /// `InvalidKey` if the key is shorter than 32 bytes;
    /// `InvalidArgument` if `pool_size` is zero.
    pub fn with_pool_size(
        map: MapKind,
        key: &[u8],
        iv: &[u8],
        pool_size: usize,
    ) -> Result<Self, VortexError> {
        if key.len() < KEY_LEN {
            return Err(VortexError::InvalidKey { len: key.len() });
        }
        if pool_size == 0 {
            return Err(VortexError::InvalidArgument);
        }
        let mut k = [0u8; KEY_LEN];
        k.copy_from_slice(&key[..KEY_LEN]);
        let mut base = [0u8; IV_LEN];
        let n = iv.len().min(IV_LEN);
        base[..n].copy_from_slice(&iv[..n]);

        let mut rng = Self {
            map,
            key: k,
            iv: base,
            pool: vec![0; pool_size.div_ceil(8) * 8],
            cursor: 0,
        };
        // First pool straight from the initial IV; refills increment.
        cipher::run(rng.map, &mut rng.pool, &rng.key, &rng.iv, Tier::detect());
        Ok(rng)
    }

    /// Advance the IV counter and regenerate the pool.
    fn refill(&mut self) {
        let mut ctr_bytes = [0u8; 8];
        ctr_bytes.copy_from_slice(&self.iv[..8]);
        let ctr = u64::from_le_bytes(ctr_bytes).wrapping_add(1);
        self.iv[..8].copy_from_slice(&ctr.to_le_bytes());
        self.pool.fill(0);
        cipher::run(self.map, &mut self.pool, &self.key, &self.iv, Tier::detect());
        self.cursor = 0;
    }

    /// Next uniform u32.
    pub fn next_u32(&mut self) -> u32 {
        if self.cursor + 4 > self.pool.len() {
            self.refill();
        }
        let mut b = [0u8; 4];
        b.copy_from_slice(&self.pool[self.cursor..self.cursor + 4]);
        self.cursor += 4;
        u32::from_le_bytes(b)
    }

    /// Next uniform u64.
    pub fn next_u64(&mut self) -> u64 {
        if self.cursor + 8 > self.pool.len() {
            self.refill();
        }
        let mut b = [0u8; 8];
        b.copy_from_slice(&self.pool[self.cursor..self.cursor + 8]);
        self.cursor += 8;
        u64::from_le_bytes(b)
    }

    /// Next double in [0, 1) with 53-bit precision.
    #[allow(clippy::cast_precision_loss)]
    pub fn next_double(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64) * DOUBLE_UNIT
    }

    /// Uniform integer in the inclusive range [lo, hi] by simple modulo
    /// reduction. Callers needing unbiased sampling must layer rejection
    /// on top.
    ///
    /// # Errors
    /// `InvalidRange` if `hi < lo`.
    pub fn next_in_range(&mut self, lo: u64, hi: u64) -> Result<u64, VortexError> {
        if hi < lo {
            return Err(VortexError::InvalidRange { lo, hi });
        }
        let span = hi.wrapping_sub(lo).wrapping_add(1);
        if span == 0 {
            // Full u64 domain.
            return Ok(self.next_u64());
        }
        Ok(lo + self.next_u64() % span)
    }

    /// Fill `buf` with keystream bytes, refilling the pool as needed.
    pub fn fill(&mut self, buf: &mut [u8]) {
        let mut cur = 0;
        while cur < buf.len() {
            if self.cursor == self.pool.len() {
                self.refill();
            }
            let n = (buf.len() - cur).min(self.pool.len() - self.cursor);
            buf[cur..cur + n].copy_from_slice(&self.pool[self.cursor..self.cursor + n]);
            self.cursor += n;
            cur += n;
        }
    }
}

impl Default for VortexRng {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// RAND-CORE INTEGRATION
// =============================================================================

impl RngCore for VortexRng {
    fn next_u32(&mut self) -> u32 {
        Self::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        Self::next_u64(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.fill(dst);
    }
}

impl SeedableRng for VortexRng {
    type Seed = [u8; KEY_LEN];

    /// Seed is the 32-byte key; the IV starts at zero and the default map
    /// applies. Use [`VortexRng::from_key_iv`] for full control.
    fn from_seed(seed: Self::Seed) -> Self {
        let mut rng = Self {
            map: MapKind::Tent,
            key: seed,
            iv: [0u8; IV_LEN],
            pool: vec![0; POOL_SIZE],
            cursor: 0,
        };
        cipher::run(rng.map, &mut rng.pool, &rng.key, &rng.iv, Tier::detect());
        rng
    }
}
