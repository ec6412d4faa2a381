//! Counter-Mode Seekable Stream
//!
//! Wraps any byte stream and XORs a block-derived keystream over
//! everything read or written. The underlying stream is partitioned into
//! fixed 4096-byte blocks; block b's keystream is the cipher run over a
//! zero block with the base IV's first eight bytes XORed with the
//! little-endian block index. Any byte at absolute position p therefore
//! depends only on (key, base IV, p), never on stream history, which is
//! what makes arbitrary seeking sound.
//!
//! Exactly one 4096-byte block buffer is allocated per instance; the
//! currently held block is reused across calls and survives seeks.

// Position arithmetic truncates u64 offsets into the 4096-byte block, so
// the casts are always in range.
#![allow(clippy::cast_possible_truncation)]

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::cipher;
use crate::engine::Tier;
use crate::kernels::constants::{BLOCK_SIZE, IV_LEN, KEY_LEN};
use crate::types::{MapKind, VortexError};

// =============================================================================
// STREAM WRAPPER
// =============================================================================

/// Seekable XOR stream over an inner reader/writer.
///
/// Reading decrypts, writing encrypts; because the transform is an XOR
/// involution the two are the same operation. The wrapper assumes the
/// inner stream starts at position 0; use [`VortexStream::set_position`]
/// when wrapping a stream that does not.
#[derive(Debug)]
pub struct VortexStream<S> {
    inner: S,
    map: MapKind,
    key: [u8; KEY_LEN],
    base_iv: [u8; IV_LEN],
    /// Absolute byte position, advanced by every read/write/seek.
    pos: u64,
    /// Keystream for the held block.
    block: Box<[u8; BLOCK_SIZE]>,
    /// Index of the held block, if any.
    block_idx: Option<u64>,
}

impl<S> VortexStream<S> {
    /// Wrap `inner`, deriving keystream blocks from `(key, iv)` with the
    /// given map.
    ///
    /// Keys must be at least 32 bytes (longer keys are truncated). IVs are
    /// taken up to 16 bytes and zero-padded; the first eight bytes double
    /// as the block counter overlay.
    ///
    /// # Errors
    /// `InvalidKey` if the key is shorter than 32 bytes.
    pub fn new(inner: S, map: MapKind, key: &[u8], iv: &[u8]) -> Result<Self, VortexError> {
        if key.len() < KEY_LEN {
            return Err(VortexError::InvalidKey { len: key.len() });
        }
        let mut k = [0u8; KEY_LEN];
        k.copy_from_slice(&key[..KEY_LEN]);
        let mut base = [0u8; IV_LEN];
        let n = iv.len().min(IV_LEN);
        base[..n].copy_from_slice(&iv[..n]);
        Ok(Self {
            inner,
            map,
            key: k,
            base_iv: base,
            pos: 0,
            block: Box::new([0u8; BLOCK_SIZE]),
            block_idx: None,
        })
    }

    /// Current absolute byte position.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.pos
    }

    /// Set the absolute byte position without touching the inner stream.
    ///
    /// For inner streams that implement [`Seek`], prefer seeking through
    /// the wrapper so both positions move together.
    pub fn set_position(&mut self, pos: u64) {
        self.pos = pos;
    }

    /// Shared reference to the inner stream.
    pub const fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutable reference to the inner stream. Reading or writing through
    /// it desynchronizes the wrapper's position.
    pub const fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap, returning the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// XOR the keystream for absolute position `stream_pos` over
    /// `payload`, crossing block boundaries as needed.
    fn apply(&mut self, payload: &mut [u8], stream_pos: u64) {
        let block_len = BLOCK_SIZE as u64;
        let mut pos = stream_pos;
        let mut cur = 0;
        while cur < payload.len() {
            let b = pos / block_len;
            let inb = (pos % block_len) as usize;
            if self.block_idx != Some(b) {
                self.regenerate_block(b);
            }
            let n = (payload.len() - cur).min(BLOCK_SIZE - inb);
            for (dst, src) in payload[cur..cur + n].iter_mut().zip(&self.block[inb..inb + n]) {
                *dst ^= src;
            }
            cur += n;
            pos += n as u64;
        }
    }

    /// Regenerate the held block: derived IV, zeroed buffer, one cipher
    /// run.
    fn regenerate_block(&mut self, b: u64) {
        let mut iv = self.base_iv;
        for (dst, src) in iv[..8].iter_mut().zip(b.to_le_bytes()) {
            *dst ^= src;
        }
        self.block.fill(0);
        cipher::run(self.map, self.block.as_mut_slice(), &self.key, &iv, Tier::detect());
        self.block_idx = Some(b);
    }
}

// =============================================================================
// I/O TRAITS
// =============================================================================

impl<S: Read> Read for VortexStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        let pos = self.pos;
        self.apply(&mut buf[..n], pos);
        self.pos += n as u64;
        Ok(n)
    }
}

impl<S: Write> Write for VortexStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        for chunk in buf.chunks(BLOCK_SIZE) {
            // Stack scratch: user bytes are never mutated in place.
            let mut scratch = [0u8; BLOCK_SIZE];
            let staged = &mut scratch[..chunk.len()];
            staged.copy_from_slice(chunk);
            let pos = self.pos;
            self.apply(staged, pos);
            match self.inner.write(staged) {
                Ok(n) => {
                    self.pos += n as u64;
                    written += n;
                    if n < chunk.len() {
                        return Ok(written);
                    }
                }
                Err(e) if written == 0 => return Err(e),
                Err(_) => return Ok(written),
            }
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<S: Seek> Seek for VortexStream<S> {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        // The held block stays valid: keystream depends only on position.
        let pos = self.inner.seek(from)?;
        self.pos = pos;
        Ok(pos)
    }
}
