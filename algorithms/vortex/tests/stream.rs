//! Counter-Mode Stream Tests
//!
//! Verifies the seekable wrapper's defining properties:
//! - Random access: any byte decrypts from (key, base IV, position) alone
//! - Write-split additivity: one write equals any split of it
//! - Block-boundary crossings are seamless
//! - The wire format matches its block-derivation definition

#![allow(missing_docs)]
#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use vortex::{process, MapKind, VortexError, VortexStream};

const BLOCK: usize = 4096;

fn encrypt_all(map: MapKind, key: &[u8], iv: &[u8], data: &[u8]) -> Vec<u8> {
    let mut stream = VortexStream::new(Cursor::new(Vec::new()), map, key, iv).unwrap();
    stream.write_all(data).unwrap();
    stream.into_inner().into_inner()
}

// =============================================================================
// RANDOM ACCESS
// =============================================================================

#[test]
fn test_seek_then_read_matches_linear_output() {
    // Literal scenario: Lorenz map, key 0x11.., iv 0x22... Stream A writes
    // 10000 zero bytes; stream B over a zero payload seeks to 5000 and
    // reads 1000. Reading XORs the keystream over zeros, so the bytes
    // must equal A's output at [5000..6000).
    let key = [0x11u8; 32];
    let iv = [0x22u8; 16];

    let out_a = encrypt_all(MapKind::Lorenz, &key, &iv, &[0u8; 10_000]);
    assert_eq!(out_a.len(), 10_000);

    let mut b =
        VortexStream::new(Cursor::new(vec![0u8; 10_000]), MapKind::Lorenz, &key, &iv).unwrap();
    b.seek(SeekFrom::Start(5000)).unwrap();
    let mut got = vec![0u8; 1000];
    b.read_exact(&mut got).unwrap();

    assert_eq!(got, out_a[5000..6000], "random access diverged from linear");
}

#[test]
fn test_position_independence() {
    let key = [0x44u8; 32];
    let iv = [0x55u8; 16];
    let plain: Vec<u8> = (0..12_000).map(|i| (i % 251) as u8).collect();
    let cipher_bytes = encrypt_all(MapKind::Tent, &key, &iv, &plain);

    // Decrypt single bytes at scattered positions, each through a fresh
    // stream: no history, only (key, iv, position).
    for &p in &[0usize, 1, 31, 32, 4095, 4096, 4097, 8191, 9000, 11_999] {
        let mut s =
            VortexStream::new(Cursor::new(cipher_bytes.clone()), MapKind::Tent, &key, &iv)
                .unwrap();
        s.seek(SeekFrom::Start(p as u64)).unwrap();
        let mut one = [0u8; 1];
        s.read_exact(&mut one).unwrap();
        assert_eq!(one[0], plain[p], "byte {p} depended on stream history");
    }
}

#[test]
fn test_write_read_roundtrip() {
    let key = [0x66u8; 32];
    let iv = [0x77u8; 16];
    let plain: Vec<u8> = (0..9_001).map(|i| (i * 7 % 256) as u8).collect();

    let cipher_bytes = encrypt_all(MapKind::Chen, &key, &iv, &plain);
    assert_ne!(cipher_bytes, plain);

    let mut s =
        VortexStream::new(Cursor::new(cipher_bytes), MapKind::Chen, &key, &iv).unwrap();
    let mut back = Vec::new();
    s.read_to_end(&mut back).unwrap();
    assert_eq!(back, plain);
}

// =============================================================================
// ADDITIVITY & BLOCK BOUNDARIES
// =============================================================================

#[test]
fn test_write_split_additivity() {
    let key = [0x88u8; 32];
    let iv = [0x99u8; 16];
    let data: Vec<u8> = (0..6_000).map(|i| (i % 256) as u8).collect();

    let whole = encrypt_all(MapKind::Henon, &key, &iv, &data);

    for split in [1usize, 100, 2048, 4095, 4096, 4097, 5999] {
        let mut stream =
            VortexStream::new(Cursor::new(Vec::new()), MapKind::Henon, &key, &iv).unwrap();
        stream.write_all(&data[..split]).unwrap();
        stream.write_all(&data[split..]).unwrap();
        let parts = stream.into_inner().into_inner();
        assert_eq!(whole, parts, "split at {split} changed the ciphertext");
    }
}

#[test]
fn test_block_boundary_crossing() {
    // A read spanning blocks b and b+1 must match two reads split at the
    // boundary.
    let key = [0xAAu8; 32];
    let iv = [0xBBu8; 16];
    let cipher_bytes = encrypt_all(MapKind::Sine, &key, &iv, &[0u8; 2 * BLOCK]);

    let mut spanning =
        VortexStream::new(Cursor::new(cipher_bytes.clone()), MapKind::Sine, &key, &iv).unwrap();
    spanning.seek(SeekFrom::Start(4000)).unwrap();
    let mut a = vec![0u8; 200];
    spanning.read_exact(&mut a).unwrap();

    let mut split =
        VortexStream::new(Cursor::new(cipher_bytes), MapKind::Sine, &key, &iv).unwrap();
    split.seek(SeekFrom::Start(4000)).unwrap();
    let mut b = vec![0u8; 200];
    split.read_exact(&mut b[..96]).unwrap();
    split.read_exact(&mut b[96..]).unwrap();

    assert_eq!(a, b, "block crossing must be seamless");
}

#[test]
fn test_seek_keeps_held_block() {
    // Seeking backwards inside the held block must not regenerate or
    // corrupt anything.
    let key = [0xCCu8; 32];
    let iv = [0xDDu8; 16];
    let plain: Vec<u8> = (0..512).map(|i| (i % 256) as u8).collect();
    let cipher_bytes = encrypt_all(MapKind::Logistic, &key, &iv, &plain);

    let mut s =
        VortexStream::new(Cursor::new(cipher_bytes), MapKind::Logistic, &key, &iv).unwrap();
    let mut first = vec![0u8; 256];
    s.read_exact(&mut first).unwrap();
    s.seek(SeekFrom::Start(0)).unwrap();
    let mut again = vec![0u8; 256];
    s.read_exact(&mut again).unwrap();
    assert_eq!(first, again);
    assert_eq!(first, plain[..256]);
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

#[test]
fn test_wire_format_matches_block_derivation() {
    // Ciphertext byte p must equal plaintext ^ B_{p/4096}[p % 4096] where
    // B_b is one cipher run over a zero block with u64_le(b) XORed into
    // the first eight IV bytes.
    let key = [0x31u8; 32];
    let iv = [0x41u8; 16];
    let plain: Vec<u8> = (0..3 * BLOCK).map(|i| (i * 13 % 256) as u8).collect();
    let cipher_bytes = encrypt_all(MapKind::Lorenz, &key, &iv, &plain);

    for b in 0u64..3 {
        let mut derived = iv;
        for (dst, src) in derived[..8].iter_mut().zip(b.to_le_bytes()) {
            *dst ^= src;
        }
        let mut block = vec![0u8; BLOCK];
        process(MapKind::Lorenz, &mut block, &key, &derived).unwrap();

        let base = (b as usize) * BLOCK;
        for i in 0..BLOCK {
            assert_eq!(
                cipher_bytes[base + i],
                plain[base + i] ^ block[i],
                "wire format broke at position {}",
                base + i
            );
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_short_key_rejected() {
    let err = VortexStream::new(Cursor::new(Vec::<u8>::new()), MapKind::Tent, &[0u8; 16], &[])
        .unwrap_err();
    assert_eq!(err, VortexError::InvalidKey { len: 16 });
}
