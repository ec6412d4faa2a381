//! Encrypt/decrypt and raw keystream commands.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use vortex::VortexStream;

use super::Map;

/// Key must decode to at least 32 bytes.
fn parse_key(hex_key: &str) -> Result<Vec<u8>> {
    let key = hex::decode(hex_key).context("key is not valid hex")?;
    if key.len() < 32 {
        bail!(
            "key must be at least 32 bytes (64 hex chars), got {}",
            key.len()
        );
    }
    Ok(key)
}

fn parse_iv(hex_iv: &str) -> Result<Vec<u8>> {
    if hex_iv.is_empty() {
        return Ok(Vec::new());
    }
    hex::decode(hex_iv).context("iv is not valid hex")
}

/// Stream `input` through the cipher into `output`. Running the same
/// command on the result restores the original file.
pub fn crypt(input: &Path, output: &Path, hex_key: &str, hex_iv: &str, map: Map) -> Result<()> {
    let key = parse_key(hex_key)?;
    let iv = parse_iv(hex_iv)?;

    let mut src =
        File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let dst =
        File::create(output).with_context(|| format!("cannot create {}", output.display()))?;

    let mut stream = VortexStream::new(dst, map.into(), &key, &iv)?;
    let bytes = io::copy(&mut src, &mut stream)?;
    stream.flush()?;

    eprintln!("{bytes} bytes processed ({})", vortex::active_backend());
    Ok(())
}

/// Emit `length` raw keystream bytes for (key, iv, map) to `output`.
pub fn keystream(output: &Path, hex_key: &str, hex_iv: &str, map: Map, length: u64) -> Result<()> {
    let key = parse_key(hex_key)?;
    let iv = parse_iv(hex_iv)?;

    let dst =
        File::create(output).with_context(|| format!("cannot create {}", output.display()))?;
    let mut stream = VortexStream::new(dst, map.into(), &key, &iv)?;

    // Keystream is the encryption of zeros.
    let zeros = [0u8; 4096];
    let mut left = length;
    while left > 0 {
        let n = left.min(zeros.len() as u64) as usize;
        stream.write_all(&zeros[..n])?;
        left -= n as u64;
    }
    stream.flush()?;
    Ok(())
}
