//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! [`Hasher`] reads a file in fixed-size blocks and feeds them to BLAKE3.
//! The block size only affects I/O granularity: the digest of a file is the
//! same for every block size, so runs stay reproducible when it is tuned.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::HashError;

/// 32-byte BLAKE3 content digest.
pub type Hash = [u8; 32];

/// Default read block size (64 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Block size used by `--legacy-block-size` (1 KiB reads).
pub const LEGACY_BLOCK_SIZE: usize = 1024;

/// Streaming content hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    block_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with [`DEFAULT_BLOCK_SIZE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Create a hasher reading `block_size` bytes at a time (minimum 1).
    #[must_use]
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    /// Configured read block size.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Hash the full contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails
    /// part-way through.
    pub fn hash_file(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| map_io_error(path, e))?;
        let hash = self
            .hash_reader(file)
            .map_err(|e| map_io_error(path, e))?;
        log::trace!("Hashed {}: {}", path.display(), hash_to_hex(&hash));
        Ok(hash)
    }

    /// Hash everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates the first read error other than `Interrupted`.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<Hash> {
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.block_size];
        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..read]);
        }
        Ok(*hasher.finalize().as_bytes())
    }
}

fn map_io_error(path: &Path, error: io::Error) -> HashError {
    match error.kind() {
        io::ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// Render a digest as lower-case hex (64 characters).
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a 64-character hex string back into a digest.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Hash> {
    if hex.len() != 64 || !hex.is_ascii() {
        return None;
    }
    let mut hash = [0u8; 32];
    for (i, byte) in hash.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(hash)
}
