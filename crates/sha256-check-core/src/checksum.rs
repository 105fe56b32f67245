//! Streaming SHA-256 over a file on disk.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of the file at `path` and return the digest as lowercase hex.
///
/// The file is read in fixed-size chunks so memory use does not grow with the
/// file. The handle is closed when this returns, on success or error.
pub fn sha256_path(path: &Path) -> io::Result<String> {
    let f = File::open(path)?;
    sha256_reader(f)
}

/// Same as [`sha256_path`] for anything readable.
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
