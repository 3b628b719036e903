//! MD5 checksum utilities
//!
//! Checksums are lowercase hex MD5 digests. They are used only to verify
//! that a copied file matches its source, never to decide whether a file
//! needs copying.

use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read buffer size used while hashing files.
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the MD5 checksum of a file's contents.
///
/// The file is streamed in fixed-size chunks so memory use stays flat
/// regardless of file size.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
