//! Streaming content digests for file comparison

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read granularity for digest computation. Files are hashed block by
/// block, so memory stays bounded regardless of file size.
const BLOCK_SIZE: usize = 64 * 1024;

/// Compute the BLAKE3 digest of a file's content.
pub fn file_digest(path: &Path) -> std::io::Result<blake3::Hash> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    let mut block = vec![0u8; BLOCK_SIZE];

    loop {
        let read = file.read(&mut block)?;
        if read == 0 {
            break;
        }
        hasher.update(&block[..read]);
    }

    Ok(hasher.finalize())
}

/// File size in bytes.
pub fn file_size(path: &Path) -> std::io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}
