//! SHA-256 checksums of backed-up files
//!
//! Backups are recorded in the run manifest as `sha256:<hex>` so a manual
//! restore can verify it is putting back exactly what was saved.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Checksum of in-memory bytes.
pub fn bytes_checksum(content: &[u8]) -> String {
    format!("{}{:x}", PREFIX, Sha256::digest(content))
}

/// Checksum of a file's contents, streamed in fixed-size chunks.
pub fn file_checksum(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let read = reader.read(&mut buf).map_err(|e| Error::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}
