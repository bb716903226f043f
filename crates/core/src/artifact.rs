//! Ephemeral artifact lifecycle.
//!
//! The rendered payload lives in the web-served directory for exactly one
//! request/response cycle. `TempArtifact` owns that file: creation writes it,
//! and `Drop` removes it, so every exit path of a dispatch (success, transport
//! failure, parse failure) cleans up. Only a failed initial write leaves
//! nothing behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::Error;

/// An ephemeral payload file inside the web-served directory.
///
/// Owned exclusively by one dispatch for the duration of one call; the file is
/// deleted when the handle is dropped.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// Validate the target directory and write `contents` under a fresh
    /// collision-resistant name `<prefix>-<entropy>.<ext>`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `web_dir` is missing or not
    /// writable, and a file-I/O error when the write itself fails.
    pub fn create(web_dir: &Path, prefix: &str, ext: &str, contents: &str) -> Result<Self, Error> {
        if !web_dir.is_dir() {
            return Err(Error::WebDirMissing(web_dir.to_path_buf()));
        }
        let meta = fs::metadata(web_dir)
            .map_err(|e| Error::FileIo { path: web_dir.to_path_buf(), source: e })?;
        if meta.permissions().readonly() {
            return Err(Error::WebDirNotWritable(web_dir.to_path_buf()));
        }

        let path = web_dir.join(format!("{}-{}.{}", prefix, unique_token(), ext));
        fs::write(&path, contents).map_err(|e| Error::FileIo { path: path.clone(), source: e })?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote payload artifact");

        Ok(Self { path })
    }

    /// Full path of the artifact on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component, the part joined onto the host URL.
    pub fn basename(&self) -> &str {
        // The name is always generated from valid UTF-8 components.
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed payload artifact"),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove payload artifact");
            }
        }
    }
}

/// Collision-resistant name token: hex SHA-256 over a nanosecond timestamp,
/// a random word, and process/host identity. Not cryptographic, just
/// high-entropy enough that concurrent dispatches never share a file.
fn unique_token() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let noise: u64 = rand::thread_rng().r#gen();

    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(noise.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(std::env::consts::OS.as_bytes());
    hasher.update(std::env::consts::ARCH.as_bytes());
    hex::encode(hasher.finalize())
}
