//! Unified error type for opflush.
//!
//! Two tiers apply throughout: the variants here abort a `clear_cache` call;
//! per-backend clearing failures inside the routine never surface as errors,
//! only as status lines in the result message.

use std::path::PathBuf;

/// Unified error type for the opflush crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration value (mode, host, template).
    #[error("CONFIG_ERROR: {0}")]
    Config(String),

    /// Request selected no cache category at all.
    #[error("CONFIG_ERROR: no caches selected, enable user and/or opcode clearing")]
    NoCachesSelected,

    /// Target web directory does not exist.
    #[error("CONFIG_ERROR: web dir does not exist \"{0}\"")]
    WebDirMissing(PathBuf),

    /// Target web directory is not writable.
    #[error("CONFIG_ERROR: web dir is not writable \"{0}\"")]
    WebDirNotWritable(PathBuf),

    /// Artifact could not be created or written.
    #[error("FILE_IO_ERROR: can't write \"{path}\": {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// All buffered fetch attempts against the artifact URL failed.
    #[error("TRANSPORT_ERROR: unable to read \"{url}\", does the host locally resolve?")]
    RetriesExhausted { url: String },

    /// Single-attempt fetch failed at the transport or HTTP-status level.
    #[error("TRANSPORT_ERROR: error reading \"{url}\": {reason}")]
    Transport { url: String, reason: String },

    /// Response body was not a well-formed clear result.
    #[error("PARSE_ERROR: invalid clear result: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoCachesSelected;
        assert!(err.to_string().starts_with("CONFIG_ERROR"));

        let err = Error::RetriesExhausted { url: "http://host/x.php".into() };
        assert!(err.to_string().contains("http://host/x.php"));
        assert!(err.to_string().contains("locally resolve"));
    }

    #[test]
    fn test_file_io_error_keeps_path() {
        let err = Error::FileIo {
            path: PathBuf::from("/srv/web/clear-abc.php"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("clear-abc.php"));
    }
}
