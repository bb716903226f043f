//! Request and result types for the clear protocol.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One cache-clearing request as seen by the dispatch service.
#[derive(Debug, Clone)]
pub struct ClearRequest {
    /// Clear the accelerator's user (key/value) cache.
    pub clear_user: bool,

    /// Clear the accelerator's opcode cache.
    pub clear_opcode: bool,

    /// Optional `user:pass` credentials for the fetch.
    pub authentication: Option<String>,
}

impl Default for ClearRequest {
    fn default() -> Self {
        Self { clear_user: true, clear_opcode: true, authentication: None }
    }
}

impl ClearRequest {
    /// Validate that at least one cache category is selected.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoCachesSelected` when both flags are false. This is a
    /// configuration error and must be raised before any file I/O happens.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.clear_user && !self.clear_opcode {
            return Err(Error::NoCachesSelected);
        }
        Ok(())
    }
}

/// Structured outcome of a clear run, as returned over the wire.
///
/// `success` is true only when every requested category reported success.
/// `message` is the space-joined sequence of status lines, starting with the
/// `Clear Accelerator Cache...` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResult {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_selects_both() {
        let req = ClearRequest::default();
        assert!(req.clear_user);
        assert!(req.clear_opcode);
        assert!(req.authentication.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_no_caches_selected() {
        let req = ClearRequest { clear_user: false, clear_opcode: false, authentication: None };
        assert!(matches!(req.validate(), Err(Error::NoCachesSelected)));
    }

    #[test]
    fn test_result_wire_shape() {
        let json = r#"{"success":true,"message":"Clear Accelerator Cache... Zend OPcache: success."}"#;
        let result: ClearResult = serde_json::from_str(json).unwrap();
        assert!(result.success);
        assert!(result.message.starts_with("Clear Accelerator Cache..."));

        let back = serde_json::to_string(&result).unwrap();
        assert_eq!(back, json);
    }
}
