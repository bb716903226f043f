//! Clear execution across cache categories.

use opflush_core::{ClearResult, Error};

use crate::backend::{CacheBackend, opcode_backends, user_backends};
use crate::runtime::AcceleratorRuntime;

/// Leading line of every result message.
pub const HEADER: &str = "Clear Accelerator Cache...";

const USER_FAILURE: &str = "User Cache: failure.";
const OPCODE_FAILURE: &str = "Opcode Cache: failure.";

/// Clear the requested cache categories against the hosting runtime.
///
/// Each requested category contributes exactly one status line, and overall
/// success holds only if every requested category succeeded. A category with
/// no working backend degrades to its failure line instead of erroring.
///
/// # Errors
///
/// Returns `Error::NoCachesSelected` when both flags are false. The dispatch
/// service guarantees at least one flag; independent callers must uphold this
/// themselves.
pub fn clear(runtime: &dyn AcceleratorRuntime, user: bool, opcode: bool) -> Result<ClearResult, Error> {
    if !user && !opcode {
        return Err(Error::NoCachesSelected);
    }

    let mut messages = vec![HEADER.to_string()];
    let mut success = true;

    if user {
        let (ok, line) = clear_category(&user_backends(runtime), USER_FAILURE);
        success &= ok;
        messages.push(line);
    }

    if opcode {
        let (ok, line) = clear_category(&opcode_backends(runtime), OPCODE_FAILURE);
        success &= ok;
        messages.push(line);
    }

    Ok(ClearResult { success, message: messages.join(" ") })
}

/// Walk the backend list in priority order; first available backend whose
/// clear succeeds wins the category.
fn clear_category(backends: &[Box<dyn CacheBackend + '_>], failure_line: &str) -> (bool, String) {
    for backend in backends {
        if backend.is_available() && backend.clear() {
            tracing::debug!(backend = backend.label(), "cache cleared");
            return (true, format!("{}: success.", backend.label()));
        }
    }
    tracing::debug!("no backend cleared the category");
    (false, failure_line.to_string())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::runtime::{ApcSegment, NoAccelerators, XcacheKind};

    /// Scriptable runtime that records which primitives were invoked.
    #[derive(Default)]
    struct FakeRuntime {
        wincache: bool,
        wincache_clear_ok: bool,
        apcu: bool,
        apcu_clear_ok: bool,
        apc: bool,
        opcache: bool,
        opcache_reset_ok: bool,
        xcache: bool,
        xcache_slots: usize,
        apc_calls: RefCell<Vec<Option<ApcSegment>>>,
        xcache_cleared: RefCell<Vec<(XcacheKind, usize)>>,
    }

    impl AcceleratorRuntime for FakeRuntime {
        fn has_wincache(&self) -> bool {
            self.wincache
        }

        fn wincache_ucache_clear(&self) -> bool {
            self.wincache_clear_ok
        }

        fn has_apcu(&self) -> bool {
            self.apcu
        }

        fn apcu_clear_cache(&self) -> bool {
            self.apcu_clear_ok
        }

        fn has_apc(&self) -> bool {
            self.apc
        }

        fn apc_clear_cache(&self, segment: Option<ApcSegment>) -> bool {
            self.apc_calls.borrow_mut().push(segment);
            true
        }

        fn has_opcache(&self) -> bool {
            self.opcache
        }

        fn opcache_reset(&self) -> bool {
            self.opcache_reset_ok
        }

        fn has_xcache(&self) -> bool {
            self.xcache
        }

        fn xcache_count(&self, _kind: XcacheKind) -> usize {
            self.xcache_slots
        }

        fn xcache_clear(&self, kind: XcacheKind, slot: usize) -> bool {
            self.xcache_cleared.borrow_mut().push((kind, slot));
            true
        }
    }

    #[test]
    fn test_no_categories_selected() {
        let result = clear(&NoAccelerators, false, false);
        assert!(matches!(result, Err(Error::NoCachesSelected)));
    }

    #[test]
    fn test_no_capabilities_reports_both_failures() {
        let result = clear(&NoAccelerators, true, true).unwrap();
        assert!(!result.success);
        assert_eq!(
            result.message,
            "Clear Accelerator Cache... User Cache: failure. Opcode Cache: failure."
        );
        assert!(!result.message.contains("success."));
    }

    #[test]
    fn test_one_capability_per_category() {
        let rt = FakeRuntime {
            wincache: true,
            wincache_clear_ok: true,
            opcache: true,
            opcache_reset_ok: true,
            ..Default::default()
        };

        let result = clear(&rt, true, true).unwrap();
        assert!(result.success);

        let lines: Vec<_> = result.message.split(". ").collect();
        // Header plus exactly two status lines, each a success.
        assert!(result.message.starts_with(HEADER));
        assert_eq!(lines.len(), 3);
        assert!(result.message.contains("Wincache User Cache: success."));
        assert!(result.message.contains("Zend OPcache: success."));
    }

    #[test]
    fn test_failed_clear_falls_through_to_next_backend() {
        let rt = FakeRuntime {
            wincache: true,
            wincache_clear_ok: false,
            apcu: true,
            apcu_clear_ok: true,
            ..Default::default()
        };

        let result = clear(&rt, true, false).unwrap();
        assert!(result.success);
        assert!(result.message.contains("APCu User Cache: success."));
        assert!(!result.message.contains("Wincache"));
    }

    #[test]
    fn test_apc_dual_install_clears_unscoped() {
        let rt = FakeRuntime { apc: true, opcache: true, ..Default::default() };

        let result = clear(&rt, true, false).unwrap();
        assert!(result.success);
        assert!(result.message.contains("APC User Cache: success."));
        assert_eq!(*rt.apc_calls.borrow(), vec![None]);
    }

    #[test]
    fn test_apc_without_opcache_clears_user_segment() {
        let rt = FakeRuntime { apc: true, ..Default::default() };

        let result = clear(&rt, true, false).unwrap();
        assert!(result.success);
        assert_eq!(*rt.apc_calls.borrow(), vec![Some(ApcSegment::User)]);
    }

    #[test]
    fn test_apc_opcode_segment() {
        let rt = FakeRuntime { apc: true, ..Default::default() };

        let result = clear(&rt, false, true).unwrap();
        assert!(result.success);
        assert!(result.message.contains("APC Opcode Cache: success."));
        assert_eq!(*rt.apc_calls.borrow(), vec![Some(ApcSegment::Opcode)]);
    }

    #[test]
    fn test_xcache_clears_every_slot_by_index() {
        let rt = FakeRuntime { xcache: true, xcache_slots: 3, ..Default::default() };

        let result = clear(&rt, true, true).unwrap();
        assert!(result.success);
        assert!(result.message.contains("XCache User Cache: success."));
        assert!(result.message.contains("XCache Opcode Cache: success."));
        assert_eq!(
            *rt.xcache_cleared.borrow(),
            vec![
                (XcacheKind::Var, 0),
                (XcacheKind::Var, 1),
                (XcacheKind::Var, 2),
                (XcacheKind::Php, 0),
                (XcacheKind::Php, 1),
                (XcacheKind::Php, 2),
            ]
        );
    }

    #[test]
    fn test_partial_failure_flips_overall_success() {
        // Opcode clears fine, user category has nothing.
        let rt = FakeRuntime { opcache: true, opcache_reset_ok: true, ..Default::default() };

        let result = clear(&rt, true, true).unwrap();
        assert!(!result.success);
        assert!(result.message.contains("User Cache: failure."));
        assert!(result.message.contains("Zend OPcache: success."));
    }

    #[test]
    fn test_user_only_has_single_status_line() {
        let rt = FakeRuntime { apcu: true, apcu_clear_ok: true, ..Default::default() };

        let result = clear(&rt, true, false).unwrap();
        assert_eq!(result.message, "Clear Accelerator Cache... APCu User Cache: success.");
    }
}
