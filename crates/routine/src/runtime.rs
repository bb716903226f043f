//! Accelerator runtime surface.
//!
//! The hosting process exposes its cache-management primitives through this
//! trait; backends only ever touch the runtime through it. Every method
//! defaults to "not present" / "did nothing", so an implementation overrides
//! exactly the extensions its process actually loads.

/// Legacy APC clear scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApcSegment {
    User,
    Opcode,
}

impl ApcSegment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApcSegment::User => "user",
            ApcSegment::Opcode => "opcode",
        }
    }
}

/// XCache slot family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XcacheKind {
    /// Variable (user data) cache slots.
    Var,
    /// Compiled PHP (opcode) cache slots.
    Php,
}

/// Cache-management primitives of the hosting runtime.
pub trait AcceleratorRuntime {
    fn has_wincache(&self) -> bool {
        false
    }

    fn wincache_ucache_clear(&self) -> bool {
        false
    }

    fn has_apcu(&self) -> bool {
        false
    }

    fn apcu_clear_cache(&self) -> bool {
        false
    }

    fn has_apc(&self) -> bool {
        false
    }

    /// Legacy APC clear. `None` clears without a scope argument; dual-mode
    /// installs accept that form only.
    fn apc_clear_cache(&self, _segment: Option<ApcSegment>) -> bool {
        false
    }

    fn has_opcache(&self) -> bool {
        false
    }

    fn opcache_reset(&self) -> bool {
        false
    }

    fn has_xcache(&self) -> bool {
        false
    }

    /// Number of cache slots of the given family.
    fn xcache_count(&self, _kind: XcacheKind) -> usize {
        0
    }

    /// Clear one slot by index.
    fn xcache_clear(&self, _kind: XcacheKind, _slot: usize) -> bool {
        false
    }
}

/// Runtime with no accelerator extensions loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAccelerators;

impl AcceleratorRuntime for NoAccelerators {}
