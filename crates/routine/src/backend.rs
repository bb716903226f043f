//! Backend strategies, one per accelerator extension.
//!
//! Each backend wraps one extension's clear primitive behind a capability
//! probe. Category clearing walks an ordered list and takes the first backend
//! that is both available and reports a successful clear; a backend whose
//! clear returns false falls through to the next one.

use crate::runtime::{AcceleratorRuntime, ApcSegment, XcacheKind};

/// One accelerator extension capable of clearing a cache.
pub trait CacheBackend {
    /// Human-readable name used in the status line.
    fn label(&self) -> &'static str;

    /// Capability probe: is the extension present in the hosting runtime?
    fn is_available(&self) -> bool;

    /// Invoke the extension's clear primitive. A false return is a soft
    /// failure; the next backend in priority order gets a chance.
    fn clear(&self) -> bool;
}

struct Wincache<'a> {
    rt: &'a dyn AcceleratorRuntime,
}

impl CacheBackend for Wincache<'_> {
    fn label(&self) -> &'static str {
        "Wincache User Cache"
    }

    fn is_available(&self) -> bool {
        self.rt.has_wincache()
    }

    fn clear(&self) -> bool {
        self.rt.wincache_ucache_clear()
    }
}

struct Apcu<'a> {
    rt: &'a dyn AcceleratorRuntime,
}

impl CacheBackend for Apcu<'_> {
    fn label(&self) -> &'static str {
        "APCu User Cache"
    }

    fn is_available(&self) -> bool {
        self.rt.has_apcu()
    }

    fn clear(&self) -> bool {
        self.rt.apcu_clear_cache()
    }
}

/// How a legacy APC clear is scoped.
enum ApcMode {
    /// Dual-mode install: legacy APC alongside OPcache. Only available when
    /// both are detectable, and clears without a scope argument. Kept ahead
    /// of the plain user-segment clear to match the historical ordering.
    DualInstall,
    /// Clear scoped to the user segment.
    UserSegment,
    /// Clear scoped to the opcode segment.
    OpcodeSegment,
}

struct ApcLegacy<'a> {
    rt: &'a dyn AcceleratorRuntime,
    mode: ApcMode,
}

impl CacheBackend for ApcLegacy<'_> {
    fn label(&self) -> &'static str {
        match self.mode {
            ApcMode::DualInstall | ApcMode::UserSegment => "APC User Cache",
            ApcMode::OpcodeSegment => "APC Opcode Cache",
        }
    }

    fn is_available(&self) -> bool {
        match self.mode {
            ApcMode::DualInstall => self.rt.has_apc() && self.rt.has_opcache(),
            ApcMode::UserSegment | ApcMode::OpcodeSegment => self.rt.has_apc(),
        }
    }

    fn clear(&self) -> bool {
        let segment = match self.mode {
            ApcMode::DualInstall => None,
            ApcMode::UserSegment => Some(ApcSegment::User),
            ApcMode::OpcodeSegment => Some(ApcSegment::Opcode),
        };
        self.rt.apc_clear_cache(segment)
    }
}

struct Opcache<'a> {
    rt: &'a dyn AcceleratorRuntime,
}

impl CacheBackend for Opcache<'_> {
    fn label(&self) -> &'static str {
        "Zend OPcache"
    }

    fn is_available(&self) -> bool {
        self.rt.has_opcache()
    }

    fn clear(&self) -> bool {
        self.rt.opcache_reset()
    }
}

struct Xcache<'a> {
    rt: &'a dyn AcceleratorRuntime,
    kind: XcacheKind,
}

impl CacheBackend for Xcache<'_> {
    fn label(&self) -> &'static str {
        match self.kind {
            XcacheKind::Var => "XCache User Cache",
            XcacheKind::Php => "XCache Opcode Cache",
        }
    }

    fn is_available(&self) -> bool {
        self.rt.has_xcache()
    }

    /// XCache has no single clear primitive: enumerate the slots of this
    /// family and clear each by index. Presence of the extension counts as
    /// success regardless of individual slot results.
    fn clear(&self) -> bool {
        let count = self.rt.xcache_count(self.kind);
        for slot in 0..count {
            self.rt.xcache_clear(self.kind, slot);
        }
        true
    }
}

/// User-cache backends in strict priority order.
pub fn user_backends<'a>(rt: &'a dyn AcceleratorRuntime) -> Vec<Box<dyn CacheBackend + 'a>> {
    vec![
        Box::new(Wincache { rt }),
        Box::new(Apcu { rt }),
        Box::new(ApcLegacy { rt, mode: ApcMode::DualInstall }),
        Box::new(ApcLegacy { rt, mode: ApcMode::UserSegment }),
        Box::new(Xcache { rt, kind: XcacheKind::Var }),
    ]
}

/// Opcode-cache backends in strict priority order.
pub fn opcode_backends<'a>(rt: &'a dyn AcceleratorRuntime) -> Vec<Box<dyn CacheBackend + 'a>> {
    vec![
        Box::new(Opcache { rt }),
        Box::new(ApcLegacy { rt, mode: ApcMode::OpcodeSegment }),
        Box::new(Xcache { rt, kind: XcacheKind::Php }),
    ]
}
