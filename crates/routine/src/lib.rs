//! In-process accelerator cache clearing routine.
//!
//! This crate is the piece the web server executes: given the two flags baked
//! in at dispatch time, it probes the hosting runtime for accelerator APIs and
//! invokes the first available backend per category. Per-backend failures are
//! soft and degrade to status lines; the only hard error is selecting no
//! category at all.

pub mod backend;
pub mod clear;
pub mod runtime;

pub use backend::{CacheBackend, opcode_backends, user_backends};
pub use clear::clear;
pub use runtime::{AcceleratorRuntime, ApcSegment, NoAccelerators, XcacheKind};

/// Literal source text of the clearing logic, embedded by the dispatch
/// service as the `%clearer_code%` payload section.
pub const ROUTINE_SOURCE: &str = include_str!("clear.rs");
