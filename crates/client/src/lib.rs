//! Dispatch service for remote accelerator cache clearing.
//!
//! Accelerator caches are process-local, so the only way to clear them from
//! outside is to make the web server execute the clearing routine itself.
//! This crate implements the dispatch side of that protocol: render the
//! routine into a transient script, write it into the web-served directory,
//! fetch it by URL so the host process runs it, parse the JSON result, and
//! always delete the script afterwards.

pub mod dispatch;
pub mod transport;

pub use dispatch::CacheClearer;
