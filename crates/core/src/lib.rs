//! Core types and shared functionality for opflush.
//!
//! This crate provides:
//! - Request/result types for the clear protocol
//! - Unified error type
//! - Layered configuration
//! - Payload template rendering
//! - Ephemeral artifact lifecycle

pub mod artifact;
pub mod config;
pub mod error;
pub mod model;
pub mod script;

pub use artifact::TempArtifact;
pub use config::{DispatchConfig, TransportMode, TransportOptions};
pub use error::Error;
pub use model::{ClearRequest, ClearResult};
