//! Dispatch configuration with layered loading.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (OPFLUSH_*)
//! 2. TOML config file (if OPFLUSH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// How the dispatch service fetches the artifact URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Blocking buffered read with a fixed bounded retry loop.
    #[serde(rename = "fopen")]
    Buffered,

    /// Single attempt with caller-tunable client options.
    Curl,
}

/// Client options honored in curl mode.
///
/// The service always enforces its own overrides on top: the body is
/// returned, no header block is included, and HTTP error statuses fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportOptions {
    /// Overall request timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Connect timeout in milliseconds.
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,

    /// User-Agent string for the fetch.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Proxy URL, if the host is only reachable through one.
    #[serde(default)]
    pub proxy: Option<String>,

    /// Accept invalid TLS certificates (self-signed staging hosts).
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl TransportOptions {
    /// Overall timeout as a Duration for use with reqwest.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Connect timeout as a Duration for use with reqwest.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

/// Immutable configuration of one dispatch service instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Base URL of the web server that serves `web_dir`.
    ///
    /// Set via OPFLUSH_HOST environment variable.
    #[serde(default = "default_host")]
    pub host: String,

    /// Local web-served directory the artifact is written into.
    ///
    /// Set via OPFLUSH_WEB_DIR environment variable.
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,

    /// Payload template with the three substitution points.
    ///
    /// Set via OPFLUSH_SCRIPT_TEMPLATE environment variable.
    #[serde(default = "default_template")]
    pub script_template: String,

    /// Transport mode for the fetch.
    ///
    /// Set via OPFLUSH_TRANSPORT_MODE environment variable ("fopen" or "curl").
    #[serde(default = "default_mode")]
    pub transport_mode: TransportMode,

    /// Client options applied in curl mode.
    #[serde(default)]
    pub transport_options: TransportOptions,

    /// Artifact file name prefix.
    ///
    /// Set via OPFLUSH_ARTIFACT_PREFIX environment variable.
    #[serde(default = "default_artifact_prefix")]
    pub artifact_prefix: String,

    /// Artifact file name extension, without the leading dot.
    ///
    /// Set via OPFLUSH_ARTIFACT_EXT environment variable.
    #[serde(default = "default_artifact_ext")]
    pub artifact_ext: String,
}

fn default_host() -> String {
    "http://localhost".into()
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("./public")
}

fn default_template() -> String {
    "<?php\n%clearer_code%\n// dispatched with user=%user% opcode=%opcode%\n".into()
}

fn default_mode() -> TransportMode {
    TransportMode::Buffered
}

fn default_artifact_prefix() -> String {
    "clear".into()
}

fn default_artifact_ext() -> String {
    "php".into()
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            web_dir: default_web_dir(),
            script_template: default_template(),
            transport_mode: default_mode(),
            transport_options: TransportOptions::default(),
            artifact_prefix: default_artifact_prefix(),
            artifact_ext: default_artifact_ext(),
        }
    }
}

impl DispatchConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `OPFLUSH_`
    /// 2. TOML file from `OPFLUSH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or validation fails
    /// after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("OPFLUSH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("OPFLUSH_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
