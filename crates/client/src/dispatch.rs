//! Dispatch orchestration: render, deploy, fetch, clean up, parse.

use reqwest::Client;
use url::Url;

use opflush_core::{ClearRequest, ClearResult, DispatchConfig, Error, TempArtifact, TransportMode, script};
use opflush_routine::ROUTINE_SOURCE;

use crate::transport;

/// Remote cache clearing service.
///
/// One instance wraps one immutable [`DispatchConfig`]; each
/// [`clear_cache`](CacheClearer::clear_cache) call owns exactly one ephemeral
/// artifact for the duration of one request/response cycle.
#[derive(Debug)]
pub struct CacheClearer {
    config: DispatchConfig,
    http: Client,
}

impl CacheClearer {
    /// Build a service from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the config fails validation (bad
    /// host URL, template missing a substitution point).
    pub fn new(config: DispatchConfig) -> Result<Self, Error> {
        config.validate().map_err(|e| Error::Config(e.to_string()))?;

        let http = Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// The configuration this service was built from.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run one clear cycle: write the payload script into the web dir, fetch
    /// its URL so the host process executes it, and return the parsed result.
    ///
    /// The artifact is deleted on every exit path after a successful write;
    /// errors propagate unchanged after cleanup.
    ///
    /// # Errors
    ///
    /// Configuration errors (empty request, missing/unwritable web dir) and
    /// file-I/O errors surface before dispatch; transport and parse errors
    /// after.
    pub async fn clear_cache(&self, request: &ClearRequest) -> Result<ClearResult, Error> {
        request.validate()?;

        let contents = script::render(
            &self.config.script_template,
            ROUTINE_SOURCE,
            request.clear_user,
            request.clear_opcode,
        );
        let artifact = TempArtifact::create(
            &self.config.web_dir,
            &self.config.artifact_prefix,
            &self.config.artifact_ext,
            &contents,
        )?;
        let url = self.artifact_url(artifact.basename())?;

        tracing::debug!(%url, mode = ?self.config.transport_mode, "dispatching clear request");

        let authentication = request.authentication.as_deref();
        let body = match self.config.transport_mode {
            TransportMode::Buffered => {
                transport::fetch_buffered(&self.http, &url, authentication).await?
            }
            TransportMode::Curl => {
                let client = transport::build_curl_client(&self.config.transport_options)?;
                transport::fetch_curl(&client, &url, authentication).await?
            }
        };

        // Response received, the script has run; remove it before parsing so
        // a malformed body can't leak the artifact.
        drop(artifact);

        serde_json::from_str(&body).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Public URL of the artifact: host joined with the basename.
    fn artifact_url(&self, basename: &str) -> Result<Url, Error> {
        let joined = format!("{}/{}", self.config.host.trim_end_matches('/'), basename);
        Url::parse(&joined).map_err(|e| Error::Config(format!("invalid artifact URL \"{joined}\": {e}")))
    }
}
