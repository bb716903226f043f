//! HTTP transports for fetching the artifact URL.
//!
//! Two modes mirror the two historical fetch paths:
//!
//! - **buffered**: plain GET with a fixed bounded retry loop, tolerating the
//!   transient DNS/propagation delay of a freshly written file. Credentials
//!   ride in an explicit `Authorization: Basic` header.
//! - **curl**: one attempt with a client built from caller-supplied options,
//!   always failing visibly on HTTP error statuses.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, header};
use url::Url;

use opflush_core::{Error, TransportOptions};

/// Attempt budget of the buffered retry loop.
pub const MAX_ATTEMPTS: u32 = 5;

/// Fixed pause between buffered attempts. Deliberately not exponential.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Fetch `url` with up to [`MAX_ATTEMPTS`] tries, sleeping [`RETRY_DELAY`]
/// between failures. An attempt counts as success only on a 2xx response.
///
/// # Errors
///
/// Returns `Error::RetriesExhausted` naming the URL once the budget is spent.
pub async fn fetch_buffered(
    client: &Client,
    url: &Url,
    authentication: Option<&str>,
) -> Result<String, Error> {
    for attempt in 1..=MAX_ATTEMPTS {
        let mut request = client.get(url.clone());
        if let Some(auth) = authentication {
            request = request
                .header(header::AUTHORIZATION, format!("Basic {}", STANDARD.encode(auth)));
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(attempt, "fetch succeeded");
                return response.text().await.map_err(|e| Error::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
            Ok(response) => {
                tracing::debug!(attempt, status = %response.status(), "fetch attempt failed");
            }
            Err(e) => {
                tracing::debug!(attempt, error = %e, "fetch attempt failed");
            }
        }

        if attempt < MAX_ATTEMPTS {
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }

    Err(Error::RetriesExhausted { url: url.to_string() })
}

/// Build the curl-mode client from caller options, under the service-enforced
/// overrides (body returned, fail on error status — applied at fetch time).
///
/// # Errors
///
/// Returns a configuration error when an option (proxy URL, TLS setup) is
/// unusable.
pub fn build_curl_client(options: &TransportOptions) -> Result<Client, Error> {
    let mut builder = Client::builder().use_rustls_tls();

    if let Some(timeout) = options.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = options.connect_timeout() {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(user_agent) = &options.user_agent {
        builder = builder.user_agent(user_agent);
    }
    if let Some(proxy) = &options.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| Error::Config(format!("invalid proxy \"{proxy}\": {e}")))?;
        builder = builder.proxy(proxy);
    }
    if options.accept_invalid_certs {
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))
}

/// Single-attempt fetch. Credentials attach as a user:password pair; any
/// transport failure or non-success status is an error naming the URL.
pub async fn fetch_curl(
    client: &Client,
    url: &Url,
    authentication: Option<&str>,
) -> Result<String, Error> {
    let mut request = client.get(url.clone());
    if let Some(auth) = authentication {
        let (user, password) = match auth.split_once(':') {
            Some((user, password)) => (user, Some(password)),
            None => (auth, None),
        };
        request = request.basic_auth(user, password);
    }

    let transport_err =
        |e: reqwest::Error| Error::Transport { url: url.to_string(), reason: e.to_string() };

    let response = request.send().await.map_err(transport_err)?;
    let response = response.error_for_status().map_err(transport_err)?;
    response.text().await.map_err(transport_err)
}
