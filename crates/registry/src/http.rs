//! Registries served over HTTP(S)

use reqwest::blocking::Client;
use serde_json::Value as JsonValue;

use crate::{Error, FetchError, RegistryClient, Result};

/// Blocking HTTP transport
///
/// No timeout or retry policy is layered on top of the transport defaults;
/// a failed request surfaces immediately.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with a hookshelf user agent
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hookshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport {
                url: String::new(),
                source: e,
            })?;
        Ok(Self { client })
    }

    fn get(&self, url: &str, hint: bool) -> Result<String> {
        tracing::debug!(url, "GET");

        let response = self.client.get(url).send().map_err(|e| Error::Transport {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = FetchError::new(status.as_u16(), url);
            return Err(if hint { err.with_hint() } else { err }.into());
        }

        response.text().map_err(|e| Error::Transport {
            url: url.to_string(),
            source: e,
        })
    }
}

impl RegistryClient for HttpClient {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_json(&self, url: &str) -> Result<JsonValue> {
        let body = self.get(url, true)?;
        serde_json::from_str(&body).map_err(|e| Error::InvalidJson {
            url: url.to_string(),
            source: e,
        })
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        self.get(url, false)
    }
}

/// Whether a registry location should be fetched over HTTP
pub fn is_http_location(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
