//! Blocking HTTP access to source hosts.
//!
//! Wraps a `reqwest` blocking client and turns non-success responses into
//! [`CampfireError::HostError`] carrying the status, app, and URL.

use crate::error::{CampfireError, Result};
use anyhow::anyhow;
use reqwest::blocking::{Client, ClientBuilder, Response};
use reqwest::Certificate;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("campfire/", env!("CARGO_PKG_VERSION"));

/// Fetches JSON documents and raw files over HTTP/HTTPS.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with an optional request timeout.
    ///
    /// `None` waits indefinitely for responses.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let client = build_client(Client::builder().user_agent(USER_AGENT).timeout(timeout))?;
        Ok(Self { client })
    }

    /// Create a fetcher that additionally trusts `root` for TLS.
    pub fn with_root_certificate(timeout: Option<Duration>, root: Certificate) -> Result<Self> {
        let client = build_client(
            Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .add_root_certificate(root),
        )?;

        Ok(Self { client })
    }

    /// GET `url` and decode the JSON body.
    ///
    /// `target` and `app` only feed the error message.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, target: &str, app: &str) -> Result<T> {
        let response = self.get(url, target, app)?;
        response.json().map_err(|source| CampfireError::Transport {
            url: url.to_string(),
            source,
        })
    }

    /// GET `url` and return the raw body.
    pub fn get_bytes(&self, url: &str, target: &str, app: &str) -> Result<Vec<u8>> {
        let response = self.get(url, target, app)?;
        let body = response.bytes().map_err(|source| CampfireError::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }

    fn get(&self, url: &str, target: &str, app: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| CampfireError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(CampfireError::HostError {
                status: response.status().as_u16(),
                target: target.to_string(),
                app: app.to_string(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

fn build_client(builder: ClientBuilder) -> Result<Client> {
    builder
        .build()
        .map_err(|e| CampfireError::Other(anyhow!("Failed to build HTTP client: {}", e)))
}
