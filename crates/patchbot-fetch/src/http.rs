// crates/patchbot-fetch/src/http.rs
//
// Thin GET wrapper around reqwest.
//
// Every response other than 200 OK, and every transport error (DNS,
// connect, timeout, body read), comes back as `Err(Unavailable)`. Callers
// decide whether that means "fall back" or "absent"; nothing here panics
// or escalates.

use std::time::Duration;

use thiserror::Error;

/// Why a resource could not be fetched.
#[derive(Debug, Error)]
pub enum Unavailable {
    /// Connect/DNS/TLS failure or timeout.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with something other than 200 OK.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body could not be read.
    #[error("body read failed: {0}")]
    Body(String),
}

/// Shared HTTP client with a fixed browser-like header set.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher that sends the given User-Agent on every request.
    ///
    /// A User-Agent that is not a valid header value is logged and the
    /// client falls back to reqwest's default.
    pub fn new(user_agent: &str) -> Self {
        let client = build_client(user_agent).unwrap_or_else(|e| {
            tracing::warn!(
                "Invalid User-Agent {:?}: {}. Using the default client.",
                user_agent,
                e
            );
            reqwest::Client::new()
        });

        Self { client }
    }

    /// GET `url` and return the body as text.
    pub async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, Unavailable> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/json;q=0.9,*/*;q=0.8")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Unavailable::Transport(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Unavailable::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| Unavailable::Body(e.to_string()))
    }
}

fn build_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(user_agent).build()
}
