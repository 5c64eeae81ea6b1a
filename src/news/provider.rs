use std::fmt;

use async_trait::async_trait;

use super::types::{HeadlinePage, HeadlineRequest};

/// Errors that can occur while talking to a headline provider.
///
/// The controller collapses all of these into a single "fetch failed"
/// state carrying the display string; the variants only matter for logs.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Fetches one page of top headlines.
    async fn top_headlines(&self, request: &HeadlineRequest)
    -> Result<HeadlinePage, ProviderError>;

    /// Attempts to load an image so broken references can be swapped for
    /// the placeholder after they have been rendered.
    async fn probe_image(&self, url: &str) -> Result<(), ProviderError>;
}
