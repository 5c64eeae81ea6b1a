//! NewsAPI provider implementation using the `top-headlines` endpoint.
//!
//! Request: `GET {base_url}/top-headlines?country=&category=&page=&pageSize=`
//! with the key in the `X-Api-Key` header.
//!
//! Success body: `{ "status": "ok", "totalResults": n, "articles": [...] }`.
//! Error body:   `{ "status": "error", "code": "...", "message": "..." }`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::news::{Article, HeadlinePage, HeadlineProvider, HeadlineRequest, ProviderError};

pub const DEFAULT_NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

/// Upper bound on a single image probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// NewsAPI Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct HeadlinesResponse {
    status: Option<String>,
    total_results: Option<u32>,
    articles: Option<Vec<Article>>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Pulls a human-readable message out of a NewsAPI error body, falling back
/// to the raw body text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            code: Some(code), ..
        }) => code,
        _ if body.trim().is_empty() => "unknown error".to_string(),
        _ => body.trim().to_string(),
    }
}

/// Converts a decoded response body into a page. Only `status: "ok"` with
/// both `totalResults` and `articles` present counts as a page.
fn into_page(response: HeadlinesResponse) -> Result<HeadlinePage, ProviderError> {
    match response.status.as_deref() {
        Some("ok") => match (response.articles, response.total_results) {
            (Some(articles), Some(total_results)) => Ok(HeadlinePage {
                articles,
                total_results,
            }),
            (None, _) => Err(ProviderError::Parse(
                "response has no articles".to_string(),
            )),
            (_, None) => Err(ProviderError::Parse(
                "response has no totalResults".to_string(),
            )),
        },
        None => Err(ProviderError::Parse("response has no status".to_string())),
        Some(other) => Err(ProviderError::Parse(
            response
                .message
                .or(response.code)
                .unwrap_or_else(|| format!("unexpected status '{other}'")),
        )),
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct NewsApiProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl NewsApiProvider {
    /// Creates a new NewsAPI provider.
    ///
    /// # Arguments
    /// * `api_key` - NewsAPI key; requests fail with a config error when absent
    /// * `base_url` - Optional custom base URL (defaults to NewsAPI v2)
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_NEWSAPI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn headlines_url(&self) -> String {
        format!("{}/top-headlines", self.base_url)
    }
}

#[async_trait]
impl HeadlineProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn top_headlines(
        &self,
        request: &HeadlineRequest,
    ) -> Result<HeadlinePage, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Config(
                "NewsAPI key is not set (config file or NEWSAPI_KEY env var)".to_string(),
            )
        })?;

        info!(
            "NewsAPI request: country={}, category={}, page={}, pageSize={}",
            request.country, request.category, request.page, request.page_size
        );

        let response = self
            .client
            .get(self.headlines_url())
            .header("X-Api-Key", api_key)
            .query(&[
                ("country", request.country.as_str()),
                ("category", request.category.as_str()),
            ])
            .query(&[("page", request.page), ("pageSize", request.page_size)])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        debug!("NewsAPI response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("NewsAPI error: {} - {}", status.as_u16(), body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let decoded: HeadlinesResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;
        let page = into_page(decoded)?;

        info!(
            "NewsAPI returned {} articles (totalResults={})",
            page.articles.len(),
            page.total_results
        );
        Ok(page)
    }

    async fn probe_image(&self, url: &str) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: format!("image request failed for {url}"),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !content_type.is_empty() && !content_type.starts_with("image/") {
            return Err(ProviderError::Parse(format!(
                "not an image ({content_type}): {url}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let provider = NewsApiProvider::new(None, Some("http://localhost:9999/v2/".to_string()));
        assert_eq!(provider.headlines_url(), "http://localhost:9999/v2/top-headlines");
    }

    #[test]
    fn test_new_defaults_base_url() {
        let provider = NewsApiProvider::new(Some("k".to_string()), None);
        assert_eq!(provider.headlines_url(), "https://newsapi.org/v2/top-headlines");
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        assert_eq!(error_message(body), "Your API key is invalid.");
    }

    #[test]
    fn test_error_message_falls_back_to_code_then_body() {
        assert_eq!(error_message(r#"{"code":"rateLimited"}"#), "rateLimited");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("   "), "unknown error");
    }

    #[test]
    fn test_into_page_rejects_error_status() {
        let decoded: HeadlinesResponse = serde_json::from_str(
            r#"{"status":"error","code":"parameterInvalid","message":"bad category"}"#,
        )
        .unwrap();
        let err = into_page(decoded).unwrap_err();
        assert_eq!(err.to_string(), "parse error: bad category");
    }

    #[test]
    fn test_into_page_keeps_articles_and_total() {
        let decoded: HeadlinesResponse = serde_json::from_str(
            r#"{"status":"ok","totalResults":25,"articles":[{"title":"A","url":"https://a"}]}"#,
        )
        .unwrap();
        let page = into_page(decoded).unwrap();
        assert_eq!(page.total_results, 25);
        assert_eq!(page.articles.len(), 1);
        assert_eq!(page.articles[0].title, "A");
    }

    #[test]
    fn test_into_page_rejects_incomplete_bodies() {
        let cases = [
            (r#"{}"#, "parse error: response has no status"),
            (r#"{"unexpected":true}"#, "parse error: response has no status"),
            (
                r#"{"status":"ok","totalResults":3}"#,
                "parse error: response has no articles",
            ),
            (
                r#"{"status":"ok","articles":[]}"#,
                "parse error: response has no totalResults",
            ),
        ];
        for (body, expected) in cases {
            let decoded: HeadlinesResponse = serde_json::from_str(body).unwrap();
            assert_eq!(into_page(decoded).unwrap_err().to_string(), expected, "{body}");
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let provider = NewsApiProvider::new(None, Some("http://127.0.0.1:1".to_string()));
        let request = HeadlineRequest::new("us", crate::news::Category::Business, 1);
        let err = provider.top_headlines(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }
}
