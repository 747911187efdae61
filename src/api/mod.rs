//! HTTP client for the remote search service.
//!
//! Three read-only, idempotent endpoints:
//! - `GET /autocomplete/{mode}/?q=<text>&size=<n>`
//! - `GET /search/?q=<text>&size=<n>&offset=<page>` (`offset` is a page
//!   index, not a byte offset)
//! - `GET /summary/{id}/`
//!
//! No authentication, headers, or request bodies are part of the contract.

pub mod types;

use std::time::Duration;

use reqwest::{Client, Response};
use url::Url;

pub use types::{ApiError, ModResult, ModSummary, SuggestMode};

use types::{SearchResponse, SuggestResponse};

/// Cloneable handle to the search service. The inner reqwest client is
/// reference-counted, so clones share the connection pool.
#[derive(Clone)]
pub struct SearchApi {
    client: Client,
    base: Url,
}

impl SearchApi {
    /// Build a client for `base_url` with a conservative request timeout.
    /// An unanswered request is surfaced as a transport failure rather
    /// than pending forever.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        // A trailing slash makes Url::join treat the last path segment as a
        // directory instead of replacing it.
        let mut normalized = base_url.trim_end_matches('/').to_string();
        normalized.push('/');
        let base = Url::parse(&normalized)?;

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// Fetch up to `size` suggestions for `query` from the given backend
    /// mode.
    pub async fn suggestions(
        &self,
        mode: SuggestMode,
        query: &str,
        size: u32,
    ) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&format!("autocomplete/{}/", mode.endpoint()))?;
        let response = self
            .client
            .get(url)
            .query(&[("q", query), ("size", &size.to_string())])
            .send()
            .await?;
        let response = check_status(response)?;

        let body: SuggestResponse = response.json().await?;
        Ok(body.suggestions)
    }

    /// Fetch one page of search results. `page` is a zero-based page index;
    /// the service returns the `page`-th block of `size` items.
    pub async fn search(
        &self,
        query: &str,
        size: u32,
        page: u32,
    ) -> Result<Vec<ModResult>, ApiError> {
        let url = self.endpoint("search/")?;
        let response = self
            .client
            .get(url)
            .query(&[
                ("q", query),
                ("size", &size.to_string()),
                ("offset", &page.to_string()),
            ])
            .send()
            .await?;
        let response = check_status(response)?;

        let body: SearchResponse = response.json().await?;
        Ok(body.results)
    }

    /// Fetch the generated summary for one mod.
    pub async fn summary(&self, mod_id: &str) -> Result<ModSummary, ApiError> {
        let url = self.endpoint(&format!("summary/{mod_id}/"))?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response)?;

        let body: ModSummary = response.json().await?;
        Ok(body)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status,
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> SearchApi {
        SearchApi::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_join_with_trailing_slash() {
        let api = api("http://localhost:8080/");
        let url = api.endpoint("search/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/search/");
    }

    #[test]
    fn test_endpoint_join_without_trailing_slash() {
        let api = api("http://localhost:8080");
        let url = api.endpoint("autocomplete/suggester/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/autocomplete/suggester/");
    }

    #[test]
    fn test_endpoint_preserves_base_path() {
        let api = api("http://example.com/modsearch");
        let url = api.endpoint("summary/jei/").unwrap();
        assert_eq!(url.as_str(), "http://example.com/modsearch/summary/jei/");
    }

    #[test]
    fn test_new_rejects_garbage_base_url() {
        assert!(SearchApi::new("not a url", Duration::from_secs(5)).is_err());
    }
}
