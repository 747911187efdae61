//! Wire types and errors for the remote search service contract.

use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by the HTTP client.
///
/// All of these are "transport failures" from the interaction state
/// machines' point of view: each flow recovers locally and no error here is
/// fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Which suggestion backend to query.
///
/// Both modes share the request/response shape; they differ only in backend
/// ranking behavior, which is opaque to the client. The active mode is read
/// at fetch-issue time, so toggling it affects the next fetch only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestMode {
    /// Prefix suggester — cheap and fast.
    Fast,
    /// Search-as-you-type — full ranking on partial queries.
    Advanced,
}

impl SuggestMode {
    /// Path segment of the autocomplete endpoint variant.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Fast => "suggester",
            Self::Advanced => "sayt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Advanced => "advanced",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Fast => Self::Advanced,
            Self::Advanced => Self::Fast,
        }
    }
}

/// `GET /autocomplete/{mode}/` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<String>,
}

/// `GET /search/` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ModResult>,
}

/// A single mod in a search result page. Immutable once received;
/// identity key is `id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModResult {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "popularityRank", default)]
    pub popularity_rank: u32,
    #[serde(rename = "websiteUrl", default)]
    pub website_url: String,
}

/// `GET /summary/{id}/` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ModSummary {
    pub mod_id: String,
    pub title: String,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_mode_endpoints() {
        assert_eq!(SuggestMode::Fast.endpoint(), "suggester");
        assert_eq!(SuggestMode::Advanced.endpoint(), "sayt");
    }

    #[test]
    fn test_suggest_mode_toggle_roundtrip() {
        assert_eq!(SuggestMode::Fast.toggled(), SuggestMode::Advanced);
        assert_eq!(SuggestMode::Fast.toggled().toggled(), SuggestMode::Fast);
    }

    #[test]
    fn test_deserialize_suggest_response() {
        let body = r#"{"query":"biom","suggestions":["biomes","biomes o plenty"]}"#;
        let parsed: SuggestResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.query, "biom");
        assert_eq!(parsed.suggestions.len(), 2);
    }

    #[test]
    fn test_deserialize_search_response() {
        let body = r#"{
            "query": "tinkers",
            "results": [{
                "id": "tinkers-construct",
                "title": "Tinkers' Construct",
                "authors": ["mDiyo", "boni"],
                "categories": ["tools", "tech"],
                "description": "Tool crafting and customization.",
                "popularityRank": 3,
                "websiteUrl": "https://example.com/tinkers"
            }]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        let result = &parsed.results[0];
        assert_eq!(result.id, "tinkers-construct");
        assert_eq!(result.authors, vec!["mDiyo", "boni"]);
        assert_eq!(result.popularity_rank, 3);
        assert_eq!(result.website_url, "https://example.com/tinkers");
    }

    #[test]
    fn test_deserialize_mod_result_missing_optionals() {
        // Sparse records still parse; list and rank fields default.
        let body = r#"{"id":"x","title":"X"}"#;
        let parsed: ModResult = serde_json::from_str(body).unwrap();
        assert!(parsed.authors.is_empty());
        assert!(parsed.categories.is_empty());
        assert_eq!(parsed.popularity_rank, 0);
    }

    #[test]
    fn test_deserialize_summary_response() {
        let body = r#"{"mod_id":"jei","title":"JEI","summary":"Item and recipe viewer."}"#;
        let parsed: ModSummary = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.mod_id, "jei");
        assert_eq!(parsed.summary, "Item and recipe viewer.");
    }
}
