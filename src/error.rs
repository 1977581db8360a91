use thiserror::Error;

/// Every way a single search can fail. The `Display` text is what ends up in
/// the envelope after the `"Error: "` prefix.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Non-success status, timeout or transport failure on either request.
    #[error("{0}")]
    Network(String),

    #[error("Failed to get the vqd token for query: {0}")]
    TokenExtraction(String),

    #[error("Failed to locate the search results payload")]
    PayloadNotFound,

    #[error("Failed to parse the search results payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Failed to extract search results")]
    EmptyResults,

    /// The results endpoint answered with one of its own block/error pages.
    #[error("DuckDuckGo rejected the request: {0}")]
    UpstreamRejected(&'static str),

    #[error("search query cannot be empty")]
    EmptyQuery,

    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("failed to encode search results: {0}")]
    Encode(String),
}

impl SearchError {
    pub(crate) fn network(phase: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Network(format!("{phase} request timed out"))
        } else if let Some(status) = err.status() {
            SearchError::Network(format!("{phase} request failed with status {status}"))
        } else {
            SearchError::Network(format!("{phase} request failed: {err}"))
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[test]
fn test_non_network_failures_have_their_own_messages() {
    let err = SearchError::Client("tls backend unavailable".to_string());
    assert_eq!(
        err.to_string(),
        "failed to build http client: tls backend unavailable"
    );
    assert!(!matches!(err, SearchError::Network(_)));

    let err = SearchError::Encode("key must be a string".to_string());
    assert_eq!(
        err.to_string(),
        "failed to encode search results: key must be a string"
    );
    assert!(!err.to_string().contains("parse"));
}
