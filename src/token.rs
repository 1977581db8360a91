use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use std::sync::OnceLock;

use crate::data_models::SessionToken;
use crate::error::{Result, SearchError};
use crate::query::QueryParameters;

static VQD_RE: OnceLock<Regex> = OnceLock::new();

fn vqd_regex() -> &'static Regex {
    // vqd="4-1234..." or vqd='4-1234...' somewhere in the handshake page
    VQD_RE.get_or_init(|| {
        Regex::new(r#"vqd=(?:"([^"]+)"|'([^']+)')"#).expect("valid regex")
    })
}

/// Pulls the quoted `vqd` value out of the handshake page.
pub fn extract_token(body: &str) -> Option<SessionToken> {
    let caps = vqd_regex().captures(body)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| SessionToken::new(m.as_str()))
}

/// POSTs `q=<terms>` to the handshake endpoint and returns the token found in
/// the reply. One request, no retries.
pub async fn acquire(
    client: &reqwest::Client,
    handshake_url: &str,
    search_terms: &str,
) -> Result<SessionToken> {
    let body = QueryParameters::new().with("q", search_terms).encode();

    log::debug!("requesting vqd token from {handshake_url}");
    let res = client
        .post(handshake_url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SearchError::network("token", e))?;

    let text = res
        .text()
        .await
        .map_err(|e| SearchError::network("token", e))?;

    extract_token(&text).ok_or_else(|| SearchError::TokenExtraction(search_terms.to_string()))
}

#[test]
fn test_extract_token_double_quoted() {
    let body = r#"<html><script>DDG.deep.initialize('/d.js?q=x&vqd="abc123"');</script>vqd="abc123"</html>"#;
    assert_eq!(extract_token(body), Some(SessionToken::new("abc123")));
}

#[test]
fn test_extract_token_single_quoted() {
    let body = "nrje('/d.js?q=rust', vqd='4-3168941742394817');";
    assert_eq!(
        extract_token(body).as_ref().map(SessionToken::as_str),
        Some("4-3168941742394817")
    );
}

#[test]
fn test_extract_token_first_match_wins() {
    let body = r#"vqd="first" ... vqd="second""#;
    assert_eq!(extract_token(body), Some(SessionToken::new("first")));
}

#[test]
fn test_extract_token_missing_or_malformed() {
    assert_eq!(extract_token(""), None);
    assert_eq!(extract_token("<html>no token here</html>"), None);
    // unquoted, unterminated and empty values are not tokens
    assert_eq!(extract_token("vqd=abc123&q=rust"), None);
    assert_eq!(extract_token(r#"vqd="abc123"#), None);
    assert_eq!(extract_token(r#"vqd="""#), None);
}
