use reqwest::header::CONTENT_TYPE;

use crate::data_models::{SafeSearch, SessionToken};
use crate::error::{Result, SearchError};
use crate::query::QueryParameters;

/// Parameters for the first results page, in the order upstream's own
/// frontend sends them.
pub fn results_params(
    search_terms: &str,
    token: &SessionToken,
    region: &str,
    safe_search: SafeSearch,
) -> QueryParameters {
    let (p, ex) = safe_search.params();
    QueryParameters::new()
        .with("q", search_terms)
        .with("vqd", token.as_str())
        .with("kl", region)
        .with("l", region)
        .with("p", p)
        .with("s", "0")
        .with("df", "")
        .with("ex", ex)
}

pub fn results_url(results_endpoint: &str, params: &QueryParameters) -> String {
    let sep = if results_endpoint.contains('?') { '&' } else { '?' };
    format!("{results_endpoint}{sep}{}", params.encode())
}

/// GETs the results page and hands back the raw script body, unparsed.
pub async fn fetch_results_page(
    client: &reqwest::Client,
    results_endpoint: &str,
    search_terms: &str,
    token: SessionToken,
    region: &str,
    safe_search: SafeSearch,
) -> Result<String> {
    let params = results_params(search_terms, &token, region, safe_search);
    let url = results_url(results_endpoint, &params);

    log::debug!("requesting results page from {results_endpoint} (safe search: {safe_search})");
    let res = client
        .get(&url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SearchError::network("search", e))?;

    res.text()
        .await
        .map_err(|e| SearchError::network("search", e))
}

#[test]
fn test_results_params_defaults() {
    let token = SessionToken::new("4-123");
    let params = results_params("best movie", &token, "wt-wt", SafeSearch::Moderate);
    assert_eq!(
        params.encode(),
        "q=best%20movie&vqd=4-123&kl=wt-wt&l=wt-wt&p=&s=0&df=&ex=-1"
    );
}

#[test]
fn test_results_params_safe_search_levels() {
    let token = SessionToken::new("t");
    let strict = results_params("x", &token, "us-en", SafeSearch::Strict);
    assert_eq!(strict.get("p"), Some("1"));
    assert_eq!(strict.get("ex"), Some("-1"));
    assert_eq!(strict.get("kl"), Some("us-en"));
    assert_eq!(strict.get("l"), Some("us-en"));

    let off = results_params("x", &token, "wt-wt", SafeSearch::Off);
    assert_eq!(off.get("p"), Some("-1"));
    assert_eq!(off.get("ex"), Some("-2"));

    let keys: Vec<&str> = off.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["q", "vqd", "kl", "l", "p", "s", "df", "ex"]);
}

#[test]
fn test_results_url_separator() {
    let params = QueryParameters::new().with("q", "a");
    assert_eq!(
        results_url("https://links.duckduckgo.com/d.js", &params),
        "https://links.duckduckgo.com/d.js?q=a"
    );
    assert_eq!(
        results_url("http://127.0.0.1:1/d.js?x=1", &params),
        "http://127.0.0.1:1/d.js?x=1&q=a"
    );
}
