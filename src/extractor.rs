//! Recovers the organic results from the `d.js` response.
//!
//! The body is a script, not JSON. Somewhere inside it upstream calls
//! `DDG.pageLayout.load('d', [...])` with the results array as the second
//! argument. Extraction is two separate steps: `locate_payload` finds that
//! array literal by scanning from the marker, and `parse_payload` parses it
//! strictly as JSON.

use regex::Regex;
use std::sync::OnceLock;

use crate::data_models::{RawResult, SearchResult};
use crate::error::{Result, SearchError};

static LOADER_RE: OnceLock<Regex> = OnceLock::new();

fn loader_regex() -> &'static Regex {
    LOADER_RE.get_or_init(|| {
        Regex::new(r#"DDG\.pageLayout\.load\(\s*['"]d['"]\s*,\s*\["#).expect("valid regex")
    })
}

/// Block/error pages upstream serves in place of results.
const REJECTION_MARKERS: &[(&str, &str)] = &[
    (
        "DDG.deep.anomalyDetectionBlock",
        "anomaly detected in the request, requests are likely being sent too quickly",
    ),
    ("DDG.deep.is506", "a server error occurred"),
];

pub fn check_rejection(body: &str) -> Result<()> {
    for &(marker, reason) in REJECTION_MARKERS {
        if body.contains(marker) {
            return Err(SearchError::UpstreamRejected(reason));
        }
    }
    Ok(())
}

/// Returns the `[...]` literal passed to the `'d'` loader, brackets included.
/// `None` if the marker is missing or the array never closes.
pub fn locate_payload(body: &str) -> Option<&str> {
    let m = loader_regex().find(body)?;
    // the match ends just past the opening bracket
    let start = m.end() - 1;
    let end = matching_bracket(&body[start..])?;
    Some(&body[start..start + end + 1])
}

/// Byte offset of the `]` closing the array that starts at `text[0]`.
/// Brackets inside JSON string literals are ignored.
fn matching_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strictly parses the located literal. Entries that are not objects with the
/// expected field types are skipped; only invalid JSON is an error.
pub fn parse_payload(payload: &str) -> Result<Vec<RawResult>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(payload)?;
    Ok(values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<RawResult>(v).ok())
        .collect())
}

/// Full extraction: rejection check, locate, parse, keep complete results.
pub fn extract(body: &str) -> Result<Vec<SearchResult>> {
    check_rejection(body)?;
    let payload = locate_payload(body).ok_or(SearchError::PayloadNotFound)?;
    let raw = parse_payload(payload)?;
    let raw_count = raw.len();

    let results: Vec<SearchResult> = raw
        .into_iter()
        .filter_map(RawResult::into_search_result)
        .collect();

    log::debug!("kept {} of {} raw results", results.len(), raw_count);
    if results.is_empty() {
        return Err(SearchError::EmptyResults);
    }
    Ok(results)
}

#[test]
fn test_matching_bracket_nested_and_strings() {
    assert_eq!(matching_bracket("[]"), Some(1));
    assert_eq!(matching_bracket(r#"[{"a":[1,2]}] trailing"#), Some(12));
    assert_eq!(matching_bracket(r#"["]", "\"]"]"#), Some(11));
    assert_eq!(matching_bracket("[[1]"), None);
}

#[test]
fn test_locate_payload_stops_at_loader_argument() {
    let body = r#"if (DDG.pageLayout) DDG.pageLayout.load('d',[{"t":"A ]);","u":"https://a"}]);DDG.duckbar.load('images', []);"#;
    assert_eq!(
        locate_payload(body),
        Some(r#"[{"t":"A ]);","u":"https://a"}]"#)
    );
}

#[test]
fn test_locate_payload_ignores_other_tags() {
    let body = r#"DDG.pageLayout.load('a',[{"t":"ad"}]);DDG.pageLayout.load("d", [ ]);"#;
    assert_eq!(locate_payload(body), Some("[ ]"));
    assert_eq!(locate_payload("DDG.duckbar.load('images', [])"), None);
}

#[test]
fn test_parse_payload_malformed() {
    let err = parse_payload("[{\"t\": \"x\",]").unwrap_err();
    assert!(matches!(err, SearchError::MalformedPayload(_)));
}

#[test]
fn test_check_rejection() {
    assert!(check_rejection("DDG.pageLayout.load('d',[])").is_ok());
    assert!(matches!(
        check_rejection("if(DDG.deep.anomalyDetectionBlock) {}"),
        Err(SearchError::UpstreamRejected(_))
    ));
    assert!(matches!(
        check_rejection("if (DDG.deep.is506) DDG.deep.is506();"),
        Err(SearchError::UpstreamRejected("a server error occurred"))
    ));
}
