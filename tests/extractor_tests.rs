use ddg_search::SearchError;
use ddg_search::data_models::{RawResult, SearchResult};
use ddg_search::extractor::{extract, locate_payload, parse_payload};

const RESULTS: &str = include_str!("fixtures/results.js");
const RESULTS_EOF: &str = include_str!("fixtures/results_eof.js");
const RESULTS_NO_MARKER: &str = include_str!("fixtures/results_no_marker.js");
const RESULTS_ANOMALY: &str = include_str!("fixtures/results_anomaly.js");
const RESULTS_MALFORMED: &str = include_str!("fixtures/results_malformed.js");
const RESULTS_506: &str = include_str!("fixtures/results_506.js");

#[cfg(test)]
mod locate_tests {
    use super::*;

    #[test]
    fn test_locates_d_loader_array_only() {
        let payload = locate_payload(RESULTS).unwrap();
        assert!(payload.starts_with("[{\"a\":\"Find out which"));
        assert!(payload.ends_with("&sp=1\"}]"));
        // the 'a' loader earlier in the body must not be picked up
        assert!(!payload.contains("page_load_url"));
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(locate_payload(RESULTS_NO_MARKER), None);
        assert_eq!(locate_payload(""), None);
    }

    #[test]
    fn test_unterminated_array() {
        let body = r#"DDG.pageLayout.load('d',[{"t":"cut off","u":"https://e"#;
        assert_eq!(locate_payload(body), None);
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_keeps_all_object_entries() {
        let raw = parse_payload(locate_payload(RESULTS).unwrap()).unwrap();
        // three complete, one without a url, one pagination entry
        assert_eq!(raw.len(), 5);
        assert!(raw[3].url.is_none());
        assert!(raw[4].next.is_some());
    }

    #[test]
    fn test_parse_skips_non_object_entries() {
        let raw = parse_payload(r#"[1, "x", null, {"t":"T","a":"A","u":"U"}]"#).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].title.as_deref(), Some("T"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let payload = locate_payload(RESULTS_MALFORMED).unwrap();
        assert!(matches!(
            parse_payload(payload),
            Err(SearchError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_raw_result_completeness() {
        let complete = RawResult {
            title: Some("T".into()),
            description: Some("A".into()),
            url: Some("U".into()),
            next: None,
        };
        assert_eq!(
            complete.into_search_result(),
            Some(SearchResult {
                title: "T".into(),
                description: "A".into(),
                url: "U".into(),
            })
        );

        let empty_description = RawResult {
            title: Some("T".into()),
            description: Some("".into()),
            url: Some("U".into()),
            next: None,
        };
        assert_eq!(empty_description.into_search_result(), None);

        let eof = RawResult {
            title: Some("EOF".into()),
            description: Some("A".into()),
            url: Some("U".into()),
            next: None,
        };
        assert_eq!(eof.into_search_result(), None);

        assert_eq!(RawResult::default().into_search_result(), None);
    }
}

#[cfg(test)]
mod extract_tests {
    use super::*;

    #[test]
    fn test_extract_drops_incomplete_entries() {
        let results = extract(RESULTS).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "IMDb Top 250 Movies");
        assert_eq!(results[0].url, "https://www.imdb.com/chart/top/");
        assert_eq!(results[2].url, "https://www.empireonline.com/movies/features/best-movies-2/");
        assert!(results.iter().all(|r| r.title != "Orphaned result"));
    }

    #[test]
    fn test_extract_passes_markup_through() {
        let results = extract(RESULTS).unwrap();
        assert!(results[0].description.starts_with("Find out which <b>movies</b>"));
        assert!(results[1].description.contains("\"The Godfather\""));
    }

    #[test]
    fn test_extract_no_marker() {
        assert!(matches!(
            extract(RESULTS_NO_MARKER),
            Err(SearchError::PayloadNotFound)
        ));
    }

    #[test]
    fn test_extract_empty_after_filtering() {
        let err = extract(RESULTS_EOF).unwrap_err();
        assert!(matches!(err, SearchError::EmptyResults));
        assert_eq!(err.to_string(), "Failed to extract search results");

        let err = extract("DDG.pageLayout.load('d',[]);").unwrap_err();
        assert!(matches!(err, SearchError::EmptyResults));
    }

    #[test]
    fn test_extract_upstream_rejection() {
        assert!(matches!(
            extract(RESULTS_ANOMALY),
            Err(SearchError::UpstreamRejected(_))
        ));
    }

    #[test]
    fn test_extract_upstream_server_error() {
        let err = extract(RESULTS_506).unwrap_err();
        assert!(matches!(
            err,
            SearchError::UpstreamRejected("a server error occurred")
        ));
        assert_eq!(
            err.to_string(),
            "DuckDuckGo rejected the request: a server error occurred"
        );
    }

    #[test]
    fn test_extract_malformed() {
        assert!(matches!(
            extract(RESULTS_MALFORMED),
            Err(SearchError::MalformedPayload(_))
        ));
    }
}
