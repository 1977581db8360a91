use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One organic result, as handed back across the tool boundary.
/// All three fields are non-empty; anything else is dropped during extraction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// An entry of the embedded `d.js` array. Upstream uses one-letter keys and
/// mixes organic results with pagination/sentinel entries, so every field is
/// optional here.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawResult {
    #[serde(rename = "t")]
    pub title: Option<String>,
    #[serde(rename = "a")]
    pub description: Option<String>,
    #[serde(rename = "u")]
    pub url: Option<String>,
    /// Present only on the "next page" entry.
    #[serde(rename = "n")]
    pub next: Option<serde_json::Value>,
}

/// Marks the end-of-results entry upstream appends when there is nothing else.
pub const EOF_SENTINEL: &str = "EOF";

impl RawResult {
    pub fn into_search_result(self) -> Option<SearchResult> {
        if self.next.is_some() {
            return None;
        }
        let title = self.title.filter(|t| !t.is_empty() && t != EOF_SENTINEL)?;
        let description = self.description.filter(|d| !d.is_empty())?;
        let url = self.url.filter(|u| !u.is_empty())?;
        Some(SearchResult {
            title,
            description,
            url,
        })
    }
}

/// The opaque `vqd` value issued by the handshake. Deliberately not `Clone`:
/// it is moved into the single results request that follows.
#[derive(Debug, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        SessionToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeSearch {
    Strict,
    #[default]
    Moderate,
    Off,
}

impl SafeSearch {
    /// Values for the `p` and `ex` results parameters.
    pub fn params(self) -> (&'static str, &'static str) {
        match self {
            SafeSearch::Strict => ("1", "-1"),
            SafeSearch::Moderate => ("", "-1"),
            SafeSearch::Off => ("-1", "-2"),
        }
    }
}

impl FromStr for SafeSearch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(SafeSearch::Strict),
            "moderate" => Ok(SafeSearch::Moderate),
            "off" => Ok(SafeSearch::Off),
            other => Err(format!(
                "unknown safe search level {other:?}, expected strict, moderate or off"
            )),
        }
    }
}

impl fmt::Display for SafeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SafeSearch::Strict => "strict",
            SafeSearch::Moderate => "moderate",
            SafeSearch::Off => "off",
        };
        f.write_str(s)
    }
}

#[test]
fn test_safe_search_from_str() {
    assert_eq!("strict".parse::<SafeSearch>(), Ok(SafeSearch::Strict));
    assert_eq!("MODERATE".parse::<SafeSearch>(), Ok(SafeSearch::Moderate));
    assert_eq!("Off".parse::<SafeSearch>(), Ok(SafeSearch::Off));

    let err = "paranoid".parse::<SafeSearch>().unwrap_err();
    assert!(err.contains("\"paranoid\""), "{err}");
    assert!(err.contains("strict, moderate or off"));
}

#[test]
fn test_safe_search_display_parses_back() {
    for level in [SafeSearch::Strict, SafeSearch::Moderate, SafeSearch::Off] {
        assert_eq!(level.to_string().parse::<SafeSearch>(), Ok(level));
    }
}

/// The `{message}` shape returned for every outcome, success or failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultEnvelope {
    pub message: String,
}

impl ResultEnvelope {
    pub const ERROR_PREFIX: &'static str = "Error: ";

    pub fn error(message: impl fmt::Display) -> Self {
        ResultEnvelope {
            message: format!("{}{}", Self::ERROR_PREFIX, message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.message.starts_with(Self::ERROR_PREFIX)
    }
}

/// This tool takes no configuration; the type exists to keep the
/// `run(configurations, parameters)` shape.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ToolConfigurations {}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ToolParameters {
    pub message: String,
}
