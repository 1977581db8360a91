use std::borrow::Cow;

/// Ordered list of query parameters. Order is whatever the caller pushed,
/// so the encoded string is stable for a given list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    pairs: Vec<(String, String)>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `k1=v1&k2=v2...` with keys and values percent-encoded.
    pub fn encode(&self) -> String {
        encode_pairs(self.iter())
    }
}

pub fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<String>>()
        .join("&")
}

/// Inverse of `encode`, only used to check what went over the wire.
pub fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
    encoded
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(s: &str) -> String {
    // Form bodies may encode spaces as '+'.
    let s = s.replace('+', " ");
    let decoded = urlencoding::decode(&s).map(Cow::into_owned).ok();
    decoded.unwrap_or(s)
}

#[test]
fn test_encode_plain_pairs_round_trip() {
    let params = QueryParameters::new()
        .with("q", "rust")
        .with("kl", "wt-wt")
        .with("s", "0");
    let encoded = params.encode();
    assert_eq!(encoded, "q=rust&kl=wt-wt&s=0");

    let decoded = decode_pairs(&encoded);
    let original: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(decoded, original);
}

#[test]
fn test_encode_reserved_characters() {
    let params = QueryParameters::new().with("q a&b", "x=1 & y=2");
    let encoded = params.encode();
    assert_eq!(encoded, "q%20a%26b=x%3D1%20%26%20y%3D2");

    let (key, value) = encoded.split_once('=').unwrap();
    for part in [key, value] {
        assert!(!part.contains('&'));
        assert!(!part.contains('='));
        assert!(!part.contains(' '));
    }
    assert_eq!(
        decode_pairs(&encoded),
        vec![("q a&b".to_string(), "x=1 & y=2".to_string())]
    );
}

#[test]
fn test_encode_keeps_empty_values_and_order() {
    let params = QueryParameters::new()
        .with("p", "")
        .with("df", "")
        .with("ex", "-1");
    assert_eq!(params.encode(), "p=&df=&ex=-1");
    assert_eq!(params.get("ex"), Some("-1"));
    assert_eq!(params.get("missing"), None);
}

#[test]
fn test_encode_empty() {
    assert_eq!(QueryParameters::new().encode(), "");
    assert!(decode_pairs("").is_empty());
}
