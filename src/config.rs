use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::data_models::SafeSearch;

pub const DEFAULT_HANDSHAKE_URL: &str = "https://duckduckgo.com/";
pub const DEFAULT_RESULTS_URL: &str = "https://links.duckduckgo.com/d.js";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_REGION: &str = "wt-wt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MIN_TIMEOUT_SECS: u64 = 1;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        search: SearchConfig {
            handshake_url: get_env_or_default("DDG_HANDSHAKE_URL", DEFAULT_HANDSHAKE_URL),
            results_url: get_env_or_default("DDG_RESULTS_URL", DEFAULT_RESULTS_URL),
            user_agent: get_env_or_default("DDG_USER_AGENT", DEFAULT_USER_AGENT),
            timeout: timeout_from_secs(get_parsed_or_default(
                "DDG_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            safe_search: get_parsed_or_default("DDG_SAFE_SEARCH", SafeSearch::default()),
            region: get_env_or_default("DDG_REGION", DEFAULT_REGION),
        },
        server_addr: get_env_or_default("SERVER_ADDR", "127.0.0.1:3000"),
    }
});

pub struct Config {
    pub search: SearchConfig,
    pub server_addr: String,
}

/// Everything a `SearchClient` needs. Built from the environment by `CONFIG`,
/// or directly when pointing the client somewhere else (tests, embedding).
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub handshake_url: String,
    pub results_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub safe_search: SafeSearch,
    pub region: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            handshake_url: DEFAULT_HANDSHAKE_URL.to_string(),
            results_url: DEFAULT_RESULTS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            safe_search: SafeSearch::default(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

/// Per-request timeout; anything under `MIN_TIMEOUT_SECS` would fail every
/// search, so it is raised to the floor.
pub fn timeout_from_secs(secs: u64) -> Duration {
    if secs < MIN_TIMEOUT_SECS {
        log::warn!("timeout of {secs}s is too short, using {MIN_TIMEOUT_SECS}s");
    }
    Duration::from_secs(secs.max(MIN_TIMEOUT_SECS))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_parsed_or_default<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring invalid value for {key}: {raw:?}");
            default
        }),
        Err(_) => default,
    }
}

// Env vars are process-global; every test below uses its own keys.

#[test]
fn test_get_env_or_default_trims_and_falls_back() {
    unsafe {
        std::env::set_var("DDG_TEST_ENV_TRIMMED", "  https://example.test/  ");
        std::env::set_var("DDG_TEST_ENV_BLANK", "   ");
        std::env::remove_var("DDG_TEST_ENV_UNSET");
    }
    assert_eq!(
        get_env_or_default("DDG_TEST_ENV_TRIMMED", "fallback"),
        "https://example.test/"
    );
    assert_eq!(get_env_or_default("DDG_TEST_ENV_BLANK", "fallback"), "fallback");
    assert_eq!(get_env_or_default("DDG_TEST_ENV_UNSET", "fallback"), "fallback");
}

#[test]
fn test_get_parsed_or_default() {
    unsafe {
        std::env::set_var("DDG_TEST_PARSED_TIMEOUT", " 25 ");
        std::env::set_var("DDG_TEST_PARSED_BAD_TIMEOUT", "soon");
        std::env::remove_var("DDG_TEST_PARSED_UNSET");
    }
    assert_eq!(get_parsed_or_default("DDG_TEST_PARSED_TIMEOUT", 10u64), 25);
    // invalid values warn and keep the default
    assert_eq!(get_parsed_or_default("DDG_TEST_PARSED_BAD_TIMEOUT", 10u64), 10);
    assert_eq!(get_parsed_or_default("DDG_TEST_PARSED_UNSET", 10u64), 10);
}

#[test]
fn test_safe_search_from_env() {
    unsafe {
        std::env::set_var("DDG_TEST_SAFE_SEARCH_STRICT", "Strict");
        std::env::set_var("DDG_TEST_SAFE_SEARCH_BOGUS", "paranoid");
    }
    assert_eq!(
        get_parsed_or_default("DDG_TEST_SAFE_SEARCH_STRICT", SafeSearch::default()),
        SafeSearch::Strict
    );
    assert_eq!(
        get_parsed_or_default("DDG_TEST_SAFE_SEARCH_BOGUS", SafeSearch::default()),
        SafeSearch::Moderate
    );
}

#[test]
fn test_timeout_from_secs_floor() {
    assert_eq!(timeout_from_secs(0), Duration::from_secs(1));
    assert_eq!(timeout_from_secs(1), Duration::from_secs(1));
    assert_eq!(timeout_from_secs(30), Duration::from_secs(30));
}
