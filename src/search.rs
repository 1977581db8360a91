use crate::config::SearchConfig;
use crate::data_models::{ResultEnvelope, SearchResult, ToolConfigurations, ToolParameters};
use crate::error::{Result, SearchError};
use crate::extractor;
use crate::requester;
use crate::token;

/// Runs token handshake -> results request -> extraction for one query.
///
/// Holds no per-search state: the token lives only inside a single `search`
/// call, so one client can serve any number of concurrent searches.
pub struct SearchClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub async fn search(&self, search_terms: &str) -> Result<Vec<SearchResult>> {
        let search_terms = search_terms.trim();
        if search_terms.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let token = token::acquire(&self.http, &self.config.handshake_url, search_terms).await?;
        log::debug!("token acquired for query {search_terms:?}");

        let body = requester::fetch_results_page(
            &self.http,
            &self.config.results_url,
            search_terms,
            token,
            &self.config.region,
            self.config.safe_search,
        )
        .await?;
        log::debug!("results page fetched ({} bytes)", body.len());

        extractor::extract(&body)
    }

    /// Same as `search`, but every outcome comes back as an envelope: the
    /// results as a JSON array string, or `"Error: <cause>"`.
    pub async fn run(&self, search_terms: &str) -> ResultEnvelope {
        let outcome = self.search(search_terms).await.and_then(|results| {
            log::info!("search for {search_terms:?} returned {} results", results.len());
            serde_json::to_string(&results).map_err(|e| SearchError::Encode(e.to_string()))
        });

        match outcome {
            Ok(message) => ResultEnvelope { message },
            Err(e) => {
                log::warn!("search for {search_terms:?} failed: {e}");
                ResultEnvelope::error(e)
            }
        }
    }

    pub async fn run_tool(
        &self,
        _configurations: ToolConfigurations,
        parameters: ToolParameters,
    ) -> ResultEnvelope {
        self.run(&parameters.message).await
    }
}
