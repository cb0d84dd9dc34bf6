use std::sync::Arc;

use crate::config::Config;
use crate::dashboard::github::GitHubClient;
use crate::dashboard::leetcode::LeetCodeClient;
use crate::llm_client::TextGenerator;
use crate::resume::session::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Default: the Gemini-backed `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Live analysis sessions. In memory only.
    pub analyses: AnalysisStore,
    pub github: GitHubClient,
    pub leetcode: LeetCodeClient,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State wired to the given generator; the data-source clients point at an
    /// unroutable address and are never reached by resume tests.
    pub fn for_tests(llm: Arc<dyn TextGenerator>) -> Self {
        let config = Config {
            gemini_api_key: "test-key".to_string(),
            gemini_api_url: "http://127.0.0.1:9".to_string(),
            github_api_url: "http://127.0.0.1:9".to_string(),
            github_token: None,
            leetcode_api_url: "http://127.0.0.1:9".to_string(),
            max_upload_bytes: 1024 * 1024,
            session_ttl_secs: 3600,
            port: 0,
            rust_log: "debug".to_string(),
        };
        Self {
            llm,
            analyses: AnalysisStore::new(chrono::Duration::hours(1)),
            github: GitHubClient::new(config.github_api_url.clone(), None)
                .expect("test GitHub client"),
            leetcode: LeetCodeClient::new(config.leetcode_api_url.clone())
                .expect("test LeetCode client"),
            config,
        }
    }
}
