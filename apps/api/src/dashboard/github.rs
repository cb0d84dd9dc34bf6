//! GitHub REST client (public, read-only endpoints).

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::AppError;
use crate::models::github::{GitHubRepository, GitHubUser};

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 100;

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url,
            token,
        })
    }

    pub async fn fetch_user(&self, username: &str) -> Result<GitHubUser, AppError> {
        let url = format!("{}/users/{username}", self.base_url);
        self.get_json(&url, &[], username).await
    }

    /// Most recently updated repositories first.
    pub async fn fetch_repositories(
        &self,
        username: &str,
        per_page: u32,
    ) -> Result<Vec<GitHubRepository>, AppError> {
        let url = format!("{}/users/{username}/repos", self.base_url);
        let per_page = clamp_per_page(per_page).to_string();
        self.get_json(&url, &[("sort", "updated"), ("per_page", per_page.as_str())], username)
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        username: &str,
    ) -> Result<T, AppError> {
        let mut request = self.client.get(url).header("Accept", ACCEPT).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "GitHub user '{username}' not found"
            )));
        }
        if !status.is_success() {
            return Err(AppError::Upstream(format!("GitHub API error: {status}")));
        }

        debug!("GitHub {url} -> {status}");
        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Unexpected GitHub payload: {e}")))
    }
}

fn clamp_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, MAX_PER_PAGE)
}
