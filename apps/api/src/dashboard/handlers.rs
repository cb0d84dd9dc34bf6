//! Axum route handlers for the dashboard data sources.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::dashboard::github::DEFAULT_PER_PAGE;
use crate::dashboard::leetcode::{DEFAULT_PROBLEM_LIMIT, DEFAULT_SUBMISSION_LIMIT};
use crate::dashboard::validate_handle;
use crate::errors::AppError;
use crate::models::github::{GitHubRepository, GitHubUser};
use crate::models::leetcode::{
    LeetCodeProblem, LeetCodeStats, LeetCodeSubmission, LeetCodeUserProfile,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReposQuery {
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/github/:username
pub async fn handle_github_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<GitHubUser>, AppError> {
    let username = validate_handle(&username)?;
    Ok(Json(state.github.fetch_user(username).await?))
}

/// GET /api/v1/github/:username/repos
pub async fn handle_github_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<ReposQuery>,
) -> Result<Json<Vec<GitHubRepository>>, AppError> {
    let username = validate_handle(&username)?;
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);
    Ok(Json(
        state.github.fetch_repositories(username, per_page).await?,
    ))
}

/// GET /api/v1/leetcode/:username
pub async fn handle_leetcode_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<LeetCodeUserProfile>, AppError> {
    let username = validate_handle(&username)?;
    Ok(Json(state.leetcode.fetch_profile(username).await?))
}

/// GET /api/v1/leetcode/:username/stats
pub async fn handle_leetcode_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<LeetCodeStats>, AppError> {
    let username = validate_handle(&username)?;
    Ok(Json(state.leetcode.fetch_stats(username).await?))
}

/// GET /api/v1/leetcode/:username/submissions
pub async fn handle_leetcode_submissions(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<LeetCodeSubmission>>, AppError> {
    let username = validate_handle(&username)?;
    let limit = params.limit.unwrap_or(DEFAULT_SUBMISSION_LIMIT);
    Ok(Json(
        state.leetcode.fetch_submissions(username, limit).await?,
    ))
}

/// GET /api/v1/leetcode/problems
pub async fn handle_leetcode_problems(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<LeetCodeProblem>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_PROBLEM_LIMIT);
    Ok(Json(state.leetcode.fetch_problems(limit).await?))
}

/// GET /api/v1/leetcode/daily
///
/// Returns `null` when the daily challenge is unavailable.
pub async fn handle_leetcode_daily(
    State(state): State<AppState>,
) -> Json<Option<LeetCodeProblem>> {
    Json(state.leetcode.fetch_daily_challenge().await)
}
