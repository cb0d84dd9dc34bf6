pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume analysis
        .route("/api/v1/resume/analyze", post(resume::handle_analyze_upload))
        .route(
            "/api/v1/resume/analyze/text",
            post(resume::handle_analyze_text),
        )
        .route(
            "/api/v1/resume/analyses/:id",
            get(resume::handle_get_analysis).delete(resume::handle_delete_analysis),
        )
        .route(
            "/api/v1/resume/analyses/:id/suggestions/:suggestion_id",
            patch(resume::handle_decide),
        )
        .route(
            "/api/v1/resume/analyses/:id/text",
            get(resume::handle_current_text),
        )
        .route(
            "/api/v1/resume/analyses/:id/rescore",
            post(resume::handle_rescore_analysis),
        )
        .route(
            "/api/v1/resume/analyses/:id/structure",
            post(resume::handle_structure_analysis),
        )
        // Resume builder
        .route("/api/v1/resume/score", post(resume::handle_score))
        .route("/api/v1/resume/structure", post(resume::handle_structure))
        // Dashboard data sources
        .route("/api/v1/github/:username", get(dashboard::handle_github_user))
        .route(
            "/api/v1/github/:username/repos",
            get(dashboard::handle_github_repos),
        )
        .route(
            "/api/v1/leetcode/problems",
            get(dashboard::handle_leetcode_problems),
        )
        .route("/api/v1/leetcode/daily", get(dashboard::handle_leetcode_daily))
        .route(
            "/api/v1/leetcode/:username",
            get(dashboard::handle_leetcode_profile),
        )
        .route(
            "/api/v1/leetcode/:username/stats",
            get(dashboard::handle_leetcode_stats),
        )
        .route(
            "/api/v1/leetcode/:username/submissions",
            get(dashboard::handle_leetcode_submissions),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
