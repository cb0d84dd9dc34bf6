//! LeetCode client backed by the community `leetcode-api` proxy.
//!
//! The proxy returns loosely shaped JSON, so payloads are read as
//! `serde_json::Value` and mapped field by field with zero/empty defaults.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::leetcode::{
    Difficulty, LeetCodeProblem, LeetCodeStats, LeetCodeSubmission, LeetCodeUserProfile,
};

const DEFAULT_AVATAR: &str = "https://assets.leetcode.com/users/default_avatar.jpg";
const SITE: &str = "https://leetcode.com";
pub const DEFAULT_SUBMISSION_LIMIT: usize = 10;
pub const DEFAULT_PROBLEM_LIMIT: usize = 20;

#[derive(Clone)]
pub struct LeetCodeClient {
    client: Client,
    base_url: String,
}

impl LeetCodeClient {
    pub fn new(base_url: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url,
        })
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<LeetCodeUserProfile, AppError> {
        let data = self.get(&format!("/user/{username}")).await?;
        Ok(profile_from_value(username, &data))
    }

    pub async fn fetch_stats(&self, username: &str) -> Result<LeetCodeStats, AppError> {
        let data = self.get(&format!("/user/{username}")).await?;
        Ok(stats_from_value(&data))
    }

    pub async fn fetch_submissions(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<LeetCodeSubmission>, AppError> {
        let data = self.get(&format!("/user/{username}/submissions")).await?;
        Ok(submissions_from_value(&data, limit))
    }

    pub async fn fetch_problems(&self, limit: usize) -> Result<Vec<LeetCodeProblem>, AppError> {
        let data = self.get("/problems").await?;
        Ok(problems_from_value(&data, limit))
    }

    /// Today's challenge, or `None` if it could not be fetched.
    pub async fn fetch_daily_challenge(&self) -> Option<LeetCodeProblem> {
        match self.get("/daily").await {
            Ok(data) => daily_from_value(&data),
            Err(e) => {
                warn!("Daily challenge unavailable: {e}");
                None
            }
        }
    }

    async fn get(&self, path: &str) -> Result<Value, AppError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("LeetCode request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("LeetCode resource {path} not found")));
        }
        if !status.is_success() {
            return Err(AppError::Upstream(format!("LeetCode API error: {status}")));
        }

        debug!("LeetCode {url} -> {status}");
        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Unexpected LeetCode payload: {e}")))
    }
}

fn str_field(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn u64_field(v: &Value, key: &str) -> u64 {
    v.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn f64_field(v: &Value, key: &str) -> f64 {
    v.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Ids arrive as either strings or numbers depending on the endpoint.
fn id_field(v: &Value, key: &str) -> String {
    match v.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn problem_url(slug: &str) -> String {
    format!("{SITE}/problems/{slug}/")
}

pub fn profile_from_value(username: &str, data: &Value) -> LeetCodeUserProfile {
    let profile = &data["profile"];
    let username = str_field(data, "username").unwrap_or_else(|| username.to_string());
    LeetCodeUserProfile {
        real_name: str_field(data, "realName")
            .or_else(|| str_field(profile, "realName"))
            .unwrap_or_else(|| username.clone()),
        profile_url: format!("{SITE}/{username}"),
        avatar_url: str_field(data, "avatar")
            .or_else(|| str_field(profile, "userAvatar"))
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        ranking: u64_field(profile, "ranking"),
        reputation: u64_field(profile, "reputation"),
        star_rating: data
            .get("starRating")
            .or_else(|| profile.get("starRating"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        username,
    }
}

/// Index 0 of the submission arrays is "All", then Easy, Medium, Hard.
pub fn stats_from_value(data: &Value) -> LeetCodeStats {
    let submit_stats = &data["submitStats"];
    let count = |list: &str, index: usize| u64_field(&submit_stats[list][index], "count");
    let profile = &data["profile"];

    LeetCodeStats {
        total_solved: count("acSubmissionNum", 0),
        total_questions: count("totalSubmissionNum", 0),
        easy_solved: count("acSubmissionNum", 1),
        easy_total: count("totalSubmissionNum", 1),
        medium_solved: count("acSubmissionNum", 2),
        medium_total: count("totalSubmissionNum", 2),
        hard_solved: count("acSubmissionNum", 3),
        hard_total: count("totalSubmissionNum", 3),
        acceptance_rate: f64_field(profile, "acceptanceRate"),
        ranking: u64_field(profile, "ranking"),
        reputation: u64_field(profile, "reputation"),
    }
}

pub fn submissions_from_value(data: &Value, limit: usize) -> Vec<LeetCodeSubmission> {
    let Some(list) = data.get("recentSubmissionList").and_then(Value::as_array) else {
        return Vec::new();
    };

    list.iter()
        .take(limit)
        .map(|s| {
            let title_slug = str_field(s, "titleSlug").unwrap_or_default();
            LeetCodeSubmission {
                id: id_field(s, "id"),
                title: str_field(s, "title").unwrap_or_default(),
                submitted_at: parse_timestamp(s.get("timestamp")),
                status: str_field(s, "statusDisplay").unwrap_or_default(),
                language: str_field(s, "lang").unwrap_or_default(),
                runtime: str_field(s, "runtime").unwrap_or_else(|| "N/A".to_string()),
                memory: str_field(s, "memory").unwrap_or_else(|| "N/A".to_string()),
                url: format!("{SITE}/problems/{title_slug}/submissions/"),
                title_slug,
            }
        })
        .collect()
}

/// Submission timestamps are unix seconds, usually sent as a string.
fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let secs = match value? {
        Value::String(s) => s.parse::<i64>().ok()?,
        Value::Number(n) => n.as_i64()?,
        _ => return None,
    };
    DateTime::from_timestamp(secs, 0)
}

pub fn problems_from_value(data: &Value, limit: usize) -> Vec<LeetCodeProblem> {
    let Some(pairs) = data.get("stat_status_pairs").and_then(Value::as_array) else {
        return Vec::new();
    };

    pairs
        .iter()
        .take(limit)
        .map(|pair| {
            let stat = &pair["stat"];
            let title_slug = str_field(stat, "question__title_slug").unwrap_or_default();
            let total_acs = f64_field(stat, "total_acs");
            let total_submitted = f64_field(stat, "total_submitted");
            LeetCodeProblem {
                id: id_field(stat, "question_id"),
                title: str_field(stat, "question__title").unwrap_or_default(),
                difficulty: Difficulty::from_level(u64_field(&pair["difficulty"], "level")),
                is_paid_only: pair
                    .get("paid_only")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                status: str_field(pair, "status"),
                tags: string_list(pair.get("tags")),
                acceptance_rate: if total_acs > 0.0 && total_submitted > 0.0 {
                    total_acs / total_submitted * 100.0
                } else {
                    0.0
                },
                url: problem_url(&title_slug),
                title_slug,
            }
        })
        .collect()
}

pub fn daily_from_value(data: &Value) -> Option<LeetCodeProblem> {
    let question = data.get("question")?;
    let title_slug = str_field(question, "titleSlug")?;
    let tags = question
        .get("topicTags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(|t| str_field(t, "name"))
                .collect()
        })
        .unwrap_or_default();

    Some(LeetCodeProblem {
        id: id_field(question, "questionId"),
        title: str_field(question, "title").unwrap_or_default(),
        difficulty: Difficulty::from_label(
            question
                .get("difficulty")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        ),
        is_paid_only: question
            .get("isPaidOnly")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        status: None,
        tags,
        acceptance_rate: f64_field(question, "acRate") * 100.0,
        url: problem_url(&title_slug),
        title_slug,
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
