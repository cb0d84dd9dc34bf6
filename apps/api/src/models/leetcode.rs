use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeetCodeUserProfile {
    pub username: String,
    pub real_name: String,
    pub profile_url: String,
    pub avatar_url: String,
    pub ranking: u64,
    pub reputation: u64,
    pub star_rating: f64,
}

/// Solved counts per difficulty plus profile-level numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeetCodeStats {
    pub total_solved: u64,
    pub total_questions: u64,
    pub easy_solved: u64,
    pub easy_total: u64,
    pub medium_solved: u64,
    pub medium_total: u64,
    pub hard_solved: u64,
    pub hard_total: u64,
    pub acceptance_rate: f64,
    pub ranking: u64,
    pub reputation: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeetCodeSubmission {
    pub id: String,
    pub title: String,
    pub title_slug: String,
    pub submitted_at: Option<DateTime<Utc>>,
    pub status: String,
    pub language: String,
    pub runtime: String,
    pub memory: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Maps the numeric level used by the problem list (1, 2, 3).
    pub fn from_level(level: u64) -> Self {
        match level {
            1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// Maps the label used by the daily challenge ("Easy", "Medium", "Hard").
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeetCodeProblem {
    pub id: String,
    pub title: String,
    pub title_slug: String,
    pub difficulty: Difficulty,
    pub is_paid_only: bool,
    pub status: Option<String>,
    pub tags: Vec<String>,
    /// Percentage, 0–100.
    pub acceptance_rate: f64,
    pub url: String,
}
