// Read-only profile data for the developer dashboard.
// Each source is a thin client over a public REST API; failures are surfaced
// once to the caller, never retried or replaced with placeholder data.

pub mod github;
pub mod handlers;
pub mod leetcode;

use crate::errors::AppError;

const MAX_HANDLE_LEN: usize = 64;

/// Rejects handles that could not be a GitHub/LeetCode username, so they are
/// never spliced into an upstream URL.
pub fn validate_handle(handle: &str) -> Result<&str, AppError> {
    let valid = !handle.is_empty()
        && handle.len() <= MAX_HANDLE_LEN
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if valid {
        Ok(handle)
    } else {
        Err(AppError::Validation(format!("Invalid username: {handle:?}")))
    }
}
