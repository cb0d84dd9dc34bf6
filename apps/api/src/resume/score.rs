//! Score normalization: best-effort extraction of a JSON object from free-form
//! model output.
//!
//! The model is asked for a bare JSON object but routinely wraps it in code
//! fences or surrounds it with prose. Extraction is a heuristic, not a
//! validating parser:
//! 1. strip every code-fence marker (with or without a language tag);
//! 2. anchor on a `{` whose first key is `overallScore` or `contact` and take
//!    the span up to its matching `}` (brace counting ignores JSON strings);
//! 3. otherwise take the first `{` through the last `}`;
//! 4. parse the slice with serde_json.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Keys that mark the start of the object we actually asked for.
const ANCHOR_KEYS: &[&str] = &["overallScore", "contact"];

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("JSON object in model output has no matching closing brace")]
    Unbalanced,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected score shape: {0}")]
    InvalidShape(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreCriterion {
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    /// 0 – 100
    #[serde(deserialize_with = "or_default")]
    pub score: f64,
    #[serde(deserialize_with = "or_default")]
    pub feedback: String,
    #[serde(deserialize_with = "or_default")]
    pub improvements: Vec<String>,
}

/// Reads `null` or a value of the wrong type as the field's default.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeScore {
    /// 0 – 100. Documented as the mean of the criteria, passed through unverified.
    pub overall_score: f64,
    #[serde(default)]
    pub criteria: Vec<ScoreCriterion>,
}

impl ResumeScore {
    /// The state shown when a score could not be produced.
    pub fn unscored() -> Self {
        Self::default()
    }
}

/// Extracts and parses the JSON object embedded in `raw`.
pub fn extract_json_object(raw: &str) -> Result<Value, NormalizeError> {
    let cleaned = strip_code_fences(raw);
    let cleaned = cleaned.trim();

    let slice = match find_anchored_start(cleaned) {
        Some(start) => {
            let end = matching_brace(cleaned, start).ok_or(NormalizeError::Unbalanced)?;
            &cleaned[start..=end]
        }
        None => match (cleaned.find('{'), cleaned.rfind('}')) {
            (Some(start), Some(end)) if end > start => &cleaned[start..=end],
            _ => return Err(NormalizeError::NoJsonObject),
        },
    };

    Ok(serde_json::from_str(slice)?)
}

/// Turns raw scoring output into a `ResumeScore`.
///
/// Callers treat any error as "could not score" and fall back to
/// `ResumeScore::unscored()`.
pub fn normalize_score_response(raw: &str) -> Result<ResumeScore, NormalizeError> {
    let value = extract_json_object(raw)?;

    if !value.get("overallScore").is_some_and(Value::is_number) {
        return Err(NormalizeError::InvalidShape("overallScore is not a number"));
    }
    if !value.get("criteria").is_some_and(Value::is_array) {
        return Err(NormalizeError::InvalidShape("criteria is not an array"));
    }

    Ok(serde_json::from_value(value)?)
}

/// Removes ``` markers, an optional language tag right after them, and the
/// line break that follows.
fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 3..];
        let tag_len = after
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after.len());
        let after = &after[tag_len..];
        rest = after
            .strip_prefix("\r\n")
            .or_else(|| after.strip_prefix('\n'))
            .unwrap_or(after);
    }

    out.push_str(rest);
    out
}

/// Position of the first `{` that opens an object keyed by one of `ANCHOR_KEYS`.
fn find_anchored_start(text: &str) -> Option<usize> {
    text.match_indices('{')
        .map(|(i, _)| i)
        .find(|&i| opens_anchor_key(&text[i + 1..]))
}

fn opens_anchor_key(after_brace: &str) -> bool {
    let rest = after_brace.trim_start();
    let Some(rest) = rest.strip_prefix(is_quote) else {
        return false;
    };
    ANCHOR_KEYS.iter().any(|key| {
        rest.strip_prefix(*key)
            .is_some_and(|tail| tail.starts_with(is_quote))
    })
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Index of the `}` closing the `{` at `start`, counting braces naively.
fn matching_brace(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_score_with_leading_prose() {
        let raw = "Here is the result:\n```json\n{\"overallScore\": 82, \"criteria\": [{\"name\":\"X\",\"score\":80,\"feedback\":\"ok\",\"improvements\":[\"a\"]}]}\n```";
        let score = normalize_score_response(raw).unwrap();
        assert_eq!(score.overall_score, 82.0);
        assert_eq!(score.criteria.len(), 1);
        assert_eq!(score.criteria[0].name, "X");
        assert_eq!(score.criteria[0].score, 80.0);
        assert_eq!(score.criteria[0].improvements, vec!["a".to_string()]);
    }

    #[test]
    fn test_fence_without_language_tag() {
        let raw = "```\n{\"overallScore\": 64, \"criteria\": []}\n```";
        assert_eq!(normalize_score_response(raw).unwrap().overall_score, 64.0);
    }

    #[test]
    fn test_anchor_skips_unrelated_braces_in_prose() {
        let raw = "Scores use {0-100}. {\n  \"overallScore\": 70,\n  \"criteria\": []\n} Hope this {helps}.";
        let score = normalize_score_response(raw).unwrap();
        assert_eq!(score.overall_score, 70.0);
        assert!(score.criteria.is_empty());
    }

    #[test]
    fn test_contact_anchor_for_structured_resume() {
        let raw = "{draft} ```json\n{\"contact\": {\"name\": \"Jane\"}, \"sections\": []}\n``` done";
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value["contact"]["name"], "Jane");
        assert!(value["sections"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_falls_back_to_outermost_braces() {
        let value = extract_json_object("Result: {\"score\": {\"total\": 1}} end").unwrap();
        assert_eq!(value["score"]["total"], 1);
    }

    #[test]
    fn test_overall_score_is_passed_through() {
        let raw = r#"{"overallScore": 99, "criteria": [{"name": "A", "score": 10}, {"name": "B", "score": 20}]}"#;
        let score = normalize_score_response(raw).unwrap();
        assert_eq!(score.overall_score, 99.0);
        assert_eq!(score.criteria[1].feedback, "");
        assert!(score.criteria[1].improvements.is_empty());
    }

    #[test]
    fn test_null_and_mistyped_criterion_fields_default() {
        let raw = r#"{"overallScore": 82, "criteria": [
            {"name": "X", "score": 80, "feedback": null, "improvements": null},
            {"name": null, "score": "80", "feedback": 3, "improvements": ["Add metrics"]}
        ]}"#;
        let score = normalize_score_response(raw).unwrap();
        assert_eq!(score.overall_score, 82.0);
        assert_eq!(score.criteria.len(), 2);
        assert_eq!(score.criteria[0].score, 80.0);
        assert_eq!(score.criteria[0].feedback, "");
        assert!(score.criteria[0].improvements.is_empty());
        assert_eq!(score.criteria[1].name, "");
        assert_eq!(score.criteria[1].score, 0.0);
        assert_eq!(score.criteria[1].feedback, "");
        assert_eq!(score.criteria[1].improvements, vec!["Add metrics".to_string()]);
    }

    #[test]
    fn test_no_json_object() {
        assert!(matches!(
            normalize_score_response("I cannot score this resume."),
            Err(NormalizeError::NoJsonObject)
        ));
        assert!(matches!(
            extract_json_object("} backwards {"),
            Err(NormalizeError::NoJsonObject)
        ));
    }

    #[test]
    fn test_unbalanced_anchored_object() {
        assert!(matches!(
            normalize_score_response("{\"overallScore\": 5, \"criteria\": [{\"name\": \"A\""),
            Err(NormalizeError::Unbalanced)
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            normalize_score_response("{\"overallScore\": 5,, \"criteria\": []}"),
            Err(NormalizeError::Json(_))
        ));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(matches!(
            normalize_score_response("{\"overallScore\": \"82\", \"criteria\": []}"),
            Err(NormalizeError::InvalidShape(_))
        ));
        assert!(matches!(
            normalize_score_response("{\"overallScore\": 82}"),
            Err(NormalizeError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_closing_brace_inside_string_defeats_heuristic() {
        // Brace counting does not understand JSON strings; this is accepted behavior.
        let raw = r#"{"overallScore": 50, "criteria": [{"name": "A", "feedback": "smiley :}"}]}"#;
        assert!(matches!(
            normalize_score_response(raw),
            Err(NormalizeError::Json(_))
        ));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}\n");
        assert_eq!(strip_code_fences("a ```\r\nb``` c"), "a b c");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }

    #[test]
    fn test_unscored_is_zero_and_empty() {
        let score = ResumeScore::unscored();
        assert_eq!(score.overall_score, 0.0);
        assert!(score.criteria.is_empty());
        assert_eq!(
            serde_json::to_value(&score).unwrap(),
            serde_json::json!({"overallScore": 0.0, "criteria": []})
        );
    }
}
