//! Resume analysis pipeline.
//!
//! Flow: resume text → editor prompt → markup parse → scoring prompt on the
//! edited text → score normalization. Re-scoring and structuring reuse the
//! same normalizer on whatever text the caller reconciled.
//!
//! Every generator call is a single attempt; a failure ends the operation.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::models::resume::{Resume, ResumeContact, Section};
use crate::resume::prompts::{ANALYSIS_PROMPT, SCORING_PROMPT, STRUCTURE_PROMPT_TEMPLATE};
use crate::resume::score::{extract_json_object, normalize_score_response, ResumeScore};
use crate::suggestions::markup::{parse, ParsedDocument};

/// Output of one full analysis pass.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeAnalysis {
    /// Raw editor output, markup included. Fallback text when a reconstruction is blank.
    pub analyzed_text: String,
    pub document: ParsedDocument,
    pub score: ResumeScore,
}

/// Runs the editor and scoring passes over extracted resume text.
pub async fn analyze_resume(
    llm: &dyn TextGenerator,
    resume_text: &str,
) -> Result<ResumeAnalysis, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text content found in the resume.".to_string(),
        ));
    }

    let analyzed_text = llm
        .generate(ANALYSIS_PROMPT, Some(resume_text))
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

    let document = parse(&analyzed_text);
    info!(
        "Analysis produced {} segments and {} suggestions",
        document.segments.len(),
        document.suggestions.len()
    );

    // Scored on the edited text, markup included.
    let score = score_text(llm, &analyzed_text).await?;

    Ok(ResumeAnalysis {
        analyzed_text,
        document,
        score,
    })
}

/// Scores already-reconciled text.
pub async fn rescore_resume(
    llm: &dyn TextGenerator,
    resume_text: &str,
) -> Result<ResumeScore, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "No content available to re-score.".to_string(),
        ));
    }
    score_text(llm, resume_text).await
}

/// Turns reconciled text into a structured `Resume` for the builder.
///
/// A response that cannot be read as a contact plus a list of sections is a
/// hard failure; nothing partial is returned.
pub async fn structure_resume(
    llm: &dyn TextGenerator,
    resume_text: &str,
) -> Result<Resume, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "No content to transfer to builder.".to_string(),
        ));
    }

    let prompt = STRUCTURE_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{resume_text}", resume_text);

    let raw = llm
        .generate(&prompt, None)
        .await
        .map_err(|e| AppError::Llm(format!("Resume structuring failed: {e}")))?;

    let value = extract_json_object(&raw).map_err(|e| {
        AppError::Llm(format!("Failed to structure resume data from AI: {e}"))
    })?;

    let resume = resume_from_value(value, Utc::now().timestamp_millis())?;
    info!("Structured resume into {} sections", resume.sections.len());
    Ok(resume)
}

async fn score_text(llm: &dyn TextGenerator, text: &str) -> Result<ResumeScore, AppError> {
    let prompt = format!("{SCORING_PROMPT}\n\n{JSON_ONLY_INSTRUCTION}");
    let raw = llm
        .generate(&prompt, Some(text))
        .await
        .map_err(|e| AppError::Llm(format!("Resume scoring failed: {e}")))?;

    Ok(normalize_score_response(&raw).unwrap_or_else(|e| {
        warn!(
            "Could not normalize score response ({e}); using zero score. Output began: {:?}",
            raw.chars().take(100).collect::<String>()
        );
        ResumeScore::unscored()
    }))
}

/// Builds a `Resume` from the structuring response and assigns section ids
/// (`section-<millis>-<index>`).
fn resume_from_value(mut value: Value, stamp_millis: i64) -> Result<Resume, AppError> {
    let invalid =
        |what: &str| AppError::Llm(format!("Failed to structure resume data from AI: {what}"));

    let contact: ResumeContact = match value.get_mut("contact").map(Value::take) {
        None | Some(Value::Null) => ResumeContact::default(),
        Some(v @ Value::Object(_)) => {
            serde_json::from_value(v).map_err(|_| invalid("contact is malformed"))?
        }
        Some(_) => return Err(invalid("contact is not an object")),
    };

    let mut sections: Vec<Section> = match value.get_mut("sections").map(Value::take) {
        None | Some(Value::Null) => Vec::new(),
        Some(v @ Value::Array(_)) => {
            serde_json::from_value(v).map_err(|_| invalid("a section is malformed"))?
        }
        Some(_) => return Err(invalid("sections is not an array")),
    };

    for (index, section) in sections.iter_mut().enumerate() {
        section.id = format!("section-{stamp_millis}-{index}");
    }

    Ok(Resume { contact, sections })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Replays canned responses in order and records the prompts it saw.
    #[derive(Default)]
    pub(crate) struct ScriptedGenerator {
        responses: Mutex<VecDeque<Result<String, String>>>,
        pub(crate) calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl ScriptedGenerator {
        pub(crate) fn new(responses: &[&str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().map(|r| Ok(r.to_string())).collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from([Err(message.to_string())])),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str, document: Option<&str>) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), document.map(str::to_string)));
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(LlmError::Api {
                    status: 503,
                    message,
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }

    const EDITED: &str = "Jane Doe\nI [worked as a dev]{Served as a Software Engineer} at Acme.";
    const SCORE: &str = r#"```json
{"overallScore": 75, "criteria": [{"name": "Content Quality", "score": 75, "feedback": "Solid", "improvements": ["Add metrics"]}]}
```"#;

    #[tokio::test]
    async fn test_analyze_parses_and_scores_edited_text() {
        let llm = ScriptedGenerator::new(&[EDITED, SCORE]);
        let analysis = analyze_resume(&llm, "Jane Doe\nI worked as a dev at Acme.")
            .await
            .unwrap();

        assert_eq!(analysis.analyzed_text, EDITED);
        assert_eq!(analysis.document.segments.len(), 3);
        assert_eq!(analysis.document.suggestions.len(), 1);
        assert_eq!(analysis.score.overall_score, 75.0);

        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls[0].0, ANALYSIS_PROMPT);
        assert_eq!(
            calls[0].1.as_deref(),
            Some("Jane Doe\nI worked as a dev at Acme.")
        );
        assert!(calls[1].0.starts_with(SCORING_PROMPT));
        assert_eq!(calls[1].1.as_deref(), Some(EDITED));
    }

    #[tokio::test]
    async fn test_unreadable_score_falls_back_to_zero() {
        let llm = ScriptedGenerator::new(&[EDITED, "Sorry, I can't rate this."]);
        let analysis = analyze_resume(&llm, "resume").await.unwrap();
        assert_eq!(analysis.score, ResumeScore::unscored());
        assert_eq!(analysis.document.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_resume_is_rejected_without_calling_llm() {
        let llm = ScriptedGenerator::new(&[]);
        let err = analyze_resume(&llm, "  \n ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(llm.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generator_failure_surfaces_as_llm_error() {
        let llm = ScriptedGenerator::failing("overloaded");
        let err = analyze_resume(&llm, "resume").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(llm.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rescore() {
        let llm = ScriptedGenerator::new(&[SCORE]);
        let score = rescore_resume(&llm, "I Served as a Software Engineer at Acme.")
            .await
            .unwrap();
        assert_eq!(score.criteria[0].name, "Content Quality");

        let err = rescore_resume(&llm, "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_structure_assigns_section_ids() {
        let raw = r#"Here you go: {"contact": {"name": "Jane Doe", "email": "jane@example.com"}, "sections": [
            {"type": "experience", "title": "Software Engineer", "subtitle": "Acme", "content": "Built APIs", "startDate": "01/2021", "endDate": "Present"},
            {"type": "skills", "title": "Skills", "content": "Rust"}
        ]}"#;
        let llm = ScriptedGenerator::new(&[raw]);
        let resume = structure_resume(&llm, "Jane Doe ...").await.unwrap();

        assert_eq!(resume.contact.name, "Jane Doe");
        assert_eq!(resume.contact.phone, "");
        assert_eq!(resume.sections.len(), 2);
        assert!(resume.sections[0].id.starts_with("section-"));
        assert!(resume.sections[1].id.ends_with("-1"));
        assert_ne!(resume.sections[0].id, resume.sections[1].id);

        let calls = llm.calls.lock().unwrap();
        assert!(calls[0].0.ends_with("Resume content:\nJane Doe ..."));
        assert!(calls[0].1.is_none());
    }

    #[tokio::test]
    async fn test_structure_rejects_unusable_response() {
        let llm = ScriptedGenerator::new(&["I could not parse that resume."]);
        let err = structure_resume(&llm, "text").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_resume_from_value_defaults_missing_parts() {
        let resume = resume_from_value(serde_json::json!({}), 7).unwrap();
        assert_eq!(resume, Resume::default());
    }

    #[test]
    fn test_resume_from_value_rejects_wrong_shapes() {
        for value in [
            serde_json::json!({"contact": "Jane", "sections": []}),
            serde_json::json!({"contact": {}, "sections": {"type": "skills"}}),
            serde_json::json!({"contact": {}, "sections": ["just text"]}),
        ] {
            assert!(resume_from_value(value, 7).is_err());
        }
    }

    #[test]
    fn test_resume_from_value_ids() {
        let resume = resume_from_value(
            serde_json::json!({"sections": [{"type": "education", "title": "BSc"}]}),
            1700000000000,
        )
        .unwrap();
        assert_eq!(resume.sections[0].id, "section-1700000000000-0");
    }
}
