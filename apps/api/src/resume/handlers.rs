//! Axum route handlers for the resume tool.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::resume::analysis::{analyze_resume, rescore_resume, structure_resume};
use crate::resume::pdf;
use crate::resume::score::ResumeScore;
use crate::resume::session::AnalysisSession;
use crate::state::AppState;
use crate::suggestions::markup::{Segment, SuggestionMap};

/// Multipart field carrying the uploaded resume.
const PDF_FIELD: &str = "pdfFile";
const PDF_CONTENT_TYPE: &str = "application/pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub accept: bool,
}

/// Either raw text or a builder document; text wins when both are present.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: Option<String>,
    pub resume: Option<Resume>,
}

#[derive(Debug, Deserialize)]
pub struct StructureRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisView {
    pub analysis_id: Uuid,
    pub analyzed_text: String,
    pub segments: Vec<Segment>,
    pub suggestions: SuggestionMap,
    pub resume_score: ResumeScore,
}

impl From<&AnalysisSession> for AnalysisView {
    fn from(session: &AnalysisSession) -> Self {
        Self {
            analysis_id: session.id,
            analyzed_text: session.analyzed_text.clone(),
            segments: session.document.segments.clone(),
            suggestions: session.document.suggestions.clone(),
            resume_score: session.score.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/analyze
///
/// Multipart upload with a `pdfFile` field. Extracts the text, runs the
/// editor and scoring passes, and opens a new analysis session.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AnalysisView>), AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }
        if field.content_type() != Some(PDF_CONTENT_TYPE) {
            return Err(AppError::Validation(
                "Invalid file type. Please upload a PDF.".to_string(),
            ));
        }
        upload = Some(
            field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?,
        );
        break;
    }

    let upload =
        upload.ok_or_else(|| AppError::Validation("No PDF file uploaded.".to_string()))?;
    let text = pdf::extract_text(upload).await?;
    start_analysis(&state, &text).await
}

/// POST /api/v1/resume/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<(StatusCode, Json<AnalysisView>), AppError> {
    start_analysis(&state, &request.resume_text).await
}

async fn start_analysis(
    state: &AppState,
    resume_text: &str,
) -> Result<(StatusCode, Json<AnalysisView>), AppError> {
    let analysis = analyze_resume(state.llm.as_ref(), resume_text).await?;
    let session = AnalysisSession::new(analysis);
    let view = AnalysisView::from(&session);
    let id = state.analyses.insert(session).await;
    info!("Opened analysis {id}");
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/resume/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisView>, AppError> {
    let session = load(&state, id).await?;
    Ok(Json(AnalysisView::from(&session)))
}

/// DELETE /api/v1/resume/analyses/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .analyses
        .remove(id)
        .await
        .ok_or_else(|| not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/resume/analyses/:id/suggestions/:suggestion_id
///
/// Accepts or rejects one suggestion. An unknown suggestion id changes nothing.
pub async fn handle_decide(
    State(state): State<AppState>,
    Path((id, suggestion_id)): Path<(Uuid, String)>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<AnalysisView>, AppError> {
    let (known, view) = state
        .analyses
        .update(id, |session| {
            let known = session.decide(&suggestion_id, request.accept);
            (known, AnalysisView::from(&*session))
        })
        .await
        .ok_or_else(|| not_found(id))?;

    if !known {
        debug!("Ignoring decision for unknown suggestion {suggestion_id} on analysis {id}");
    }
    Ok(Json(view))
}

/// GET /api/v1/resume/analyses/:id/text
pub async fn handle_current_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TextResponse>, AppError> {
    let session = load(&state, id).await?;
    let text = session
        .current_text()
        .ok_or_else(|| AppError::UnprocessableEntity("Analysis has no content.".to_string()))?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/v1/resume/analyses/:id/rescore
///
/// Scores the reconciled text and stores the new score on the session.
pub async fn handle_rescore_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeScore>, AppError> {
    let session = load(&state, id).await?;
    let text = session.current_text().unwrap_or_default();

    // The lock is not held across the LLM call.
    let score = rescore_resume(state.llm.as_ref(), &text).await?;

    state
        .analyses
        .update(id, |session| session.score = score.clone())
        .await
        .ok_or_else(|| not_found(id))?;
    Ok(Json(score))
}

/// POST /api/v1/resume/analyses/:id/structure
pub async fn handle_structure_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    let session = load(&state, id).await?;
    let text = session.current_text().unwrap_or_default();
    Ok(Json(structure_resume(state.llm.as_ref(), &text).await?))
}

/// POST /api/v1/resume/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ResumeScore>, AppError> {
    let text = match (request.resume_text, request.resume) {
        (Some(text), _) if !text.trim().is_empty() => text,
        (_, Some(resume)) => resume.to_plain_text(),
        _ => String::new(),
    };
    Ok(Json(rescore_resume(state.llm.as_ref(), &text).await?))
}

/// POST /api/v1/resume/structure
pub async fn handle_structure(
    State(state): State<AppState>,
    Json(request): Json<StructureRequest>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(
        structure_resume(state.llm.as_ref(), &request.resume_text).await?,
    ))
}

async fn load(state: &AppState, id: Uuid) -> Result<AnalysisSession, AppError> {
    state.analyses.get(id).await.ok_or_else(|| not_found(id))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Analysis {id} not found"))
}
