use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Extracts the text layer of an uploaded PDF on the blocking pool.
pub async fn extract_text(pdf: Bytes) -> Result<String, AppError> {
    let size = pdf.len();
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&pdf).map_err(|e| format!("{e:?}"))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
    .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;

    debug!("Extracted {} chars from {} byte PDF", text.len(), size);

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text content found in the PDF.".to_string(),
        ));
    }
    Ok(text)
}
