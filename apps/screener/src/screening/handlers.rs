//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::screening::export::{to_csv, CSV_FILENAME};
use crate::screening::parser::validate_candidates;
use crate::screening::pipeline::{run_screening, ScreeningReport};
use crate::screening::session::ScreeningSession;
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Candidates as previously returned by the analyze endpoint. Re-validated before
/// export so the CSV always satisfies the score and skills invariants.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub candidates: Vec<Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Multipart form: one `job_description` text field and one or more `resumes`
/// files. Runs the full pipeline and returns the ranked shortlist.
pub async fn handle_screen(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let mut session = ScreeningSession::new()?;

    let result = match read_form(&mut session, multipart).await {
        Ok(()) => run_screening(&session, state.analysis.as_ref(), state.store.as_ref()).await,
        Err(e) => Err(e),
    };

    session.close();
    result.map(Json)
}

/// POST /api/v1/screenings/export
///
/// Renders candidates as a CSV download.
pub async fn handle_export_csv(
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let candidates = validate_candidates(&request.candidates);
    let csv = to_csv(&candidates)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

/// Moves the multipart fields into the session. Unknown fields are drained and ignored.
async fn read_form(session: &mut ScreeningSession, mut multipart: Multipart) -> Result<(), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            JOB_DESCRIPTION_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Unreadable job description: {e}")))?;
                session.set_job_description(text);
            }
            RESUMES_FIELD => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Unreadable upload {filename}: {e}")))?;
                session.add_upload(filename, data);
            }
            _ => {
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?;
            }
        }
    }
    Ok(())
}
