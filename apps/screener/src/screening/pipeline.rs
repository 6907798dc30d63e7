//! Screening pipeline: orchestrates one analysis request.
//!
//! Flow: validate input → per file (format check → optional store upload → stage →
//!       extract → clean) → build_prompt → run_analysis → parse_candidates.
//!
//! Files are processed one at a time, in upload order. Per-file failures become
//! warnings; only request-level problems return `AppError`.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{clean_text, extract_text, DocumentFormat, ExtractError};
use crate::llm_client::AnalysisService;
use crate::models::candidate::CandidateResult;
use crate::models::resume::{FileWarning, ResumeDocument, WarningKind};
use crate::screening::export::{to_table_rows, TableRow};
use crate::screening::parser::parse_candidates;
use crate::screening::prompt_builder::build_prompt;
use crate::screening::session::ScreeningSession;
use crate::storage::{resume_key, ResumeStore};

/// Everything the client needs to render one screening.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub screening_id: Uuid,
    pub candidates: Vec<CandidateResult>,
    pub table: Vec<TableRow>,
    pub warnings: Vec<FileWarning>,
    /// True when the model output could not be parsed and `candidates` holds the
    /// fallback record.
    pub degraded: bool,
    pub resumes_analyzed: usize,
}

pub async fn run_screening(
    session: &ScreeningSession,
    analysis: &dyn AnalysisService,
    store: Option<&ResumeStore>,
) -> Result<ScreeningReport, AppError> {
    let job_description = session
        .job_description()
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("A job description is required".to_string()))?;

    if session.uploads().is_empty() {
        return Err(AppError::InvalidInput(
            "Upload at least one resume (PDF or DOCX)".to_string(),
        ));
    }

    let (resumes, warnings) = extract_resumes(session, store).await?;

    if resumes.is_empty() {
        return Err(AppError::InvalidInput(
            "No text could be extracted from uploaded files".to_string(),
        ));
    }

    info!(
        "Screening {}: analyzing {} resumes ({} skipped)",
        session.id(),
        resumes.len(),
        session.uploads().len() - resumes.len()
    );

    let prompt = build_prompt(&resumes, job_description)?;
    let raw_output = analysis
        .run_analysis(&prompt)
        .await
        .map_err(|e| AppError::AnalysisService(e.to_string()))?;

    let outcome = parse_candidates(&raw_output);
    let degraded = outcome.is_fallback();
    if degraded {
        warn!("Screening {}: model output unparsable, returning fallback", session.id());
    }
    let candidates = outcome.into_candidates();

    info!(
        "Screening {} complete: {} candidates",
        session.id(),
        candidates.len()
    );

    Ok(ScreeningReport {
        screening_id: session.id(),
        table: to_table_rows(&candidates),
        candidates,
        warnings,
        degraded,
        resumes_analyzed: resumes.len(),
    })
}

/// Turns every upload into a `ResumeDocument`, collecting a warning for each file
/// that cannot be used. Only staging-directory IO failures abort the request.
async fn extract_resumes(
    session: &ScreeningSession,
    store: Option<&ResumeStore>,
) -> Result<(Vec<ResumeDocument>, Vec<FileWarning>), AppError> {
    let mut resumes = Vec::with_capacity(session.uploads().len());
    let mut warnings = Vec::new();

    for (index, upload) in session.uploads().iter().enumerate() {
        let format = match DocumentFormat::from_filename(&upload.filename) {
            Ok(format) => format,
            Err(e) => {
                warnings.push(file_warning(&upload.filename, &e));
                continue;
            }
        };

        if let Some(store) = store {
            let key = resume_key(session.id(), index, &upload.filename);
            if let Err(e) = store.upload_resume(&key, format, upload.data.clone()).await {
                warnings.push(FileWarning {
                    filename: upload.filename.clone(),
                    kind: WarningKind::StorageFailed,
                    message: e.to_string(),
                });
            }
        }

        let path = session.materialize(index, upload, format.extension()).await?;
        let extension = format.extension();
        let extracted = tokio::task::spawn_blocking(move || extract_text(&path, extension))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))?;

        match extracted.map(|text| clean_text(&text)) {
            Ok(text) if text.is_empty() => warnings.push(FileWarning {
                filename: upload.filename.clone(),
                kind: WarningKind::ExtractionFailed,
                message: format!("No text found in {}", upload.filename),
            }),
            Ok(text) => resumes.push(ResumeDocument::new(upload.filename.clone(), text)),
            Err(e) => warnings.push(file_warning(&upload.filename, &e)),
        }
    }

    for warning in &warnings {
        warn!("Skipped or degraded {}: {}", warning.filename, warning.message);
    }

    Ok((resumes, warnings))
}

/// Errors name the staged file; the warning reports the client's filename instead.
fn file_warning(filename: &str, err: &ExtractError) -> FileWarning {
    let (kind, message) = match err {
        ExtractError::UnsupportedFormat(ext) => (
            WarningKind::UnsupportedFormat,
            format!("Unsupported file type: {ext}"),
        ),
        ExtractError::Extraction { message, .. } => (
            WarningKind::ExtractionFailed,
            format!("Could not extract text from {filename}: {message}"),
        ),
    };
    FileWarning {
        filename: filename.to_string(),
        kind,
        message,
    }
}
