//! Result export: the display table and its CSV download.

use anyhow::Context;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::candidate::CandidateResult;

pub const CSV_FILENAME: &str = "resume_analysis_results.csv";
pub const TABLE_HEADERS: [&str; 4] = ["Name", "Match Score", "Summary", "Missing Skills"];

/// One rendered row of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Name")]
    pub name: String,
    /// Rendered as `N/100`.
    #[serde(rename = "Match Score")]
    pub match_score: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    /// Comma-joined.
    #[serde(rename = "Missing Skills")]
    pub missing_skills: String,
}

impl From<&CandidateResult> for TableRow {
    fn from(candidate: &CandidateResult) -> Self {
        Self {
            name: candidate.name.clone(),
            match_score: format!("{}/100", candidate.match_score),
            summary: candidate.summary.clone(),
            missing_skills: candidate.missing_skills.join(", "),
        }
    }
}

pub fn to_table_rows(candidates: &[CandidateResult]) -> Vec<TableRow> {
    candidates.iter().map(TableRow::from).collect()
}

/// Serializes the table as CSV: header row, then one quoted-as-needed row per candidate.
pub fn to_csv(candidates: &[CandidateResult]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(TABLE_HEADERS)
        .context("Failed to write CSV header")?;
    for row in to_table_rows(candidates) {
        writer
            .write_record([
                &row.name,
                &row.match_score,
                &row.summary,
                &row.missing_skills,
            ])
            .context("Failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))?;
    let csv = String::from_utf8(bytes).context("CSV output is not UTF-8")?;
    Ok(csv)
}
