use serde::{Deserialize, Serialize};

/// Lowest and highest match scores a candidate can carry.
pub const MIN_MATCH_SCORE: u8 = 0;
pub const MAX_MATCH_SCORE: u8 = 100;

/// One analysed resume, scored against the job description.
///
/// `match_score` is always within `MIN_MATCH_SCORE..=MAX_MATCH_SCORE`, and
/// `missing_skills` is always a list (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub name: String,
    pub match_score: u8,
    pub summary: String,
    pub missing_skills: Vec<String>,
}

impl CandidateResult {
    /// The sentinel record shown when the model output cannot be parsed.
    pub fn analysis_error() -> Self {
        Self {
            name: "Analysis Error".to_string(),
            match_score: 0,
            summary: "Unable to parse AI response. Please try again.".to_string(),
            missing_skills: vec!["Response parsing failed".to_string()],
        }
    }
}

/// Outcome of parsing the model output. Both variants carry renderable candidates,
/// so downstream code has a single path; `Fallback` always holds exactly the
/// `CandidateResult::analysis_error()` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(Vec<CandidateResult>),
    Fallback(Vec<CandidateResult>),
}

impl ParseOutcome {
    pub fn fallback() -> Self {
        ParseOutcome::Fallback(vec![CandidateResult::analysis_error()])
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseOutcome::Fallback(_))
    }

    pub fn into_candidates(self) -> Vec<CandidateResult> {
        match self {
            ParseOutcome::Parsed(c) | ParseOutcome::Fallback(c) => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_uses_wire_field_names() {
        let candidate = CandidateResult {
            name: "Alice".to_string(),
            match_score: 90,
            summary: "Strong Python background.".to_string(),
            missing_skills: vec![],
        };
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["match_score"], 90);
        assert!(value["missing_skills"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_fallback_outcome_holds_single_sentinel() {
        let outcome = ParseOutcome::fallback();
        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_candidates(), vec![CandidateResult::analysis_error()]);
    }
}
