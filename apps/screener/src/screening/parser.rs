//! Response Parser / Validator: recovers the candidate array from free-form model
//! output and normalises every record into a `CandidateResult`.
//!
//! Never fails: unparsable output yields `ParseOutcome::Fallback`.
//!
//! Algorithm:
//! 1. Take the substring from the first `[` to the last `]` (inclusive) and parse it.
//! 2. If that is missing or invalid, parse the whole text.
//! 3. If neither yields a JSON array, return the fallback record.
//! 4. Otherwise validate each element (see `validate_candidates`).

use serde_json::Value;
use tracing::warn;

use crate::models::candidate::{CandidateResult, ParseOutcome, MAX_MATCH_SCORE, MIN_MATCH_SCORE};

/// Number of candidates the prompt asks for. Not enforced here.
pub const REQUESTED_CANDIDATES: usize = 5;

const DEFAULT_NAME: &str = "Unknown";
const DEFAULT_SUMMARY: &str = "No summary available";

pub fn parse_candidates(raw_text: &str) -> ParseOutcome {
    let parsed = bracketed_slice(raw_text)
        .and_then(|slice| serde_json::from_str::<Value>(slice).ok())
        .or_else(|| serde_json::from_str::<Value>(raw_text).ok());

    match parsed {
        Some(Value::Array(items)) => {
            let candidates = validate_candidates(&items);
            if candidates.len() > REQUESTED_CANDIDATES {
                warn!(
                    "Model returned {} candidates (asked for at most {REQUESTED_CANDIDATES}); keeping all",
                    candidates.len()
                );
            }
            ParseOutcome::Parsed(candidates)
        }
        Some(other) => {
            warn!("Model output parsed as JSON {} instead of an array", json_kind(&other));
            ParseOutcome::fallback()
        }
        None => {
            warn!(
                "Model output is not valid JSON: {:?}",
                raw_text.chars().take(80).collect::<String>()
            );
            ParseOutcome::fallback()
        }
    }
}

/// Normalises each object element into a `CandidateResult`; other elements are
/// dropped without affecting the rest of the batch.
pub fn validate_candidates(items: &[Value]) -> Vec<CandidateResult> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| CandidateResult {
            name: coerce_text(obj.get("name")).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            match_score: coerce_score(obj.get("match_score")),
            summary: coerce_text(obj.get("summary")).unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            missing_skills: coerce_skills(obj.get("missing_skills")),
        })
        .collect()
}

/// The outermost `[ ... ]` span, if a `[` precedes the last `]`.
fn bracketed_slice(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Integers, floats (truncated toward zero) and numeric strings are clamped into
/// the score range; everything else scores 0.
fn coerce_score(value: Option<&Value>) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(truncate_float)),
        Some(Value::String(s)) => parse_numeric_str(s.trim()),
        _ => None,
    };

    raw.map(|score| score.clamp(MIN_MATCH_SCORE as i64, MAX_MATCH_SCORE as i64) as u8)
        .unwrap_or(MIN_MATCH_SCORE)
}

fn parse_numeric_str(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| !f.is_nan())
            .map(truncate_float)
    })
}

/// `as` saturates out-of-range and infinite floats, which the clamp then absorbs.
fn truncate_float(f: f64) -> i64 {
    f.trunc() as i64
}

/// Strings pass through; numbers and booleans use their JSON text; anything else
/// (null, arrays, objects, absent) has no text.
fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_skills(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| coerce_text(Some(v))).collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
