//! Prompt Builder: assembles the single analysis prompt sent to the LLM.

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::screening::prompts::{
    RESUMES_HEADING, SCREENING_INSTRUCTIONS, SCREENING_PREAMBLE, TRUNCATION_MARKER,
};

/// Maximum number of characters of each resume included in the prompt.
pub const MAX_RESUME_CHARS: usize = 2000;

/// Builds the analysis prompt: preamble, verbatim job description, one labelled
/// block per resume in input order, then the output contract.
///
/// Each resume contributes at most `MAX_RESUME_CHARS` characters followed by the
/// truncation marker. Pure and deterministic.
pub fn build_prompt(resumes: &[ResumeDocument], job_description: &str) -> Result<String, AppError> {
    if resumes.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one resume is required to build an analysis prompt".to_string(),
        ));
    }

    let mut prompt = String::with_capacity(
        SCREENING_PREAMBLE.len()
            + job_description.len()
            + RESUMES_HEADING.len()
            + resumes.len() * (MAX_RESUME_CHARS + 64)
            + SCREENING_INSTRUCTIONS.len(),
    );

    prompt.push_str(SCREENING_PREAMBLE);
    prompt.push_str(job_description);
    prompt.push_str(RESUMES_HEADING);

    for (i, resume) in resumes.iter().enumerate() {
        prompt.push_str(&format!("\n--- RESUME {}: {} ---\n", i + 1, resume.filename));
        prompt.push_str(truncate_chars(&resume.raw_text, MAX_RESUME_CHARS));
        prompt.push_str(TRUNCATION_MARKER);
        prompt.push('\n');
    }

    prompt.push_str(SCREENING_INSTRUCTIONS);
    Ok(prompt)
}

/// Returns the prefix of `text` holding at most `max_chars` characters, never
/// splitting a multi-byte character.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Senior Backend Engineer. Required: 3+ years Python, AWS. Nice to have: Docker.";

    fn resume(filename: &str, text: &str) -> ResumeDocument {
        ResumeDocument::new(filename, text)
    }

    #[test]
    fn test_empty_resume_list_is_invalid_input() {
        let result = build_prompt(&[], JD);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_job_description_is_accepted() {
        let prompt = build_prompt(&[resume("a.pdf", "Alice")], "").unwrap();
        assert!(prompt.contains("JOB DESCRIPTION:\n\n\nRESUMES TO ANALYZE:"));
    }

    #[test]
    fn test_long_resume_is_truncated_to_prefix() {
        let text: String = "a".repeat(MAX_RESUME_CHARS) + &"b".repeat(500);
        let prompt = build_prompt(&[resume("long.pdf", &text)], JD).unwrap();

        let expected = format!(
            "--- RESUME 1: long.pdf ---\n{}{}\n",
            "a".repeat(MAX_RESUME_CHARS),
            TRUNCATION_MARKER
        );
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains("bbb"));
    }

    #[test]
    fn test_short_resume_is_included_whole() {
        let prompt = build_prompt(&[resume("bob.docx", "Bob, 2 years Java")], JD).unwrap();
        assert!(prompt.contains("--- RESUME 1: bob.docx ---\nBob, 2 years Java...\n"));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(MAX_RESUME_CHARS + 10);
        let prompt = build_prompt(&[resume("accent.pdf", &text)], JD).unwrap();
        let block = format!("{}{}", "é".repeat(MAX_RESUME_CHARS), TRUNCATION_MARKER);
        assert!(prompt.contains(&block));
        assert!(!prompt.contains(&"é".repeat(MAX_RESUME_CHARS + 1)));
    }

    #[test]
    fn test_job_description_is_verbatim() {
        let jd = "Line one\n  indented {resume_data} line\n\"quoted\"";
        let prompt = build_prompt(&[resume("a.pdf", "Alice")], jd).unwrap();
        assert!(prompt.contains(jd));
    }

    #[test]
    fn test_resumes_are_labelled_in_order() {
        let prompt = build_prompt(
            &[
                resume("alice.pdf", "Alice, 5 years Python, AWS"),
                resume("bob.docx", "Bob, 2 years Java"),
            ],
            JD,
        )
        .unwrap();

        let first = prompt.find("--- RESUME 1: alice.pdf ---").unwrap();
        let second = prompt.find("--- RESUME 2: bob.docx ---").unwrap();
        assert!(first < second);
        assert!(prompt.find(JD).unwrap() < first);
    }

    #[test]
    fn test_prompt_states_output_contract() {
        let prompt = build_prompt(&[resume("a.pdf", "Alice")], JD).unwrap();
        for field in ["\"name\"", "\"match_score\"", "\"summary\"", "\"missing_skills\""] {
            assert!(prompt.contains(field), "prompt is missing field {field}");
        }
        assert!(prompt.contains("at most 5 candidates"));
        assert!(prompt.contains("EXAMPLE OUTPUT:"));
        assert!(prompt.starts_with("You are an expert technical recruiter"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let resumes = [resume("a.pdf", "Alice"), resume("b.pdf", "Bob")];
        assert_eq!(build_prompt(&resumes, JD).unwrap(), build_prompt(&resumes, JD).unwrap());
    }
}
