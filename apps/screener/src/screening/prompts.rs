// All LLM prompt fragments for the screening module.
// prompt_builder concatenates them around the job description and resume blocks;
// none of them contain placeholders, so user text is never re-interpreted.

/// Persona preamble. Followed directly by the job description.
pub const SCREENING_PREAMBLE: &str = "\
You are an expert technical recruiter with 15+ years of experience. \
Your task is to analyze the provided resumes and compare them against the job description \
to identify the top 5 candidates.

JOB DESCRIPTION:
";

/// Heading placed between the job description and the resume blocks.
pub const RESUMES_HEADING: &str = "\n\nRESUMES TO ANALYZE:\n";

/// Appended to every resume text that goes into the prompt.
pub const TRUNCATION_MARKER: &str = "...";

/// Output contract and worked example. Closes the prompt.
pub const SCREENING_INSTRUCTIONS: &str = r#"

INSTRUCTIONS:
1. Carefully read each resume and the job description
2. Identify key skills, experience, and qualifications mentioned in the job description
3. For each resume, assess how well the candidate matches the job requirements
4. Consider both technical skills and soft skills
5. Look for relevant experience, education, and achievements
6. Identify any missing skills or qualifications

OUTPUT FORMAT:
Return a JSON array with at most 5 candidates (fewer if fewer than 5 resumes are provided). Each candidate object must have exactly these fields:
- "name": Candidate's name (extract from resume)
- "match_score": Integer from 0-100 representing match quality
- "summary": 2-sentence summary explaining why they are a good fit
- "missing_skills": Array of key skills they are missing (be specific)

EXAMPLE OUTPUT:
[
  {
    "name": "John Smith",
    "match_score": 85,
    "summary": "John has 5+ years of Python development experience and strong machine learning background. His experience with cloud platforms and data analysis makes him an excellent fit for this role.",
    "missing_skills": ["Docker", "Kubernetes", "React"]
  }
]

IMPORTANT:
- Return ONLY valid JSON
- Include at most 5 candidates, ranked best match first
- Be specific about missing skills
- Consider both technical and soft skills
"#;
