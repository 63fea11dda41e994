pub const ANALYSIS_SYSTEM: &str = "You are a helpful hiring assistant.";

/// Placeholders: `{job_description}`, `{resume_chunks}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume excerpts in the context of the job description.

Job Description:
{job_description}

Resume Excerpts:
{resume_chunks}

Based on the job description, provide a score from 0 to 100 for the candidate's match.
Then, list skills or experiences from the resume that are a good match.
Finally, list key skills from the job description that seem to be missing from the resume.

Provide the output in the following format, and nothing else:
SCORE: [score]
MATCHES: [comma-separated list of matching skills]
MISSING: [comma-separated list of missing skills]"#;
