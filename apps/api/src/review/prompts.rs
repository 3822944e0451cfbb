// All LLM prompt templates for the Review module.
// Placeholders are `{name}` tokens filled by `fill_template`; any other braces
// (JSON examples) are left alone.

/// Heading placed above the job description when one is supplied.
pub const JOB_DESCRIPTION_LABEL: &str = "TARGET JOB DESCRIPTION";

/// Analysis prompt. Fill: {target_role}, {job_description_section},
/// {tailoring_instruction}, {json_object_instruction}, {resume_text}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and ATS (applicant tracking system) specialist.
Analyze the resume below for the target job role of "{target_role}".
{job_description_section}
{tailoring_instruction}

{json_object_instruction}
Keys:
- "overall_score": an integer from 0 to 100 rating the resume for this role.
- "strengths": a list of 3-4 key strengths.
- "areas_for_improvement": a list of 3-4 specific, actionable areas for improvement.
- "missing_keywords": a list of essential keywords for the role that the resume lacks.
- "formatting_and_clarity": one short paragraph on the resume's formatting and clarity.
- "ats_compliance_tips": a list of 2-3 tips that make the resume more ATS-friendly.

RESUME:
---
{resume_text}
---"#;

/// Job description block. Fill: {label}, {job_description}
pub const JOB_DESCRIPTION_SECTION_TEMPLATE: &str = r#"
{label}:
---
{job_description}
---
"#;

pub const TAILORED_INSTRUCTION: &str =
    "Tailor every piece of feedback to the job description above.";

/// Fallback when no job description was given. Fill: {target_role}
pub const GENERAL_INSTRUCTION_TEMPLATE: &str = "No job description was supplied. \
    Base your feedback on general industry-standard expectations for the role of \"{target_role}\".";

/// Rewrite prompt. Fill: {json_object_instruction}, {resume_text}, {analysis_json}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Rewrite the ORIGINAL RESUME below into a structured JSON object, using the ANALYSIS AND FEEDBACK to improve it.

CRITICAL: Carry over ALL information from the original resume. Every personal detail, every experience entry, every education entry, every skill and every achievement MUST appear in the output. Do NOT discard, merge away, or summarize away any entry. Improve phrasing and structure; never remove content.

{json_object_instruction}
Use this shape:
{
  "personal_details": {"name": "...", "email": "...", "phone": "...", "location": "...", "linkedin": "..."},
  "summary": "...",
  "experience": [
    {"title": "...", "company": "...", "location": "...", "dates": "...", "responsibilities": ["..."]}
  ],
  "education": [
    {"degree": "...", "university": "...", "dates": "..."}
  ],
  "skills": {"Category": ["..."]}
}

Rules:
- experience: rephrase each original bullet to be more impactful, lead with an action verb, and quantify results where the original supports it.
- education: include degree, university and dates for every entry.
- Keep the original order of experience and education entries.

ORIGINAL RESUME:
---
{resume_text}
---

ANALYSIS AND FEEDBACK:
---
{analysis_json}
---"#;

/// Single-pass `{name}` substitution. Values are inserted verbatim and never
/// rescanned, so user text containing braces cannot inject placeholders.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
