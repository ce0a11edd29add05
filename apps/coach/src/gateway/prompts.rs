// Prompt templates and response schemas for the three gateway operations.
// Templates use `{placeholder}` substitution; schemas use Gemini's type names.

use serde_json::{json, Value};

/// Question generation prompt. Replace `{interview_type}`, `{role}`, `{company_clause}`.
pub const QUESTION_PROMPT_TEMPLATE: &str = "Generate a unique, high-difficulty {interview_type} interview question for a {role} position{company_clause}.
Avoid clichés. The question should test first-principles thinking and deep technical or behavioral nuance.
If it's a technical question, include a specific quantitative scenario or edge case.
Return ONLY the question text. Ensure it is distinct from common online lists.";

/// Sampling temperature for question generation. Kept high so repeated
/// sessions with the same setup still get different questions.
pub const QUESTION_TEMPERATURE: f32 = 0.9;

/// Evaluation prompt. Replace `{question}`, `{answer}`.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Interviewer Mode: Evaluate the candidate's response to: "{question}"
Candidate Answer: "{answer}"

Analysis Requirements:
- Score (0-100) based on elite firm standards.
- StructureScore (0-10) and TechnicalScore (0-10).
- Check for "Top-Down" communication, structure, and technical accuracy.
- Identify filler words or logical fallacies.

Return JSON format:"#;

/// Resume scan prompt. Replace `{target_role}`, `{resume_text}`.
pub const RESUME_PROMPT_TEMPLATE: &str =
    r#"Scan this resume for a {target_role} role. Use ATS-matching logic. OverallMatch is a percentage from 0 to 100: "{resume_text}""#;

/// Fills `{name}` placeholders in a single pass. Substituted values are
/// never scanned again, so a value containing `{answer}` stays literal.
/// Unknown placeholders are left as written.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match substitution {
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

pub fn company_clause(company: Option<&str>) -> String {
    company
        .map(|c| format!(" specifically at {c},"))
        .unwrap_or_default()
}

pub fn evaluation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "Score": { "type": "NUMBER" },
            "StructureScore": { "type": "NUMBER" },
            "TechnicalScore": { "type": "NUMBER" },
            "Strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "AreasForImprovement": { "type": "ARRAY", "items": { "type": "STRING" } },
            "IdealAnswerSnippet": { "type": "STRING" }
        },
        "required": [
            "Score",
            "StructureScore",
            "TechnicalScore",
            "Strengths",
            "AreasForImprovement",
            "IdealAnswerSnippet"
        ]
    })
}

pub fn resume_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "OverallMatch": { "type": "NUMBER" },
            "MissingKeywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "WeakPoints": { "type": "ARRAY", "items": { "type": "STRING" } },
            "TweakedBulletPoints": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "original": { "type": "STRING" },
                        "improved": { "type": "STRING" },
                        "reason": { "type": "STRING" }
                    }
                }
            },
            "ProfessionalSummaryAdvice": { "type": "STRING" }
        },
        "required": [
            "OverallMatch",
            "MissingKeywords",
            "WeakPoints",
            "TweakedBulletPoints",
            "ProfessionalSummaryAdvice"
        ]
    })
}
