use std::collections::HashSet;

use tracing::warn;

use crate::quiz::models::Question;

/// Removes a surrounding markdown code fence, optionally tagged `json`.
/// Text without a leading fence is only trimmed.
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    rest.trim()
}

pub fn parse_questions(content: &str) -> Result<Vec<Question>, serde_json::Error> {
    let questions: Vec<Question> = serde_json::from_str(strip_code_fence(content))?;
    inspect_questions(&questions);
    Ok(questions)
}

/// Questions with odd shapes are kept, they just cannot be scored correctly.
fn inspect_questions(questions: &[Question]) {
    let mut seen = HashSet::new();

    for q in questions {
        if !seen.insert(q.id) {
            warn!("Generated questions contain duplicate id {}", q.id);
        }
        if q.options.len() != 4 {
            warn!("Question {} has {} options", q.id, q.options.len());
        }
        if !q.options.iter().any(|o| q.is_correct(o)) {
            warn!("Question {} has a correct answer that is not an option", q.id);
        }
    }
}
