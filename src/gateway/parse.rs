//! Decoding model completions into typed payloads.

use serde::de::DeserializeOwned;

use crate::Result;

/// Parse completion text as JSON, unwrapping a surrounding Markdown code
/// fence (```` ```json ... ``` ````) if the model added one.
pub(crate) fn parse_json_content<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_json::from_str(strip_code_fence(content))?)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the info string ("json") on the opening fence line
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        // single-line fence: the info string runs into the payload
        None => body.trim_start_matches(|c: char| c.is_ascii_alphabetic()).trim(),
    }
}
