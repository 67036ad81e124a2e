//! JSON extraction utilities for parsing structured LLM responses.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Parse a structured object out of an LLM response.
///
/// Tries the raw response first (models asked for JSON usually comply), then
/// falls back to extracting an embedded JSON block.
pub fn parse_structured<T: DeserializeOwned>(response: &str) -> Result<T> {
    if let Ok(parsed) = serde_json::from_str(response) {
        return Ok(parsed);
    }

    let block = extract_json_block(response)
        .ok_or_else(|| anyhow::anyhow!("LLM response contained no JSON object"))?;
    serde_json::from_str(block).context("Failed to parse structured LLM output")
}

/// Extract a JSON block from LLM response text.
///
/// Handles two common patterns:
/// 1. JSON wrapped in ```json ... ``` code blocks
/// 2. Raw JSON objects (finds first { to last })
pub fn extract_json_block(text: &str) -> Option<&str> {
    // Look for ```json ... ``` blocks
    if let Some(start) = text.find("```json") {
        let content_start = start + 7;
        if let Some(end) = text[content_start..].find("```") {
            return Some(text[content_start..content_start + end].trim());
        }
    }

    // Try finding raw JSON object
    if let Some(start) = text.find('{')
        && let Some(end) = text.rfind('}')
    {
        return Some(&text[start..=end]);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_code_block() {
        let text = r#"Here is the grade:
```json
{"grade": "pass", "follow_up_queries": []}
```
"#;
        assert_eq!(
            extract_json_block(text),
            Some(r#"{"grade": "pass", "follow_up_queries": []}"#)
        );
    }

    #[test]
    fn test_extract_raw_json() {
        let text =
            r#"Here is the query you asked for: {"search_query": "rust async runtimes"} -- done."#;
        assert_eq!(
            extract_json_block(text),
            Some(r#"{"search_query": "rust async runtimes"}"#)
        );
    }

    #[test]
    fn test_extract_nested_json() {
        let text = r#"{"sections": [{"name": "Introduction", "research": false}]}"#;
        assert_eq!(
            extract_json_block(text),
            Some(r#"{"sections": [{"name": "Introduction", "research": false}]}"#)
        );
    }

    #[test]
    fn test_no_json() {
        let text = "The model declined to produce a structured answer.";
        assert_eq!(extract_json_block(text), None);
    }

    #[test]
    fn test_parse_structured_from_fenced_block() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            queries: Vec<String>,
        }

        let text = "Sure, here are the queries:\n```json\n{\"queries\": [\"a\", \"b\"]}\n```";
        let parsed: Wrapper = parse_structured(text).unwrap();
        assert_eq!(parsed.queries, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_structured_rejects_missing_fields() {
        #[derive(serde::Deserialize)]
        struct Strict {
            #[allow(dead_code)]
            grade: String,
        }

        let result: Result<Strict> = parse_structured(r#"{"other": 1}"#);
        assert!(result.is_err());
    }
}
