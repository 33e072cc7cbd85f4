//! Line-keyed JSON wire format
//!
//! Batches travel to LLM backends as one JSON object whose keys are `Line1`,
//! `Line2`, ... in request order. Replies are expected to carry the same keys;
//! anything around the object (prose, code fences) is ignored.

use gtx_domain::ProviderError;
use gtx_domain::constants::LINE_KEY_PREFIX;
use serde_json::Value;

/// Wire key for the string at `index` (zero-based)
pub fn line_key(index: usize) -> String {
    format!("{LINE_KEY_PREFIX}{}", index + 1)
}

/// Render `texts` as a pretty-printed, line-keyed JSON object
///
/// Keys are written in request order (`Line2` before `Line10`).
pub fn encode_lines(texts: &[String]) -> String {
    let body = texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            format!(
                "  {}: {}",
                Value::String(line_key(index)),
                Value::String(text.clone())
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{body}\n}}")
}

/// Slice from the first `{` to the last `}` of `content`
pub fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Parse a reply into exactly `expected` strings, in key order
pub fn decode_lines(content: &str, expected: usize) -> Result<Vec<String>, ProviderError> {
    let json = extract_json_object(content).ok_or_else(|| {
        ProviderError::malformed(format!(
            "no JSON object in response: {}",
            content.chars().take(200).collect::<String>()
        ))
    })?;

    let object: serde_json::Map<String, Value> = serde_json::from_str(json)
        .map_err(|e| ProviderError::malformed(format!("response is not a JSON object: {e}")))?;

    if object.len() != expected {
        return Err(ProviderError::malformed(format!(
            "response has {} lines, expected {expected}",
            object.len()
        )));
    }

    (0..expected)
        .map(|index| {
            let key = line_key(index);
            match object.get(&key) {
                Some(Value::String(text)) => Ok(text.clone()),
                Some(_) => Err(ProviderError::malformed(format!("{key} is not a string"))),
                None => Err(ProviderError::malformed(format!("response is missing {key}"))),
            }
        })
        .collect()
}
