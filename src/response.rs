//! Extraction of the answer text and token usage from a response body.

use serde_json::Value;
use tracing::warn;

use crate::openai::RawResponse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub total: u64,
    pub prompt: u64,
    pub completion: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseResult {
    pub text: String,
    pub usage: Usage,
    pub status: u16,
    pub raw_body: String,
}

/// Outcome of parsing a body as JSON.
#[derive(Debug)]
pub enum ParseOutcome {
    Parsed(Value),
    Malformed(serde_json::Error),
}

impl ParseOutcome {
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => ParseOutcome::Parsed(value),
            Err(e) => ParseOutcome::Malformed(e),
        }
    }
}

/// Either a string or an array of typed parts; the text of every part whose
/// type is listed in `text_types` is concatenated without a separator.
fn content_text(content: &Value, text_types: &[&str]) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => Some(
            parts
                .iter()
                .filter(|part| {
                    part.get("type")
                        .and_then(Value::as_str)
                        .is_some_and(|t| text_types.contains(&t))
                })
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect(),
        ),
        _ => None,
    }
}

fn choices_text(body: &Value) -> Option<String> {
    let content = body.get("choices")?.get(0)?.get("message")?.get("content")?;
    content_text(content, &["text"])
}

/// The native responses shape: `output_text`, or message items in `output`.
fn output_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    let items = body.get("output")?.as_array()?;
    let text: String = items
        .iter()
        .filter_map(|item| item.get("content"))
        .filter_map(|content| content_text(content, &["output_text", "text"]))
        .collect();
    Some(text)
}

fn count(usage: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| usage.get(*key).and_then(Value::as_u64))
        .unwrap_or(0)
}

fn usage(body: &Value) -> Usage {
    match body.get("usage") {
        Some(usage) => Usage {
            total: count(usage, &["total_tokens"]),
            prompt: count(usage, &["prompt_tokens", "input_tokens"]),
            completion: count(usage, &["completion_tokens", "output_tokens"]),
        },
        None => Usage::default(),
    }
}

pub fn extract_from_value(body: &Value) -> (String, Usage) {
    let text = choices_text(body)
        .or_else(|| output_text(body))
        .unwrap_or_default();
    (text, usage(body))
}

/// Only successful bodies are parsed; a malformed one yields empty text and zero usage.
pub fn extract(raw: &RawResponse) -> ResponseResult {
    let raw_body = raw.text();
    let (text, usage) = if raw.is_success() {
        match ParseOutcome::parse(&raw.body) {
            ParseOutcome::Parsed(value) => extract_from_value(&value),
            ParseOutcome::Malformed(e) => {
                warn!("Could not parse response body: {}", e);
                (String::new(), Usage::default())
            }
        }
    } else {
        (String::new(), Usage::default())
    };

    ResponseResult {
        text,
        usage,
        status: raw.status,
        raw_body,
    }
}
