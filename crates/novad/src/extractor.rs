//! Output extractor.
//!
//! Providers are asked for bare JSON and answer with fenced JSON, JSON
//! buried in prose, or nothing usable at all. Extraction never fails: the
//! worst input degrades to an "unknown" result carrying the raw text.

use serde_json::Value;
use tracing::debug;

use crate::intent::{IntentEntities, IntentResult, Sentiment};

/// Recover an [`IntentResult`] from whatever the provider sent back.
pub fn extract_intent(raw: &str) -> IntentResult {
    if let Some(value) = parse_candidates(raw) {
        return from_value(&value);
    }
    debug!("No usable JSON recovered from provider reply ({} bytes)", raw.len());
    IntentResult {
        intent: "unknown".to_string(),
        entities: IntentEntities::default(),
        sentiment: Sentiment::Neutral,
        reasoning: String::new(),
        reply: Some(raw.to_string()),
    }
}

/// Try each JSON candidate in order: direct parse, fenced code block,
/// first-brace-to-last-brace span. A candidate that parses to something
/// other than an object counts as a miss, same as a parse error.
fn parse_candidates(raw: &str) -> Option<Value> {
    let t = raw.trim();

    // Direct JSON
    if t.starts_with('{') || t.starts_with('[') {
        if let Some(value) = parse_object(t) {
            return Some(value);
        }
    }

    // Markdown code block, with or without the json tag
    if let Some(inner) = strip_code_fence(t) {
        if let Some(value) = parse_object(inner) {
            return Some(value);
        }
    }

    // JSON buried anywhere in surrounding prose
    if let (Some(s), Some(e)) = (t.find('{'), t.rfind('}')) {
        if s < e {
            if let Some(value) = parse_object(&t[s..=e]) {
                return Some(value);
            }
        }
    }

    None
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

/// Strip a leading/trailing triple-backtick fence, returning the inner text.
fn strip_code_fence(t: &str) -> Option<&str> {
    let rest = t.strip_prefix("```json").or_else(|| t.strip_prefix("```"))?;
    let rest = rest.strip_suffix("```")?;
    Some(rest.trim())
}

/// Build the result from a parsed JSON object, tolerating missing or
/// mistyped fields.
fn from_value(value: &Value) -> IntentResult {
    let intent = value
        .get("intent")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string();

    let entities = value
        .get("entities")
        .map(|v| IntentEntities {
            order_id: string_field(v, "order_id"),
            category: string_field(v, "category"),
            original_term: string_field(v, "original_term"),
        })
        .unwrap_or_default();

    let sentiment = Sentiment::parse(value.get("sentiment").and_then(Value::as_str).unwrap_or(""));

    let reasoning = value
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let reply = value
        .get("reply")
        .and_then(Value::as_str)
        .map(|s| s.to_string());

    IntentResult { intent, entities, sentiment, reasoning, reply }
}

fn string_field(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(Value::as_str).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;

    #[test]
    fn test_extract_direct_json() {
        let raw = r#"{"intent":"greeting","sentiment":"positive","reasoning":"says hi"}"#;
        let result = extract_intent(raw);
        assert_eq!(result.intent, "greeting");
        assert_eq!(result.kind(), Intent::Greeting);
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.reasoning, "says hi");
        assert!(result.reply.is_none());
    }

    #[test]
    fn test_extract_markdown_fenced_json() {
        let raw = "```json\n{\"intent\":\"check_order\",\"entities\":{\"order_id\":\"ORD-7601\"}}\n```";
        let result = extract_intent(raw);
        assert_eq!(result.kind(), Intent::CheckOrder);
        assert_eq!(result.entities.order_id.as_deref(), Some("ORD-7601"));
    }

    #[test]
    fn test_extract_fence_without_tag() {
        let raw = "```\n{\"intent\":\"list_orders\"}\n```";
        let result = extract_intent(raw);
        assert_eq!(result.kind(), Intent::ListOrders);
    }

    #[test]
    fn test_extract_json_embedded_in_prose() {
        let raw = "Sure! Here is the classification you asked for:\n{\"intent\":\"return_policy\"}\nHope that helps.";
        let result = extract_intent(raw);
        assert_eq!(result.kind(), Intent::ReturnPolicy);
    }

    #[test]
    fn test_extract_garbage_falls_back() {
        let raw = "I am a teapot and cannot answer that.";
        let result = extract_intent(raw);
        assert_eq!(result.intent, "unknown");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.reasoning, "");
        assert_eq!(result.reply.as_deref(), Some(raw));
    }

    #[test]
    fn test_extract_empty_string_falls_back() {
        let result = extract_intent("");
        assert_eq!(result.intent, "unknown");
        assert_eq!(result.reply.as_deref(), Some(""));
    }

    #[test]
    fn test_extract_array_falls_back_with_reply() {
        let result = extract_intent("[1, 2, 3]");
        assert_eq!(result.intent, "unknown");
        assert_eq!(result.reply.as_deref(), Some("[1, 2, 3]"));
    }

    #[test]
    fn test_object_wrapped_in_array_recovered_by_brace_span() {
        let result = extract_intent(r#"[{"intent":"greeting"}]"#);
        assert_eq!(result.kind(), Intent::Greeting);
    }

    #[test]
    fn test_intent_trimmed_and_defaulted() {
        let result = extract_intent(r#"{"intent":"  recommend_product  "}"#);
        assert_eq!(result.intent, "recommend_product");

        let result = extract_intent(r#"{"intent":"   "}"#);
        assert_eq!(result.intent, "unknown");

        let result = extract_intent(r#"{"sentiment":"negative"}"#);
        assert_eq!(result.intent, "unknown");
        assert_eq!(result.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_entities_tolerate_null_and_missing() {
        let raw = r#"{"intent":"recommend_product","entities":{"order_id":null,"category":"fitness"}}"#;
        let result = extract_intent(raw);
        assert_eq!(result.entities.order_id, None);
        assert_eq!(result.entities.category.as_deref(), Some("fitness"));
        assert_eq!(result.entities.original_term, None);
    }

    #[test]
    fn test_broken_json_inside_fence_falls_back() {
        let raw = "```json\n{\"intent\": \n```";
        let result = extract_intent(raw);
        assert_eq!(result.intent, "unknown");
        assert_eq!(result.reply.as_deref(), Some(raw));
    }
}
