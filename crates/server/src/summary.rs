//! Summarization request validation and upstream response classification
//!
//! Checks run in a fixed order and the first failure wins:
//! JSON decode, mandatory `model`, mandatory `text`, types/emptiness,
//! leading `/` in `model`, then size limits. Nothing is sent upstream
//! unless every check passes.

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};
use tubesum_common::MAX_MIN_LENGTH;
use tubesum_llm::{InferenceClient, SummarizeRequest, UpstreamReply};

use crate::types::Envelope;

/// Longest accepted model identifier, in characters
pub const MAX_MODEL_CHARS: usize = 200;

/// Longest accepted input text, in characters
pub const MAX_TEXT_CHARS: usize = 2000;

pub const UPSTREAM_DECODE_ERROR: &str = "JSON decode error after upstream response";
pub const UPSTREAM_ERROR: &str = "upstream error";
pub const UPSTREAM_UNREACHABLE: &str = "upstream unreachable";

/// A summarization request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub model: String,
    pub text: String,
    pub min_length: i64,
}

/// Why a request was refused before any upstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub status: u16,
    pub msg: &'static str,
}

impl Rejection {
    pub const JSON_DECODE: Self = Self::new(400, "JSON decode Error");
    pub const MISSING_MODEL: Self = Self::new(400, "\"model\" field is mandatory");
    pub const MISSING_TEXT: Self = Self::new(400, "\"text\" field is mandatory");
    pub const INVALID_INPUT: Self = Self::new(400, "Invalid input");
    pub const LEADING_SLASH: Self = Self::new(400, "First character of \"model\" must be alphanumeric");
    pub const TOO_LONG: Self = Self::new(413, "Input too long");

    const fn new(status: u16, msg: &'static str) -> Self {
        Self { status, msg }
    }
}

impl From<Rejection> for Envelope {
    fn from(rejection: Rejection) -> Self {
        Envelope::failure(rejection.status, rejection.msg)
    }
}

/// Validate a raw `/summary` body
///
/// `default_min_length` applies when `min_length` is absent or falsy
/// (`null`, `false`, `0`, `""`, `[]`, `{}`).
pub fn validate_summary_request(
    body: &[u8],
    default_min_length: i64,
) -> Result<SummaryRequest, Rejection> {
    let body: Value = serde_json::from_slice(body).map_err(|_| Rejection::JSON_DECODE)?;
    let Value::Object(fields) = body else {
        return Err(Rejection::INVALID_INPUT);
    };

    let min_length = effective_min_length(&fields, default_min_length);

    let model = fields.get("model").ok_or(Rejection::MISSING_MODEL)?;
    let text = fields.get("text").ok_or(Rejection::MISSING_TEXT)?;

    let (Some(min_length), Some(model), Some(text)) =
        (as_integer(&min_length), model.as_str(), text.as_str())
    else {
        return Err(Rejection::INVALID_INPUT);
    };
    if model.is_empty() || text.is_empty() {
        return Err(Rejection::INVALID_INPUT);
    }

    if model.starts_with('/') {
        return Err(Rejection::LEADING_SLASH);
    }

    if min_length > i128::from(MAX_MIN_LENGTH)
        || model.chars().count() > MAX_MODEL_CHARS
        || text.chars().count() > MAX_TEXT_CHARS
    {
        return Err(Rejection::TOO_LONG);
    }

    // Already at most MAX_MIN_LENGTH; very negative values clamp to i64::MIN.
    let min_length = min_length.max(i128::from(i64::MIN)) as i64;

    Ok(SummaryRequest {
        model: model.to_string(),
        text: text.to_string(),
        min_length,
    })
}

fn effective_min_length(fields: &Map<String, Value>, default_min_length: i64) -> Value {
    fields
        .get("min_length")
        .filter(|value| is_truthy(value))
        .cloned()
        .unwrap_or_else(|| Value::from(default_min_length))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

// Booleans and floats are not integers. Unlike Python's `isinstance(True, int)`,
// `true` is deliberately refused here rather than forwarded as 1.
//
// Integers wider than 128 bits saturate; callers only compare them against
// MAX_MIN_LENGTH or clamp them to i64.
fn as_integer(value: &Value) -> Option<i128> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }

    // Outside 64 bits only the literal (kept by `arbitrary_precision`)
    // tells an integer from a float.
    let literal = n.to_string();
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, literal.as_str()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(literal.parse::<i128>().unwrap_or(if negative { i128::MIN } else { i128::MAX }))
}

/// Classify an upstream reply
///
/// Success requires a non-empty array whose first element is an object with
/// `summary_text`; the whole array is returned, not just the text.
pub fn classify_upstream(reply: &UpstreamReply) -> Envelope {
    let Ok(body) = serde_json::from_str::<Value>(&reply.body) else {
        warn!("Upstream returned non-JSON body (status {})", reply.status);
        return Envelope::failure(503, UPSTREAM_DECODE_ERROR);
    };

    let has_summary = body
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("summary_text"));

    if has_summary {
        Envelope::success(reply.status, body)
    } else {
        warn!("Upstream reply has no summary (status {}): {}", reply.status, body);
        Envelope::failure(reply.status, UPSTREAM_ERROR).with_data(body)
    }
}

/// Validate, forward once, classify
pub async fn relay_summary(
    inference: &dyn InferenceClient,
    body: &[u8],
    default_min_length: i64,
) -> Envelope {
    let request = match validate_summary_request(body, default_min_length) {
        Ok(request) => request,
        Err(rejection) => {
            debug!("Rejected summary request: {} ({})", rejection.msg, rejection.status);
            return rejection.into();
        }
    };

    let SummaryRequest {
        model,
        text,
        min_length,
    } = request;
    let payload = SummarizeRequest::new(text, min_length);

    match inference.summarize(&model, &payload).await {
        Ok(reply) => {
            let envelope = classify_upstream(&reply);
            if envelope.success {
                info!("Summary relayed - Model: {}, Status: {}", model, reply.status);
            }
            envelope
        }
        Err(e) => {
            error!("Upstream call failed - Model: {}: {}", model, e);
            Envelope::failure(502, UPSTREAM_UNREACHABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEFAULT: i64 = 30;

    fn validate(body: Value) -> Result<SummaryRequest, Rejection> {
        validate_summary_request(body.to_string().as_bytes(), DEFAULT)
    }

    #[test]
    fn test_valid_request_uses_explicit_min_length() {
        let request = validate(json!({
            "model": "facebook/bart-large-cnn",
            "text": "some text",
            "min_length": 50,
        }))
        .unwrap();
        assert_eq!(
            request,
            SummaryRequest {
                model: "facebook/bart-large-cnn".to_string(),
                text: "some text".to_string(),
                min_length: 50,
            }
        );
    }

    #[test]
    fn test_falsy_min_length_uses_default() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            let request = validate(json!({"model": "m", "text": "t", "min_length": falsy})).unwrap();
            assert_eq!(request.min_length, DEFAULT, "min_length {:?}", falsy);
        }

        let request = validate(json!({"model": "m", "text": "t"})).unwrap();
        assert_eq!(request.min_length, DEFAULT);
    }

    #[test]
    fn test_non_integer_min_length_is_invalid() {
        for bad in [json!(true), json!(12.5), json!(30.0), json!("30"), json!([1]), json!({"a": 1})] {
            assert_eq!(
                validate(json!({"model": "m", "text": "t", "min_length": bad})),
                Err(Rejection::INVALID_INPUT),
                "min_length {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_negative_min_length_passes() {
        let request = validate(json!({"model": "m", "text": "t", "min_length": -5})).unwrap();
        assert_eq!(request.min_length, -5);
    }

    #[test]
    fn test_malformed_json() {
        assert_eq!(
            validate_summary_request(b"{\"model\": ", DEFAULT),
            Err(Rejection::JSON_DECODE)
        );
        assert_eq!(validate_summary_request(b"", DEFAULT), Err(Rejection::JSON_DECODE));
    }

    #[test]
    fn test_non_object_body_is_invalid() {
        assert_eq!(validate(json!(["model", "text"])), Err(Rejection::INVALID_INPUT));
        assert_eq!(validate(json!("model")), Err(Rejection::INVALID_INPUT));
    }

    #[test]
    fn test_mandatory_fields_checked_in_order() {
        assert_eq!(validate(json!({})), Err(Rejection::MISSING_MODEL));
        assert_eq!(validate(json!({"text": "t"})), Err(Rejection::MISSING_MODEL));
        assert_eq!(validate(json!({"model": "m"})), Err(Rejection::MISSING_TEXT));
        // Presence is checked before type: a null model is "invalid", not "missing".
        assert_eq!(
            validate(json!({"model": null, "text": "t"})),
            Err(Rejection::INVALID_INPUT)
        );
    }

    #[test]
    fn test_empty_or_non_string_fields_are_invalid() {
        assert_eq!(validate(json!({"model": "", "text": "t"})), Err(Rejection::INVALID_INPUT));
        assert_eq!(validate(json!({"model": "m", "text": ""})), Err(Rejection::INVALID_INPUT));
        assert_eq!(validate(json!({"model": 7, "text": "t"})), Err(Rejection::INVALID_INPUT));
        assert_eq!(validate(json!({"model": "m", "text": ["t"]})), Err(Rejection::INVALID_INPUT));
    }

    #[test]
    fn test_leading_slash_rejected_before_length_checks() {
        let long_text = "x".repeat(MAX_TEXT_CHARS + 1);
        assert_eq!(
            validate(json!({"model": "/etc/passwd", "text": long_text, "min_length": 5000})),
            Err(Rejection::LEADING_SLASH)
        );
        // Only a leading slash is refused.
        assert!(validate(json!({"model": "-weird/model", "text": "t"})).is_ok());
    }

    #[test]
    fn test_size_limits() {
        assert_eq!(
            validate(json!({"model": "m", "text": "t", "min_length": 1001})),
            Err(Rejection::TOO_LONG)
        );
        assert!(validate(json!({"model": "m", "text": "t", "min_length": 1000})).is_ok());

        assert_eq!(
            validate(json!({"model": "m".repeat(MAX_MODEL_CHARS + 1), "text": "t"})),
            Err(Rejection::TOO_LONG)
        );
        assert!(validate(json!({"model": "m".repeat(MAX_MODEL_CHARS), "text": "t"})).is_ok());

        assert_eq!(
            validate(json!({"model": "m", "text": "t".repeat(MAX_TEXT_CHARS + 1)})),
            Err(Rejection::TOO_LONG)
        );
        assert_eq!(Rejection::TOO_LONG.status, 413);
    }

    #[test]
    fn test_huge_min_length_is_too_long() {
        let body = br#"{"model": "m", "text": "t", "min_length": 18446744073709551615}"#;
        assert_eq!(validate_summary_request(body, DEFAULT), Err(Rejection::TOO_LONG));
    }

    #[test]
    fn test_min_length_beyond_64_bits() {
        let body = br#"{"model": "m", "text": "t", "min_length": 100000000000000000000}"#;
        assert_eq!(validate_summary_request(body, DEFAULT), Err(Rejection::TOO_LONG));

        let body = br#"{"model": "m", "text": "t", "min_length": -100000000000000000000}"#;
        assert_eq!(validate_summary_request(body, DEFAULT).unwrap().min_length, i64::MIN);

        let body = format!(r#"{{"model": "m", "text": "t", "min_length": 1{}}}"#, "0".repeat(60));
        assert_eq!(
            validate_summary_request(body.as_bytes(), DEFAULT),
            Err(Rejection::TOO_LONG)
        );
    }

    #[test]
    fn test_large_float_min_length_is_invalid() {
        let body = br#"{"model": "m", "text": "t", "min_length": 1e20}"#;
        assert_eq!(validate_summary_request(body, DEFAULT), Err(Rejection::INVALID_INPUT));

        let body = br#"{"model": "m", "text": "t", "min_length": 100000000000000000000.0}"#;
        assert_eq!(validate_summary_request(body, DEFAULT), Err(Rejection::INVALID_INPUT));
    }

    #[test]
    fn test_lengths_count_characters() {
        // 2000 multi-byte characters are within the limit.
        let text = "é".repeat(MAX_TEXT_CHARS);
        assert!(validate(json!({"model": "m", "text": text})).is_ok());
    }

    #[test]
    fn test_classify_success_returns_whole_body() {
        let reply = UpstreamReply::new(200, r#"[{"summary_text": "X"}]"#);
        assert_eq!(
            serde_json::to_value(classify_upstream(&reply)).unwrap(),
            json!({"success": true, "status": 200, "summary": [{"summary_text": "X"}]})
        );
    }

    #[test]
    fn test_classify_upstream_error_shapes() {
        let reply = UpstreamReply::new(503, r#"{"error": "model loading"}"#);
        assert_eq!(
            serde_json::to_value(classify_upstream(&reply)).unwrap(),
            json!({
                "success": false,
                "status": 503,
                "msg": "upstream error",
                "data": {"error": "model loading"},
            })
        );

        for body in ["[]", "[1, 2]", r#"[{"generated_text": "X"}]"#, "\"text\""] {
            let envelope = classify_upstream(&UpstreamReply::new(200, body));
            assert!(!envelope.success, "body {}", body);
            assert_eq!(envelope.status, 200);
            assert_eq!(envelope.msg.as_deref(), Some(UPSTREAM_ERROR));
            assert!(envelope.data.is_some());
        }
    }

    #[test]
    fn test_classify_non_json() {
        let envelope = classify_upstream(&UpstreamReply::new(502, "<html>Bad Gateway</html>"));
        assert_eq!(envelope, Envelope::failure(503, UPSTREAM_DECODE_ERROR));
    }
}
