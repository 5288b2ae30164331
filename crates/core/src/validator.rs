use crate::error::ClassifyError;
use crate::models::RawClassification;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^```(?:json)?\s*").unwrap());
static FENCE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*```$").unwrap());

/// Parses a raw model reply into a classification.
///
/// The model is prompted not to fence its output but may anyway, so one
/// leading/trailing code-fence wrapper is stripped before parsing. Required
/// fields: non-empty `label`, numeric `confidence`, non-empty `reasoning`.
/// Confidence is clamped into [0.0, 1.0] rather than rejected; every other
/// violation is [`ClassifyError::MalformedResponse`], which the orchestrator
/// retries exactly once.
pub fn parse_classification(raw: &str) -> Result<RawClassification, ClassifyError> {
    let cleaned = strip_code_fence(raw);

    let parsed: Value = serde_json::from_str(&cleaned)
        .map_err(|error| ClassifyError::MalformedResponse(format!("invalid json: {error}")))?;

    if !parsed.is_object() {
        return Err(ClassifyError::MalformedResponse(
            "reply is not a json object".to_string(),
        ));
    }

    let label = required_string(&parsed, "label")?;
    let confidence = parsed
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            ClassifyError::MalformedResponse("confidence is missing or not a number".to_string())
        })?;
    let reasoning = required_string(&parsed, "reasoning")?;

    Ok(RawClassification {
        label,
        confidence: confidence.clamp(0.0, 1.0),
        reasoning,
    })
}

fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    let opened = FENCE_OPEN.replace(trimmed, "");
    let closed = FENCE_CLOSE.replace(&opened, "");
    closed.trim().to_string()
}

fn required_string(parsed: &Value, field: &str) -> Result<String, ClassifyError> {
    parsed
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ClassifyError::MalformedResponse(format!("{field} is missing or empty")))
}
