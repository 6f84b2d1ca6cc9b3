//! Parsing and validation of the model's chart answer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::LlmClient;
use crate::error::{InsightError, Result};
use crate::prompt::SYSTEM_PROMPT;
use crate::query::ChartQuery;

const REQUIRED_FIELDS: [&str; 4] = ["query", "chart_config", "explanation", "insights"];

/// A validated chart answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub query: ChartQuery,
    /// Passed through to the client untouched.
    pub chart_config: Value,
    pub explanation: String,
    pub insights: Vec<String>,
}

impl ChartSpec {
    /// Chart type named in the config, if any.
    pub fn chart_type(&self) -> Option<&str> {
        self.chart_config.get("type").and_then(Value::as_str)
    }
}

/// Removes a surrounding Markdown code fence (```json ... ```), if present.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening line.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Validates a parsed answer. Accepts `{"charts": [...]}`, using the first
/// chart, or a bare chart object.
pub fn parse_chart_spec(value: Value) -> Result<ChartSpec> {
    let chart = match value {
        Value::Object(mut map) if map.contains_key("charts") => match map.remove("charts") {
            Some(Value::Array(charts)) => charts.into_iter().next().ok_or_else(|| {
                InsightError::MissingFields {
                    fields: REQUIRED_FIELDS.iter().map(ToString::to_string).collect(),
                }
            })?,
            _ => {
                return Err(InsightError::InvalidJson(
                    "\"charts\" must be an array".to_string(),
                ));
            }
        },
        other => other,
    };

    let Value::Object(ref fields) = chart else {
        return Err(InsightError::InvalidJson(
            "chart must be a JSON object".to_string(),
        ));
    };
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| fields.get(**field).is_none_or(Value::is_null))
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(InsightError::MissingFields { fields: missing });
    }

    serde_json::from_value(chart).map_err(|e| InsightError::InvalidJson(e.to_string()))
}

fn attempt(client: &dyn LlmClient, prompt: &str) -> Result<Value> {
    let content = client.complete(SYSTEM_PROMPT, prompt)?;
    let body = strip_code_fences(&content);
    if body.is_empty() {
        return Err(InsightError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(|e| InsightError::InvalidJson(e.to_string()))
}

/// Asks the model for a chart answer and validates it.
///
/// Transport failures, empty content and unparseable JSON are retried up to
/// `max_retries` attempts in total. A well-formed answer that misses fields
/// is not retried.
pub fn request_insight(client: &dyn LlmClient, prompt: &str, max_retries: u32) -> Result<ChartSpec> {
    let attempts = max_retries.max(1);
    let mut last_error = None;

    for attempt_no in 1..=attempts {
        match attempt(client, prompt) {
            Ok(value) => {
                tracing::debug!(attempt = attempt_no, "Model answered");
                return parse_chart_spec(value);
            }
            Err(err) if err.is_retryable() => {
                tracing::warn!(attempt = attempt_no, error = %err, "Model request failed");
                last_error = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    Err(InsightError::RetriesExhausted {
        attempts,
        last: Box::new(last_error.unwrap_or(InsightError::EmptyResponse)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart() -> Value {
        json!({
            "query": {"group_by": "Region", "value_column": "Revenue", "aggregation": "sum"},
            "chart_config": {"type": "BarChart", "dataKey": "value"},
            "explanation": "West leads.",
            "insights": ["Invest in West."]
        })
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{}\n```\n"), "{}");
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_wrapped_and_bare() {
        let wrapped = parse_chart_spec(json!({"charts": [chart(), {"ignored": true}]})).unwrap();
        let bare = parse_chart_spec(chart()).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(bare.chart_type(), Some("BarChart"));
    }

    #[test]
    fn test_parse_reports_missing_fields() {
        let mut partial = chart();
        partial.as_object_mut().unwrap().remove("insights");
        partial["explanation"] = Value::Null;
        match parse_chart_spec(partial) {
            Err(InsightError::MissingFields { fields }) => {
                assert_eq!(fields, vec!["explanation", "insights"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            parse_chart_spec(json!([1, 2])),
            Err(InsightError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_chart_spec(json!({"charts": []})),
            Err(InsightError::MissingFields { .. })
        ));
    }
}
