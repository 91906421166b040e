//! The oracle seam and its response types.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::OracleError;
use crate::history::History;
use crate::prompts::NameRequest;

/// A single naming answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// `None` when the model left `new_name` out or sent a non-string.
    pub new_name: Option<String>,
    pub reasoning: Option<String>,
}

impl Suggestion {
    /// Parse the model's JSON message content.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Parse`] if `content` is not a JSON object. A
    /// missing or malformed field is not an error.
    pub fn from_content(content: &str) -> Result<Self, OracleError> {
        let value = parse_object(content)?;
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Ok(Self {
            new_name: field("new_name"),
            reasoning: field("reasoning"),
        })
    }
}

/// Parse a batch answer: `{"names": {old: new}}` or a flat `{old: new}`.
///
/// Entries whose value is not a string are dropped.
///
/// # Errors
///
/// Returns [`OracleError::Parse`] if `content` is not a JSON object.
pub fn parse_batch(content: &str) -> Result<IndexMap<String, String>, OracleError> {
    let value = parse_object(content)?;
    let names = match value.get("names") {
        Some(Value::Object(names)) => names,
        _ => value.as_object().ok_or_else(|| OracleError::Parse("expected object".into()))?,
    };
    Ok(names
        .iter()
        .filter_map(|(old, new)| new.as_str().map(|new| (old.clone(), new.to_string())))
        .collect())
}

fn parse_object(content: &str) -> Result<Value, OracleError> {
    let value: Value = serde_json::from_str(content.trim())
        .map_err(|e| OracleError::Parse(format!("model reply is not JSON: {e}")))?;
    if !value.is_object() {
        return Err(OracleError::Parse(format!("model reply is not an object: {value}")));
    }
    Ok(value)
}

/// A source of names and summaries.
///
/// Implemented by [`OllamaClient`](crate::OllamaClient); tests substitute
/// scripted fakes.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Describe what `code` does, in prose.
    async fn summarize(&self, code: &str) -> Result<String, OracleError>;

    /// Ask for one new name, in the context of `history`.
    async fn suggest(
        &self,
        history: &History,
        request: &NameRequest,
    ) -> Result<Suggestion, OracleError>;

    /// Ask for new names for every symbol of `function` at once.
    async fn suggest_batch(
        &self,
        history: &History,
        function: &str,
        requests: &[NameRequest],
    ) -> Result<IndexMap<String, String>, OracleError>;
}
