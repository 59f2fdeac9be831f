use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;

/// Outcome of a tool run.
///
/// A tool that rejects its *input* (bad Base64, malformed JSON, ...) still
/// returns `Ok` with `success == false`; the message in `result` is meant to
/// be shown to the user next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub result: String,
}

impl ToolResult {
    pub fn ok(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: result.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: message.into(),
        }
    }

    /// Collapse a transform result into a `ToolResult`, using the error's
    /// `Display` text as the user-facing message.
    pub fn from_outcome<E: std::fmt::Display>(outcome: std::result::Result<String, E>) -> Self {
        match outcome {
            Ok(output) => Self::ok(output),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Deserialize tool arguments, mapping serde failures to `InvalidArguments`.
pub fn parse_tool_args<T>(args: serde_json::Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Args {
        text: String,
    }

    #[test]
    fn parse_tool_args_reports_missing_fields() {
        let err = parse_tool_args::<Args>(json!({})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(msg) if msg.contains("text")));
    }

    #[test]
    fn parse_tool_args_accepts_valid_object() {
        let args: Args = parse_tool_args(json!({"text": "hi"})).unwrap();
        assert_eq!(args.text, "hi");
    }

    #[test]
    fn from_outcome_uses_error_display() {
        let outcome: std::result::Result<String, ToolError> =
            Err(ToolError::Execution("boom".to_string()));
        let result = ToolResult::from_outcome(outcome);
        assert!(!result.success);
        assert_eq!(result.result, "Execution failed: boom");
    }
}
