//! JSON pretty-printing, minification and validation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, ser::PrettyFormatter, Value};
use thiserror::Error;
use toolbox_core::{parse_tool_args, Tool, ToolError, ToolResult};

#[derive(Debug, Error)]
pub enum JsonToolError {
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Failed to serialize JSON: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for JsonToolError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_syntax() || e.is_eof() || e.is_data() {
            // serde_json appends " at line X column Y" to Display; keep only the reason
            let full = e.to_string();
            let message = full
                .split(" at line ")
                .next()
                .unwrap_or(full.as_str())
                .to_string();
            JsonToolError::Parse {
                line: e.line(),
                column: e.column(),
                message,
            }
        } else {
            JsonToolError::Serialize(e.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Indent {
    #[serde(rename = "2")]
    #[default]
    Two,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "tab")]
    Tab,
}

impl Indent {
    fn as_bytes(&self) -> &'static [u8] {
        match self {
            Indent::Two => b"  ",
            Indent::Four => b"    ",
            Indent::Tab => b"\t",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonAction {
    #[default]
    Format,
    Minify,
    Validate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFormatArgs {
    pub text: String,
    #[serde(default)]
    pub action: JsonAction,
    #[serde(default)]
    pub indent: Indent,
    #[serde(default)]
    pub sort_keys: bool,
}

fn parse(text: &str) -> Result<Value, JsonToolError> {
    Ok(serde_json::from_str(text)?)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

pub fn format(text: &str, indent: Indent, sort: bool) -> Result<String, JsonToolError> {
    let mut value = parse(text)?;
    if sort {
        value = sort_keys(value);
    }

    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| JsonToolError::Serialize(e.to_string()))?;
    String::from_utf8(out).map_err(|e| JsonToolError::Serialize(e.to_string()))
}

pub fn minify(text: &str) -> Result<String, JsonToolError> {
    let value = parse(text)?;
    serde_json::to_string(&value).map_err(|e| JsonToolError::Serialize(e.to_string()))
}

/// Returns a one-line summary of the top-level value when the input parses.
pub fn validate(text: &str) -> Result<String, JsonToolError> {
    let value = parse(text)?;
    let summary = match &value {
        Value::Object(map) => format!("Valid JSON: object with {} keys", map.len()),
        Value::Array(items) => format!("Valid JSON: array with {} items", items.len()),
        Value::String(_) => "Valid JSON: string".to_string(),
        Value::Number(_) => "Valid JSON: number".to_string(),
        Value::Bool(_) => "Valid JSON: boolean".to_string(),
        Value::Null => "Valid JSON: null".to_string(),
    };
    Ok(summary)
}

pub struct JsonFormatTool;

impl JsonFormatTool {
    pub fn new() -> Self {
        Self
    }

    pub fn run(args: &JsonFormatArgs) -> Result<String, JsonToolError> {
        match args.action {
            JsonAction::Format => format(&args.text, args.indent, args.sort_keys),
            JsonAction::Minify => minify(&args.text),
            JsonAction::Validate => validate(&args.text),
        }
    }
}

impl Default for JsonFormatTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for JsonFormatTool {
    fn name(&self) -> &str {
        "json-formatter"
    }

    fn description(&self) -> &str {
        "Pretty-print, minify or validate JSON. Object key order is preserved unless sort_keys is set."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "format": "multiline",
                    "description": "JSON document"
                },
                "action": {
                    "type": "string",
                    "enum": ["format", "minify", "validate"],
                    "default": "format"
                },
                "indent": {
                    "type": "string",
                    "enum": ["2", "4", "tab"],
                    "default": "2"
                },
                "sort_keys": {
                    "type": "boolean",
                    "default": false
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: JsonFormatArgs = parse_tool_args(args)?;
        Ok(ToolResult::from_outcome(Self::run(&args)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"name":"toolbox","tags":["json","中文"],"nested":{"z":1,"a":[true,null,1.5]}}"#;

    #[test]
    fn formats_with_two_spaces_preserving_key_order() {
        let formatted = format(r#"{"b":1,"a":[1,2]}"#, Indent::Two, false).unwrap();
        assert_eq!(formatted, "{\n  \"b\": 1,\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn formats_with_tabs_and_sorted_keys() {
        let formatted = format(r#"{"b":{"y":1,"x":2},"a":0}"#, Indent::Tab, true).unwrap();
        assert_eq!(
            formatted,
            "{\n\t\"a\": 0,\n\t\"b\": {\n\t\t\"x\": 2,\n\t\t\"y\": 1\n\t}\n}"
        );
    }

    #[test]
    fn format_minify_format_is_idempotent() {
        for indent in [Indent::Two, Indent::Four, Indent::Tab] {
            let formatted = format(SAMPLE, indent, false).unwrap();
            let again = format(&minify(&formatted).unwrap(), indent, false).unwrap();
            assert_eq!(again, formatted);
        }
    }

    #[test]
    fn minify_strips_whitespace() {
        assert_eq!(minify("{ \"a\" : [ 1 , 2 ] }").unwrap(), r#"{"a":[1,2]}"#);
        assert_eq!(minify(SAMPLE).unwrap(), SAMPLE);
    }

    #[test]
    fn parse_errors_carry_position() {
        let err = format("{\n  \"a\": 1,\n}", Indent::Two, false).unwrap_err();
        match err {
            JsonToolError::Parse { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(minify("").unwrap_err().to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn validate_summarizes_top_level() {
        assert_eq!(validate(SAMPLE).unwrap(), "Valid JSON: object with 3 keys");
        assert_eq!(validate("[1,2]").unwrap(), "Valid JSON: array with 2 items");
        assert!(validate("{oops}").is_err());
    }

    #[tokio::test]
    async fn execute_uses_indent_option() {
        let result = JsonFormatTool::new()
            .execute(json!({"text": "[1]", "indent": "4"}))
            .await
            .unwrap();
        assert_eq!(result, ToolResult::ok("[\n    1\n]"));
    }
}
