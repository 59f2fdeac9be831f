//! Base64 encode/decode over UTF-8 text.

use async_trait::async_trait;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use toolbox_core::{parse_tool_args, Tool, ToolError, ToolResult};

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    LENIENT.with_encode_padding(false),
);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base64Error {
    #[error("Invalid Base64 input: {0}")]
    InvalidInput(String),
    #[error("Decoded data is not valid UTF-8 text")]
    NotUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base64Action {
    #[default]
    Encode,
    Decode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base64Args {
    pub text: String,
    #[serde(default)]
    pub action: Base64Action,
    #[serde(default)]
    pub url_safe: bool,
}

fn engine(url_safe: bool) -> &'static GeneralPurpose {
    if url_safe {
        &URL_SAFE
    } else {
        &STANDARD
    }
}

pub fn encode(text: &str, url_safe: bool) -> String {
    engine(url_safe).encode(text.as_bytes())
}

/// Decode Base64 into UTF-8 text. ASCII whitespace (line wrapping) is ignored
/// and padding is optional.
pub fn decode(text: &str, url_safe: bool) -> Result<String, Base64Error> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = engine(url_safe)
        .decode(compact.as_bytes())
        .map_err(|e| Base64Error::InvalidInput(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| Base64Error::NotUtf8)
}

pub struct Base64Tool;

impl Base64Tool {
    pub fn new() -> Self {
        Self
    }

    pub fn run(args: &Base64Args) -> Result<String, Base64Error> {
        match args.action {
            Base64Action::Encode => Ok(encode(&args.text, args.url_safe)),
            Base64Action::Decode => decode(&args.text, args.url_safe),
        }
    }
}

impl Default for Base64Tool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for Base64Tool {
    fn name(&self) -> &str {
        "base64"
    }

    fn description(&self) -> &str {
        "Encode UTF-8 text to Base64 or decode Base64 back to text. Supports the URL-safe alphabet."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "format": "multiline",
                    "description": "Text to encode, or Base64 to decode"
                },
                "action": {
                    "type": "string",
                    "enum": ["encode", "decode"],
                    "default": "encode"
                },
                "url_safe": {
                    "type": "boolean",
                    "default": false,
                    "description": "Use the URL-safe alphabet (- and _) without padding"
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: Base64Args = parse_tool_args(args)?;
        Ok(ToolResult::from_outcome(Self::run(&args)))
    }
}
