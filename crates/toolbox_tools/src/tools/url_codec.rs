//! Percent-encoding for URLs and URL components.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use toolbox_core::{parse_tool_args, Tool, ToolError, ToolResult};

/// Characters `uri` mode leaves alone on top of the unreserved set.
const URI_RESERVED: &str = ";,/?:@&=+$#";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlCodecError {
    #[error("Malformed percent-encoding at position {0}")]
    MalformedEscape(usize),
    #[error("Decoded data is not valid UTF-8 text")]
    NotUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeMode {
    /// Encode everything except RFC 3986 unreserved characters.
    #[default]
    Component,
    /// Also keep URI delimiters, for encoding a whole URL.
    Uri,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlAction {
    #[default]
    Encode,
    Decode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlCodecArgs {
    pub text: String,
    #[serde(default)]
    pub action: UrlAction,
    #[serde(default)]
    pub mode: EncodeMode,
}

pub fn encode(text: &str, mode: EncodeMode) -> String {
    match mode {
        EncodeMode::Component => urlencoding::encode(text).into_owned(),
        EncodeMode::Uri => {
            let mut out = String::with_capacity(text.len());
            let mut run_start = 0;
            for (idx, ch) in text.char_indices() {
                if URI_RESERVED.contains(ch) {
                    out.push_str(&urlencoding::encode(&text[run_start..idx]));
                    out.push(ch);
                    run_start = idx + ch.len_utf8();
                }
            }
            out.push_str(&urlencoding::encode(&text[run_start..]));
            out
        }
    }
}

/// Decode percent-escapes. Unlike a lenient decoder, a `%` that isn't
/// followed by two hex digits is an error.
pub fn decode(text: &str) -> Result<String, UrlCodecError> {
    let bytes = text.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let valid = bytes
                .get(idx + 1..idx + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(UrlCodecError::MalformedEscape(idx));
            }
            idx += 3;
        } else {
            idx += 1;
        }
    }

    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UrlCodecError::NotUtf8)
}

pub struct UrlCodecTool;

impl UrlCodecTool {
    pub fn new() -> Self {
        Self
    }

    pub fn run(args: &UrlCodecArgs) -> Result<String, UrlCodecError> {
        match args.action {
            UrlAction::Encode => Ok(encode(&args.text, args.mode)),
            UrlAction::Decode => decode(&args.text),
        }
    }
}

impl Default for UrlCodecTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for UrlCodecTool {
    fn name(&self) -> &str {
        "url-encode"
    }

    fn description(&self) -> &str {
        "Percent-encode or decode text for use in URLs, either as a single component or as a full URI."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "format": "multiline",
                    "description": "Text to encode, or percent-encoded text to decode"
                },
                "action": {
                    "type": "string",
                    "enum": ["encode", "decode"],
                    "default": "encode"
                },
                "mode": {
                    "type": "string",
                    "enum": ["component", "uri"],
                    "default": "component",
                    "description": "component encodes URI delimiters too; uri keeps them"
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: UrlCodecArgs = parse_tool_args(args)?;
        Ok(ToolResult::from_outcome(Self::run(&args)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_mode_encodes_reserved_characters() {
        assert_eq!(
            encode("a b&c=d/e?f#g", EncodeMode::Component),
            "a%20b%26c%3Dd%2Fe%3Ff%23g"
        );
        assert_eq!(encode("中", EncodeMode::Component), "%E4%B8%AD");
        assert_eq!(encode("-_.~", EncodeMode::Component), "-_.~");
    }

    #[test]
    fn uri_mode_keeps_delimiters() {
        assert_eq!(
            encode("https://example.com/a b?q=你好#top", EncodeMode::Uri),
            "https://example.com/a%20b?q=%E4%BD%A0%E5%A5%BD#top"
        );
    }

    #[test]
    fn round_trips_in_both_modes() {
        let samples = [
            "",
            "plain",
            "key=value&other=1",
            "100% sure; ok?",
            "路径/文件 name.txt",
            "emoji 🚀 + spaces",
        ];
        for text in samples {
            assert_eq!(decode(&encode(text, EncodeMode::Component)).unwrap(), text);
            assert_eq!(decode(&encode(text, EncodeMode::Uri)).unwrap(), text);
        }
    }

    #[test]
    fn decode_rejects_malformed_escapes() {
        assert_eq!(decode("abc%"), Err(UrlCodecError::MalformedEscape(3)));
        assert_eq!(decode("%zz"), Err(UrlCodecError::MalformedEscape(0)));
        assert_eq!(decode("%E4%B8"), Err(UrlCodecError::NotUtf8));
    }

    #[test]
    fn decode_leaves_plus_alone() {
        assert_eq!(decode("a+b%20c").unwrap(), "a+b c");
    }

    #[tokio::test]
    async fn execute_decodes() {
        let result = UrlCodecTool::new()
            .execute(json!({"text": "%E4%BD%A0%E5%A5%BD", "action": "decode"}))
            .await
            .unwrap();
        assert_eq!(result, ToolResult::ok("你好"));
    }
}
