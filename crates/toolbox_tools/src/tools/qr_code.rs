//! QR code image links.
//!
//! Rendering is delegated to an external image service; this tool only builds
//! the request URL. The page embeds it as an `<img>` and the browser fetches it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use toolbox_core::{parse_tool_args, Tool, ToolError, ToolResult};

pub const DEFAULT_QR_API: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const MIN_SIZE: u32 = 100;
pub const MAX_SIZE: u32 = 1000;
/// The service rejects longer payloads.
pub const MAX_TEXT_BYTES: usize = 900;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QrCodeError {
    #[error("Enter some text or a link to encode")]
    EmptyText,
    #[error("Text is too long for a QR code ({0} bytes, at most 900)")]
    TooLong(usize),
    #[error("Size must be between 100 and 1000 pixels, got {0}")]
    InvalidSize(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    #[default]
    Png,
    Svg,
}

impl QrFormat {
    fn as_str(&self) -> &'static str {
        match self {
            QrFormat::Png => "png",
            QrFormat::Svg => "svg",
        }
    }
}

fn default_size() -> u32 {
    200
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeArgs {
    pub text: String,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub format: QrFormat,
}

pub fn image_url(
    base: &str,
    text: &str,
    size: u32,
    format: QrFormat,
) -> Result<String, QrCodeError> {
    if text.trim().is_empty() {
        return Err(QrCodeError::EmptyText);
    }
    if text.len() > MAX_TEXT_BYTES {
        return Err(QrCodeError::TooLong(text.len()));
    }
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(QrCodeError::InvalidSize(size));
    }

    let separator = if base.contains('?') { '&' } else { '?' };
    Ok(format!(
        "{base}{separator}size={size}x{size}&format={}&data={}",
        format.as_str(),
        urlencoding::encode(text)
    ))
}

pub struct QrCodeTool {
    api_base: String,
}

impl QrCodeTool {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

impl Default for QrCodeTool {
    fn default() -> Self {
        Self::new(DEFAULT_QR_API)
    }
}

#[async_trait]
impl Tool for QrCodeTool {
    fn name(&self) -> &str {
        "qr-code"
    }

    fn description(&self) -> &str {
        "Build a QR code image URL for the given text or link."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "format": "multiline",
                    "description": "Text or link to encode"
                },
                "size": {
                    "type": "integer",
                    "minimum": MIN_SIZE,
                    "maximum": MAX_SIZE,
                    "default": 200
                },
                "format": {
                    "type": "string",
                    "enum": ["png", "svg"],
                    "default": "png"
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: QrCodeArgs = parse_tool_args(args)?;
        log::debug!("building QR image url ({} bytes, {}px)", args.text.len(), args.size);
        Ok(ToolResult::from_outcome(image_url(
            &self.api_base,
            &args.text,
            args.size,
            args.format,
        )))
    }
}
