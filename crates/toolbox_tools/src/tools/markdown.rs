//! Markdown to HTML preview.

use async_trait::async_trait;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use serde::{Deserialize, Serialize};
use serde_json::json;
use toolbox_core::{parse_tool_args, Tool, ToolError, ToolResult};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether a link or image target may be emitted as is. Relative URLs and
/// fragments are fine; absolute ones need an allowed scheme.
pub fn is_safe_url(url: &str) -> bool {
    // browsers drop whitespace and control characters inside a scheme
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.find(|c| matches!(c, ':' | '/' | '?' | '#')) {
        Some(idx) if normalized[idx..].starts_with(':') => {
            ALLOWED_SCHEMES.contains(&&normalized[..idx])
        }
        _ => true,
    }
}

fn safe_dest(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&dest) {
        dest
    } else {
        CowStr::Borrowed("#")
    }
}

/// Render Markdown to HTML. Raw HTML in the source is emitted as escaped text
/// and link or image targets with a scripting scheme become `#`.
pub fn render(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_dest(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_dest(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownArgs {
    pub markdown: String,
}

pub struct MarkdownTool;

impl MarkdownTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MarkdownTool {
    fn name(&self) -> &str {
        "markdown-preview"
    }

    fn description(&self) -> &str {
        "Render Markdown (tables, task lists, strikethrough, footnotes) to HTML."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "markdown": {
                    "type": "string",
                    "format": "multiline",
                    "description": "Markdown source"
                }
            },
            "required": ["markdown"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: MarkdownArgs = parse_tool_args(args)?;
        Ok(ToolResult::ok(render(&args.markdown)))
    }
}
