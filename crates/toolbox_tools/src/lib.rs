//! Built-in toolbox tools.
//!
//! Every tool exposes its transform as plain functions (usable without the
//! registry) and a `Tool` impl that parses JSON arguments and reports bad user
//! input as an unsuccessful `ToolResult` rather than an error.

pub mod tools;

use toolbox_core::{RegistryError, ToolRegistry};

pub use tools::{
    Base64Tool, ColorTool, JsonFormatTool, MarkdownTool, PasswordTool, QrCodeTool, TimestampTool,
    UrlCodecTool,
};

/// Names of all built-in tools, matching the catalog ids.
pub const BUILTIN_TOOL_NAMES: [&str; 8] = [
    "base64",
    "url-encode",
    "json-formatter",
    "markdown-preview",
    "password-generator",
    "qr-code",
    "color-converter",
    "timestamp",
];

/// Settings some tools need at construction time.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    pub qr_api_base: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            qr_api_base: tools::qr_code::DEFAULT_QR_API.to_string(),
        }
    }
}

pub fn is_builtin_tool(name: &str) -> bool {
    BUILTIN_TOOL_NAMES.contains(&name.trim())
}

/// Registers all built-in tools to the given registry
pub fn register_builtin_tools(
    registry: &ToolRegistry,
    config: &ToolsConfig,
) -> Result<(), RegistryError> {
    // Encoding
    registry.register(Base64Tool::new())?;
    registry.register(UrlCodecTool::new())?;

    // Formatting
    registry.register(JsonFormatTool::new())?;
    registry.register(MarkdownTool::new())?;

    // Generators
    registry.register(PasswordTool::new())?;
    registry.register(QrCodeTool::new(config.qr_api_base.clone()))?;

    // Converters
    registry.register(ColorTool::new())?;
    registry.register(TimestampTool::new())?;

    log::info!("registered {} built-in tools", registry.len());
    Ok(())
}

/// A registry pre-filled with the built-in tools.
pub fn builtin_registry(config: &ToolsConfig) -> Result<ToolRegistry, RegistryError> {
    let registry = ToolRegistry::new();
    register_builtin_tools(&registry, config)?;
    Ok(registry)
}
