pub mod registry;
pub mod types;

pub use registry::{RegistryError, SharedTool, Tool, ToolRegistry};
pub use types::{parse_tool_args, ToolError, ToolResult, ToolSchema};
