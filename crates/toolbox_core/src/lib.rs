//! Domain layer of the dev toolbox: the tool trait and registry, the static
//! category catalog, locale negotiation, UI strings and the navigation state
//! (sidebar, theme, command palette). Nothing in here knows about HTTP.

pub mod catalog;
pub mod i18n;
pub mod locale;
pub mod palette;
pub mod sidebar;
pub mod theme;
pub mod tools;

pub use catalog::{Catalog, LocalizedCategory, LocalizedTool, ToolCategory, ToolInfo};
pub use i18n::MessageCatalog;
pub use locale::{resolve_locale, Locale, LocaleSources};
pub use sidebar::SidebarState;
pub use theme::Theme;
pub use tools::{
    parse_tool_args, RegistryError, SharedTool, Tool, ToolError, ToolRegistry, ToolResult,
    ToolSchema,
};
