//! Static tool catalog: categories and the tools listed under them.
//!
//! The catalog drives the sidebar, the command palette, page routing and the
//! sitemap. Names and descriptions are message keys resolved per locale.

use serde::Serialize;

use crate::i18n::MessageCatalog;
use crate::locale::Locale;
use crate::tools::ToolRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInfo {
    pub id: &'static str,
    pub icon: &'static str,
}

impl ToolInfo {
    pub fn name_key(&self) -> String {
        format!("tool.{}.name", self.id)
    }

    pub fn description_key(&self) -> String {
        format!("tool.{}.description", self.id)
    }

    pub fn path(&self) -> String {
        format!("/tools/{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCategory {
    pub id: &'static str,
    pub icon: &'static str,
    pub tools: &'static [ToolInfo],
}

impl ToolCategory {
    pub fn name_key(&self) -> String {
        format!("category.{}.name", self.id)
    }
}

static CATEGORIES: &[ToolCategory] = &[
    ToolCategory {
        id: "encoding",
        icon: "binary",
        tools: &[
            ToolInfo {
                id: "base64",
                icon: "file-code",
            },
            ToolInfo {
                id: "url-encode",
                icon: "link",
            },
        ],
    },
    ToolCategory {
        id: "formatting",
        icon: "braces",
        tools: &[
            ToolInfo {
                id: "json-formatter",
                icon: "braces",
            },
            ToolInfo {
                id: "markdown-preview",
                icon: "file-text",
            },
        ],
    },
    ToolCategory {
        id: "generators",
        icon: "sparkles",
        tools: &[
            ToolInfo {
                id: "password-generator",
                icon: "key-round",
            },
            ToolInfo {
                id: "qr-code",
                icon: "qr-code",
            },
        ],
    },
    ToolCategory {
        id: "converters",
        icon: "repeat",
        tools: &[
            ToolInfo {
                id: "color-converter",
                icon: "palette",
            },
            ToolInfo {
                id: "timestamp",
                icon: "clock",
            },
        ],
    },
];

/// Read-only view over the compiled-in categories.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    categories: &'static [ToolCategory],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            categories: CATEGORIES,
        }
    }

    pub fn categories(&self) -> &'static [ToolCategory] {
        self.categories
    }

    pub fn category(&self, id: &str) -> Option<&'static ToolCategory> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_ids(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|category| category.id.to_string())
            .collect()
    }

    /// Every tool paired with its category, in display order.
    pub fn tools(&self) -> impl Iterator<Item = (&'static ToolCategory, &'static ToolInfo)> {
        self.categories
            .iter()
            .flat_map(|category| category.tools.iter().map(move |tool| (category, tool)))
    }

    pub fn find_tool(&self, id: &str) -> Option<(&'static ToolCategory, &'static ToolInfo)> {
        self.tools().find(|(_, tool)| tool.id == id)
    }

    pub fn tool_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.tools.len())
            .sum()
    }

    /// Catalog tool ids without a registered implementation.
    pub fn verify_against(&self, registry: &ToolRegistry) -> Vec<&'static str> {
        self.tools()
            .map(|(_, tool)| tool.id)
            .filter(|id| !registry.contains(id))
            .collect()
    }

    pub fn localized(&self, messages: &MessageCatalog, locale: Locale) -> Vec<LocalizedCategory> {
        self.categories
            .iter()
            .map(|category| LocalizedCategory {
                id: category.id.to_string(),
                name: messages.get(locale, &category.name_key()).to_string(),
                icon: category.icon.to_string(),
                tools: category
                    .tools
                    .iter()
                    .map(|tool| LocalizedTool::new(tool, messages, locale))
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedTool {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub path: String,
}

impl LocalizedTool {
    pub fn new(tool: &ToolInfo, messages: &MessageCatalog, locale: Locale) -> Self {
        Self {
            id: tool.id.to_string(),
            name: messages.get(locale, &tool.name_key()).to_string(),
            description: messages.get(locale, &tool.description_key()).to_string(),
            icon: tool.icon.to_string(),
            path: tool.path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub tools: Vec<LocalizedTool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tool_ids_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<_> = catalog.tools().map(|(_, tool)| tool.id).collect();
        assert_eq!(ids.len(), catalog.tool_count());
        assert_eq!(catalog.tool_count(), 8);
    }

    #[test]
    fn find_tool_returns_category() {
        let catalog = Catalog::builtin();
        let (category, tool) = catalog.find_tool("qr-code").unwrap();
        assert_eq!(category.id, "generators");
        assert_eq!(tool.path(), "/tools/qr-code");
        assert!(catalog.find_tool("nope").is_none());
    }

    #[test]
    fn every_entry_has_translations() {
        let catalog = Catalog::builtin();
        let messages = MessageCatalog::builtin();
        for locale in Locale::all() {
            for category in catalog.categories() {
                assert!(messages.lookup(*locale, &category.name_key()).is_some());
            }
            for (_, tool) in catalog.tools() {
                assert!(messages.lookup(*locale, &tool.name_key()).is_some());
                assert!(messages.lookup(*locale, &tool.description_key()).is_some());
            }
        }
    }

    #[test]
    fn localized_view_uses_locale() {
        let catalog = Catalog::builtin();
        let categories = catalog.localized(MessageCatalog::builtin(), Locale::En);
        assert_eq!(categories[0].name, "Encoding");
        assert_eq!(categories[0].tools[0].name, "Base64 Encode/Decode");
    }

    #[test]
    fn verify_against_lists_unregistered_tools() {
        let catalog = Catalog::builtin();
        let missing = catalog.verify_against(&ToolRegistry::new());
        assert_eq!(missing.len(), catalog.tool_count());
    }
}
