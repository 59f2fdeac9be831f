//! Request and response bodies of the JSON API.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use toolbox_core::{palette::SearchHit, LocalizedCategory, LocalizedTool};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub tools: usize,
}

/// The localized category tree.
#[derive(Serialize, Debug, Clone)]
pub struct CatalogResponse {
    pub locale: String,
    pub tool_count: usize,
    pub categories: Vec<LocalizedCategory>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ToolDetailResponse {
    #[serde(flatten)]
    pub tool: LocalizedTool,
    pub category_id: String,
    pub category_name: String,
    /// JSON schema of the execute arguments.
    pub parameters: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecuteToolResponse {
    pub tool: String,
    pub success: bool,
    pub result: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Serialize, Debug, Clone)]
pub struct SearchResponse {
    pub query: String,
    pub locale: String,
    /// Label of the palette shortcut for the caller's platform, e.g. `⌘K`.
    pub shortcut: String,
    pub results: Vec<SearchHit>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LocalePreference {
    pub locale: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ThemePreference {
    pub theme: String,
}

/// Either field may be omitted to leave that cookie untouched.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SidebarPreference {
    pub collapsed: Option<bool>,
    pub expanded_categories: Option<Vec<String>>,
}

#[derive(Serialize, Debug, Clone)]
pub struct MessagesResponse {
    pub locale: String,
    pub html_lang: String,
    pub messages: BTreeMap<String, String>,
}
