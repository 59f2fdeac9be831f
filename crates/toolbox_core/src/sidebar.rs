//! Sidebar navigation state and its cookie representation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

pub const SIDEBAR_COLLAPSED_COOKIE: &str = "sidebar:collapsed";
pub const SIDEBAR_EXPANDED_COOKIE: &str = "sidebar:expanded-categories";

static MOBILE_UA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Mobi|Android|iPhone|iPad|iPod").expect("valid regex"));

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_UA.is_match(user_agent)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    pub collapsed: bool,
    pub expanded_categories: Vec<String>,
    pub is_mobile: bool,
}

impl SidebarState {
    /// Not collapsed, every category expanded.
    pub fn default_for(catalog: &Catalog, is_mobile: bool) -> Self {
        Self {
            collapsed: false,
            expanded_categories: catalog.category_ids(),
            is_mobile,
        }
    }

    /// Rebuild the state from raw cookie values.
    ///
    /// Mobile clients always get the default state. A malformed value only
    /// resets its own field, and category ids the catalog doesn't know are
    /// dropped.
    pub fn from_cookies(
        catalog: &Catalog,
        collapsed: Option<&str>,
        expanded: Option<&str>,
        is_mobile: bool,
    ) -> Self {
        let mut state = Self::default_for(catalog, is_mobile);
        if is_mobile {
            return state;
        }

        if let Some(collapsed) = collapsed.and_then(parse_bool) {
            state.collapsed = collapsed;
        }

        if let Some(raw) = expanded {
            match serde_json::from_str::<Vec<String>>(raw) {
                Ok(ids) => state.expanded_categories = sanitize(catalog, ids),
                Err(e) => log::debug!("ignoring malformed {} cookie: {}", SIDEBAR_EXPANDED_COOKIE, e),
            }
        }

        state
    }

    pub fn collapsed_cookie_value(&self) -> String {
        self.collapsed.to_string()
    }

    pub fn expanded_cookie_value(&self) -> String {
        serde_json::to_string(&self.expanded_categories).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded_categories.iter().any(|id| id == category)
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn toggle_category(&mut self, category: &str) {
        if self.is_expanded(category) {
            self.expanded_categories.retain(|id| id != category);
        } else {
            self.expanded_categories.push(category.to_string());
        }
    }

    pub fn expand(&mut self, category: &str) {
        if !self.is_expanded(category) {
            self.expanded_categories.push(category.to_string());
        }
    }

    pub fn expand_all(&mut self, catalog: &Catalog) {
        self.expanded_categories = catalog.category_ids();
    }

    pub fn collapse_all(&mut self) {
        self.expanded_categories.clear();
    }
}

/// Keep only known category ids, first occurrence wins.
pub fn sanitize(catalog: &Catalog, ids: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if catalog.category(&id).is_some() && !kept.contains(&id) {
            kept.push(id);
        }
    }
    kept
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
