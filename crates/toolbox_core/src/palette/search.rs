use serde::Serialize;

use crate::catalog::{Catalog, LocalizedTool};
use crate::i18n::MessageCatalog;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Prefix,
    Substring,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub tool: LocalizedTool,
    pub category_id: String,
    pub category_name: String,
    pub match_kind: MatchKind,
}

/// Rank catalog tools against `query`.
///
/// An empty query lists every tool in catalog order. Ties keep catalog order.
pub fn search(
    catalog: &Catalog,
    messages: &MessageCatalog,
    locale: Locale,
    query: &str,
    limit: usize,
) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();

    let mut hits: Vec<SearchHit> = catalog
        .tools()
        .filter_map(|(category, tool)| {
            let localized = LocalizedTool::new(tool, messages, locale);
            let category_name = messages.get(locale, &category.name_key()).to_string();

            let match_kind = if needle.is_empty() {
                MatchKind::Exact
            } else {
                classify(&needle, &localized, &category_name)?
            };

            Some(SearchHit {
                tool: localized,
                category_id: category.id.to_string(),
                category_name,
                match_kind,
            })
        })
        .collect();

    hits.sort_by_key(|hit| hit.match_kind);
    hits.truncate(limit);
    hits
}

fn classify(needle: &str, tool: &LocalizedTool, category_name: &str) -> Option<MatchKind> {
    let name = tool.name.to_lowercase();
    let id = tool.id.to_lowercase();

    if name == needle || id == needle {
        Some(MatchKind::Exact)
    } else if name.starts_with(needle) || id.starts_with(needle) {
        Some(MatchKind::Prefix)
    } else if name.contains(needle) || id.contains(needle) {
        Some(MatchKind::Substring)
    } else if tool.description.to_lowercase().contains(needle)
        || category_name.to_lowercase().contains(needle)
    {
        Some(MatchKind::Description)
    } else {
        None
    }
}
