//! UI string catalog with locale fallback and `{name}` interpolation.
//!
//! Lookups try the requested locale, then [`Locale::DEFAULT`], then return the
//! key itself so a missing translation shows up as a readable key instead of
//! an empty label. Interpolation is a single pass: substituted values are
//! never re-scanned for tokens, and unknown tokens are left untouched.

mod messages;

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use crate::locale::Locale;

static BUILTIN: Lazy<MessageCatalog> = Lazy::new(MessageCatalog::from_builtin_tables);

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    locales: HashMap<Locale, HashMap<String, String>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> &'static MessageCatalog {
        &BUILTIN
    }

    fn from_builtin_tables() -> Self {
        let mut catalog = Self::new();
        for (key, value) in messages::ZH {
            catalog.insert(Locale::Zh, *key, *value);
        }
        for (key, value) in messages::EN {
            catalog.insert(Locale::En, *key, *value);
        }
        catalog
    }

    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, value: impl Into<String>) {
        self.locales
            .entry(locale)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Strict lookup without fallback.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.locales
            .get(&locale)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }

    pub fn get<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::DEFAULT, key))
            .unwrap_or(key)
    }

    pub fn format(&self, locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(self.get(locale, key), args)
    }

    /// All strings of one locale, with default-locale strings filling gaps.
    pub fn entries(&self, locale: Locale) -> BTreeMap<String, String> {
        let mut merged = BTreeMap::new();
        if let Some(strings) = self.locales.get(&Locale::DEFAULT) {
            merged.extend(strings.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(strings) = self.locales.get(&locale) {
            merged.extend(strings.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Keys present in the default locale but missing from `locale`.
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let Some(reference) = self.locales.get(&Locale::DEFAULT) else {
            return Vec::new();
        };
        let target = self.locales.get(&locale);
        let mut missing: Vec<String> = reference
            .keys()
            .filter(|key| target.map_or(true, |strings| !strings.contains_key(*key)))
            .cloned()
            .collect();
        missing.sort();
        missing
    }
}

/// Replace `{name}` tokens with the matching argument value.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match args.iter().find(|(arg, _)| *arg == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_locales_have_the_same_keys() {
        let catalog = MessageCatalog::builtin();
        assert!(catalog.missing_keys(Locale::En).is_empty());

        let en_keys: Vec<_> = messages::EN.iter().map(|(k, _)| *k).collect();
        for (key, _) in messages::ZH {
            assert!(en_keys.contains(key), "missing en translation for {key}");
        }
    }

    #[test]
    fn lookup_falls_back_to_default_locale_then_key() {
        let mut catalog = MessageCatalog::new();
        catalog.insert(Locale::Zh, "only.zh", "仅中文");

        assert_eq!(catalog.get(Locale::En, "only.zh"), "仅中文");
        assert_eq!(catalog.get(Locale::En, "nowhere"), "nowhere");
        assert_eq!(catalog.lookup(Locale::En, "only.zh"), None);
    }

    #[test]
    fn format_interpolates_known_tokens_only() {
        let mut catalog = MessageCatalog::new();
        catalog.insert(Locale::En, "greet", "Hello, {name}! {unknown}");

        assert_eq!(
            catalog.format(Locale::En, "greet", &[("name", "{name}")]),
            "Hello, {name}! {unknown}"
        );
        assert_eq!(
            catalog.format(Locale::En, "greet", &[("name", "Ada")]),
            "Hello, Ada! {unknown}"
        );
    }

    #[test]
    fn interpolate_keeps_unterminated_braces() {
        assert_eq!(interpolate("a {b", &[("b", "x")]), "a {b");
        assert_eq!(interpolate("{a}{b}", &[("a", "1"), ("b", "2")]), "12");
    }

    #[test]
    fn entries_merge_default_locale() {
        let mut catalog = MessageCatalog::new();
        catalog.insert(Locale::Zh, "a", "甲");
        catalog.insert(Locale::Zh, "b", "乙");
        catalog.insert(Locale::En, "a", "A");

        let entries = catalog.entries(Locale::En);
        assert_eq!(entries.get("a").map(String::as_str), Some("A"));
        assert_eq!(entries.get("b").map(String::as_str), Some("乙"));
    }
}
