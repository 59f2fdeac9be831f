//! UI language negotiation.
//!
//! Resolution order for a request is: explicit `lang` query parameter, then
//! the `locale` cookie, then the `Accept-Language` header, then [`Locale::DEFAULT`].
//! Every step only accepts a value that maps onto a supported locale; anything
//! else falls through to the next source, so resolution never fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const LOCALE_COOKIE: &str = "locale";
pub const LOCALE_QUERY_PARAM: &str = "lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Zh,
    En,
}

impl Locale {
    pub const DEFAULT: Locale = Locale::Zh;

    pub fn all() -> &'static [Locale] {
        &[Locale::Zh, Locale::En]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// Value for the `<html lang>` attribute and `hreflang` links.
    pub fn html_lang(&self) -> &'static str {
        match self {
            Locale::Zh => "zh-CN",
            Locale::En => "en",
        }
    }

    /// Value for `og:locale`.
    pub fn og_locale(&self) -> &'static str {
        match self {
            Locale::Zh => "zh_CN",
            Locale::En => "en_US",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Zh => "中文",
            Locale::En => "English",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// Map a language tag such as `en`, `EN-us` or `zh_Hant` onto a supported
    /// locale by its primary subtag.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "zh" => Some(Locale::Zh),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}'")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_tag(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// The request inputs locale resolution looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleSources<'a> {
    pub query: Option<&'a str>,
    pub cookie: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

pub fn resolve_locale(sources: LocaleSources<'_>) -> Locale {
    sources
        .query
        .and_then(Locale::from_tag)
        .or_else(|| sources.cookie.and_then(Locale::from_tag))
        .or_else(|| sources.accept_language.and_then(negotiate_accept_language))
        .unwrap_or(Locale::DEFAULT)
}

/// Pick the best supported locale from an `Accept-Language` header value.
pub fn negotiate_accept_language(header: &str) -> Option<Locale> {
    let mut ranges: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(parse_language_range)
        .filter(|(_, quality)| *quality > 0.0)
        .collect();

    // sort_by is stable, so equal qualities keep header order
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranges
        .into_iter()
        .filter(|(tag, _)| *tag != "*")
        .find_map(|(tag, _)| Locale::from_tag(tag))
}

fn parse_language_range(entry: &str) -> Option<(&str, f32)> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();
    if tag.is_empty() {
        return None;
    }

    let mut quality = 1.0;
    for param in parts {
        if let Some((key, value)) = param.split_once('=') {
            if key.trim().eq_ignore_ascii_case("q") {
                quality = value
                    .trim()
                    .parse::<f32>()
                    .ok()
                    .filter(|q| q.is_finite())
                    .map(|q| q.clamp(0.0, 1.0))
                    .unwrap_or(0.0);
            }
        }
    }

    Some((tag, quality))
}
