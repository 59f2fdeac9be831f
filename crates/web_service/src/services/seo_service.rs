//! Page metadata, structured data and the crawler-facing documents
//! (sitemap, robots policy, Open-Graph image).

use std::fmt::Write as _;

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;
use serde_json::{json, Value};
use toolbox_core::{Catalog, Locale, MessageCatalog};

pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;
pub const OG_TITLE_MAX_CHARS: usize = 60;
pub const OG_DESCRIPTION_MAX_CHARS: usize = 140;
const OG_DESCRIPTION_LINE_CHARS: usize = 48;
const OG_DESCRIPTION_LINE_HEIGHT: u32 = 46;

const OG_IMAGE_TEMPLATE: &str = include_str!("../../templates/og_image.svg");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    pub alternate_locales: Vec<String>,
    pub image: String,
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub alternates: Vec<Alternate>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub json_ld: Vec<Value>,
    pub noindex: bool,
}

impl PageMetadata {
    /// The `<head>` tags for this page, without `<title>`'s surrounding layout.
    pub fn head_html(&self) -> String {
        let attr = |value: &str| encode_double_quoted_attribute(value).into_owned();
        let mut out = String::new();

        let _ = writeln!(out, "<title>{}</title>", encode_text(&self.title));
        let _ = writeln!(
            out,
            r#"<meta name="description" content="{}">"#,
            attr(&self.description)
        );
        if !self.keywords.is_empty() {
            let _ = writeln!(
                out,
                r#"<meta name="keywords" content="{}">"#,
                attr(&self.keywords.join(","))
            );
        }
        if self.noindex {
            out.push_str("<meta name=\"robots\" content=\"noindex\">\n");
        }
        let _ = writeln!(out, r#"<link rel="canonical" href="{}">"#, attr(&self.canonical));
        for alternate in &self.alternates {
            let _ = writeln!(
                out,
                r#"<link rel="alternate" hreflang="{}" href="{}">"#,
                attr(&alternate.hreflang),
                attr(&alternate.href)
            );
        }

        let og = &self.open_graph;
        let og_tags = [
            ("og:type", og.kind.to_string()),
            ("og:title", og.title.clone()),
            ("og:description", og.description.clone()),
            ("og:url", og.url.clone()),
            ("og:site_name", og.site_name.clone()),
            ("og:locale", og.locale.clone()),
            ("og:image", og.image.clone()),
            ("og:image:width", OG_IMAGE_WIDTH.to_string()),
            ("og:image:height", OG_IMAGE_HEIGHT.to_string()),
        ];
        for (property, content) in og_tags {
            let _ = writeln!(
                out,
                r#"<meta property="{property}" content="{}">"#,
                attr(&content)
            );
        }
        for locale in &og.alternate_locales {
            let _ = writeln!(
                out,
                r#"<meta property="og:locale:alternate" content="{}">"#,
                attr(locale)
            );
        }

        let twitter = &self.twitter;
        for (name, content) in [
            ("twitter:card", twitter.card),
            ("twitter:title", twitter.title.as_str()),
            ("twitter:description", twitter.description.as_str()),
            ("twitter:image", twitter.image.as_str()),
        ] {
            let _ = writeln!(out, r#"<meta name="{name}" content="{}">"#, attr(content));
        }

        for block in &self.json_ld {
            // `</` must not appear inside a script element
            let serialized = block.to_string().replace("</", "<\\/");
            let _ = writeln!(
                out,
                r#"<script type="application/ld+json">{serialized}</script>"#
            );
        }

        out
    }
}

#[derive(Debug, Clone)]
pub struct SeoService {
    site_url: String,
    catalog: Catalog,
    messages: &'static MessageCatalog,
    last_modified: NaiveDate,
}

impl SeoService {
    pub fn new(
        site_url: impl Into<String>,
        catalog: Catalog,
        messages: &'static MessageCatalog,
        last_modified: NaiveDate,
    ) -> Self {
        Self {
            site_url: crate::config::normalize_site_url(&site_url.into()),
            catalog,
            messages,
            last_modified,
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Absolute URL of `path` in `locale`. The default locale carries no
    /// `lang` parameter.
    pub fn url_for(&self, path: &str, locale: Locale) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        if locale.is_default() {
            format!("{}{}", self.site_url, path)
        } else {
            format!("{}{}?lang={}", self.site_url, path, locale.as_str())
        }
    }

    /// One alternate per supported locale plus `x-default`.
    pub fn alternates(&self, path: &str) -> Vec<Alternate> {
        Locale::all()
            .iter()
            .map(|locale| Alternate {
                hreflang: locale.html_lang().to_string(),
                href: self.url_for(path, *locale),
            })
            .chain(std::iter::once(Alternate {
                hreflang: "x-default".to_string(),
                href: self.url_for(path, Locale::DEFAULT),
            }))
            .collect()
    }

    pub fn og_image_url(&self, title: &str, description: &str) -> String {
        format!(
            "{}/og?title={}&description={}",
            self.site_url,
            urlencoding::encode(title),
            urlencoding::encode(description)
        )
    }

    fn site_keywords(&self, locale: Locale) -> Vec<String> {
        self.messages
            .get(locale, "site.keywords")
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn base_metadata(
        &self,
        locale: Locale,
        path: &str,
        title: String,
        description: String,
        keywords: Vec<String>,
        og_title: &str,
    ) -> PageMetadata {
        let canonical = self.url_for(path, locale);
        let image = self.og_image_url(og_title, &description);
        let site_name = self.messages.get(locale, "site.title").to_string();

        PageMetadata {
            open_graph: OpenGraph {
                title: title.clone(),
                description: description.clone(),
                url: canonical.clone(),
                site_name,
                locale: locale.og_locale().to_string(),
                alternate_locales: Locale::all()
                    .iter()
                    .filter(|other| **other != locale)
                    .map(|other| other.og_locale().to_string())
                    .collect(),
                image: image.clone(),
                kind: "website",
            },
            twitter: TwitterCard {
                card: "summary_large_image",
                title: title.clone(),
                description: description.clone(),
                image,
            },
            title,
            description,
            keywords,
            canonical,
            alternates: self.alternates(path),
            json_ld: Vec::new(),
            noindex: false,
        }
    }

    pub fn home_metadata(&self, locale: Locale) -> PageMetadata {
        let title = self.messages.get(locale, "site.title").to_string();
        let description = self.messages.get(locale, "site.description").to_string();
        let mut metadata = self.base_metadata(
            locale,
            "/",
            title.clone(),
            description.clone(),
            self.site_keywords(locale),
            &title,
        );

        metadata.json_ld.push(json!({
            "@context": "https://schema.org",
            "@type": "WebSite",
            "name": title,
            "description": description,
            "url": self.url_for("/", locale),
            "inLanguage": locale.html_lang(),
            "potentialAction": {
                "@type": "SearchAction",
                "target": {
                    "@type": "EntryPoint",
                    "urlTemplate": format!("{}/?q={{search_term_string}}", self.site_url)
                },
                "query-input": "required name=search_term_string"
            }
        }));
        metadata
    }

    /// `None` when the catalog has no tool with this id.
    pub fn tool_metadata(&self, tool_id: &str, locale: Locale) -> Option<PageMetadata> {
        let (category, tool) = self.catalog.find_tool(tool_id)?;
        let site_title = self.messages.get(locale, "site.title");
        let tool_name = self.messages.get(locale, &tool.name_key()).to_string();
        let category_name = self.messages.get(locale, &category.name_key()).to_string();
        let description = self.messages.get(locale, &tool.description_key()).to_string();

        let mut keywords = vec![tool_name.clone(), category_name.clone()];
        keywords.extend(self.site_keywords(locale));

        let path = tool.path();
        let mut metadata = self.base_metadata(
            locale,
            &path,
            format!("{tool_name} - {site_title}"),
            description.clone(),
            keywords,
            &tool_name,
        );

        let page_url = self.url_for(&path, locale);
        let home_url = self.url_for("/", locale);
        metadata.json_ld.push(json!({
            "@context": "https://schema.org",
            "@type": "WebApplication",
            "name": tool_name,
            "description": description,
            "url": page_url,
            "inLanguage": locale.html_lang(),
            "applicationCategory": "DeveloperApplication",
            "operatingSystem": "Any",
            "isAccessibleForFree": true,
            "offers": {
                "@type": "Offer",
                "price": "0",
                "priceCurrency": "USD"
            }
        }));
        metadata.json_ld.push(json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": [
                {
                    "@type": "ListItem",
                    "position": 1,
                    "name": self.messages.get(locale, "nav.home"),
                    "item": home_url
                },
                {
                    "@type": "ListItem",
                    "position": 2,
                    "name": category_name,
                    "item": format!("{}#category-{}", home_url, category.id)
                },
                {
                    "@type": "ListItem",
                    "position": 3,
                    "name": tool_name,
                    "item": page_url
                }
            ]
        }));
        Some(metadata)
    }

    pub fn not_found_metadata(&self, locale: Locale) -> PageMetadata {
        let site_title = self.messages.get(locale, "site.title");
        let heading = self.messages.get(locale, "page.not_found.title");
        let mut metadata = self.base_metadata(
            locale,
            "/",
            format!("{heading} - {site_title}"),
            self.messages
                .get(locale, "page.not_found.description")
                .to_string(),
            Vec::new(),
            heading,
        );
        metadata.noindex = true;
        metadata
    }

    /// Home page plus every tool page, each with its language alternates.
    pub fn sitemap_xml(&self) -> String {
        let lastmod = self.last_modified.format("%Y-%m-%d").to_string();
        let mut pages = vec![("/".to_string(), "weekly", "1.0")];
        pages.extend(
            self.catalog
                .tools()
                .map(|(_, tool)| (tool.path(), "monthly", "0.8")),
        );

        let mut xml = String::from(concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" ",
            "xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n"
        ));
        for (path, changefreq, priority) in pages {
            xml.push_str("  <url>\n");
            let _ = writeln!(
                xml,
                "    <loc>{}</loc>",
                encode_text(&self.url_for(&path, Locale::DEFAULT))
            );
            let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
            let _ = writeln!(xml, "    <changefreq>{changefreq}</changefreq>");
            let _ = writeln!(xml, "    <priority>{priority}</priority>");
            for alternate in self.alternates(&path) {
                let _ = writeln!(
                    xml,
                    r#"    <xhtml:link rel="alternate" hreflang="{}" href="{}"/>"#,
                    encode_double_quoted_attribute(&alternate.hreflang),
                    encode_double_quoted_attribute(&alternate.href)
                );
            }
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }

    pub fn robots_txt(&self) -> String {
        format!(
            "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
            self.site_url
        )
    }

    /// 1200x630 SVG card. Blank or missing fields use the site title and
    /// description; long ones are cut with an ellipsis.
    pub fn og_image_svg(
        &self,
        locale: Locale,
        title: Option<&str>,
        description: Option<&str>,
    ) -> String {
        let site_name = self.messages.get(locale, "site.title");
        let title = non_blank(title).unwrap_or(site_name);
        let description =
            non_blank(description).unwrap_or_else(|| self.messages.get(locale, "site.description"));

        let title = truncate_chars(title, OG_TITLE_MAX_CHARS);
        let description = truncate_chars(description, OG_DESCRIPTION_MAX_CHARS);

        let lines: String = wrap_chars(&description, OG_DESCRIPTION_LINE_CHARS)
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                format!(
                    r#"<tspan x="80" y="{}">{}</tspan>"#,
                    370 + idx as u32 * OG_DESCRIPTION_LINE_HEIGHT,
                    encode_text(line)
                )
            })
            .collect();

        let host = self
            .site_url
            .split_once("://")
            .map_or(self.site_url.as_str(), |(_, host)| host);

        OG_IMAGE_TEMPLATE
            .replace("{{SITE_NAME}}", &encode_text(site_name))
            .replace("{{TITLE}}", &encode_text(&title))
            .replace("{{DESCRIPTION_LINES}}", &lines)
            .replace("{{SITE_HOST}}", &encode_text(host))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Keep at most `max` characters, replacing the tail with `…` when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Greedy word wrap by character count. Runs without spaces (CJK text, long
/// URLs) are split hard.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = current.chars().count();
            let needed = word.len() + usize::from(used > 0);
            if used + needed <= width {
                if used > 0 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            let rest = word.split_off(width.min(word.len()));
            lines.push(word.into_iter().collect());
            word = rest;
            if word.is_empty() {
                break;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SeoService {
        SeoService::new(
            "https://tools.example.com/",
            Catalog::builtin(),
            MessageCatalog::builtin(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
    }

    #[test]
    fn default_locale_urls_have_no_lang_parameter() {
        let seo = service();
        assert_eq!(seo.url_for("/", Locale::Zh), "https://tools.example.com/");
        assert_eq!(
            seo.url_for("/tools/base64", Locale::En),
            "https://tools.example.com/tools/base64?lang=en"
        );
    }

    #[test]
    fn alternates_cover_every_locale_and_x_default() {
        let alternates = service().alternates("/tools/timestamp");
        let tags: Vec<_> = alternates.iter().map(|a| a.hreflang.as_str()).collect();
        assert_eq!(tags, vec!["zh-CN", "en", "x-default"]);
        assert_eq!(alternates[2].href, alternates[0].href);
    }

    #[test]
    fn home_metadata_has_website_search_action() {
        let metadata = service().home_metadata(Locale::En);
        assert_eq!(metadata.canonical, "https://tools.example.com/?lang=en");
        assert_eq!(metadata.open_graph.locale, "en_US");
        assert_eq!(metadata.open_graph.alternate_locales, vec!["zh_CN"]);
        assert_eq!(metadata.json_ld.len(), 1);
        assert_eq!(metadata.json_ld[0]["@type"], "WebSite");
        assert_eq!(metadata.json_ld[0]["potentialAction"]["@type"], "SearchAction");
        assert!(!metadata.keywords.is_empty());
    }

    #[test]
    fn tool_metadata_has_application_and_breadcrumbs() {
        let seo = service();
        let metadata = seo.tool_metadata("json-formatter", Locale::En).unwrap();
        assert!(metadata.title.starts_with("JSON Formatter - "));
        assert_eq!(metadata.json_ld[0]["@type"], "WebApplication");
        assert_eq!(
            metadata.json_ld[0]["applicationCategory"],
            "DeveloperApplication"
        );
        assert_eq!(metadata.json_ld[0]["offers"]["price"], "0");
        assert_eq!(metadata.json_ld[1]["@type"], "BreadcrumbList");
        assert_eq!(
            metadata.json_ld[1]["itemListElement"][2]["item"],
            "https://tools.example.com/tools/json-formatter?lang=en"
        );
        assert!(metadata.open_graph.image.starts_with("https://tools.example.com/og?title="));

        assert!(seo.tool_metadata("nope", Locale::En).is_none());
    }

    #[test]
    fn head_html_escapes_and_includes_json_ld() {
        let mut metadata = service().home_metadata(Locale::Zh);
        metadata.description = r#"quote " and <tag>"#.to_string();
        metadata.json_ld = vec![json!({"name": "</script><script>alert(1)"})];

        let head = metadata.head_html();
        assert!(head.contains(r#"content="quote &quot; and &lt;tag&gt;""#));
        assert!(head.contains(r#"hreflang="x-default""#));
        assert!(head.contains(r#"property="og:image:width" content="1200""#));
        assert!(!head.contains("</script><script>"));
        assert!(!head.contains("noindex"));
    }

    #[test]
    fn sitemap_lists_home_and_every_tool() {
        let seo = service();
        let xml = seo.sitemap_xml();
        assert_eq!(xml.matches("<url>").count(), 1 + Catalog::builtin().tool_count());
        assert!(xml.contains("<loc>https://tools.example.com/</loc>"));
        for (_, tool) in Catalog::builtin().tools() {
            assert!(xml.contains(&format!(
                "<loc>https://tools.example.com/tools/{}</loc>",
                tool.id
            )));
        }
        assert!(xml.contains("<lastmod>2024-05-01</lastmod>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains(r#"hreflang="en" href="https://tools.example.com/tools/base64?lang=en""#));
    }

    #[test]
    fn robots_policy() {
        assert_eq!(
            service().robots_txt(),
            "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: https://tools.example.com/sitemap.xml\n"
        );
    }

    #[test]
    fn og_image_defaults_escapes_and_truncates() {
        let seo = service();
        let svg = seo.og_image_svg(Locale::En, None, Some("  "));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1200" height="630""#));
        assert!(svg.contains("tools.example.com"));

        let svg = seo.og_image_svg(Locale::En, Some("<b>&</b>"), Some("short"));
        assert!(svg.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(!svg.contains("<b>"));

        let long = "x".repeat(200);
        let svg = seo.og_image_svg(Locale::En, Some(&long), None);
        assert!(svg.contains(&format!("{}…", "x".repeat(OG_TITLE_MAX_CHARS - 1))));
        assert!(!svg.contains(&"x".repeat(OG_TITLE_MAX_CHARS)));
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("开发者工具箱", 10), "开发者工具箱");
        assert_eq!(truncate_chars("开发者工具箱", 4), "开发者…");
    }

    #[test]
    fn wrap_breaks_on_spaces_and_splits_long_runs() {
        assert_eq!(wrap_chars("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap_chars("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_chars("", 3), Vec::<String>::new());
    }
}
