//! Server-rendered HTML pages: the navigation shell (sidebar, top bar,
//! command palette) around the home, tool and not-found pages.

use std::collections::HashMap;
use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};
use toolbox_core::{
    palette::{PaletteState, SearchHit},
    Catalog, Locale, LocalizedTool, MessageCatalog, Theme, ToolResult,
};

use super::form_builder::{render_fields, FormField};
use super::seo_service::PageMetadata;
use crate::middleware::RequestContext;

const LAYOUT_TEMPLATE: &str = include_str!("../../templates/layout.html");

/// How a successful tool result is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Text,
    /// Rendered HTML, shown as a preview next to its source.
    Html,
    /// A URL of an image to embed.
    ImageUrl,
}

pub fn output_kind(tool_id: &str) -> OutputKind {
    match tool_id {
        "markdown-preview" => OutputKind::Html,
        "qr-code" => OutputKind::ImageUrl,
        _ => OutputKind::Text,
    }
}

fn attr(value: &str) -> String {
    encode_double_quoted_attribute(value).into_owned()
}

fn text(value: &str) -> String {
    encode_text(value).into_owned()
}

pub struct PageRenderer<'a> {
    ctx: &'a RequestContext,
    catalog: Catalog,
    messages: &'static MessageCatalog,
}

impl<'a> PageRenderer<'a> {
    pub fn new(ctx: &'a RequestContext, catalog: Catalog, messages: &'static MessageCatalog) -> Self {
        Self {
            ctx,
            catalog,
            messages,
        }
    }

    fn locale(&self) -> Locale {
        self.ctx.locale
    }

    fn t(&self, key: &'static str) -> &'static str {
        self.messages.get(self.locale(), key)
    }

    /// `path` with the `lang` parameter for non-default locales.
    pub fn localized_path(&self, path: &str) -> String {
        if self.locale().is_default() {
            path.to_string()
        } else {
            format!("{path}?lang={}", self.locale().as_str())
        }
    }

    /// Wrap `main` in the full document.
    pub fn render(
        &self,
        metadata: &PageMetadata,
        current_path: &str,
        active_tool: Option<&str>,
        main: &str,
    ) -> String {
        let sidebar = &self.ctx.sidebar;
        let mut body_class = Vec::new();
        if sidebar.collapsed && !sidebar.is_mobile {
            body_class.push("sidebar-collapsed");
        }
        if sidebar.is_mobile {
            body_class.push("mobile");
        }

        // main goes last so user input is never scanned for placeholders
        LAYOUT_TEMPLATE
            .replace("{{HTML_LANG}}", self.locale().html_lang())
            .replace("{{THEME}}", self.ctx.theme.as_str())
            .replace("{{BODY_CLASS}}", &body_class.join(" "))
            .replace("{{LOCALE}}", self.locale().as_str())
            .replace("{{MOBILE}}", if sidebar.is_mobile { "true" } else { "false" })
            .replace("{{HEAD}}", &metadata.head_html())
            .replace("{{SIDEBAR}}", &self.sidebar(active_tool))
            .replace("{{TOPBAR}}", &self.topbar(current_path))
            .replace("{{PALETTE}}", &self.palette())
            .replace("{{MAIN}}", main)
    }

    fn sidebar(&self, active_tool: Option<&str>) -> String {
        let mut state = self.ctx.sidebar.clone();
        if let Some((category, _)) = active_tool.and_then(|id| self.catalog.find_tool(id)) {
            state.expand(category.id);
        }

        let mut html = format!(
            r#"<aside class="sidebar" id="sidebar"><nav aria-label="{}">"#,
            attr(self.t("nav.tools"))
        );
        for category in self.catalog.localized(self.messages, self.locale()) {
            let open = if state.is_expanded(&category.id) { " open" } else { "" };
            let _ = write!(
                html,
                r#"<details data-category="{}"{open}><summary>{}</summary><ul>"#,
                attr(&category.id),
                text(&category.name)
            );
            for tool in &category.tools {
                let current = if Some(tool.id.as_str()) == active_tool {
                    r#" aria-current="page""#
                } else {
                    ""
                };
                let _ = write!(
                    html,
                    r#"<li><a href="{}"{current}>{}</a></li>"#,
                    attr(&self.localized_path(&tool.path)),
                    text(&tool.name)
                );
            }
            html.push_str("</ul></details>");
        }
        let _ = write!(
            html,
            r#"<div class="sidebar-actions"><button type="button" data-expand="all">{}</button><button type="button" data-expand="none">{}</button></div></nav></aside>"#,
            text(self.t("nav.expand_all")),
            text(self.t("nav.collapse_all"))
        );
        html
    }

    fn topbar(&self, current_path: &str) -> String {
        let shortcut = PaletteState::new(self.ctx.platform).toggle_label();

        let languages: String = Locale::all()
            .iter()
            .map(|locale| {
                let current = if *locale == self.locale() {
                    r#" aria-current="true""#
                } else {
                    ""
                };
                format!(
                    r#"<a href="{}?lang={}" hreflang="{}"{current}>{}</a> "#,
                    attr(current_path),
                    locale.as_str(),
                    locale.html_lang(),
                    text(locale.display_name())
                )
            })
            .collect();

        let themes: String = Theme::all()
            .iter()
            .map(|theme| {
                let label_key = theme.label_key();
                format!(
                    r#"<button type="button" data-theme-choice="{}" aria-pressed="{}">{}</button>"#,
                    theme.as_str(),
                    *theme == self.ctx.theme,
                    text(self.messages.get(self.locale(), &label_key))
                )
            })
            .collect();

        format!(
            concat!(
                r#"<header class="topbar">"#,
                r#"<button type="button" id="sidebar-toggle" aria-controls="sidebar" aria-label="{toggle}">&#9776;</button>"#,
                r#"<a href="{home}"><strong>{site}</strong></a>"#,
                r#"<span class="spacer"></span>"#,
                r#"<button type="button" data-palette-open>{search} <kbd>{shortcut}</kbd></button>"#,
                r#"<nav aria-label="{language}">{languages}</nav>"#,
                r#"<div role="group" aria-label="{theme}">{themes}</div>"#,
                r#"</header>"#
            ),
            toggle = attr(self.t("nav.toggle_sidebar")),
            home = attr(&self.localized_path("/")),
            site = text(self.t("site.title")),
            search = text(self.t("palette.placeholder")),
            shortcut = text(&shortcut),
            language = attr(self.t("nav.language")),
            languages = languages,
            theme = attr(self.t("nav.theme")),
            themes = themes,
        )
    }

    fn palette(&self) -> String {
        let shortcut = PaletteState::new(self.ctx.platform).toggle_label();
        let hint = self
            .messages
            .format(self.locale(), "palette.shortcut_hint", &[("shortcut", &shortcut)]);
        format!(
            concat!(
                r#"<dialog id="palette" aria-label="{label}">"#,
                r#"<input type="search" placeholder="{placeholder}" autocomplete="off" aria-controls="palette-results">"#,
                r#"<ul id="palette-results" role="listbox"></ul>"#,
                r#"<p class="muted" data-empty hidden>{empty}</p>"#,
                r#"<p class="muted"><small>{hint}</small></p>"#,
                r#"</dialog>"#
            ),
            label = attr(self.t("palette.placeholder")),
            placeholder = attr(self.t("palette.placeholder")),
            empty = text(self.t("palette.empty")),
            hint = text(&hint),
        )
    }

    /// Home page body. `query` and `hits` come from the `q` parameter.
    pub fn home(&self, query: Option<&str>, hits: &[SearchHit]) -> String {
        let count = self.catalog.tool_count().to_string();
        let mut html = format!(
            r#"<section class="hero"><h1>{}</h1><p class="muted">{}</p><p class="muted">{}</p></section>"#,
            text(self.t("home.heading")),
            text(self.t("home.subtitle")),
            text(
                &self
                    .messages
                    .format(self.locale(), "home.tool_count", &[("count", &count)])
            )
        );

        if let Some(query) = query {
            let heading =
                self.messages
                    .format(self.locale(), "home.search_results", &[("query", query)]);
            let _ = write!(
                html,
                r#"<section class="search-results"><h2>{}</h2>"#,
                text(&heading)
            );
            if hits.is_empty() {
                let _ = write!(html, r#"<p class="muted">{}</p>"#, text(self.t("palette.empty")));
            } else {
                html.push_str(r#"<div class="grid">"#);
                for hit in hits {
                    html.push_str(&self.tool_card(&hit.tool));
                }
                html.push_str("</div>");
            }
            html.push_str("</section>");
        }

        for category in self.catalog.localized(self.messages, self.locale()) {
            let _ = write!(
                html,
                r#"<section id="category-{}"><h2>{}</h2><div class="grid">"#,
                attr(&category.id),
                text(&category.name)
            );
            for tool in &category.tools {
                html.push_str(&self.tool_card(tool));
            }
            html.push_str("</div></section>");
        }
        html
    }

    fn tool_card(&self, tool: &LocalizedTool) -> String {
        format!(
            r#"<a class="card" href="{}" data-icon="{}"><h3>{}</h3><p>{}</p></a>"#,
            attr(&self.localized_path(&tool.path)),
            attr(&tool.icon),
            text(&tool.name),
            text(&tool.description)
        )
    }

    /// Tool page body: breadcrumb, form, and the result of the last run.
    pub fn tool_page(
        &self,
        tool: &LocalizedTool,
        category_id: &str,
        category_name: &str,
        fields: &[FormField],
        values: Option<&HashMap<String, String>>,
        outcome: Option<&ToolResult>,
    ) -> String {
        let home = self.localized_path("/");
        let mut html = format!(
            concat!(
                r#"<nav class="breadcrumb muted"><a href="{home}">{home_label}</a> / "#,
                r#"<a href="{home}#category-{category_id}">{category}</a> / <span>{name}</span></nav>"#,
                r#"<h1>{name}</h1><p class="muted">{description}</p>"#,
                r#"<form method="post" action="{action}" data-tool="{tool_id}">"#
            ),
            home = attr(&home),
            home_label = text(self.t("nav.home")),
            category_id = attr(category_id),
            category = text(category_name),
            name = text(&tool.name),
            description = text(&tool.description),
            action = attr(&self.localized_path(&tool.path)),
            tool_id = attr(&tool.id),
        );
        html.push_str(&render_fields(fields, values, self.messages, self.locale()));
        let _ = write!(
            html,
            r#"<button type="submit">{}</button></form>"#,
            text(self.t("form.submit"))
        );

        if let Some(outcome) = outcome {
            html.push_str(&self.outcome(tool, outcome));
        }
        html
    }

    fn outcome(&self, tool: &LocalizedTool, outcome: &ToolResult) -> String {
        if !outcome.success {
            return format!(
                r#"<section class="error" role="alert"><strong>{}</strong><p>{}</p></section>"#,
                text(self.t("form.error")),
                text(&outcome.result)
            );
        }

        let body = match output_kind(&tool.id) {
            OutputKind::Text => format!("<pre><code>{}</code></pre>", text(&outcome.result)),
            // the markdown renderer already escapes raw HTML from the source
            OutputKind::Html => format!(
                r#"<h3>{}</h3><div class="preview">{}</div><h3>HTML</h3><pre><code>{}</code></pre>"#,
                text(self.t("form.preview")),
                outcome.result,
                text(&outcome.result)
            ),
            OutputKind::ImageUrl => format!(
                r#"<img src="{}" alt="{}" loading="lazy"><pre><code>{}</code></pre>"#,
                attr(&outcome.result),
                attr(&tool.name),
                text(&outcome.result)
            ),
        };

        format!(
            r#"<section class="output" aria-live="polite"><h2>{}</h2>{body}</section>"#,
            text(self.t("form.output"))
        )
    }

    pub fn not_found(&self) -> String {
        format!(
            r#"<section class="not-found"><h1>{}</h1><p class="muted">{}</p><p><a href="{}">{}</a></p></section>"#,
            text(self.t("page.not_found.title")),
            text(self.t("page.not_found.description")),
            attr(&self.localized_path("/")),
            text(self.t("page.back_home"))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::form_builder::fields_from_schema;
    use crate::services::seo_service::SeoService;
    use chrono::NaiveDate;
    use serde_json::json;
    use toolbox_core::{palette::Platform, SidebarState};

    fn context(locale: Locale) -> RequestContext {
        RequestContext {
            locale,
            theme: Theme::Dark,
            sidebar: SidebarState::default_for(&Catalog::builtin(), false),
            platform: Platform::Mac,
            trace_id: None,
        }
    }

    fn seo() -> SeoService {
        SeoService::new(
            "http://localhost:8080",
            Catalog::builtin(),
            MessageCatalog::builtin(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    fn tool(id: &str, locale: Locale) -> LocalizedTool {
        let (_, info) = Catalog::builtin().find_tool(id).unwrap();
        LocalizedTool::new(info, MessageCatalog::builtin(), locale)
    }

    #[test]
    fn layout_carries_locale_theme_and_shortcut() {
        let ctx = context(Locale::En);
        let renderer = PageRenderer::new(&ctx, Catalog::builtin(), MessageCatalog::builtin());
        let page = renderer.render(&seo().home_metadata(Locale::En), "/", None, "<p>body</p>");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<html lang="en" data-theme="dark">"#));
        assert!(page.contains("<kbd>⌘K</kbd>"));
        assert!(page.contains(r#"data-theme-choice="dark" aria-pressed="true""#));
        assert!(page.contains(r#"<a href="/tools/base64?lang=en">"#));
        assert!(page.contains("<p>body</p>"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn collapsed_sidebar_and_active_category() {
        let mut ctx = context(Locale::Zh);
        ctx.sidebar.collapsed = true;
        ctx.sidebar.expanded_categories.clear();
        let renderer = PageRenderer::new(&ctx, Catalog::builtin(), MessageCatalog::builtin());
        let page = renderer.render(&seo().home_metadata(Locale::Zh), "/tools/base64", Some("base64"), "");

        assert!(page.contains(r#"<body class="sidebar-collapsed""#));
        assert!(page.contains(r#"<details data-category="encoding" open>"#));
        assert!(page.contains(r#"<details data-category="converters">"#));
        assert!(page.contains(r#"<a href="/tools/base64" aria-current="page">"#));
    }

    #[test]
    fn main_content_is_not_treated_as_template() {
        let ctx = context(Locale::Zh);
        let renderer = PageRenderer::new(&ctx, Catalog::builtin(), MessageCatalog::builtin());
        let page = renderer.render(&seo().home_metadata(Locale::Zh), "/", None, "{{HEAD}}");
        assert_eq!(page.matches("{{HEAD}}").count(), 1);
    }

    #[test]
    fn home_lists_categories_and_search_hits() {
        let ctx = context(Locale::En);
        let renderer = PageRenderer::new(&ctx, Catalog::builtin(), MessageCatalog::builtin());
        let hits = toolbox_core::palette::search(
            &Catalog::builtin(),
            MessageCatalog::builtin(),
            Locale::En,
            "json",
            10,
        );
        let html = renderer.home(Some("json"), &hits);

        assert!(html.contains(r#"<section id="category-encoding">"#));
        assert!(html.contains("Results for “json”"));
        assert!(html.contains("8 tools"));

        let none = renderer.home(Some("zzz"), &[]);
        assert!(none.contains(MessageCatalog::builtin().get(Locale::En, "palette.empty")));
    }

    #[test]
    fn tool_page_renders_form_and_outcomes() {
        let ctx = context(Locale::En);
        let renderer = PageRenderer::new(&ctx, Catalog::builtin(), MessageCatalog::builtin());
        let base64 = tool("base64", Locale::En);
        let fields = fields_from_schema(&json!({
            "type": "object",
            "properties": { "text": { "type": "string", "format": "multiline" } },
            "required": ["text"]
        }));

        let ok = renderer.tool_page(
            &base64,
            "encoding",
            "Encoding",
            &fields,
            None,
            Some(&ToolResult::ok("<aGk=>")),
        );
        assert!(ok.contains(r#"<form method="post" action="/tools/base64?lang=en""#));
        assert!(ok.contains("<pre><code>&lt;aGk=&gt;</code></pre>"));

        let failed = renderer.tool_page(
            &base64,
            "encoding",
            "Encoding",
            &fields,
            None,
            Some(&ToolResult::failed("Invalid Base64 <input>")),
        );
        assert!(failed.contains(r#"<section class="error" role="alert">"#));
        assert!(failed.contains("Invalid Base64 &lt;input&gt;"));
    }

    #[test]
    fn special_outputs() {
        let ctx = context(Locale::En);
        let renderer = PageRenderer::new(&ctx, Catalog::builtin(), MessageCatalog::builtin());

        let qr = renderer.tool_page(
            &tool("qr-code", Locale::En),
            "generators",
            "Generators",
            &[],
            None,
            Some(&ToolResult::ok("https://qr.example/?size=200x200&data=hi")),
        );
        assert!(qr.contains(r#"<img src="https://qr.example/?size=200x200&amp;data=hi""#));

        let md = renderer.tool_page(
            &tool("markdown-preview", Locale::En),
            "formatting",
            "Formatting",
            &[],
            None,
            Some(&ToolResult::ok("<h1>Title</h1>\n")),
        );
        assert!(md.contains(r#"<div class="preview"><h1>Title</h1>"#));
        assert!(md.contains("&lt;h1&gt;Title&lt;/h1&gt;"));
    }

    #[test]
    fn not_found_links_home() {
        let ctx = context(Locale::En);
        let renderer = PageRenderer::new(&ctx, Catalog::builtin(), MessageCatalog::builtin());
        let html = renderer.not_found();
        assert!(html.contains(r#"<a href="/?lang=en">"#));
    }
}
