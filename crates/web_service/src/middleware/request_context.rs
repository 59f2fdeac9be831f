//! Per-request presentation settings resolved from query, cookies and headers.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpMessage, HttpRequest};
use serde::Deserialize;
use toolbox_core::{
    locale::LOCALE_COOKIE,
    palette::Platform,
    resolve_locale,
    sidebar::{is_mobile_user_agent, SIDEBAR_COLLAPSED_COOKIE, SIDEBAR_EXPANDED_COOKIE},
    theme::THEME_COOKIE,
    Catalog, Locale, LocaleSources, SidebarState, Theme,
};

use super::tracing_middleware::TraceId;

#[derive(Debug, Default, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub locale: Locale,
    pub theme: Theme,
    pub sidebar: SidebarState,
    pub platform: Platform,
    pub trace_id: Option<String>,
}

impl RequestContext {
    pub fn resolve(req: &HttpRequest, catalog: &Catalog) -> Self {
        let query = web::Query::<LangQuery>::from_query(req.query_string())
            .map(web::Query::into_inner)
            .unwrap_or_default();
        let locale_cookie = cookie_value(req, LOCALE_COOKIE);
        let accept_language = header_value(req, header::ACCEPT_LANGUAGE);

        let locale = resolve_locale(LocaleSources {
            query: query.lang.as_deref(),
            cookie: locale_cookie.as_deref(),
            accept_language: accept_language.as_deref(),
        });

        let user_agent = header_value(req, header::USER_AGENT).unwrap_or_default();
        let sidebar = SidebarState::from_cookies(
            catalog,
            cookie_value(req, SIDEBAR_COLLAPSED_COOKIE).as_deref(),
            cookie_value(req, SIDEBAR_EXPANDED_COOKIE).as_deref(),
            is_mobile_user_agent(&user_agent),
        );

        Self {
            locale,
            theme: Theme::from_cookie(cookie_value(req, THEME_COOKIE).as_deref()),
            sidebar,
            platform: Platform::from_user_agent(&user_agent),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(|id| id.as_str().to_string()),
        }
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::resolve(req, &Catalog::builtin())))
    }
}

/// Cookie values may arrive percent-encoded (we write the JSON sidebar value
/// that way); decoding an unencoded value is a no-op.
fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    let cookie = req.cookie(name)?;
    let raw = cookie.value();
    Some(
        urlencoding::decode(raw)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw.to_string()),
    )
}

fn header_value(req: &HttpRequest, name: header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
