//! Cookie-backed UI preferences. Each endpoint answers `204 No Content`
//! with the cookies to store; nothing is kept server side.

use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    post, web, HttpResponse,
};
use toolbox_core::{
    locale::{UnsupportedLocale, LOCALE_COOKIE},
    sidebar::{sanitize, SIDEBAR_COLLAPSED_COOKIE, SIDEBAR_EXPANDED_COOKIE},
    theme::{UnknownTheme, THEME_COOKIE},
    Locale, Theme,
};

use crate::dto::{LocalePreference, SidebarPreference, ThemePreference};
use crate::error::AppError;
use crate::server::AppState;

pub const PREFERENCE_MAX_AGE_DAYS: i64 = 365;

/// A site-wide cookie kept for a year.
pub fn preference_cookie(name: &str, value: &str) -> Cookie<'static> {
    Cookie::build(name.to_string(), value.to_string())
        .path("/")
        .max_age(Duration::days(PREFERENCE_MAX_AGE_DAYS))
        .same_site(SameSite::Lax)
        .finish()
}

#[post("/preferences/locale")]
pub async fn set_locale(payload: web::Json<LocalePreference>) -> Result<HttpResponse, AppError> {
    let locale: Locale = payload
        .locale
        .parse()
        .map_err(|e: UnsupportedLocale| AppError::BadPreference(e.to_string()))?;

    Ok(HttpResponse::NoContent()
        .cookie(preference_cookie(LOCALE_COOKIE, locale.as_str()))
        .finish())
}

#[post("/preferences/theme")]
pub async fn set_theme(payload: web::Json<ThemePreference>) -> Result<HttpResponse, AppError> {
    let theme: Theme = payload
        .theme
        .parse()
        .map_err(|e: UnknownTheme| AppError::BadPreference(e.to_string()))?;

    Ok(HttpResponse::NoContent()
        .cookie(preference_cookie(THEME_COOKIE, theme.as_str()))
        .finish())
}

/// Store the collapsed flag and/or the expanded categories. Unknown
/// category ids are dropped before the cookie is written.
#[post("/preferences/sidebar")]
pub async fn set_sidebar(
    app_state: web::Data<AppState>,
    payload: web::Json<SidebarPreference>,
) -> Result<HttpResponse, AppError> {
    let SidebarPreference {
        collapsed,
        expanded_categories,
    } = payload.into_inner();

    if collapsed.is_none() && expanded_categories.is_none() {
        return Err(AppError::BadPreference(
            "expected 'collapsed' or 'expanded_categories'".to_string(),
        ));
    }

    let mut response = HttpResponse::NoContent();
    if let Some(collapsed) = collapsed {
        response.cookie(preference_cookie(
            SIDEBAR_COLLAPSED_COOKIE,
            &collapsed.to_string(),
        ));
    }
    if let Some(ids) = expanded_categories {
        let ids = sanitize(&app_state.catalog, ids);
        let json = serde_json::to_string(&ids)?;
        response.cookie(preference_cookie(
            SIDEBAR_EXPANDED_COOKIE,
            &urlencoding::encode(&json),
        ));
    }

    Ok(response.finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(set_locale)
        .service(set_theme)
        .service(set_sidebar);
}
