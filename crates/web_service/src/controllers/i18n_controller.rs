use actix_web::{get, web, HttpResponse};
use toolbox_core::Locale;

use crate::dto::MessagesResponse;
use crate::error::AppError;
use crate::server::AppState;

/// Every UI string of one locale, with default-locale strings filling gaps.
#[get("/i18n/{locale}")]
pub async fn get_messages(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let tag = path.into_inner();
    let locale: Locale = tag.parse().map_err(|_| AppError::UnsupportedLocale(tag))?;

    Ok(HttpResponse::Ok().json(MessagesResponse {
        locale: locale.as_str().to_string(),
        html_lang: locale.html_lang().to_string(),
        messages: app_state.messages.entries(locale),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_messages);
}
